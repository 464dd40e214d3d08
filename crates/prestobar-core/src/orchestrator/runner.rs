//! One plugin run: connectivity → session → fetch → aggregate → present.

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::aggregate::{aggregate_fare_payments, AggregateError};
use crate::card::{CardError, CardService, LoginOutcome};
use crate::connectivity::ConnectivityProbe;
use crate::humanize::from_now;
use crate::menu::{balance_view, fare_payments_menu, notice, BalanceView, MenuLine};
use crate::money::{parse_dollar_amount, MoneyError};
use crate::status::{classify_balance, classify_freshness, elapsed_hours};

use super::config::RunConfig;
use super::state::{RunState, Terminal};

const OFFLINE_TITLE: &str = ":x: No internet";
const OFFLINE_MESSAGE: &str = "Not connected to internet";
const WARNING_TITLE: &str = ":warning:";
const BAD_CREDENTIALS_MESSAGE: &str = "Bad credentials?";
const NO_CARD_MESSAGE: &str = "No card associated with this account";

/// Failure inside the fetch/aggregate region of a run
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("invalid balance: {0}")]
    Balance(#[from] MoneyError),
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub terminal: Terminal,
    pub menu: Vec<MenuLine>,
    /// Whether a session existed, and so a logout was attempted
    pub session_established: bool,
}

enum Session {
    Established,
    Rejected,
}

/// Drives a single run against a card service and a connectivity probe
pub struct Orchestrator<S, P> {
    service: S,
    probe: P,
    config: RunConfig,
}

impl<S: CardService, P: ConnectivityProbe> Orchestrator<S, P> {
    pub fn new(service: S, probe: P, config: RunConfig) -> Self {
        Self {
            service,
            probe,
            config,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run with the current time
    pub async fn run(&self) -> RunOutcome {
        self.run_at(Utc::now()).await
    }

    /// Run as if it were `now`.
    ///
    /// Never fails: every error ends in a terminal state with its own menu.
    pub async fn run_at(&self, now: DateTime<Utc>) -> RunOutcome {
        let mut state = RunState::CheckingConnectivity;
        debug!("Run: {}", state);

        if !self.probe.is_online().await {
            return self.finish(&mut state, Terminal::Offline, false);
        }

        advance(&mut state, RunState::CheckingSession);
        match self.ensure_session(&mut state).await {
            Ok(Session::Established) => {}
            Ok(Session::Rejected) => {
                return self.finish(&mut state, Terminal::LoginFailed, false);
            }
            Err(e) => {
                warn!("Session setup failed: {}", e);
                return self.finish(&mut state, Terminal::Error(e.to_string()), false);
            }
        }

        advance(&mut state, RunState::Fetching);
        let result = self.fetch_view(&mut state, now).await;

        // Logout regardless of how the protected region ended
        if let Err(e) = self.service.logout().await {
            warn!("Logout failed: {}", e);
        }

        match result {
            Ok(menu) => {
                advance(&mut state, RunState::Finished(Terminal::Done));
                RunOutcome {
                    terminal: Terminal::Done,
                    menu,
                    session_established: true,
                }
            }
            Err(FetchError::Card(CardError::NoCard)) => {
                self.finish(&mut state, Terminal::NoCard, true)
            }
            Err(e) => {
                warn!("Fetch failed: {}", e);
                self.finish(&mut state, Terminal::Error(e.to_string()), true)
            }
        }
    }

    async fn ensure_session(&self, state: &mut RunState) -> Result<Session, CardError> {
        if self.service.is_logged_in().await? {
            debug!("Reusing existing session");
            return Ok(Session::Established);
        }

        advance(state, RunState::LoggingIn);
        let credentials = &self.config.credentials;
        match self
            .service
            .login(&credentials.username, &credentials.password)
            .await?
        {
            LoginOutcome::Success => {
                info!("Logged in as {}", credentials.username);
                Ok(Session::Established)
            }
            LoginOutcome::Rejected => {
                warn!("Login rejected for {}", credentials.username);
                Ok(Session::Rejected)
            }
        }
    }

    async fn fetch_view(
        &self,
        state: &mut RunState,
        now: DateTime<Utc>,
    ) -> Result<Vec<MenuLine>, FetchError> {
        let balance = self.service.balance().await?;

        let today = now.with_timezone(&Local).date_naive();
        let (start, end) = self.config.fetch_window(today);
        let activity = self
            .service
            .activity_by_date_range(start, end, self.config.page_size)
            .await?;
        debug!("Fetched {} activity records", activity.len());

        let summary = aggregate_fare_payments(&activity)?;
        let numeric_balance = parse_dollar_amount(&balance.balance)?;

        advance(state, RunState::Rendering);
        let palette = &self.config.palette;
        let thresholds = &self.config.thresholds;
        let hours = elapsed_hours(balance.last_updated_on, now);
        let balance_status = classify_balance(numeric_balance, hours, thresholds);
        let freshness_status = classify_freshness(hours, thresholds);
        let updated_phrase = from_now(balance.last_updated_on, now);

        Ok(balance_view(BalanceView {
            icon: self.config.icon.clone(),
            balance_text: &balance.balance,
            balance_color: palette.color_for(balance_status),
            updated_phrase: &updated_phrase,
            freshness_color: palette.color_for(freshness_status),
            url: &self.config.url,
            fares: fare_payments_menu(&summary, &palette.neutral),
        }))
    }

    fn finish(&self, state: &mut RunState, terminal: Terminal, session: bool) -> RunOutcome {
        let menu = self.notice_for(&terminal);
        advance(state, RunState::Finished(terminal.clone()));
        RunOutcome {
            terminal,
            menu,
            session_established: session,
        }
    }

    fn notice_for(&self, terminal: &Terminal) -> Vec<MenuLine> {
        let icon = self.config.icon.clone();
        let warning = &self.config.palette.warning;
        match terminal {
            Terminal::Offline => notice(icon, OFFLINE_TITLE, OFFLINE_MESSAGE, warning),
            Terminal::LoginFailed => notice(icon, WARNING_TITLE, BAD_CREDENTIALS_MESSAGE, warning),
            Terminal::NoCard => notice(icon, WARNING_TITLE, NO_CARD_MESSAGE, warning),
            Terminal::Error(message) => notice(icon, WARNING_TITLE, message, warning),
            // The balance view is built by fetch_view; nothing to add here
            Terminal::Done => Vec::new(),
        }
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!("Run: {} -> {}", state, next);
    *state = next;
}

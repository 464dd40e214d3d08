//! Card service client for a JSON/HTTP card-account gateway.
//!
//! The gateway fronts the card vendor's website and keeps the login session in
//! cookies, so a single [`ureq::Agent`] (with its cookie jar) is shared by all
//! calls of a run. ureq is blocking; each call runs on tokio's blocking pool.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body};

use super::service::{CardError, CardService};
use super::types::{ActivityRecord, BalanceSnapshot, LoginOutcome};

/// Error code the gateway returns when the account has no card
const NO_CARD_CODE: &str = "no_card";

#[derive(Debug, Deserialize)]
struct SessionResponse {
    logged_in: bool,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`CardService`] backed by the HTTP gateway
#[derive(Clone)]
pub struct HttpCardService {
    agent: Agent,
    base_url: String,
}

impl HttpCardService {
    /// Create a client for the gateway at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Run a blocking request on the blocking pool
    async fn blocking<T, F>(&self, call: F) -> Result<T, CardError>
    where
        F: FnOnce(Agent) -> Result<T, CardError> + Send + 'static,
        T: Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || call(agent))
            .await
            .map_err(|e| CardError::Transport(format!("request task failed: {}", e)))?
    }
}

impl CardService for HttpCardService {
    async fn is_logged_in(&self) -> Result<bool, CardError> {
        let url = self.endpoint("session");
        self.blocking(move |agent| {
            let response = agent.get(&url).call().map_err(transport)?;
            let session: SessionResponse = read_json(response)?;
            Ok(session.logged_in)
        })
        .await
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, CardError> {
        let url = self.endpoint("login");
        let username = username.to_string();
        let password = password.to_string();
        self.blocking(move |agent| {
            let request = LoginRequest {
                username: &username,
                password: &password,
            };
            let response = agent.post(&url).send_json(&request).map_err(transport)?;
            // Some gateways answer a rejected login with 401 instead of success=false
            if response.status().as_u16() == 401 {
                return Ok(LoginOutcome::Rejected);
            }
            let login: LoginResponse = read_json(response)?;
            Ok(if login.success {
                LoginOutcome::Success
            } else {
                LoginOutcome::Rejected
            })
        })
        .await
    }

    async fn balance(&self) -> Result<BalanceSnapshot, CardError> {
        let url = self.endpoint("balance");
        self.blocking(move |agent| {
            let response = agent.get(&url).call().map_err(transport)?;
            read_json(response)
        })
        .await
    }

    async fn activity_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page_size: u32,
    ) -> Result<Vec<ActivityRecord>, CardError> {
        let url = self.endpoint("activity");
        debug!("Requesting activity {} .. {} (page size {})", start, end, page_size);
        self.blocking(move |agent| {
            let response = agent
                .get(&url)
                .query("start", start.format("%Y-%m-%d").to_string())
                .query("end", end.format("%Y-%m-%d").to_string())
                .query("page_size", page_size.to_string())
                .call()
                .map_err(transport)?;
            read_json(response)
        })
        .await
    }

    async fn logout(&self) -> Result<(), CardError> {
        let url = self.endpoint("logout");
        self.blocking(move |agent| {
            let mut response = agent.post(&url).send_empty().map_err(transport)?;
            let status = response.status().as_u16();
            if (200..300).contains(&status) {
                Ok(())
            } else {
                let body = response.body_mut().read_to_string().unwrap_or_default();
                Err(classify_error_status(status, &body))
            }
        })
        .await
    }
}

fn transport(err: ureq::Error) -> CardError {
    CardError::Transport(err.to_string())
}

/// Decode a 2xx JSON body, or classify the failure status
fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T, CardError> {
    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        let body = response.body_mut().read_to_string().unwrap_or_default();
        return Err(classify_error_status(status, &body));
    }

    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| CardError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| CardError::Decode(e.to_string()))
}

/// Map a non-success response onto a [`CardError`]
fn classify_error_status(status: u16, body: &str) -> CardError {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if status == 404 && parsed.error == NO_CARD_CODE {
            return CardError::NoCard;
        }
        return CardError::Unexpected {
            status,
            message: parsed.error,
        };
    }

    CardError::Unexpected {
        status,
        message: body.trim().chars().take(200).collect(),
    }
}

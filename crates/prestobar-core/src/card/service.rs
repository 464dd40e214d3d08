use std::future::Future;

use chrono::NaiveDate;
use thiserror::Error;

use super::types::{ActivityRecord, BalanceSnapshot, LoginOutcome};

/// Error type for card service operations
#[derive(Debug, Error)]
pub enum CardError {
    /// The account has no card registered to it
    #[error("no card associated with this account")]
    NoCard,

    /// The service could not be reached or the connection broke
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a status it should not have
    #[error("unexpected response from card service ({status}): {message}")]
    Unexpected { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("failed to decode card service response: {0}")]
    Decode(String),
}

/// Authenticated access to a card account.
///
/// Calls are issued one at a time by the orchestrator; implementations keep
/// whatever session state (cookies, tokens) they need between calls.
pub trait CardService: Send + Sync {
    /// Whether a session already exists
    fn is_logged_in(&self) -> impl Future<Output = Result<bool, CardError>> + Send;

    /// Authenticate with account credentials
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginOutcome, CardError>> + Send;

    /// Current balance of the account's card
    fn balance(&self) -> impl Future<Output = Result<BalanceSnapshot, CardError>> + Send;

    /// Activity between two dates (inclusive), at most `page_size` records
    fn activity_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<ActivityRecord>, CardError>> + Send;

    /// End the session
    fn logout(&self) -> impl Future<Output = Result<(), CardError>> + Send;
}

//! Card account access: data model, service trait and the HTTP gateway client.

pub mod http;
pub mod service;
pub mod types;

pub use http::HttpCardService;
pub use service::{CardError, CardService};
pub use types::{ActivityRecord, ActivityType, BalanceSnapshot, LoginOutcome};

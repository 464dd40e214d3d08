//! Top-level run state machine.

mod config;
mod runner;
mod state;

pub use config::{
    Credentials, RunConfig, DEFAULT_CARD_URL, DEFAULT_HISTORY_YEARS, DEFAULT_PAGE_SIZE,
    MAX_HISTORY_YEARS,
};
pub use runner::{FetchError, Orchestrator, RunOutcome};
pub use state::{RunState, Terminal};

//! PRESTO card balance and fare history for menu-bar plugins.
//!
//! The crate is organised as a forward-only pipeline:
//! connectivity → session → fetch → aggregate → present.
//! Remote collaborators sit behind the [`card::CardService`] and
//! [`connectivity::ConnectivityProbe`] traits so the orchestrator can be
//! driven by in-memory fakes in tests.

pub mod aggregate;
pub mod card;
pub mod connectivity;
pub mod humanize;
pub mod icon;
pub mod menu;
pub mod money;
pub mod orchestrator;
pub mod status;

pub use aggregate::{aggregate_fare_payments, FareSummary, MonthlyTotals};
pub use card::{
    ActivityRecord, ActivityType, BalanceSnapshot, CardError, CardService, HttpCardService,
    LoginOutcome,
};
pub use connectivity::{ConnectivityProbe, TcpProbe};
pub use menu::{render, MenuItem, MenuLine};
pub use orchestrator::{Credentials, Orchestrator, RunConfig, RunOutcome, RunState, Terminal};
pub use status::{classify_balance, classify_freshness, Palette, StatusColor, Thresholds};

//! PRESTO card balance and fare history for menu-bar plugin hosts.
//!
//! The binary wires settings into [`prestobar_core`]'s orchestrator and
//! prints the rendered menu on stdout.

pub mod app;
pub mod config;

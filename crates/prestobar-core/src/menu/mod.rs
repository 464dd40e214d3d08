//! Menu model, assembly and plugin-protocol rendering.

pub mod builder;
pub mod render;
pub mod types;

pub use builder::{balance_view, fare_payments_menu, notice, BalanceView};
pub use render::render;
pub use types::{MenuItem, MenuLine};

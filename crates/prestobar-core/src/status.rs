//! Balance and freshness classification into host color states.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete health state shown by the menu-bar title and status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Good,
    Warning,
    Bad,
    /// Balance data older than the staleness threshold
    Stale,
}

/// Thresholds driving the classifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    /// Balances strictly above this are healthy
    pub low_balance: Decimal,
    /// Data older than this many whole hours is stale
    pub stale_after_hours: i64,
    /// Freshness degrades to bad once this many hours have elapsed
    pub freshness_bad_hours: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_balance: Decimal::new(600, 2),
            stale_after_hours: 24,
            freshness_bad_hours: 48,
        }
    }
}

/// Whole hours elapsed between `updated` and `now`, truncated toward zero
pub fn elapsed_hours(updated: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - updated).num_hours()
}

/// Classify a balance, letting staleness win over the balance value.
pub fn classify_balance(
    balance: Decimal,
    elapsed_hours: i64,
    thresholds: &Thresholds,
) -> StatusColor {
    if elapsed_hours > thresholds.stale_after_hours {
        return StatusColor::Stale;
    }

    if balance > thresholds.low_balance {
        StatusColor::Good
    } else if balance <= Decimal::ZERO {
        StatusColor::Bad
    } else {
        StatusColor::Warning
    }
}

/// Classify how recent the card system's last update is, ignoring the balance.
pub fn classify_freshness(elapsed_hours: i64, thresholds: &Thresholds) -> StatusColor {
    if elapsed_hours <= thresholds.stale_after_hours {
        StatusColor::Good
    } else if elapsed_hours < thresholds.freshness_bad_hours {
        StatusColor::Warning
    } else {
        StatusColor::Bad
    }
}

/// Mapping from status to the host's color keywords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_good")]
    pub good: String,
    #[serde(default = "default_warning")]
    pub warning: String,
    #[serde(default = "default_bad")]
    pub bad: String,
    #[serde(default = "default_stale")]
    pub stale: String,
    /// Color for fare payment history leaves
    #[serde(default = "default_neutral")]
    pub neutral: String,
}

fn default_good() -> String {
    "green".to_string()
}

fn default_warning() -> String {
    "orange".to_string()
}

fn default_bad() -> String {
    "red".to_string()
}

fn default_stale() -> String {
    "gray".to_string()
}

fn default_neutral() -> String {
    "white".to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            good: default_good(),
            warning: default_warning(),
            bad: default_bad(),
            stale: default_stale(),
            neutral: default_neutral(),
        }
    }
}

impl Palette {
    /// Color keyword for a status
    pub fn color_for(&self, status: StatusColor) -> &str {
        match status {
            StatusColor::Good => &self.good,
            StatusColor::Warning => &self.warning,
            StatusColor::Bad => &self.bad,
            StatusColor::Stale => &self.stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_above_threshold_is_good() {
        let t = Thresholds::default();
        assert_eq!(classify_balance(dec!(6.01), 0, &t), StatusColor::Good);
        assert_eq!(classify_balance(dec!(250), 24, &t), StatusColor::Good);
    }

    #[test]
    fn test_balance_at_threshold_is_warning() {
        let t = Thresholds::default();
        assert_eq!(classify_balance(dec!(6.00), 0, &t), StatusColor::Warning);
        assert_eq!(classify_balance(dec!(0.01), 3, &t), StatusColor::Warning);
    }

    #[test]
    fn test_non_positive_balance_is_bad() {
        let t = Thresholds::default();
        assert_eq!(classify_balance(dec!(0), 0, &t), StatusColor::Bad);
        assert_eq!(classify_balance(dec!(-2.50), 10, &t), StatusColor::Bad);
    }

    #[test]
    fn test_staleness_wins_over_balance() {
        let t = Thresholds::default();
        assert_eq!(classify_balance(dec!(100), 25, &t), StatusColor::Stale);
        assert_eq!(classify_balance(dec!(-1), 25, &t), StatusColor::Stale);
    }

    #[test]
    fn test_freshness_boundaries() {
        let t = Thresholds::default();
        assert_eq!(classify_freshness(0, &t), StatusColor::Good);
        assert_eq!(classify_freshness(24, &t), StatusColor::Good);
        assert_eq!(classify_freshness(25, &t), StatusColor::Warning);
        assert_eq!(classify_freshness(47, &t), StatusColor::Warning);
        assert_eq!(classify_freshness(48, &t), StatusColor::Bad);
    }

    #[test]
    fn test_elapsed_hours_truncates() {
        let now = Utc::now();
        let updated = now - chrono::Duration::minutes(24 * 60 + 59);
        assert_eq!(elapsed_hours(updated, now), 24);
    }

    #[test]
    fn test_palette_lookup() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(StatusColor::Good), "green");
        assert_eq!(palette.color_for(StatusColor::Stale), "gray");
    }
}

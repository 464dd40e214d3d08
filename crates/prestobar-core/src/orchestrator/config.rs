use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::status::{Palette, Thresholds};

/// Default number of past calendar years of activity to request
pub const DEFAULT_HISTORY_YEARS: i32 = 2;

/// Upper bound on `history_years`
pub const MAX_HISTORY_YEARS: i32 = 100;

/// Default activity page size, large enough to fetch the window in one call
pub const DEFAULT_PAGE_SIZE: u32 = 9999;

/// Default card website linked from the status line
pub const DEFAULT_CARD_URL: &str = "https://prestocard.ca";

/// Card account credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything a single run needs besides its collaborators
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub thresholds: Thresholds,
    pub palette: Palette,
    /// Activity is requested from January 1st of (this year - history_years)
    pub history_years: i32,
    pub page_size: u32,
    /// Card website linked from the status line
    pub url: String,
    /// Base64-encoded status line icon
    pub icon: Option<String>,
}

impl RunConfig {
    /// Config with default thresholds, palette and window
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            thresholds: Thresholds::default(),
            palette: Palette::default(),
            history_years: DEFAULT_HISTORY_YEARS,
            page_size: DEFAULT_PAGE_SIZE,
            url: DEFAULT_CARD_URL.to_string(),
            icon: None,
        }
    }

    /// Inclusive activity date range ending `today`.
    ///
    /// `history_years` is clamped to `0..=MAX_HISTORY_YEARS`.
    pub fn fetch_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let years = self.history_years.clamp(0, MAX_HISTORY_YEARS);
        let start = NaiveDate::from_ymd_opt(today.year() - years, 1, 1).unwrap_or(today);
        (start, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_window_starts_at_new_year() {
        let config = RunConfig::new(Credentials::new("user", "pass"));
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let (start, end) = config.fetch_window(today);
        assert_eq!(start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn test_fetch_window_clamps_history_years() {
        let mut config = RunConfig::new(Credentials::new("user", "pass"));
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();

        config.history_years = 300_000;
        let (start, end) = config.fetch_window(today);
        assert_eq!(start, NaiveDate::from_ymd_opt(1924, 1, 1).unwrap());
        assert_eq!(end, today);

        config.history_years = -5;
        let (start, _) = config.fetch_window(today);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("me@example.com", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}

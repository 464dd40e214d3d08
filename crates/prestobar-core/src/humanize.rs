//! "3 hours ago" style relative time phrases.

use chrono::{DateTime, Utc};

/// Average days per month over the 400-year Gregorian cycle
const DAYS_PER_MONTH: f64 = 146_097.0 / 4_800.0;

/// Describe `then` relative to `now`, e.g. "a few seconds ago", "in 2 days".
///
/// Each unit is rounded to nearest and the first matching bucket wins:
/// <45s, ≤1 min, <45 min, ≤1 h, <22 h, ≤1 d, <26 d, ≤1 month, <11 months,
/// ≤1 year, then years.
pub fn from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now - then;
    let phrase = describe(delta.num_milliseconds().unsigned_abs() as f64 / 1000.0);

    if delta.num_milliseconds() < 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn describe(exact_secs: f64) -> String {
    let exact_days = exact_secs / 86_400.0;
    let exact_months = exact_days / DAYS_PER_MONTH;

    let seconds = exact_secs.round();
    let minutes = (exact_secs / 60.0).round();
    let hours = (exact_secs / 3_600.0).round();
    let days = exact_days.round();
    let months = exact_months.round();
    let years = (exact_months / 12.0).round();

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes)
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours)
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days)
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{} months", months)
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(delta: Duration) -> String {
        let now = Utc::now();
        from_now(now - delta, now)
    }

    #[test]
    fn test_seconds_and_minutes() {
        assert_eq!(ago(Duration::seconds(0)), "a few seconds ago");
        assert_eq!(ago(Duration::seconds(44)), "a few seconds ago");
        assert_eq!(ago(Duration::seconds(45)), "a minute ago");
        assert_eq!(ago(Duration::seconds(89)), "a minute ago");
        assert_eq!(ago(Duration::minutes(2)), "2 minutes ago");
        assert_eq!(ago(Duration::minutes(44)), "44 minutes ago");
    }

    #[test]
    fn test_hours_and_days() {
        assert_eq!(ago(Duration::minutes(45)), "an hour ago");
        assert_eq!(ago(Duration::hours(2)), "2 hours ago");
        assert_eq!(ago(Duration::hours(21)), "21 hours ago");
        assert_eq!(ago(Duration::hours(22)), "a day ago");
        assert_eq!(ago(Duration::hours(36)), "2 days ago");
        assert_eq!(ago(Duration::days(25)), "25 days ago");
    }

    #[test]
    fn test_months_and_years() {
        assert_eq!(ago(Duration::days(26)), "a month ago");
        assert_eq!(ago(Duration::days(61)), "2 months ago");
        assert_eq!(ago(Duration::days(320)), "a year ago");
        assert_eq!(ago(Duration::days(365 * 3)), "3 years ago");
    }

    #[test]
    fn test_future_timestamps() {
        let now = Utc::now();
        assert_eq!(from_now(now + Duration::hours(3), now), "in 3 hours");
    }
}

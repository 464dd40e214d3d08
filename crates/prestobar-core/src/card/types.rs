//! Card account data as delivered by the card service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label the card service uses for fare deductions
const FARE_PAYMENT_LABEL: &str = "Fare Payment";

/// Kind of an activity record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityType {
    /// Deduction for transit usage
    FarePayment,
    /// Load, transfer, adjustment, or anything else the service reports
    Other(String),
}

impl ActivityType {
    /// Map a service label onto an activity type
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(FARE_PAYMENT_LABEL) {
            ActivityType::FarePayment
        } else {
            ActivityType::Other(label.to_string())
        }
    }

    /// Service label for this activity type
    pub fn label(&self) -> &str {
        match self {
            ActivityType::FarePayment => FARE_PAYMENT_LABEL,
            ActivityType::Other(label) => label,
        }
    }

    /// Whether this record is a fare payment
    pub fn is_fare_payment(&self) -> bool {
        matches!(self, ActivityType::FarePayment)
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(ActivityType::from_label(&label))
    }
}

/// A single card activity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Service timestamp, e.g. "1/05/2024 3:45:12 PM"
    pub date: String,
    /// Signed display amount, e.g. "$3.30"
    pub amount: String,
    /// Record kind
    #[serde(rename = "type")]
    pub kind: ActivityType,
}

impl ActivityRecord {
    pub fn new(date: impl Into<String>, amount: impl Into<String>, kind: ActivityType) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            kind,
        }
    }
}

/// Current balance as reported by the card system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Display balance, e.g. "$10.00"
    pub balance: String,
    /// When the card system last synchronised the balance
    pub last_updated_on: DateTime<Utc>,
}

/// Result of a login attempt that reached the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// The service rejected the credentials
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_from_label() {
        assert_eq!(
            ActivityType::from_label("Fare Payment"),
            ActivityType::FarePayment
        );
        assert_eq!(
            ActivityType::from_label(" fare payment "),
            ActivityType::FarePayment
        );
        assert_eq!(
            ActivityType::from_label("Load Amount"),
            ActivityType::Other("Load Amount".to_string())
        );
    }

    #[test]
    fn test_deserialize_activity_record() {
        let json = r#"{"date":"1/05/2024 3:45:12 PM","amount":"$3.30","type":"Fare Payment"}"#;
        let record: ActivityRecord = serde_json::from_str(json).expect("Should parse record");
        assert_eq!(record.kind, ActivityType::FarePayment);
        assert_eq!(record.amount, "$3.30");
    }

    #[test]
    fn test_deserialize_balance() {
        let json = r#"{"balance":"$10.00","last_updated_on":"2024-03-01T12:00:00Z"}"#;
        let balance: BalanceSnapshot = serde_json::from_str(json).expect("Should parse balance");
        assert_eq!(balance.balance, "$10.00");
        assert_eq!(balance.last_updated_on.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }
}

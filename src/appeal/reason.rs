//! The closed set of appeal reasons.
//!
//! Customers pick from a fixed menu; anything else is rejected at
//! validation time. The canonical display strings are the Russian
//! phrases shown in the intake form, and they are also the serialized
//! representation of the field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why the customer is appealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppealReason {
    /// "нет доступа к сети"
    #[serde(rename = "нет доступа к сети")]
    NoNetwork,
    /// "не работает телефон"
    #[serde(rename = "не работает телефон")]
    PhoneNotWorking,
    /// "не приходят письма"
    #[serde(rename = "не приходят письма")]
    NoEmails,
}

impl AppealReason {
    /// Every member of the closed set, in declaration order.
    pub const ALL: [AppealReason; 3] = [
        AppealReason::NoNetwork,
        AppealReason::PhoneNotWorking,
        AppealReason::NoEmails,
    ];

    /// Canonical display string for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppealReason::NoNetwork => "нет доступа к сети",
            AppealReason::PhoneNotWorking => "не работает телефон",
            AppealReason::NoEmails => "не приходят письма",
        }
    }
}

impl fmt::Display for AppealReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppealReason {
    type Err = UnknownReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| UnknownReason(s.to_string()))
    }
}

/// A value outside the closed reason set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReason(pub String);

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown appeal reason: '{}'", self.0)
    }
}

impl std::error::Error for UnknownReason {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_member_round_trips_through_display() {
        for reason in AppealReason::ALL {
            let parsed: AppealReason = reason.as_str().parse().unwrap();
            assert_eq!(parsed, reason);
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        let result = "unknown".parse::<AppealReason>();
        assert_eq!(result, Err(UnknownReason("unknown".to_string())));
    }

    #[test]
    fn test_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&AppealReason::NoNetwork).unwrap();
        assert_eq!(json, "\"нет доступа к сети\"");

        let parsed: AppealReason = serde_json::from_str("\"не работает телефон\"").unwrap();
        assert_eq!(parsed, AppealReason::PhoneNotWorking);
    }

    #[test]
    fn test_case_sensitive_matching() {
        assert!("Нет доступа к сети".parse::<AppealReason>().is_err());
    }
}

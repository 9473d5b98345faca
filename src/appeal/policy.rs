//! Configurable validation policy.
//!
//! The name alphabet, the name length cap and the phone digit range
//! are domain policy, not invariants: deployments may be asked to
//! relax them. They arrive through the config file and compile into a
//! [`ValidationPolicy`] once at boot; the defaults reproduce the
//! intake form's historical behavior (Cyrillic names, 10-15 digits).

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy knobs as they appear in the config file (`validation` block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Maximum length of surname/name, in characters
    #[serde(default = "default_name_max_len")]
    pub name_max_len: usize,

    /// Minimum digit count for a phone number after stripping
    #[serde(default = "default_phone_min_digits")]
    pub phone_min_digits: usize,

    /// Maximum digit count for a phone number after stripping
    #[serde(default = "default_phone_max_digits")]
    pub phone_max_digits: usize,

    /// Full-match pattern for surname/name values
    #[serde(default = "default_name_alphabet")]
    pub name_alphabet: String,
}

fn default_name_max_len() -> usize {
    50
}
fn default_phone_min_digits() -> usize {
    10
}
fn default_phone_max_digits() -> usize {
    15
}
fn default_name_alphabet() -> String {
    r"^[А-Яа-яЁё\s-]+$".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            name_max_len: default_name_max_len(),
            phone_min_digits: default_phone_min_digits(),
            phone_max_digits: default_phone_max_digits(),
            name_alphabet: default_name_alphabet(),
        }
    }
}

/// Policy construction errors; these are fatal at boot.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid name alphabet pattern '{pattern}': {source}")]
    BadAlphabet {
        pattern: String,
        source: regex::Error,
    },

    #[error("phone digit range is empty: min {min} > max {max}")]
    EmptyDigitRange { min: usize, max: usize },

    #[error("name_max_len must be > 0")]
    ZeroNameLength,
}

/// Compiled policy handed to the validator.
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    name_max_len: usize,
    phone_min_digits: usize,
    phone_max_digits: usize,
    name_alphabet: Regex,
    phone_charset: Regex,
    email_shape: Regex,
}

impl ValidationPolicy {
    /// Compiles a policy from config values.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        if config.name_max_len == 0 {
            return Err(PolicyError::ZeroNameLength);
        }
        if config.phone_min_digits > config.phone_max_digits {
            return Err(PolicyError::EmptyDigitRange {
                min: config.phone_min_digits,
                max: config.phone_max_digits,
            });
        }

        let name_alphabet =
            Regex::new(&config.name_alphabet).map_err(|source| PolicyError::BadAlphabet {
                pattern: config.name_alphabet.clone(),
                source,
            })?;

        Ok(Self {
            name_max_len: config.name_max_len,
            phone_min_digits: config.phone_min_digits,
            phone_max_digits: config.phone_max_digits,
            name_alphabet,
            // Digits, spaces, hyphens, parentheses, optional leading +.
            phone_charset: Regex::new(r"^\+?[0-9\s\-()]+$").expect("static pattern"),
            // local@domain with at least one dot in the domain.
            email_shape: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("static pattern"),
        })
    }

    pub fn name_max_len(&self) -> usize {
        self.name_max_len
    }

    pub fn phone_min_digits(&self) -> usize {
        self.phone_min_digits
    }

    pub fn phone_max_digits(&self) -> usize {
        self.phone_max_digits
    }

    pub fn name_alphabet(&self) -> &Regex {
        &self.name_alphabet
    }

    pub fn phone_charset(&self) -> &Regex {
        &self.phone_charset
    }

    pub fn email_shape(&self) -> &Regex {
        &self.email_shape
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default()).expect("default policy compiles")
    }
}

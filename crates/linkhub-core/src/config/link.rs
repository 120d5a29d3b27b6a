//! Link key configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest key length the issuer accepts.
pub const MIN_KEY_LENGTH: usize = 8;
/// Longest key length the `links.key` column can hold.
pub const MAX_KEY_LENGTH: usize = 20;

/// Settings for link key issuance and resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Length of newly issued keys.
    #[serde(default = "default_key_length")]
    pub key_length: usize,
    /// Older key lengths that must still resolve.
    #[serde(default = "default_legacy_key_lengths")]
    pub legacy_key_lengths: Vec<usize>,
    /// Maximum number of candidates tried before issuance gives up.
    #[serde(default = "default_max_issue_attempts")]
    pub max_issue_attempts: u32,
}

impl LinkConfig {
    /// Validate the key settings.
    pub fn validate(&self) -> Result<(), AppError> {
        let in_range = |len: usize| (MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&len);
        if !in_range(self.key_length) {
            return Err(AppError::configuration(format!(
                "links.key_length must be between {MIN_KEY_LENGTH} and {MAX_KEY_LENGTH}"
            )));
        }
        if let Some(bad) = self.legacy_key_lengths.iter().find(|len| !in_range(**len)) {
            return Err(AppError::configuration(format!(
                "links.legacy_key_lengths contains unsupported length {bad}"
            )));
        }
        if self.max_issue_attempts == 0 {
            return Err(AppError::configuration(
                "links.max_issue_attempts must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether a key of this length may be resolved.
    pub fn accepts_length(&self, len: usize) -> bool {
        len == self.key_length || self.legacy_key_lengths.contains(&len)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            key_length: default_key_length(),
            legacy_key_lengths: default_legacy_key_lengths(),
            max_issue_attempts: default_max_issue_attempts(),
        }
    }
}

fn default_key_length() -> usize {
    11
}

fn default_legacy_key_lengths() -> Vec<usize> {
    vec![20]
}

fn default_max_issue_attempts() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LinkConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.accepts_length(11));
        assert!(config.accepts_length(20));
        assert!(!config.accepts_length(5));
    }

    #[test]
    fn test_rejects_out_of_range_length() {
        let config = LinkConfig {
            key_length: 32,
            ..LinkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let config = LinkConfig {
            max_issue_attempts: 0,
            ..LinkConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

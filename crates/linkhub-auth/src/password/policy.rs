//! Policy for account passwords.
//!
//! Resource passwords are shared secrets chosen by the resource owner and
//! are not subject to this policy.

use linkhub_core::config::AuthConfig;
use linkhub_core::error::AppError;

/// Validates new account passwords against configured policy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }

        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic())
            || !password.chars().any(|c| c.is_ascii_digit())
        {
            return Err(AppError::validation(
                "Password must contain at least one letter and one digit",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too easy to guess, try a longer passphrase",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy() {
        let policy = PasswordPolicy::new(&AuthConfig::default());
        assert!(policy.validate("        ").is_err());
        assert!(policy.validate("short1").is_err());
        assert!(policy.validate("onlyletters").is_err());
        assert!(policy.validate("12345678").is_err());
        assert!(policy.validate("Corr3ct-horse-battery-staple").is_ok());
    }

    #[test]
    fn test_guessable_password_is_rejected() {
        let policy = PasswordPolicy::new(&AuthConfig::default());
        for weak in ["password1", "letters123", "qwerty123"] {
            let err = policy.validate(weak).expect_err(weak);
            assert!(err.to_string().contains("too easy to guess"), "{weak}: {err}");
        }
    }
}

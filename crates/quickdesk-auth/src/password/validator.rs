//! Password policy enforcement for new passwords.

use quickdesk_core::config::AuthConfig;
use quickdesk_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password, returning the first violation found.
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

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(min_length: usize) -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            password_min_length: min_length,
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_min_length() {
        let v = validator(6);
        assert!(v.validate("abc").is_err());
        assert!(v.validate("abcdef").is_ok());
    }

    #[test]
    fn test_blank_rejected() {
        assert!(validator(1).validate("   ").is_err());
    }
}

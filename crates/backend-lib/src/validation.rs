// ============================
// crates/backend-lib/src/validation.rs
// ============================
//! Request validation.
//!
//! Shape checks only. Passwords get length bounds and nothing more, so
//! ordinary passphrases with symbols and digits pass unchanged; whether
//! credentials actually match is the login handler's business.
use coffer_common::{CreateAccountRequest, LoginRequest};
use thiserror::Error;

use crate::error::AppError;

// Common validation constants
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_NAME_LENGTH: usize = 50;

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid account number: {0}")]
    InvalidNumber(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Validate the fields of an account registration.
pub fn validate_registration(request: &CreateAccountRequest) -> ValidationResult<()> {
    validate_name(&request.first_name, "first name")?;
    validate_name(&request.last_name, "last name")?;
    validate_password(&request.password)
}

/// Validate a login request's shape, rejecting only values that could
/// never name an account.
pub fn validate_login(request: &LoginRequest) -> ValidationResult<()> {
    if request.number < 0 {
        return Err(ValidationError::InvalidNumber(
            "account numbers are non-negative".to_string(),
        ));
    }
    if request.password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str, field: &str) -> ValidationResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidName(format!(
            "{field} must not be empty"
        )));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidName(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(first: &str, last: &str, password: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_ordinary_registration_passes() {
        assert!(validate_registration(&registration("Ali", "Raza", "password@123")).is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validate_registration(&registration("Ali", "Raza", "short")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPassword(_)));
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(validate_registration(&registration("", "Raza", "password@123")).is_err());
        assert!(validate_registration(&registration("Ali", "   ", "password@123")).is_err());
    }

    #[test]
    fn test_oversized_name_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_registration(&registration(&long, "Raza", "password@123")).is_err());
    }

    #[test]
    fn test_login_shape_checks() {
        let ok = LoginRequest {
            number: 0,
            password: "password@123".to_string(),
        };
        assert!(validate_login(&ok).is_ok());

        let negative = LoginRequest {
            number: -1,
            password: "password@123".to_string(),
        };
        assert!(matches!(
            validate_login(&negative),
            Err(ValidationError::InvalidNumber(_))
        ));

        let empty = LoginRequest {
            number: 1,
            password: String::new(),
        };
        assert!(validate_login(&empty).is_err());
    }

    #[test]
    fn test_validation_maps_to_invalid_input() {
        let err = ValidationError::InvalidPassword("too short".to_string());
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::InvalidInput(_)));
        assert_eq!(app_err.error_code(), "VAL_001");
    }
}

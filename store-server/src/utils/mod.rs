//! Utility module - common helpers and re-exports
//!
//! # Contents
//!
//! - [`AppError`] / [`ApiResponse`] - unified error types (from `shared::error`)
//! - [`logger`] - tracing setup
//! - [`validate_request`] - validator-derive integration

pub mod logger;

// Re-export error types from shared so handlers import from one place
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use validator::Validate;

/// Run validator-derive checks and convert the first failure into a 400
///
/// The reported message keeps the field name so clients can surface
/// field-level errors inline.
pub fn validate_request<T: Validate>(req: &T) -> AppResult<()> {
    req.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                (field.to_string(), message)
            });

        match detail {
            Some((field, message)) => {
                AppError::validation(message).with_detail("field", field)
            }
            None => AppError::validation("Validation failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email(message = "A valid email is required"))]
        email: String,
    }

    #[test]
    fn test_validate_request_passes_valid_input() {
        let probe = Probe {
            email: "ada@example.com".into(),
        };
        assert!(validate_request(&probe).is_ok());
    }

    #[test]
    fn test_validate_request_reports_field() {
        let probe = Probe {
            email: "nope".into(),
        };
        let err = validate_request(&probe).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "A valid email is required");
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            &serde_json::json!("email")
        );
    }
}

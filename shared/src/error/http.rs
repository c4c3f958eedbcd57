//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::EmailExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::AdminRequired
            | Self::CannotDeleteSelf
            | Self::NotResourceOwner => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::UpstreamError
            | Self::PaymentFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::OrderNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ProductNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ErrorCode::UserNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_forbidden_status() {
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::NotResourceOwner.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_validation_defaults_to_bad_request() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::OrderInvalidStatus.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ShippingAddressIncomplete.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_failures_are_server_errors() {
        assert_eq!(
            ErrorCode::PaymentFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

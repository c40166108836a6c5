// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why the authorization gate refused a request.
///
/// Logged server-side only. Every reason maps to the same status code,
/// error code and message on the wire, so a caller cannot tell which
/// check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No `x-jwt-token` header, or an empty one
    MissingToken,
    /// Token failed signature, algorithm or expiry checks
    InvalidToken,
    /// The path-addressed account does not exist
    UnknownAccount,
    /// Token is valid but bound to a different account
    NotOwner,
}

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("permission denied")]
    Forbidden(RejectReason),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Account number {0} already in use")]
    DuplicateNumber(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateNumber(_)
            | AppError::Storage(_)
            | AppError::Signing(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Forbidden(_) => "AUTH_002",
            AppError::NotFound(_) => "NF_001",
            AppError::DuplicateNumber(_) => "STORE_002",
            AppError::Storage(_) => "STORE_001",
            AppError::Signing(_) => "TOKEN_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            // These two double as login/gate protocol strings and must
            // stay constant across every path that produces them.
            AppError::InvalidCredentials => "invalid credentials".to_string(),
            AppError::Forbidden(_) => "permission denied".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::DuplicateNumber(_) => "An internal server error occurred".to_string(),
            AppError::Storage(_) => "Storage backend error".to_string(),
            AppError::Signing(_) => "Token signing failed".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production.
        // InvalidCredentials and Forbidden display their sanitized form
        // already, so debug builds leak nothing through either.
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        // Create a JSON response with error details
        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    const ALL_REASONS: [RejectReason; 4] = [
        RejectReason::MissingToken,
        RejectReason::InvalidToken,
        RejectReason::UnknownAccount,
        RejectReason::NotOwner,
    ];

    #[test]
    fn test_app_error_display() {
        // Display for the two protocol errors carries no detail at all
        assert_eq!(AppError::InvalidCredentials.to_string(), "invalid credentials");
        for reason in ALL_REASONS {
            assert_eq!(AppError::Forbidden(reason).to_string(), "permission denied");
        }

        let nf = AppError::NotFound("account with id [7] not found".to_string());
        assert!(nf.to_string().contains("Not found"));

        let dup = AppError::DuplicateNumber(12345);
        assert_eq!(dup.to_string(), "Account number 12345 already in use");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        for reason in ALL_REASONS {
            assert_eq!(
                AppError::Forbidden(reason).status_code(),
                StatusCode::FORBIDDEN
            );
        }
        assert_eq!(
            AppError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidInput("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DuplicateNumber(1).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        assert_eq!(
            AppError::Storage(sqlite_err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "AUTH_001");
        assert_eq!(
            AppError::Forbidden(RejectReason::MissingToken).error_code(),
            "AUTH_002"
        );
        assert_eq!(AppError::NotFound("test".to_string()).error_code(), "NF_001");
        assert_eq!(AppError::DuplicateNumber(1).error_code(), "STORE_002");
        assert_eq!(
            AppError::Storage(rusqlite::Error::QueryReturnedNoRows).error_code(),
            "STORE_001"
        );
        assert_eq!(
            AppError::InvalidInput("test".to_string()).error_code(),
            "VAL_001"
        );
        assert_eq!(AppError::Internal("test".to_string()).error_code(), "INT_001");
    }

    #[test]
    fn test_error_from_impls() {
        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        let app_err: AppError = sqlite_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));

        let string_err = "String error".to_string();
        let app_err: AppError = string_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));

        let str_err = "Str error";
        let app_err: AppError = str_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_forbidden_responses_identical_across_reasons() {
        // A caller must not be able to tell which gate check failed
        let mut bodies = Vec::new();
        for reason in ALL_REASONS {
            let response = AppError::Forbidden(reason).into_response();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            bodies.push(bytes);
        }
        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response_headers = response.headers();
        assert!(response_headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "AUTH_001");
        assert_eq!(body["error"]["message"], "invalid credentials");
    }
}

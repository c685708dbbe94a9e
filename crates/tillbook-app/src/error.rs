//! # App Error Type
//!
//! Unified error type for controller operations.
//!
//! ## Error Handling Strategy
//! Controllers validate, then mutate, then persist. Any failure along that
//! path becomes an [`AppError`] carrying a machine-readable [`ErrorCode`]
//! and a human-readable message. Validation and referential failures are
//! expected and routine; storage failures are the only ones that mean data
//! was not saved, and they must reach the operator rather than a log file.

use serde::Serialize;

use tillbook_core::{CoreError, ValidationError};
use tillbook_store::StoreError;

/// Error returned from controller operations.
///
/// Serializes as `{ "code": "...", "message": "..." }` for any UI surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for controller responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A record is still referenced by other records
    ReferentialIntegrity,

    /// Cart operation failed
    CartError,

    /// Requested quantity exceeds current stock
    InsufficientStock,

    /// The persisted state could not be written
    StorageError,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::OutOfStock { .. } | CoreError::InsufficientStock { .. } => {
                ErrorCode::InsufficientStock
            }
            CoreError::EmptyCart => ErrorCode::CartError,
            CoreError::CategoryInUse { .. } => ErrorCode::ReferentialIntegrity,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        // The log keeps the full cause chain; the operator gets the summary
        tracing::error!(error = %err, "store operation failed");
        AppError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for controller operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err: AppError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: AppError = CoreError::OutOfStock {
            name: "Milk".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err: AppError = CoreError::CategoryInUse {
            name: "Grocery".to_string(),
            product_count: 3,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ReferentialIntegrity);
    }

    #[test]
    fn test_serializes_with_code_and_message() {
        let err = AppError::not_found("Product", "p1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: p1");
    }
}

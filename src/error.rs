//! Error types for Assetum

use thiserror::Error;

/// Application error codes surfaced to the console layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    StorageFailure = 3,
    NoSuchRecord = 5,
    BadValue = 18,
    InvalidTransition = 22,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Stable numeric code for the error category
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchRecord,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::BusinessRule(_) => ErrorCode::InvalidTransition,
            AppError::Storage(_) | AppError::Serialization(_) | AppError::Io(_) => {
                ErrorCode::StorageFailure
            }
            AppError::Config(_) => ErrorCode::Failure,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(max = 100, message = "Health must be between 0 and 100"))]
        health: u8,
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let err: AppError = Probe { health: 140 }.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "health: Health must be between 0 and 100")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound("x".into()).code(), ErrorCode::NoSuchRecord);
        assert_eq!(
            AppError::BusinessRule("x".into()).code(),
            ErrorCode::InvalidTransition
        );
    }
}

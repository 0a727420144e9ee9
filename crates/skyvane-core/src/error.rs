//! Centralized error types for Skyvane.
//!
//! Every failure surfaced to the user converts into [`AppError`], which
//! carries a UI-appropriate message alongside the full error chain for logs.

use thiserror::Error;

pub use skyvane_weather::WeatherError;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Storage(e) => e.user_message().to_string(),
        }
    }
}

/// Local persistence errors (favorites file).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {0}")]
    ReadFailed(String),

    #[error("Failed to write {0}")]
    WriteFailed(String),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::ReadFailed(_) => "Saved favorites could not be read.",
            StorageError::WriteFailed(_) => "Favorites could not be saved. Please try again.",
            StorageError::Corrupt(_) => "Saved favorites are corrupted and were reset.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors = vec![
            AppError::Weather(WeatherError::MalformedResponse("x".into())),
            AppError::Storage(StorageError::ReadFailed("x".into())),
            AppError::Storage(StorageError::WriteFailed("x".into())),
            AppError::Storage(StorageError::Corrupt("x".into())),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "{:?}", err);
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let err = WeatherError::NotFound {
            city: "Nowhere".into(),
            status: Some(404),
            source: None,
        };
        let app_err: AppError = err.into();
        assert!(matches!(app_err, AppError::Weather(WeatherError::NotFound { .. })));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Storage(StorageError::Corrupt("EOF".into()));
        assert_eq!(
            app_err.user_message(),
            "Saved favorites are corrupted and were reset."
        );

        let app_err: AppError = WeatherError::NotFound {
            city: "Oslo".into(),
            status: None,
            source: None,
        }
        .into();
        assert!(app_err.user_message().contains("Oslo"));
    }
}

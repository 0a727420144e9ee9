use crate::services::favorites_store::FavoritesError;
use skyvane_core::{AppError, StorageError};

impl From<FavoritesError> for AppError {
    fn from(e: FavoritesError) -> Self {
        match e {
            FavoritesError::Read { path, source } => {
                AppError::Storage(StorageError::ReadFailed(format!("{}: {}", path, source)))
            }
            FavoritesError::Write { path, source } => {
                AppError::Storage(StorageError::WriteFailed(format!("{}: {}", path, source)))
            }
            FavoritesError::Corrupt(e) => AppError::Storage(StorageError::Corrupt(e.to_string())),
        }
    }
}

pub mod config;
pub mod error;

pub use config::{Config, FavoritesConfig, ValidationResult};
pub use error::{AppError, StorageError, WeatherError};

use anyhow::Result;

/// Initialize logging. Output goes to stderr; the filter comes from `RUST_LOG`.
pub fn init() -> Result<()> {
    init_with_default_filter("info")
}

/// Initialize logging with `default_filter` used when `RUST_LOG` is unset.
pub fn init_with_default_filter(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::debug!("Skyvane core initialized");
    Ok(())
}

//! Maps UI-layer errors to skyvane_core::AppError for consistent user-facing messages.

mod favorites;

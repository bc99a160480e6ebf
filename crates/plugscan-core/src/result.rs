//! Convenience result type alias for plugscan.

use crate::error::AppError;

/// A specialized `Result` type for plugscan operations.
pub type AppResult<T> = Result<T, AppError>;

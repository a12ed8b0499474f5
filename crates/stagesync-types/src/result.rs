//! Result type alias for stagesync operations

use crate::Error;

/// Result type alias for stagesync operations
pub type Result<T> = std::result::Result<T, Error>;

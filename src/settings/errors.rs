// 3rd party crates
use thiserror::Error;

// Project imports
use crate::providers::lunarcrush::errors::LunarCrushValidationError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid log level: {0}. Must be one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("Update interval must be greater than 0, got {0}")]
    InvalidUpdateInterval(u64),

    #[error("Request timeout must be greater than 0 seconds")]
    InvalidRequestTimeout,

    #[error("No providers are enabled")]
    NoProvidersEnabled,

    #[error("LunarCrush configuration error: {0}")]
    LunarCrushConfig(#[from] LunarCrushValidationError),
}

// 3rd party crates
use thiserror::Error;

// Project imports
use crate::utility::throttle::errors::ThrottleError;

/// Custom error type for analytics worker operations.
#[derive(Debug, Error)]
pub enum LunarCrushError {
    #[error("Search for '{query}' failed: {source}")]
    SearchFailed {
        query: String,
        #[source]
        source: ThrottleError,
    },

    #[error("Analysis for '{symbol}' failed: {source}")]
    AnalysisFailed {
        symbol: String,
        #[source]
        source: ThrottleError,
    },

    #[error("Multi-timeframe analysis for '{symbol}' failed: {source}")]
    MultiTimeframeFailed {
        symbol: String,
        #[source]
        source: ThrottleError,
    },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] LunarCrushValidationError),
}

#[derive(Debug, Error)]
pub enum LunarCrushValidationError {
    #[error("worker_url must not be empty")]
    MissingWorkerUrl,

    #[error("worker_url is not a valid URL: {0}")]
    InvalidWorkerUrl(String),

    #[error("no symbols configured")]
    NoSymbols,
}

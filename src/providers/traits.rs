// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::utility::throttle::types::RequestThrottle;

// Current module imports
use super::types::{CryptoSearchResult, MultiTimeframeAnalysis, PredictionData};

/// Core trait that all analytics providers must implement.
///
/// A provider wraps one upstream analytics API. Every provider receives
/// the application's shared [`RequestThrottle`] at construction time so
/// all outbound calls go through one coalescing and spacing domain.
///
/// Implementors must provide:
/// - A configuration type with provider-specific settings
/// - An error type for provider-specific failures
/// - The search and analysis operations
/// - Configuration validation and enable/disable support
#[async_trait]
#[allow(unused)]
pub trait AnalyticsProvider: Send + Sync {
    /// The configuration type for this provider.
    type Config: Clone + Send + Sync;

    /// The error type for this provider.
    type Error: std::error::Error + Send + Sync;

    /// Creates a new provider over the shared request throttle.
    fn new(config: Self::Config, throttle: RequestThrottle) -> Result<Self, Self::Error>
    where
        Self: Sized;

    /// Searches for assets matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<CryptoSearchResult>, Self::Error>;

    /// Fetches the current analysis for one symbol.
    async fn analyze(&self, symbol: &str) -> Result<PredictionData, Self::Error>;

    /// Extends a base analysis with per-timeframe predictions.
    async fn analyze_timeframes(
        &self,
        symbol: &str,
        base: &PredictionData,
    ) -> Result<MultiTimeframeAnalysis, Self::Error>;

    /// Validates the provider's configuration.
    fn validate_config(&self) -> Result<(), Self::Error>;

    /// Checks if the provider is enabled.
    fn is_enabled(&self) -> bool;

    /// Gets the provider's name. Lowercase, no spaces, unique.
    fn get_name(&self) -> &str;
}

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::types::CryptoSearchResult;
use crate::utility::throttle::types::RequestThrottle;

// Current module imports
use super::constants::default_worker_url;

/// Client for the analytics worker.
#[derive(Debug, Clone)]
pub struct LunarCrush {
    pub config: LcConfig,
    pub throttle: RequestThrottle,
}

/// Configuration for the analytics worker provider.
#[derive(Debug, Deserialize, Clone)]
pub struct LcConfig {
    pub enabled: bool,
    #[serde(default = "default_worker_url")]
    pub worker_url: String,
    /// Symbols refreshed by the periodic analysis cycle
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Envelope of a worker search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<CryptoSearchResult>,
}

/// Default analytics worker endpoint
pub const DEFAULT_WORKER_URL: &str = "https://lunarcrush.cryptoguard-api.workers.dev";

/// Worker routes
pub const SEARCH_PATH: &str = "/search";
pub const ANALYZE_PATH: &str = "/analyze";
pub const MULTI_TIMEFRAME_PATH: &str = "/multi-timeframe";

pub fn default_worker_url() -> String {
    DEFAULT_WORKER_URL.to_string()
}

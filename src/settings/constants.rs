/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

# Analysis refresh interval in seconds
[update]
interval = 300

# Outbound request throttling
[throttle]
# Minimum spacing between requests to the same endpoint, in milliseconds
min_request_interval_ms = 2000
# Hard bound on a single request's duration, in seconds
request_timeout_secs = 30

# Analytics worker configuration
[lunarcrush]
enabled = true
worker_url = "https://lunarcrush.cryptoguard-api.workers.dev"

# Symbols refreshed on every cycle
symbols = ["BTC", "ETH"]
"#;

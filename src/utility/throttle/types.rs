// Standard library
use std::collections::HashMap;
use std::sync::Arc;

// 3rd party crates
use futures::future::{BoxFuture, Shared};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;

// Current module imports
use super::constants::{default_min_request_interval_ms, default_request_timeout_secs};
use super::errors::ThrottleError;
use super::traits::Transport;

/// Throttling configuration for outbound API calls
#[derive(Debug, Clone, Deserialize)]
pub struct ThrottleConfig {
    /// Minimum spacing between physical requests to the same endpoint, in
    /// milliseconds
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
    /// Hard bound on a single request's duration, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Options forwarded to the underlying transport for a single request.
///
/// Passed through unmodified, except that a `Content-Type:
/// application/json` header is merged in; caller-supplied headers win on
/// conflict.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A fully resolved request handed to the transport layer.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Raw status and body surfaced by a transport implementation.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Outcome fanned out to every caller coalesced onto one physical request.
pub(super) type SharedOutcome = Result<Arc<Value>, ThrottleError>;

/// The in-flight awaitable stored per endpoint key.
pub(super) type PendingRequest = Shared<BoxFuture<'static, SharedOutcome>>;

/// Process-local gatekeeper for outbound API calls.
///
/// Owns two maps: endpoint key to in-flight request, and endpoint key to
/// the instant the most recent physical request was initiated. Constructed
/// once by the host application's startup code and cloned into every
/// caller; clones share the same state.
#[derive(Clone)]
pub struct RequestThrottle {
    pub(super) config: ThrottleConfig,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) pending: Arc<Mutex<HashMap<String, PendingRequest>>>,
    pub(super) last_request: Arc<Mutex<HashMap<String, Instant>>>,
}

/// Read-only view of the throttle's bookkeeping, for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ThrottleStatus {
    /// Endpoint keys with a request currently in flight
    pub pending_requests: Vec<String>,
    /// Milliseconds since the last physical request was initiated, per key
    pub last_request_age_ms: HashMap<String, u64>,
}

/// Production transport backed by reqwest.
pub struct HttpTransport {
    pub(super) client: Client,
}

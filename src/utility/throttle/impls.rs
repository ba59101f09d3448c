// Standard library
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use futures::FutureExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

// Current module imports
use super::constants::{
    default_min_request_interval_ms, default_request_timeout_secs, BODY_SNIPPET_MAX_BYTES,
    STALE_ENTRY_SECS, SWEEP_INTERVAL_SECS,
};
use super::errors::ThrottleError;
use super::functions::derive_request_key;
use super::traits::Transport;
use super::types::{
    HttpTransport, PendingRequest, RequestOptions, RequestThrottle, SharedOutcome, ThrottleConfig,
    ThrottleStatus, TransportRequest, TransportResponse,
};

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_request_interval_ms: default_min_request_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ThrottleConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, ThrottleError> {
        let TransportRequest {
            url,
            method,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            // A body that cannot be read must not mask the status error.
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response body".to_string());
            return Ok(TransportResponse { status, body });
        }

        let body = response.text().await.map_err(|error| {
            ThrottleError::Transport(format!("failed to read response body: {}", error))
        })?;

        Ok(TransportResponse { status, body })
    }
}

impl fmt::Debug for RequestThrottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestThrottle")
            .field("config", &self.config)
            .field("transport", &"<dyn Transport>")
            .finish()
    }
}

impl RequestThrottle {
    /// Creates a throttle backed by the reqwest transport.
    pub fn new(config: ThrottleConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Creates a throttle over a caller-supplied transport.
    pub fn with_transport(config: ThrottleConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            pending: Arc::new(tokio::sync::Mutex::new(Default::default())),
            last_request: Arc::new(tokio::sync::Mutex::new(Default::default())),
        }
    }

    /// Issues a request through the throttle and parses the response as JSON.
    ///
    /// Concurrent calls for the same endpoint key share one physical
    /// request. Successive physical requests to the same key are spaced at
    /// least the configured interval apart, measured between initiations.
    /// A call that piggybacked on an in-flight request which then failed
    /// issues one fresh request of its own instead of inheriting the
    /// failure.
    ///
    /// The key defaults to `METHOD:path` of the target with the query
    /// string stripped; pass `explicit_key` to throttle different URLs as
    /// one logical endpoint.
    pub async fn throttled_request(
        &self,
        target: &str,
        options: RequestOptions,
        explicit_key: Option<&str>,
    ) -> Result<Value, ThrottleError> {
        let key = match explicit_key {
            Some(key) => key.to_string(),
            None => derive_request_key(&options.method, target),
        };

        debug!(key = %key, "throttled request");

        // Piggyback on an in-flight request for the same endpoint if there
        // is one.
        if let Some(shared) = self.pending_for(&key).await {
            debug!(key = %key, "request already pending, waiting");
            match shared.await {
                Ok(value) => return Ok(value.as_ref().clone()),
                Err(error) => {
                    warn!(key = %key, %error, "pending request failed, retrying");
                }
            }
        }

        let shared = self.acquire_request(&key, target, options).await;
        match shared.await {
            Ok(value) => Ok(value.as_ref().clone()),
            Err(error) => Err(error),
        }
    }

    /// Typed variant of [`throttled_request`](Self::throttled_request).
    pub async fn throttled_request_as<T: DeserializeOwned>(
        &self,
        target: &str,
        options: RequestOptions,
        explicit_key: Option<&str>,
    ) -> Result<T, ThrottleError> {
        let value = self.throttled_request(target, options, explicit_key).await?;
        serde_json::from_value(value).map_err(|error| ThrottleError::Decode(error.to_string()))
    }

    /// Snapshot of in-flight keys and last-request ages, for diagnostics.
    pub async fn status(&self) -> ThrottleStatus {
        let pending_requests: Vec<String> = self.pending.lock().await.keys().cloned().collect();
        let last_request_age_ms = self
            .last_request
            .lock()
            .await
            .iter()
            .map(|(key, at)| (key.clone(), at.elapsed().as_millis() as u64))
            .collect();

        ThrottleStatus {
            pending_requests,
            last_request_age_ms,
        }
    }

    /// Spawns the periodic sweep that drops last-request entries older
    /// than the staleness bound. Pending entries self-remove on
    /// settlement, so the sweep is hygiene against unbounded growth, not
    /// a correctness requirement.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let last_request = Arc::clone(&self.last_request);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
            // The first tick fires immediately; skip it.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let mut last = last_request.lock().await;
                let before = last.len();
                last.retain(|_, at| at.elapsed() < Duration::from_secs(STALE_ENTRY_SECS));
                let removed = before - last.len();
                drop(last);

                if removed > 0 {
                    debug!(removed, "swept stale endpoint bookkeeping");
                }
            }
        })
    }

    async fn pending_for(&self, key: &str) -> Option<PendingRequest> {
        self.pending.lock().await.get(key).cloned()
    }

    async fn spacing_remaining(&self, key: &str) -> Option<Duration> {
        let last = self.last_request.lock().await;
        last.get(key)
            .and_then(|at| self.config.min_interval().checked_sub(at.elapsed()))
            .filter(|wait| !wait.is_zero())
    }

    /// Waits out the spacing interval, then either starts the physical
    /// request for `key` or joins one that started in the meantime.
    async fn acquire_request(
        &self,
        key: &str,
        target: &str,
        options: RequestOptions,
    ) -> PendingRequest {
        loop {
            if let Some(existing) = self.pending_for(key).await {
                debug!(key = %key, "joining request started during spacing wait");
                return existing;
            }

            if let Some(wait) = self.spacing_remaining(key).await {
                debug!(key = %key, wait_ms = wait.as_millis() as u64, "spacing delay before request");
                tokio::time::sleep(wait).await;
                continue;
            }

            let mut pending = self.pending.lock().await;
            if pending.contains_key(key) {
                continue;
            }

            let (outcome_tx, outcome_rx) = oneshot::channel::<SharedOutcome>();
            let shared: PendingRequest = async move {
                match outcome_rx.await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ThrottleError::Transport(
                        "request task dropped before settling".to_string(),
                    )),
                }
            }
            .boxed()
            .shared();

            pending.insert(key.to_string(), shared.clone());
            drop(pending);

            self.last_request
                .lock()
                .await
                .insert(key.to_string(), Instant::now());

            let request = build_transport_request(target, options);
            let transport = Arc::clone(&self.transport);
            let pending_map = Arc::clone(&self.pending);
            let timeout = self.config.request_timeout();
            let task_key = key.to_string();

            // The request runs on its own task so that settlement and
            // cleanup happen even if every waiting caller goes away.
            tokio::spawn(async move {
                let outcome = perform_request(transport, request, timeout).await;

                pending_map.lock().await.remove(&task_key);

                match &outcome {
                    Ok(_) => debug!(key = %task_key, "request completed"),
                    Err(error) => warn!(key = %task_key, %error, "request failed"),
                }

                let _ = outcome_tx.send(outcome);
            });

            return shared;
        }
    }
}

fn build_transport_request(target: &str, options: RequestOptions) -> TransportRequest {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    // Caller-supplied headers win over the defaults.
    headers.extend(options.headers);

    TransportRequest {
        url: target.to_string(),
        method: options.method,
        headers,
        body: options.body,
    }
}

async fn perform_request(
    transport: Arc<dyn Transport>,
    request: TransportRequest,
    timeout: Duration,
) -> SharedOutcome {
    let response = match tokio::time::timeout(timeout, transport.execute(request)).await {
        Ok(result) => result?,
        // Dropping the transport future cancels whatever was in flight.
        Err(_) => return Err(ThrottleError::Timeout(timeout)),
    };

    if !response.status.is_success() {
        return Err(ThrottleError::Http {
            status: response.status,
            snippet: truncate_snippet(&response.body),
        });
    }

    let value: Value = serde_json::from_str(&response.body)
        .map_err(|error| ThrottleError::Decode(error.to_string()))?;

    Ok(Arc::new(value))
}

fn truncate_snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_MAX_BYTES {
        return body.to_string();
    }

    let mut end = BODY_SNIPPET_MAX_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

// 3rd party crates
use async_trait::async_trait;

// Current module imports
use super::errors::ThrottleError;
use super::types::{TransportRequest, TransportResponse};

/// Transport abstraction the throttle drives.
///
/// Implementations perform exactly one physical request per call and
/// surface the raw status and body; the throttle owns the error taxonomy
/// on top of that. Implementations are expected to fail only with the
/// `Transport` kind.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one physical request.
    async fn execute(&self, request: TransportRequest)
        -> Result<TransportResponse, ThrottleError>;
}

//! Outbound Request Throttling Module
//!
//! This module provides a process-local gatekeeper for outbound API calls.
//! Given a logical endpoint key, it coalesces concurrent callers onto one
//! in-flight request, enforces a minimum spacing between successive requests
//! to the same endpoint, and bounds each request's duration with a hard
//! timeout.
//!
//! # Features
//!
//! - Request coalescing: concurrent calls to the same endpoint share one
//!   physical request and its result
//! - Per-endpoint spacing: a configurable minimum interval between the
//!   initiations of successive physical requests to the same endpoint
//! - Hard timeout that cancels the in-flight transport call
//! - Status snapshot for diagnostics
//! - Periodic sweep of stale bookkeeping
//!
//! # Architecture
//!
//! The module is organized into several components:
//! - `RequestThrottle`, owning the pending-request and last-request maps
//! - The `Transport` trait, separating throttle logic from the HTTP stack
//! - `HttpTransport`, the reqwest-backed production transport
//! - Error handling via the `ThrottleError` taxonomy
//!
//! Different endpoints never wait on each other; all shared state is the
//! two maps, guarded by mutexes that are never held across an await.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod traits;
pub mod types;

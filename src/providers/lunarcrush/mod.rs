//! LunarCrush Analytics Worker Provider
//!
//! Client for the crypto social-analytics worker. All requests go through
//! the shared request throttle with explicit endpoint keys, so repeated
//! lookups for the same query or symbol coalesce onto one physical call.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod types;

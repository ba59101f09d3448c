// 3rd party crates
use reqwest::{Method, Url};

/// Derives the endpoint key used for coalescing and spacing.
///
/// Two requests that differ only in their query string map to the same
/// key. Derivation never fails: a target that does not parse as an
/// absolute URL is keyed on the raw target string instead.
pub fn derive_request_key(method: &Method, target: &str) -> String {
    match Url::parse(target) {
        Ok(url) => format!("{}:{}", method, url.path()),
        Err(_) => format!("{}:{}", method, target),
    }
}

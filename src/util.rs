use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

/// Builds the HTTP client shared by every request in a run.
///
/// The 10 second request timeout matters: channel resolution is sequential,
/// so a single unresponsive play pointer would otherwise stall the whole
/// batch.
///
/// # Panics
/// Panics if the client cannot be constructed, which only happens when the
/// TLS backend fails to initialize.
#[must_use]
pub fn init_http_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_str(&format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .unwrap(),
    );

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Unable to build HTTP client")
}

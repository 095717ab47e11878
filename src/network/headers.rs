//! Outbound header construction

use crate::config::UpstreamSettings;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use tracing::debug;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Headers sent with every search and engine-listing request. SearXNG's bot
/// detection rejects requests without forwarding headers.
pub fn forwarding_headers(settings: &UpstreamSettings, client_ip: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, USER_AGENT, &settings.user_agent);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    insert(&mut headers, HeaderName::from_static(X_FORWARDED_FOR), client_ip);
    insert(&mut headers, HeaderName::from_static(X_REAL_IP), client_ip);
    insert(
        &mut headers,
        HeaderName::from_static(X_FORWARDED_PROTO),
        &settings.forwarded_proto,
    );
    insert(
        &mut headers,
        HeaderName::from_static(X_FORWARDED_HOST),
        &settings.forwarded_host,
    );
    headers
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => debug!("Skipping unrepresentable {} header value", name),
    }
}

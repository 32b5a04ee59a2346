//! Remote store: `GET <base_url>/<identifier>.json`.
//!
//! Status handling is centralized in [`check_response`]: 404 is a miss,
//! 429 is rate limiting with `Retry-After` parsing, anything else
//! non-successful becomes [`RegistryError::Api`].

use std::time::Duration;

use serde_json::Value;

use crate::{RegistryStore, error::RegistryError, id::validate_identifier};

/// Name of the listing document served next to the records.
pub const INDEX_FILE: &str = "index.json";

/// Fetches registry records over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistryStore {
    http: reqwest::Client,
    base_url: String,
}

/// One entry of the remote index: a bare name or an object with a `name`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IndexEntry {
    Name(String),
    Item { name: String },
}

impl HttpRegistryStore {
    /// Create a store rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bdoc/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_url(&self, id: &str) -> String {
        let encoded: Vec<_> = id.split('/').map(urlencoding::encode).collect();
        format!("{}/{}.json", self.base_url, encoded.join("/"))
    }
}

impl RegistryStore for HttpRegistryStore {
    async fn get(&self, id: &str) -> Result<Value, RegistryError> {
        validate_identifier(id)?;
        let url = self.record_url(id);
        tracing::debug!(%url, "fetching registry record");

        let resp = self.http.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        let body = check_response(resp).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| RegistryError::Malformed {
            id: id.to_string(),
            source,
        })
    }

    async fn list(&self) -> Result<Vec<String>, RegistryError> {
        let url = format!("{}/{INDEX_FILE}", self.base_url);
        let body = check_response(self.http.get(&url).send().await?)
            .await?
            .bytes()
            .await?;
        let entries: Vec<IndexEntry> =
            serde_json::from_slice(&body).map_err(|source| RegistryError::Malformed {
                id: INDEX_FILE.to_string(),
                source,
            })?;
        Ok(index_identifiers(entries))
    }
}

fn index_identifiers(entries: Vec<IndexEntry>) -> Vec<String> {
    let mut ids: Vec<String> = entries
        .into_iter()
        .map(|entry| match entry {
            IndexEntry::Name(name) | IndexEntry::Item { name } => name,
        })
        .filter(|id| match validate_identifier(id) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%e, "skipping index entry");
                false
            }
        })
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`RegistryError::RateLimited`] with
///   `Retry-After` parsing (falls back to 60 s if absent or unparseable).
/// - **Non-success status** → [`RegistryError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(RegistryError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(RegistryError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    fn store(base: &str) -> HttpRegistryStore {
        HttpRegistryStore::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn record_url_joins_base_and_encodes_segments() {
        let store = store("https://example.com/r/ ");
        assert_eq!(store.base_url(), "https://example.com/r");
        assert_eq!(
            store.record_url("charts/area-chart"),
            "https://example.com/r/charts/area-chart.json"
        );
    }

    #[test]
    fn parse_retry_after_from_header() {
        assert_eq!(parse_retry_after(&mock_response_with_retry_after("120")), 120);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        assert_eq!(parse_retry_after(&mock_response_with_retry_after("soon")), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited_default() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn check_response_api_error_keeps_body() {
        let err = check_response(mock_response(503, "maintenance"))
            .await
            .unwrap_err();
        match err {
            RegistryError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("Expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn get_rejects_invalid_identifier_before_request() {
        // Unroutable base: an attempted request would fail with Http instead.
        let err = store("http://127.0.0.1:9").get("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidIdentifier { .. }));
    }

    #[test]
    fn index_accepts_names_and_objects() {
        let entries: Vec<IndexEntry> = serde_json::from_value(json!([
            "sidebar-07",
            { "name": "login-01", "type": "registry:block" },
            "../escape",
            "sidebar-07"
        ]))
        .unwrap();
        assert_eq!(index_identifiers(entries), vec!["login-01", "sidebar-07"]);
    }
}

//! HTTP transport abstraction.
//!
//! The upload flow only ever needs two requests: a `GET` with query parameters against the
//! presign backend and a `PUT` with a raw body against a signed URL. The `HttpClient` trait
//! covers exactly those, so the client logic can be exercised against [`MockHttpClient`]
//! without a network.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Response from an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for executing the two HTTP requests of the upload flow.
///
/// Implementations must not treat non-2xx statuses as errors: the caller decides what a
/// failing status means. Only transport-level failures are returned as `Err`.
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    /// Issue a `GET` to `url` with the given query parameters appended.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse>;

    /// Issue a `PUT` to `url` with `body` as the entire request body and no extra headers.
    async fn put(&self, url: &str, body: Bytes) -> Result<HttpResponse>;
}

/// Strip the query string from a URL for logging, so signatures never reach the logs.
pub(crate) fn redact(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.to_string()
        }
        Err(_) => url.split('?').next().unwrap_or_default().to_string(),
    }
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing reqwest client, e.g. one with custom TLS or proxy settings.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, url, query), fields(url = %redact(url)))]
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        tracing::debug!(params = query.len(), "Executing GET request");

        let response = self.client.get(url).query(query).send().await.map_err(|e| {
            tracing::error!(error = %e, "GET request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, response_len = body.len(), "GET request completed");

        Ok(HttpResponse { status, body })
    }

    #[tracing::instrument(skip(self, url, body), fields(url = %redact(url), body_len = body.len()))]
    async fn put(&self, url: &str, body: Bytes) -> Result<HttpResponse> {
        tracing::debug!("Executing PUT request");

        let response = self.client.put(url).body(body).send().await.map_err(|e| {
            tracing::error!(error = %e, "PUT request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, response_len = body.len(), "PUT request completed");

        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock HTTP client for testing.
///
/// Responses are keyed by `"{METHOD} {url}"`, where `url` excludes any query string.
/// Multiple responses for the same key are returned in FIFO order.
///
/// # Example
/// ```
/// use ossup::{HttpResponse, MockHttpClient};
///
/// let mock = MockHttpClient::new();
/// mock.add_response(
///     "GET https://backend.example/get-presign",
///     Ok(HttpResponse::new(200, r#"{"url": "https://storage.example/a?sig=1"}"#)),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<Result<HttpResponse>>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub method: String,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Bytes,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a method and URL.
    pub fn add_response(&self, key: &str, response: Result<HttpResponse>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(response);
    }

    /// Get all calls that have been made to this mock client.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn respond(&self, method: &str, url: &str, query: Vec<(String, String)>, body: Bytes) -> Result<HttpResponse> {
        self.calls.lock().push(MockCall {
            method: method.to_string(),
            url: url.to_string(),
            query,
            body,
        });

        let key = format!("{} {}", method, url.split('?').next().unwrap_or(url));
        let mut responses = self.responses.lock();

        if let Some(queue) = responses.get_mut(&key) {
            if !queue.is_empty() {
                return queue.remove(0);
            }
        }

        Err(anyhow::anyhow!("No mock response configured for {}", key).into())
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        let query = query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.respond("GET", url, query, Bytes::new())
    }

    async fn put(&self, url: &str, body: Bytes) -> Result<HttpResponse> {
        self.respond("PUT", url, Vec::new(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(403, "").is_success());
    }

    #[test]
    fn test_redact_drops_signature() {
        assert_eq!(
            redact("https://storage.example/bucket/report.pdf?sig=abc&expires=1"),
            "https://storage.example/bucket/report.pdf"
        );
        assert_eq!(redact("not a url?sig=abc"), "not a url");
    }

    #[tokio::test]
    async fn test_mock_client_records_calls() {
        let mock = MockHttpClient::new();
        mock.add_response("PUT https://storage.example/a", Ok(HttpResponse::new(200, "")));

        let response = mock
            .put("https://storage.example/a?sig=1", Bytes::from_static(b"hello"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].url, "https://storage.example/a?sig=1");
        assert_eq!(calls[0].body.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn test_mock_client_fifo_responses() {
        let mock = MockHttpClient::new();
        mock.add_response("GET https://backend.example/p", Ok(HttpResponse::new(200, "first")));
        mock.add_response("GET https://backend.example/p", Ok(HttpResponse::new(200, "second")));

        let first = mock.get("https://backend.example/p", &[("objectName", "a")]).await.unwrap();
        let second = mock.get("https://backend.example/p", &[("objectName", "b")]).await.unwrap();
        assert_eq!(first.body, "first");
        assert_eq!(second.body, "second");

        let calls = mock.get_calls();
        assert_eq!(calls[1].query, vec![("objectName".to_string(), "b".to_string())]);
    }

    #[tokio::test]
    async fn test_mock_client_no_response() {
        let mock = MockHttpClient::new();
        let result = mock.get("https://backend.example/p", &[]).await;
        assert!(matches!(result, Err(Error::Other(_))));
        assert_eq!(mock.call_count(), 1);
    }
}

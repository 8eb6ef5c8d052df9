//! HTTP client wrapper - the request executor and its transport

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;
use url::Url;

use crate::error::TransportError;
use crate::models::{HeaderEntry, HttpMethod, RequestRecord, ResponseRecord};

/// Everything the transport needs for one exchange. The URL already carries
/// the merged query parameters and `headers` holds only complete entries.
#[derive(Clone, Debug)]
pub struct Exchange {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
    pub timeout: Duration,
}

/// What came back over the wire, before header collapsing
#[derive(Clone, Debug, Default)]
pub struct RawResponse {
    pub status_code: u16,
    pub status_text: String,
    /// Every header line, repeated names included, in arrival order
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Performs the HTTP exchange itself
#[async_trait]
pub trait Transport: Send + Sync {
    async fn exchange(&self, exchange: Exchange) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport used by the binary
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        ReqwestTransport {
            client: create_client(timeout),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn exchange(&self, exchange: Exchange) -> Result<RawResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(to_reqwest_method(exchange.method), exchange.url)
            .timeout(exchange.timeout);

        for header in &exchange.headers {
            req_builder = req_builder.header(&header.key, &header.value);
        }

        if !exchange.body.is_empty() {
            req_builder = req_builder.body(exchange.body);
        }

        let resp = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(exchange.timeout)
            } else {
                e.into()
            }
        })?;

        let status = resp.status();
        let status_text = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(exchange.timeout)
            } else {
                TransportError::Incomplete(e.to_string())
            }
        })?;

        Ok(RawResponse {
            status_code: status.as_u16(),
            status_text,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Turns a [`RequestRecord`] into a [`ResponseRecord`] through a [`Transport`]
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Executor { transport, timeout }
    }

    /// Run one exchange. The timer covers dispatch through the last body byte.
    pub async fn execute(&self, record: &RequestRecord) -> Result<ResponseRecord, TransportError> {
        let url = resolve_url(&record.url, &record.params)?;
        let headers = record
            .headers
            .iter()
            .filter(|h| h.is_complete())
            .cloned()
            .collect();

        let exchange = Exchange {
            method: record.method,
            url,
            headers,
            body: record.body.clone(),
            timeout: self.timeout,
        };

        let start = Instant::now();
        let raw = tokio::time::timeout(self.timeout, self.transport.exchange(exchange))
            .await
            .map_err(|_| TransportError::timeout(self.timeout))??;
        let elapsed = start.elapsed();

        let size = raw.body.len();
        Ok(ResponseRecord {
            status_code: raw.status_code,
            status_text: raw.status_text,
            headers: ResponseRecord::collapse_headers(raw.headers),
            body: String::from_utf8_lossy(&raw.body).into_owned(),
            size,
            elapsed,
            completed_at: Utc::now(),
        })
    }
}

/// Parse `raw` and merge `params` into its query string.
///
/// A parameter replaces every existing pair with the same key. Parameters with
/// an empty key or value are dropped. Only `http` and `https` URLs are accepted.
pub fn resolve_url(raw: &str, params: &BTreeMap<String, String>) -> Result<Url, TransportError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| TransportError::InvalidUrl(format!("{}: `{}`", e, raw)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl(format!(
            "unsupported scheme `{}` in `{}`",
            url.scheme(),
            raw
        )));
    }

    let params: Vec<(&String, &String)> = params
        .iter()
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect();
    if params.is_empty() {
        return Ok(url);
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(pk, _)| **pk == **k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(params);

    Ok(url)
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
    }
}

/// Create an HTTP client with default configuration
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::error::NetworkFailure;

    /// Records every exchange and answers with a canned result
    struct MockTransport {
        seen: Mutex<Vec<Exchange>>,
        reply: Result<RawResponse, TransportError>,
        delay: Duration,
    }

    impl MockTransport {
        fn replying(reply: Result<RawResponse, TransportError>) -> Arc<Self> {
            Arc::new(MockTransport {
                seen: Mutex::new(Vec::new()),
                reply,
                delay: Duration::ZERO,
            })
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn exchange(&self, exchange: Exchange) -> Result<RawResponse, TransportError> {
            self.seen.lock().unwrap().push(exchange);
            tokio::time::sleep(self.delay).await;
            self.reply.clone()
        }
    }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ok_raw() -> RawResponse {
        RawResponse {
            status_code: 200,
            status_text: "200 OK".to_string(),
            headers: vec![
                ("x-trace".to_string(), "first".to_string()),
                ("x-trace".to_string(), "second".to_string()),
            ],
            body: b"[]".to_vec(),
        }
    }

    #[test]
    fn test_resolve_url_appends_params() {
        let url = resolve_url("https://example.com/search", &params(&[("q", "test")])).unwrap();
        assert_eq!(url.as_str(), "https://example.com/search?q=test");
    }

    #[test]
    fn test_resolve_url_merges_existing_query() {
        let url = resolve_url(
            "https://example.com/search?page=2&q=old",
            &params(&[("q", "new")]),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://example.com/search?page=2&q=new");
    }

    #[test]
    fn test_resolve_url_drops_empty_params() {
        let url = resolve_url(
            "https://example.com/items",
            &params(&[("", "x"), ("y", "")]),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://example.com/items");
    }

    #[test]
    fn test_resolve_url_rejects_malformed() {
        let err = resolve_url("", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
        let err = resolve_url("not a url", &params(&[("q", "x")])).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
        let err = resolve_url("localhost:8080/items", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_execute_filters_headers_and_collapses_response() {
        let transport = MockTransport::replying(Ok(ok_raw()));
        let executor = Executor::new(transport.clone(), Duration::from_secs(30));
        let record = RequestRecord::new(
            HttpMethod::POST,
            "https://example.com/search",
            vec![
                HeaderEntry::new("Accept", "application/json"),
                HeaderEntry::new("", "orphan"),
                HeaderEntry::new("X-Empty", ""),
            ],
            params(&[("q", "test")]),
            "{}",
        );

        let response = executor.execute(&record).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "[]");
        assert_eq!(response.size, 2);
        assert_eq!(response.headers["x-trace"], "first");

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url.as_str(), "https://example.com/search?q=test");
        assert_eq!(seen[0].headers, vec![HeaderEntry::new("Accept", "application/json")]);
        assert_eq!(seen[0].method, HttpMethod::POST);
    }

    #[tokio::test]
    async fn test_execute_invalid_url_never_reaches_transport() {
        let transport = MockTransport::replying(Ok(ok_raw()));
        let executor = Executor::new(transport.clone(), Duration::from_secs(30));
        let record = RequestRecord::new(HttpMethod::GET, "", vec![], BTreeMap::new(), "");

        let err = executor.execute(&record).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_passes_transport_errors_through() {
        let transport = MockTransport::replying(Err(TransportError::Network(
            NetworkFailure::Connect("refused".to_string()),
        )));
        let executor = Executor::new(transport, Duration::from_secs(30));
        let record = RequestRecord::new(
            HttpMethod::GET,
            "http://127.0.0.1:9/",
            vec![],
            BTreeMap::new(),
            "",
        );

        let err = executor.execute(&record).await.unwrap_err();
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_times_out() {
        let transport = Arc::new(MockTransport {
            seen: Mutex::new(Vec::new()),
            reply: Ok(ok_raw()),
            delay: Duration::from_secs(120),
        });
        let executor = Executor::new(transport, Duration::from_secs(30));
        let record = RequestRecord::new(
            HttpMethod::GET,
            "https://example.com/slow",
            vec![],
            BTreeMap::new(),
            "",
        );

        let err = executor.execute(&record).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_measures_elapsed() {
        let transport = Arc::new(MockTransport {
            seen: Mutex::new(Vec::new()),
            reply: Ok(ok_raw()),
            delay: Duration::from_millis(5),
        });
        let executor = Executor::new(transport, Duration::from_secs(30));
        let record = RequestRecord::new(
            HttpMethod::GET,
            "https://example.com/items",
            vec![],
            BTreeMap::new(),
            "",
        );

        let response = executor.execute(&record).await.unwrap();
        assert!(response.elapsed >= Duration::from_millis(5));
    }
}

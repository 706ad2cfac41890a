//! Document acquisition.
//!
//! The parser never talks to the network itself. It hands a [`FeedRequest`]
//! to a [`Transport`] and waits for the whole body. [`HttpTransport`] is the
//! reqwest-backed implementation used by default; tests and embedders can
//! supply their own.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, PRAGMA, USER_AGENT};

use crate::config::Config;
use crate::error::TransportError;

/// Whether intermediate caches may answer the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Always revalidate with the origin server.
    #[default]
    ReloadIgnoringCache,
    /// Leave caching to HTTP defaults.
    UseProtocolDefault,
}

/// Everything a transport needs to fetch one feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub url: String,
    /// Extra request headers, sent in order.
    pub headers: Vec<(String, String)>,
    pub cache_policy: CachePolicy,
    pub timeout: Duration,
}

impl FeedRequest {
    /// The default request for `url`: the configured user agent, no caching
    /// and the configured timeout.
    pub fn new(url: impl Into<String>, config: &Config) -> Self {
        Self {
            url: url.into(),
            headers: vec![(USER_AGENT.as_str().to_owned(), config.user_agent.clone())],
            cache_policy: CachePolicy::ReloadIgnoringCache,
            timeout: config.timeout(),
        }
    }
}

/// A fetched document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedDocument {
    pub body: Vec<u8>,
    /// Character set declared by the transport, e.g. the `charset` of `Content-Type`.
    pub text_encoding: Option<String>,
}

/// Fetches raw feed documents.
///
/// `fetch_blocking` is used in synchronous mode and may be called from any
/// thread, including one that is driving a Tokio runtime. `fetch` is spawned onto the current Tokio runtime
/// in asynchronous mode; dropping or aborting that task cancels it.
pub trait Transport: Send + Sync {
    fn fetch_blocking(&self, request: &FeedRequest) -> Result<FetchedDocument, TransportError>;

    fn fetch(
        &self,
        request: FeedRequest,
    ) -> BoxFuture<'static, Result<FetchedDocument, TransportError>>;
}

/// HTTP(S) transport built on reqwest.
///
/// - Each request is bounded by the request's timeout
/// - Response bodies are capped at `max_body_bytes`
/// - Bodies shorter than `Content-Length` are rejected
/// - Nothing is retried
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Self {
        Self::with_client(reqwest::Client::new(), config.max_body_bytes)
    }

    /// Uses a preconfigured client (proxies, TLS roots, ...).
    pub fn with_client(client: reqwest::Client, max_body_bytes: usize) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }

    fn fetch_on_own_runtime(
        &self,
        request: &FeedRequest,
    ) -> Result<FetchedDocument, TransportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(fetch_document(
            self.client.clone(),
            request.clone(),
            self.max_body_bytes,
        ))
    }
}

impl Transport for HttpTransport {
    fn fetch_blocking(&self, request: &FeedRequest) -> Result<FetchedDocument, TransportError> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.fetch_on_own_runtime(request);
        }

        // A thread that drives a runtime cannot block on a second one.
        tracing::debug!(url = %request.url, "Blocking fetch moved off the runtime thread");
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.fetch_on_own_runtime(request))
                .join()
                .unwrap_or_else(|_| {
                    Err(TransportError::Unavailable(
                        "blocking fetch thread panicked".into(),
                    ))
                })
        })
    }

    fn fetch(
        &self,
        request: FeedRequest,
    ) -> BoxFuture<'static, Result<FetchedDocument, TransportError>> {
        Box::pin(fetch_document(
            self.client.clone(),
            request,
            self.max_body_bytes,
        ))
    }
}

async fn fetch_document(
    client: reqwest::Client,
    request: FeedRequest,
    limit: usize,
) -> Result<FetchedDocument, TransportError> {
    let headers = request_headers(&request);
    let send = client.get(&request.url).headers(headers).send();

    let document = tokio::time::timeout(request.timeout, async {
        let response = send.await?;
        if !response.status().is_success() {
            return Err(TransportError::HttpStatus(response.status().as_u16()));
        }
        let text_encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_charset);
        let body = read_limited_bytes(response, limit).await?;
        Ok(FetchedDocument {
            body,
            text_encoding,
        })
    })
    .await
    .map_err(|_| TransportError::Timeout)??;

    tracing::debug!(
        url = %request.url,
        bytes = document.body.len(),
        encoding = ?document.text_encoding,
        "Fetched feed document"
    );
    Ok(document)
}

fn request_headers(request: &FeedRequest) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        match (
            reqwest::header::HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid request header"),
        }
    }
    if request.cache_policy == CachePolicy::ReloadIgnoringCache {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    }
    headers
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(TransportError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(TransportError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(TransportError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

/// The `charset` parameter of a `Content-Type` value, unquoted.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (name, value) = part.trim().split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\'']))
        })
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

//! reqwest-backed implementation of the endpoint ports.

use async_trait::async_trait;
use joblog_core::{FullLogPort, LogEventStream, LogSourceError, LogStreamPort};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::origin::{is_same_origin, resolve};
use crate::sse::event_stream;

const EVENT_STREAM: &str = "text/event-stream";

/// Same limit as reqwest's default policy.
const MAX_REDIRECTS: usize = 10;

/// HTTP client for the full-log and stream endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpLogClient {
    client: reqwest::Client,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    credentials: HeaderMap,
}

impl HttpLogClient {
    /// Create a client from its configuration.
    pub fn new(config: &HttpClientConfig) -> HttpResult<Self> {
        let base_url = config.base_url.as_deref().map(Url::parse).transpose()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(redirect_policy())
            .build()?;

        let mut credentials = HeaderMap::new();
        if let Some(ref cookie) = config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|_| HttpError::InvalidHeader(COOKIE.to_string()))?;
            credentials.insert(COOKIE, value);
        }
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader(name.clone()))?;
            credentials.append(header_name, header_value);
        }

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            credentials,
        })
    }

    /// Resolve an attribute value to an absolute URL.
    pub fn resolve(&self, raw: &str) -> HttpResult<Url> {
        resolve(self.base_url.as_ref(), raw)
    }

    /// Build a GET, attaching credentials only for same-origin URLs.
    fn request(&self, url: &Url, accept: &'static str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static(accept));
        if is_same_origin(self.base_url.as_ref(), url) {
            request = request.headers(self.credentials.clone());
        } else if !self.credentials.is_empty() {
            debug!(url = %url, "Cross-origin request; credentials withheld");
        }
        request
    }

    /// Fetch the whole body of `raw` as text.
    pub async fn fetch_text(&self, raw: &str) -> HttpResult<String> {
        let url = self.resolve(raw)?;
        let mut request = self.request(&url, "text/plain");
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Open the SSE endpoint at `raw`.
    ///
    /// Fails if the server does not answer `2xx` with `text/event-stream`.
    pub async fn open_events(&self, raw: &str) -> HttpResult<LogEventStream> {
        let url = self.resolve(raw)?;
        let response = self
            .request(&url, EVENT_STREAM)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_event_stream(&content_type) {
            return Err(HttpError::NotEventStream {
                content_type,
                url: url.to_string(),
            });
        }

        debug!(url = %url, "SSE connection open");
        Ok(Box::pin(event_stream(response.bytes_stream())))
    }
}

/// Follow redirects within the origin of the first request only.
///
/// Custom headers survive a followed redirect. A cross-origin redirect is
/// returned as-is and fails the status check.
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let cross_origin = attempt
            .previous()
            .first()
            .is_some_and(|first| first.origin() != attempt.url().origin());
        if cross_origin {
            debug!(to = %attempt.url(), "Not following cross-origin redirect");
            attempt.stop()
        } else {
            attempt.follow()
        }
    })
}

fn is_event_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(EVENT_STREAM))
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl FullLogPort for HttpLogClient {
    async fn fetch_full_log(&self, url: &str) -> Result<String, LogSourceError> {
        self.fetch_text(url).await.map_err(Into::into)
    }
}

#[async_trait]
impl LogStreamPort for HttpLogClient {
    async fn subscribe(&self, url: &str) -> Result<LogEventStream, LogSourceError> {
        self.open_events(url).await.map_err(Into::into)
    }
}

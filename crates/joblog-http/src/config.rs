//! Public configuration for the HTTP log client.

use std::time::Duration;

/// Configuration for [`crate::HttpLogClient`].
///
/// Credentials (session cookie and extra headers) are only attached to
/// requests whose origin matches `base_url`, the way a browser page sends
/// cookies with `credentials: "same-origin"`.
///
/// # Example
///
/// ```
/// use joblog_http::HttpClientConfig;
/// use std::time::Duration;
///
/// let config = HttpClientConfig::new()
///     .with_base_url("http://localhost:8000")
///     .with_session_cookie("sessionid=abc123")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Origin of the page the viewer belongs to; relative URLs resolve against it
    pub(crate) base_url: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Timeout for the full-log request; the stream never times out
    pub(crate) timeout: Option<Duration>,
    /// Value of the `Cookie` header for same-origin requests
    pub(crate) session_cookie: Option<String>,
    /// Extra headers for same-origin requests
    pub(crate) headers: Vec<(String, String)>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: concat!("joblog/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            session_cookie: None,
            headers: Vec::new(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page origin.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set an optional page origin.
    #[must_use]
    pub fn with_optional_base_url(mut self, url: Option<String>) -> Self {
        self.base_url = url;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a timeout for the full-log request.
    ///
    /// No timeout by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the session cookie sent to the page origin.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Set an optional session cookie.
    #[must_use]
    pub fn with_optional_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie;
        self
    }

    /// Add a header sent to the page origin.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

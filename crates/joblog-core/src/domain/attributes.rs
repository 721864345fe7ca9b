//! Endpoint attributes read once when a viewer is created.

/// Attribute naming the endpoint that serves the whole log so far.
pub const FULL_LOG_URL_ATTR: &str = "data-full-log-url";

/// Attribute naming the server-sent-events endpoint for new lines.
pub const STREAM_URL_ATTR: &str = "data-stream-url";

/// The two endpoint URLs a viewer works from.
///
/// Either may be absent: without a full-log URL the viewer goes straight to
/// streaming, without a stream URL it only renders the full log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerAttributes {
    full_log_url: Option<String>,
    stream_url: Option<String>,
}

impl ContainerAttributes {
    /// Build from explicit values. Empty or whitespace-only values count as absent.
    pub fn new(full_log_url: Option<String>, stream_url: Option<String>) -> Self {
        Self {
            full_log_url: normalize(full_log_url),
            stream_url: normalize(stream_url),
        }
    }

    /// Build from `(name, value)` pairs, as found on a container element.
    ///
    /// Unknown attributes are ignored. A later duplicate wins.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut full_log_url = None;
        let mut stream_url = None;
        for (name, value) in attributes {
            match name.as_ref() {
                FULL_LOG_URL_ATTR => full_log_url = Some(value.into()),
                STREAM_URL_ATTR => stream_url = Some(value.into()),
                _ => {}
            }
        }
        Self::new(full_log_url, stream_url)
    }

    pub fn full_log_url(&self) -> Option<&str> {
        self.full_log_url.as_deref()
    }

    pub fn stream_url(&self) -> Option<&str> {
        self.stream_url.as_deref()
    }

    /// True when neither endpoint is configured.
    pub const fn is_empty(&self) -> bool {
        self.full_log_url.is_none() && self.stream_url.is_none()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes_picks_known_names() {
        let attrs = ContainerAttributes::from_attributes([
            ("id", "job-log"),
            ("data-stream-url", "/view_job/42/log"),
            ("data-full-log-url", "/view_job/42/full_log"),
        ]);
        assert_eq!(attrs.stream_url(), Some("/view_job/42/log"));
        assert_eq!(attrs.full_log_url(), Some("/view_job/42/full_log"));
        assert!(!attrs.is_empty());
    }

    #[test]
    fn test_missing_full_log_attribute() {
        let attrs = ContainerAttributes::from_attributes([("data-stream-url", "/log")]);
        assert_eq!(attrs.full_log_url(), None);
        assert_eq!(attrs.stream_url(), Some("/log"));
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let attrs = ContainerAttributes::new(Some("  ".to_string()), Some(String::new()));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_attribute_names_are_exact() {
        let attrs = ContainerAttributes::from_attributes([("DATA-STREAM-URL", "/log")]);
        assert!(attrs.is_empty());
    }
}

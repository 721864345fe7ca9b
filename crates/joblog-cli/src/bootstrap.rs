//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: the HTTP client (via joblog-http) is built here and
//! injected into the viewer (via joblog-core) as both endpoint ports.

use std::sync::Arc;
use std::time::Duration;

use joblog_core::{ContainerAttributes, ErrorMatcher, JobLogViewer, LogContainerPort};
use joblog_http::{HttpClientConfig, HttpLogClient};
use tracing::{info, warn};

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::OutputFormat;

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// The endpoint attributes.
    pub attributes: ContainerAttributes,
    /// HTTP client settings.
    pub http: HttpClientConfig,
    /// Pattern marking error lines.
    pub error_pattern: String,
    /// Output format for stdout.
    pub format: OutputFormat,
    /// Whether error lines may be coloured.
    pub color: bool,
}

impl CliConfig {
    /// Build from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut http = HttpClientConfig::new()
            .with_optional_base_url(cli.base_url.clone())
            .with_optional_session_cookie(cli.session_cookie.clone());
        for raw in &cli.headers {
            let (name, value) = parse_header(raw)?;
            http = http.with_header(name, value);
        }
        if let Some(secs) = cli.timeout_secs {
            http = http.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            attributes: ContainerAttributes::new(cli.full_log_url.clone(), cli.stream_url.clone()),
            http,
            error_pattern: cli.error_pattern.clone(),
            format: cli.format,
            color: !cli.no_color,
        })
    }
}

/// Split a `Name: value` header argument.
fn parse_header(raw: &str) -> Result<(String, String), CliError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| CliError::Arguments(format!("Header must be 'Name: value', got '{raw}'")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Arguments(format!("Header name missing in '{raw}'")));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Fully composed context for one viewer run.
pub struct CliContext {
    /// Client serving both the full-log and the stream port.
    pub client: Arc<HttpLogClient>,
    /// The endpoint attributes.
    pub attributes: ContainerAttributes,
    /// Compiled error pattern.
    pub matcher: ErrorMatcher,
    /// Output format for stdout.
    pub format: OutputFormat,
    /// Whether error lines may be coloured.
    pub color: bool,
}

/// Bootstrap the CLI application.
///
/// Fails on configuration problems only (bad pattern, bad base URL, bad
/// header); nothing touches the network yet.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let matcher = ErrorMatcher::new(&config.error_pattern)?;
    let client = Arc::new(HttpLogClient::new(&config.http)?);

    Ok(CliContext {
        client,
        attributes: config.attributes,
        matcher,
        format: config.format,
        color: config.color,
    })
}

/// Run a viewer into `container` until the stream closes.
///
/// Returns the container with everything that was rendered.
pub async fn run_viewer<C: LogContainerPort>(ctx: &CliContext, container: C) -> C {
    if ctx.attributes.is_empty() {
        warn!("Nothing to show: pass --full-log-url and/or --stream-url");
        return container;
    }

    let viewer = JobLogViewer::new(
        container,
        ctx.attributes.clone(),
        ctx.client.clone(),
        ctx.client.clone(),
    )
    .with_error_matcher(ctx.matcher.clone());

    let container = viewer.run().await;
    info!("Job log viewer finished");
    container
}

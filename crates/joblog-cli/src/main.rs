//! CLI entry point.
//!
//! Parses arguments, installs logging, hands configuration to bootstrap and
//! renders the job log into the terminal until the stream closes.

use clap::Parser;

use joblog_cli::{Cli, CliConfig, CliError, TerminalContainer, bootstrap, logging, run_viewer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env next to the job page checkout may carry JOBLOG_BASE_URL / JOBLOG_SESSION
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = match CliConfig::from_cli(&cli).and_then(bootstrap) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    let container = TerminalContainer::stdout(ctx.format, ctx.color);
    let mut container = run_viewer(&ctx, container).await;
    tracing::debug!(rows = container.rows(), "Rendered job log");

    if let Some(e) = container.take_error() {
        let e = CliError::from(e);
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}

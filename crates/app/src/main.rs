//! Vigil - dashboard endpoint verification harness
//!
//! Command-line entry point: resolves configuration, runs the built-in
//! dashboard suite against the configured base URL, prints a per-case
//! report and exits 0 iff every case passed.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vigil_application::RunSuite;
use vigil_domain::suite::dashboard_suite;
use vigil_infrastructure::{HarnessConfig, ReqwestHttpClient};

mod console;

/// Exit code when at least one case failed.
const EXIT_FAILED_CASES: u8 = 1;
/// Exit code for configuration or client setup errors.
const EXIT_CONFIG_ERROR: u8 = 2;

/// Black-box verification of the dashboard HTTP API.
///
/// Issues the built-in request/assert cases against the configured base
/// URL and reports each outcome independently; no failure stops the run.
#[derive(Debug, Parser)]
#[command(name = "vigil", version, about)]
struct Cli {
    /// Base URL of the dashboard under verification
    /// [env: VIGIL_BASE_URL, default: http://localhost:5001].
    #[arg(long)]
    base_url: Option<String>,

    /// Valid credential sent on authenticated cases
    /// [env: VIGIL_API_TOKEN].
    #[arg(long)]
    token: Option<String>,

    /// Per-request timeout in seconds [env: VIGIL_TIMEOUT_SEC, default: 30].
    #[arg(long)]
    timeout_sec: Option<u64>,

    /// Print observed status and timing for passing cases too.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("vigil: {message}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let client = match ReqwestHttpClient::new() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("vigil: cannot build HTTP client: {err}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    tracing::info!(base_url = %config.base_url, "starting verification run");

    let cases = dashboard_suite(config.token.reveal());
    let runner = RunSuite::new(client, config.base_url.clone(), config.timeout);
    let report = runner.run(&cases).await;

    print!("{}", console::format_report(&report, cli.verbose));

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED_CASES)
    }
}

/// Resolves environment configuration, then applies CLI overrides.
fn resolve_config(cli: &Cli) -> Result<HarnessConfig, String> {
    let mut config = HarnessConfig::from_env().map_err(|e| e.to_string())?;

    if let Some(base_url) = &cli.base_url {
        config.override_base_url(base_url).map_err(|e| e.to_string())?;
    }
    if let Some(token) = &cli.token {
        config.override_token(token);
    }
    if let Some(secs) = cli.timeout_sec {
        if secs == 0 {
            return Err("--timeout-sec must be greater than zero".to_string());
        }
        config.override_timeout_secs(secs);
    }

    Ok(config)
}

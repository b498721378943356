use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info};

use retire_cli::app;
use retire_cli::logging;
use retire_cli::output::{self, OutputFormat};
use retire_core::{
    CalculationClient, CalculatorForm, ClientConfig, SubmissionState, SubmitOutcome,
    TracingNotifier,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Retirement savings calculator.
///
/// Validates the inputs locally, sends one request to the calculator
/// service, and prints the monthly deposit needed to reach the target.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Current age in whole years (18-100).
    #[arg(long, required_unless_present = "health")]
    current_age: Option<String>,

    /// Planned retirement age in whole years (18-100, above current age).
    #[arg(long, required_unless_present = "health")]
    retirement_age: Option<String>,

    /// Lifestyle: `simple` or `fancy`. Defaults to `simple`.
    #[arg(long)]
    lifestyle: Option<String>,

    /// Annual interest rate in percent (0-100). The service picks one when omitted.
    #[arg(long)]
    interest_rate: Option<String>,

    /// Base URL of the calculator API. Overrides `RETIRE_CALC_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    /// Transport backend. Overrides `RETIRE_CALC_BACKEND`.
    #[arg(long)]
    backend: Option<String>,

    /// Only query the service health endpoint.
    #[arg(long)]
    health: bool,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Log filter (e.g. `debug`, `warn,retire_core=trace`). Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress log output on stderr.
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn form(&self) -> CalculatorForm {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        CalculatorForm::new(text(&self.current_age), text(&self.retirement_age))
            .with_lifestyle(text(&self.lifestyle))
            .with_interest_rate(text(&self.interest_rate))
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if cli.quiet {
        logging::set_stderr_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    let config = app::resolve_config(
        ClientConfig::from_env(),
        cli.backend.as_deref(),
        cli.api_url.as_deref(),
    );

    if cli.health {
        let client = app::connect(&config).await?;
        let status = client
            .health()
            .await
            .with_context(|| format!("health check against {} failed", config.base_url))?;
        println!("{status}");
        return Ok(());
    }

    let machine = app::build_machine(&config, Arc::new(TracingNotifier)).await?;
    info!(backend = %config.backend, base_url = %config.base_url, "submitting calculation");

    match machine.submit(&cli.form()).await {
        SubmitOutcome::Settled(SubmissionState::Succeeded(response)) => {
            print!("{}", output::render_response(&response, cli.format)?);
            Ok(())
        }
        SubmitOutcome::Settled(SubmissionState::Failed(message)) => bail!(message),
        SubmitOutcome::Blocked(issues) => {
            eprint!("{}", output::render_issues(&issues));
            bail!("{} invalid input(s); nothing was sent", issues.len())
        }
        other => bail!("submission did not settle: {other:?}"),
    }
}

mod archaeologist;
mod config;
mod error;
mod instrumentation;
mod llm;
mod search;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use archaeologist::Archaeologist;
use config::Config;
use error::RunError;

const PROGRAM: &str = env!("CARGO_PKG_NAME");

#[derive(Parser)]
#[command(
    name = "ai-archaeologist",
    version,
    about = "Reconstruct old internet slang fragments and dig up context for them"
)]
struct Cli {
    /// Print run timings and token usage after the report
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// The fragment to reconstruct; multiple words are joined with spaces
    #[arg(value_name = "FRAGMENT", trailing_var_arg = true, allow_hyphen_values = true)]
    fragment: Vec<String>,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose { "ai_archaeologist=debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match archaeologist::run(&cli.fragment, Config::from_env, Archaeologist::new).await {
        Ok(excavation) => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", excavation.report()).context("Failed to write report")?;

            if cli.verbose {
                eprintln!("{}", excavation.run_log.summary());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if let RunError::Search(search) = &e {
                warn!(status = ?search.status(), reason = ?search.reason(), "Web search failed");
            }
            debug!(error = ?e, "Run aborted");

            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", e.user_message(PROGRAM)).context("Failed to write error message")?;
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

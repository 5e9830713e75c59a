use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use avl_cert_core::{verify_reader, VerificationReport, VerifierConfig, MODE_ENV};

const EXIT_INVALID: i32 = 2;

#[derive(Parser)]
#[command(
    name = "avl-cert",
    version,
    about = "Verify AVL rebalancing strategy certificates"
)]
struct Cli {
    /// Goal of the strategy: insertion|i|deletion|d (falls back to AVL_CERT_MODE)
    #[arg(value_name = "MODE")]
    mode: Option<String>,

    /// Read the transcript from PATH instead of stdin
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output the verification report as JSON instead of the verdict line
    #[arg(long)]
    json: bool,

    /// Exit with status 2 when the strategy is invalid
    #[arg(long)]
    fail_on_invalid: bool,

    /// Log accepted moves and unmatched states to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_verify(&cli) {
        Ok(report) => {
            if cli.fail_on_invalid && !report.is_valid() {
                std::process::exit(EXIT_INVALID);
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run_verify(cli: &Cli) -> Result<VerificationReport, String> {
    let config = VerifierConfig::from_cli_and_env(cli.mode.as_deref()).map_err(|err| {
        format!(
            "{}\nusage: avl-cert [insertion|i|deletion|d] < input-file (or set {})",
            err, MODE_ENV
        )
    })?;

    let report = match cli.input.as_ref() {
        Some(path) => {
            debug!(path = %path.display(), goal = %config.goal, "reading transcript");
            let file = File::open(path)
                .map_err(|err| format!("failed to open {}: {}", path.display(), err))?;
            verify_reader(config, BufReader::new(file))
        }
        None => verify_reader(config, io::stdin().lock()),
    }
    .map_err(|err| err.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("json encode error: {}", err))?;
        println!("{}", json);
    } else {
        println!("{}", report.status_line());
    }
    Ok(report)
}

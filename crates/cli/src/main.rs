//! goldsync command-line front-end.
//!
//! Compares a freshly captured observation file against a stored reference
//! and reconciles the differences with the selected strategy. Exit code 0
//! means the reference is consistent afterwards; 1 means unresolved
//! differences or missing input.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use goldsync_core::diff::split_lines;
use goldsync_core::reconcile::{reconcile, ReconcileRequest};
use goldsync_core::strategy::{Strategy, DEFAULT_STRATEGY};

/// Environment variable consulted when `--reconcile` is not given.
const RECONCILE_ENV_VAR: &str = "GOLDSYNC_RECONCILE";

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Compare and reconcile differences in observation files.
#[derive(Parser, Debug)]
#[command(
    name = "goldsync",
    version,
    about = "Compare and reconcile differences in golden-file observations"
)]
struct Cli {
    /// The reconcile strategy to use: accept, abort, console, dialog, kdiff3.
    #[arg(long)]
    reconcile: Option<String>,

    /// The reference observation file.
    #[arg(long)]
    reference: PathBuf,

    /// The current observation file (a handoff artifact: removed after
    /// reading).
    #[arg(long)]
    current: PathBuf,

    /// The name of the test (for prompts). Default is derived from
    /// --current.
    #[arg(long)]
    test: Option<String>,

    /// If given, the reason why saving of new references is not allowed.
    #[arg(long)]
    no_save: Option<String>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // Minimal logging; the interactive surface owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let current_text = std::fs::read_to_string(&cli.current).with_context(|| {
        format!(
            "the current observation file does not exist: {}",
            cli.current.display()
        )
    })?;
    // The current file is a handoff artifact from the test runner; consume
    // it so a stale copy cannot be reconciled twice.
    std::fs::remove_file(&cli.current).with_context(|| {
        format!(
            "failed to remove the current observation file: {}",
            cli.current.display()
        )
    })?;

    let test_name = cli
        .test
        .clone()
        .unwrap_or_else(|| test_name_from_path(&cli.current));
    let name = strategy_name(cli.reconcile.clone(), std::env::var(RECONCILE_ENV_VAR).ok());
    debug!(strategy = %name, test = %test_name, "resolved reconcile configuration");
    let strategy = Strategy::from_name(&name)?;

    let request = ReconcileRequest {
        test_name,
        reference_path: cli.reference.clone(),
        current_lines: split_lines(&current_text),
        no_save: cli.no_save.clone(),
    };
    Ok(reconcile(&strategy, &request)?)
}

/// Guess the test name from the current observation file path.
fn test_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "observations".to_string())
}

/// Resolve the strategy name: explicit flag, then environment, then default.
fn strategy_name(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env).unwrap_or_else(|| DEFAULT_STRATEGY.to_string())
}

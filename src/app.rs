//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the artifact directory
//! - runs the scoring pipeline
//! - prints reports
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, InspectArgs, PredictArgs, TuiArgs};
use crate::domain::{CustomerRecord, ScreenConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `churn` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `churn` (and `churn --artifacts DIR`) to behave like
    // `churn tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = screen_config_from_args(&args);
    let store = crate::artifacts::shared(&config.artifact_dir)?;
    let record = record_from_args(&args, store);

    let run = pipeline::run_predict(store, record)?;

    println!("{}", crate::report::format_prediction(&run.record, &run.result));

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::append_prediction_csv(path, &run.record, &run.result)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_prediction_json(path, &run.record, &run.result)?;
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let dir = resolve_artifact_dir(args.artifacts);
    let store = crate::artifacts::shared(&dir)?;
    println!("{}", crate::report::format_store_summary(store));
    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let dir = resolve_artifact_dir(args.artifacts);
    crate::tui::run(&dir)
}

pub fn screen_config_from_args(args: &PredictArgs) -> ScreenConfig {
    ScreenConfig {
        artifact_dir: resolve_artifact_dir(args.artifacts.clone()),
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Build the record to score from CLI flags, falling back to the first
/// fitted category for geography/gender when the flags are omitted.
pub fn record_from_args(args: &PredictArgs, store: &crate::artifacts::ArtifactStore) -> CustomerRecord {
    CustomerRecord {
        credit_score: args.credit_score,
        geography: args
            .geography
            .clone()
            .unwrap_or_else(|| store.geography_categories()[0].clone()),
        gender: args
            .gender
            .clone()
            .unwrap_or_else(|| store.gender_classes()[0].clone()),
        age: args.age,
        tenure: args.tenure,
        balance: args.balance,
        num_products: args.num_products,
        has_card: args.has_card,
        active_member: args.active_member,
        salary: args.salary,
    }
}

/// Resolve the artifact directory: flag, then `CHURN_ARTIFACTS_DIR`
/// (with `.env` honored), then `./artifacts`.
pub fn resolve_artifact_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    dotenvy::dotenv().ok();
    match std::env::var("CHURN_ARTIFACTS_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("artifacts"),
    }
}

/// Rewrite argv so `churn` defaults to `churn tui`.
///
/// Rules:
/// - `churn`                        -> `churn tui`
/// - `churn --artifacts DIR ...`    -> `churn tui --artifacts DIR ...`
/// - `churn --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "inspect" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

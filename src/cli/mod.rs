//! Command-line parsing for the churn screening tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the encoding/scoring code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "churn", version, about = "Customer churn screening over fitted model artifacts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one customer record from flags, print the report, and
    /// optionally export the prediction.
    Predict(PredictArgs),
    /// Print a summary of the loaded artifacts (categories, columns, layers).
    Inspect(InspectArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying scoring pipeline as `churn predict`,
    /// but renders an input form and the result in a terminal UI.
    Tui(TuiArgs),
}

/// Options for one-shot prediction.
///
/// Numeric defaults are the documented default record; geography and gender
/// default to the first fitted category when omitted.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Artifact directory (overrides CHURN_ARTIFACTS_DIR).
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,

    /// Customer geography (one of the fitted categories).
    #[arg(short = 'g', long)]
    pub geography: Option<String>,

    /// Customer gender (one of the fitted classes).
    #[arg(long)]
    pub gender: Option<String>,

    /// Credit score (300-900).
    #[arg(long, default_value_t = 650)]
    pub credit_score: i64,

    /// Age in years (18-92).
    #[arg(long, default_value_t = 27)]
    pub age: i64,

    /// Tenure in years (0-10).
    #[arg(long, default_value_t = 3)]
    pub tenure: i64,

    /// Account balance (non-negative).
    #[arg(long, default_value_t = 5000.0)]
    pub balance: f64,

    /// Number of products (1-4).
    #[arg(long, default_value_t = 1)]
    pub num_products: i64,

    /// Whether the customer holds a credit card.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub has_card: bool,

    /// Whether the customer is an active member.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub active_member: bool,

    /// Estimated salary (non-negative).
    #[arg(long, default_value_t = 30000.0)]
    pub salary: f64,

    /// Append the prediction to a CSV log.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Write the prediction (record + result + timestamp) as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for the artifact summary.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Artifact directory (overrides CHURN_ARTIFACTS_DIR).
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
}

/// Options for the TUI.
#[derive(Debug, Parser)]
pub struct TuiArgs {
    /// Artifact directory (overrides CHURN_ARTIFACTS_DIR).
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
}

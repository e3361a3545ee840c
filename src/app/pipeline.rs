//! Shared scoring pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> encode -> scale -> predict -> label
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::artifacts::ArtifactStore;
use crate::domain::{CustomerRecord, PredictionResult};
use crate::error::AppError;

/// All computed outputs of a single prediction run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub record: CustomerRecord,
    pub result: PredictionResult,
}

/// Validate a record and score it against the loaded artifacts.
pub fn run_predict(store: &ArtifactStore, record: CustomerRecord) -> Result<RunOutput, AppError> {
    record.validate(store)?;
    let result = store.score(&record)?;
    Ok(RunOutput { record, result })
}

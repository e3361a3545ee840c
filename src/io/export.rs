//! Export predictions to CSV/JSON.
//!
//! The CSV export is an append-style log meant to be easy to consume in
//! spreadsheets or downstream scripts; the JSON export is the "portable"
//! representation of a single prediction (tool, timestamp, record, result).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CustomerRecord, PredictionResult};
use crate::error::AppError;

/// A saved prediction file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub record: CustomerRecord,
    pub result: PredictionResult,
}

/// Append one prediction row to a CSV log, writing the header first if the
/// file does not exist yet.
pub fn append_prediction_csv(
    path: &Path,
    record: &CustomerRecord,
    result: &PredictionResult,
) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::new(2, format!("Failed to open export CSV '{}': {e}", path.display()))
        })?;

    // Decide from the opened handle so a concurrent writer cannot slip in
    // between an existence check and the open.
    let is_empty = file
        .metadata()
        .map_err(|e| {
            AppError::new(2, format!("Failed to stat export CSV '{}': {e}", path.display()))
        })?
        .len()
        == 0;

    if is_empty {
        writeln!(
            file,
            "timestamp,credit_score,geography,gender,age,tenure,balance,num_products,has_card,active_member,salary,probability,label"
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
    }

    writeln!(
        file,
        "{},{},{},{},{},{},{:.2},{},{},{},{:.2},{:.10},{}",
        Utc::now().to_rfc3339(),
        record.credit_score,
        record.geography,
        record.gender,
        record.age,
        record.tenure,
        record.balance,
        record.num_products,
        record.has_card,
        record.active_member,
        record.salary,
        result.probability,
        result.label.as_str(),
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;

    Ok(())
}

/// Write a single prediction as JSON.
pub fn write_prediction_json(
    path: &Path,
    record: &CustomerRecord,
    result: &PredictionResult,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create prediction JSON '{}': {e}", path.display()),
        )
    })?;

    let out = PredictionFile {
        tool: "churn".to_string(),
        generated_at: Utc::now(),
        record: record.clone(),
        result: *result,
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write prediction JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CustomerRecord {
        CustomerRecord {
            credit_score: 650,
            geography: "France".into(),
            gender: "Female".into(),
            age: 27,
            tenure: 3,
            balance: 5000.0,
            num_products: 1,
            has_card: true,
            active_member: true,
            salary: 30000.0,
        }
    }

    #[test]
    fn csv_log_writes_header_once_and_appends() {
        let path = std::env::temp_dir().join(format!("churn-export-{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let result = PredictionResult::from_probability(0.42);
        append_prediction_csv(&path, &record(), &result).unwrap();
        append_prediction_csv(&path, &record(), &result).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp,credit_score,geography"));
        assert!(lines[1].contains("France"));
        assert!(lines[1].contains("0.4200000000"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn csv_label_matches_json_vocabulary() {
        let path =
            std::env::temp_dir().join(format!("churn-export-label-{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);

        append_prediction_csv(&path, &record(), &PredictionResult::from_probability(0.9)).unwrap();
        append_prediction_csv(&path, &record(), &PredictionResult::from_probability(0.1)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].ends_with(",churn"));
        assert!(lines[2].ends_with(",not_churn"));

        // Same tokens the JSON export produces via serde.
        assert_eq!(
            serde_json::to_string(&crate::domain::ChurnLabel::Churn).unwrap(),
            "\"churn\""
        );
        assert_eq!(
            serde_json::to_string(&crate::domain::ChurnLabel::NotChurn).unwrap(),
            "\"not_churn\""
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn csv_header_is_written_into_a_pre_created_empty_file() {
        let path =
            std::env::temp_dir().join(format!("churn-export-empty-{}.csv", std::process::id()));
        std::fs::write(&path, b"").unwrap();

        append_prediction_csv(&path, &record(), &PredictionResult::from_probability(0.5)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("timestamp,credit_score,geography"));
        assert_eq!(text.lines().count(), 2);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn prediction_json_round_trips() {
        let path = std::env::temp_dir().join(format!("churn-export-{}.json", std::process::id()));
        let result = PredictionResult::from_probability(0.73);
        write_prediction_json(&path, &record(), &result).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let file: PredictionFile = serde_json::from_str(&text).unwrap();
        assert_eq!(file.tool, "churn");
        assert_eq!(file.record, record());
        assert!((file.result.probability - 0.73).abs() < 1e-12);
        std::fs::remove_file(&path).unwrap();
    }
}

//! Formatted terminal output for predictions and artifact summaries.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::artifacts::ArtifactStore;
use crate::domain::{ChurnLabel, CustomerRecord, PredictionResult};

/// Format a full prediction report: record echo + probability + verdict.
pub fn format_prediction(record: &CustomerRecord, result: &PredictionResult) -> String {
    let mut out = String::new();

    out.push_str("=== churn - Customer Churn Screening ===\n");
    out.push_str(&format!(
        "Customer: {} / {} | age {} | tenure {}y | {} product(s)\n",
        record.geography, record.gender, record.age, record.tenure, record.num_products
    ));
    out.push_str(&format!(
        "Credit score: {} | balance: {:.2} | salary: {:.2}\n",
        record.credit_score, record.balance, record.salary
    ));
    out.push_str(&format!(
        "Credit card: {} | active member: {}\n",
        yes_no(record.has_card),
        yes_no(record.active_member)
    ));

    out.push('\n');
    out.push_str(&format!(
        "Churn probability: {:.2}%\n",
        result.probability * 100.0
    ));
    out.push_str(&format!("Verdict: customer is {}\n", result.label.display_name()));

    out
}

/// Format a summary of the loaded artifacts.
pub fn format_store_summary(store: &ArtifactStore) -> String {
    let mut out = String::new();

    out.push_str("=== churn - Loaded Artifacts ===\n");
    out.push_str(&format!(
        "Geographies: {}\n",
        store.geography_categories().join(", ")
    ));
    out.push_str(&format!("Genders: {}\n", store.gender_classes().join(", ")));
    out.push_str(&format!(
        "Feature columns ({}):\n",
        store.feature_columns().len()
    ));
    for col in store.feature_columns() {
        out.push_str(&format!("  - {col}\n"));
    }

    out.push_str("Network layers:\n");
    for (i, (inputs, outputs)) in store.layer_dims().iter().enumerate() {
        out.push_str(&format!("  {i}: {inputs} -> {outputs}\n"));
    }

    out
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

/// One-line verdict for status bars.
pub fn short_verdict(result: &PredictionResult) -> String {
    match result.label {
        ChurnLabel::Churn => format!("{:.2}% - likely to churn", result.probability * 100.0),
        ChurnLabel::NotChurn => {
            format!("{:.2}% - not likely to churn", result.probability * 100.0)
        }
    }
}

//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during scoring
//! - exported to JSON/CSV
//! - reloaded later for comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactStore;
use crate::error::AppError;

/// Classification threshold: churn iff probability is strictly above this.
pub const CHURN_THRESHOLD: f64 = 0.5;

/// Inclusive bounds for the numeric record fields, matching the ranges the
/// model was trained on.
pub const CREDIT_SCORE_RANGE: (i64, i64) = (300, 900);
pub const AGE_RANGE: (i64, i64) = (18, 92);
pub const TENURE_RANGE: (i64, i64) = (0, 10);
pub const NUM_PRODUCTS_RANGE: (i64, i64) = (1, 4);

/// Binary verdict derived from the churn probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnLabel {
    Churn,
    NotChurn,
}

impl ChurnLabel {
    /// Apply the fixed threshold. Exactly 0.5 is not churn.
    pub fn from_probability(probability: f64) -> Self {
        if probability > CHURN_THRESHOLD {
            ChurnLabel::Churn
        } else {
            ChurnLabel::NotChurn
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ChurnLabel::Churn => "likely to churn",
            ChurnLabel::NotChurn => "not likely to churn",
        }
    }

    /// Stable token for exports; matches the serde representation so the CSV
    /// and JSON surfaces agree.
    pub fn as_str(self) -> &'static str {
        match self {
            ChurnLabel::Churn => "churn",
            ChurnLabel::NotChurn => "not_churn",
        }
    }
}

/// One customer's attributes, built fresh per prediction request.
///
/// Bounds are validated by [`CustomerRecord::validate`] before the record
/// reaches the inference pipeline; the categorical fields are additionally
/// checked against the fitted category sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub credit_score: i64,
    pub geography: String,
    pub gender: String,
    pub age: i64,
    pub tenure: i64,
    pub balance: f64,
    pub num_products: i64,
    pub has_card: bool,
    pub active_member: bool,
    pub salary: f64,
}

impl CustomerRecord {
    /// The documented default record: first known geography/gender plus the
    /// standard starting values. Used by the TUI reset and CLI flag defaults.
    pub fn default_for(store: &ArtifactStore) -> Self {
        Self {
            credit_score: 650,
            geography: store.geography_categories()[0].clone(),
            gender: store.gender_classes()[0].clone(),
            age: 27,
            tenure: 3,
            balance: 5000.0,
            num_products: 1,
            has_card: true,
            active_member: true,
            salary: 30000.0,
        }
    }

    /// Validate field bounds and category membership.
    ///
    /// Categorical checks consult the fitted encoders so an unseen value is
    /// rejected here rather than defaulting silently downstream.
    pub fn validate(&self, store: &ArtifactStore) -> Result<(), AppError> {
        check_range("credit score", self.credit_score, CREDIT_SCORE_RANGE)?;
        check_range("age", self.age, AGE_RANGE)?;
        check_range("tenure", self.tenure, TENURE_RANGE)?;
        check_range("number of products", self.num_products, NUM_PRODUCTS_RANGE)?;

        if !(self.balance.is_finite() && self.balance >= 0.0) {
            return Err(AppError::new(
                3,
                format!("Balance must be a non-negative number (got {}).", self.balance),
            ));
        }
        if !(self.salary.is_finite() && self.salary >= 0.0) {
            return Err(AppError::new(
                3,
                format!(
                    "Estimated salary must be a non-negative number (got {}).",
                    self.salary
                ),
            ));
        }

        if !store.geography_categories().contains(&self.geography) {
            return Err(AppError::new(
                3,
                format!(
                    "Unknown geography '{}'. Known: {}.",
                    self.geography,
                    store.geography_categories().join(", ")
                ),
            ));
        }
        if !store.gender_classes().contains(&self.gender) {
            return Err(AppError::new(
                3,
                format!(
                    "Unknown gender '{}'. Known: {}.",
                    self.gender,
                    store.gender_classes().join(", ")
                ),
            ));
        }

        Ok(())
    }
}

fn check_range(name: &str, value: i64, range: (i64, i64)) -> Result<(), AppError> {
    let (lo, hi) = range;
    if value < lo || value > hi {
        return Err(AppError::new(
            3,
            format!("{name} must be in [{lo}, {hi}] (got {value})."),
        ));
    }
    Ok(())
}

/// Output of one scoring run: a probability in [0,1] plus the derived label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub label: ChurnLabel,
}

impl PredictionResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            label: ChurnLabel::from_probability(probability),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults/environment).
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    pub artifact_dir: PathBuf,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_boundary_at_half_is_not_churn() {
        assert_eq!(ChurnLabel::from_probability(0.5), ChurnLabel::NotChurn);
        assert_eq!(
            ChurnLabel::from_probability(0.5 + 1e-12),
            ChurnLabel::Churn
        );
        assert_eq!(ChurnLabel::from_probability(0.0), ChurnLabel::NotChurn);
        assert_eq!(ChurnLabel::from_probability(1.0), ChurnLabel::Churn);
    }

    #[test]
    fn prediction_result_carries_label() {
        let r = PredictionResult::from_probability(0.73);
        assert_eq!(r.label, ChurnLabel::Churn);
        assert!((r.probability - 0.73).abs() < 1e-15);
    }
}

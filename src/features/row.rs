//! Feature row assembly in the fitted column order.
//!
//! The scaler and the network were fitted on rows laid out as:
//!
//! ```text
//! CreditScore, Gender, Age, Tenure, Balance, NumOfProducts,
//! HasCrCard, IsActiveMember, EstimatedSalary, Geography_<cat>...
//! ```
//!
//! with one geography indicator per known category, in encoder order. Any
//! deviation from this order silently corrupts predictions, so the canonical
//! order lives here and the artifact loader checks the scaler's stored column
//! names against it.

use crate::domain::CustomerRecord;
use crate::error::AppError;
use crate::features::{LabelEncoding, OneHotEncoding};

/// Names of the base (non-geography) feature columns, fitted order.
pub const BASE_COLUMNS: [&str; 9] = [
    "CreditScore",
    "Gender",
    "Age",
    "Tenure",
    "Balance",
    "NumOfProducts",
    "HasCrCard",
    "IsActiveMember",
    "EstimatedSalary",
];

/// The full fitted column order for a given geography category set.
pub fn feature_columns(geography_categories: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for cat in geography_categories {
        columns.push(format!("Geography_{cat}"));
    }
    columns
}

/// Assemble one unscaled feature row from a record and the fitted encoders.
pub fn assemble_row(
    record: &CustomerRecord,
    gender: &LabelEncoding,
    geography: &OneHotEncoding,
) -> Result<Vec<f64>, AppError> {
    let gender_code = gender.encode(&record.gender)?;
    let geo_indicators = geography.encode(&record.geography)?;

    let mut row = Vec::with_capacity(BASE_COLUMNS.len() + geo_indicators.len());
    row.push(record.credit_score as f64);
    row.push(gender_code);
    row.push(record.age as f64);
    row.push(record.tenure as f64);
    row.push(record.balance);
    row.push(record.num_products as f64);
    row.push(if record.has_card { 1.0 } else { 0.0 });
    row.push(if record.active_member { 1.0 } else { 0.0 });
    row.push(record.salary);
    row.extend(geo_indicators);

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoders() -> (LabelEncoding, OneHotEncoding) {
        (
            LabelEncoding::new("gender", vec!["Female".into(), "Male".into()]).unwrap(),
            OneHotEncoding::new(
                "geography",
                vec!["France".into(), "Germany".into(), "Spain".into()],
            )
            .unwrap(),
        )
    }

    fn record() -> CustomerRecord {
        CustomerRecord {
            credit_score: 650,
            geography: "Germany".into(),
            gender: "Male".into(),
            age: 27,
            tenure: 3,
            balance: 5000.0,
            num_products: 1,
            has_card: true,
            active_member: false,
            salary: 30000.0,
        }
    }

    #[test]
    fn feature_columns_follow_fitted_order() {
        let cols = feature_columns(&["France".into(), "Germany".into()]);
        assert_eq!(cols.len(), 11);
        assert_eq!(cols[0], "CreditScore");
        assert_eq!(cols[8], "EstimatedSalary");
        assert_eq!(cols[9], "Geography_France");
        assert_eq!(cols[10], "Geography_Germany");
    }

    #[test]
    fn assemble_row_places_every_field() {
        let (gender, geo) = encoders();
        let row = assemble_row(&record(), &gender, &geo).unwrap();
        assert_eq!(
            row,
            vec![650.0, 1.0, 27.0, 3.0, 5000.0, 1.0, 1.0, 0.0, 30000.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn assemble_row_surfaces_unknown_categories() {
        let (gender, geo) = encoders();
        let mut bad = record();
        bad.geography = "Italy".into();
        assert_eq!(assemble_row(&bad, &gender, &geo).unwrap_err().exit_code(), 3);
    }
}

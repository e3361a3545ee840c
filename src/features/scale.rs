//! Fitted standardization.
//!
//! The scaler stores the per-column mean and scale fixed when the model was
//! trained; `transform` applies `(x - mean) / scale` across the full feature
//! row. Column order is the scaler's, so the caller must assemble rows via
//! [`crate::features::row`] before scaling.

use crate::error::AppError;

/// Fitted standard scaler over a named column set.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(
        columns: Vec<String>,
        mean: Vec<f64>,
        scale: Vec<f64>,
    ) -> Result<Self, AppError> {
        if columns.is_empty() {
            return Err(AppError::new(2, "Scaler has an empty column list."));
        }
        if mean.len() != columns.len() || scale.len() != columns.len() {
            return Err(AppError::new(
                2,
                format!(
                    "Scaler shape mismatch: {} columns but {} means and {} scales.",
                    columns.len(),
                    mean.len(),
                    scale.len()
                ),
            ));
        }
        for (i, &s) in scale.iter().enumerate() {
            if !(s.is_finite() && s > 0.0) {
                return Err(AppError::new(
                    2,
                    format!("Scaler column '{}' has invalid scale {s}.", columns[i]),
                ));
            }
        }
        for (i, &m) in mean.iter().enumerate() {
            if !m.is_finite() {
                return Err(AppError::new(
                    2,
                    format!("Scaler column '{}' has non-finite mean {m}.", columns[i]),
                ));
            }
        }
        Ok(Self { columns, mean, scale })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Standardize a full feature row.
    ///
    /// A length mismatch is an internal contract violation (the assembler and
    /// the scaler disagree about the column set), not a user error.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, AppError> {
        if row.len() != self.columns.len() {
            return Err(AppError::new(
                4,
                format!(
                    "Feature row has {} values but the scaler was fitted on {} columns.",
                    row.len(),
                    self.columns.len()
                ),
            ));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler::new(
            vec!["a".into(), "b".into()],
            vec![10.0, 0.0],
            vec![2.0, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn transform_standardizes_each_column() {
        let out = scaler().transform(&[14.0, 1.0]).unwrap();
        assert_eq!(out, vec![2.0, 2.0]);
    }

    #[test]
    fn transform_rejects_wrong_row_length() {
        let err = scaler().transform(&[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn construction_rejects_bad_shapes_and_scales() {
        let bad_len = StandardScaler::new(vec!["a".into()], vec![0.0, 1.0], vec![1.0]);
        assert_eq!(bad_len.unwrap_err().exit_code(), 2);

        let zero_scale = StandardScaler::new(vec!["a".into()], vec![0.0], vec![0.0]);
        assert_eq!(zero_scale.unwrap_err().exit_code(), 2);

        let nan_mean = StandardScaler::new(vec!["a".into()], vec![f64::NAN], vec![1.0]);
        assert_eq!(nan_mean.unwrap_err().exit_code(), 2);
    }
}

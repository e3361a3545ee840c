//! Artifact JSON files: schema types and readers.
//!
//! Four files make up one fitted artifact set, all living in a single
//! directory:
//!
//! - `model.json` — fitted network weights (`ModelFile`)
//! - `gender_encoder.json` — fitted label encoder classes
//! - `geography_encoder.json` — fitted one-hot encoder categories
//! - `scaler.json` — fitted standardization parameters
//!
//! The schemas carry the fitted numbers verbatim; semantic validation (shape
//! chaining, column-order checks) happens in `artifacts::store` when the
//! files are composed into an [`crate::artifacts::ArtifactStore`].

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::model::Activation;

pub const MODEL_FILE: &str = "model.json";
pub const GENDER_ENCODER_FILE: &str = "gender_encoder.json";
pub const GEOGRAPHY_ENCODER_FILE: &str = "geography_encoder.json";
pub const SCALER_FILE: &str = "scaler.json";

/// Fitted network parameters, layer order = evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub input_dim: usize,
    pub layers: Vec<LayerFile>,
}

/// One dense layer: row-major weights (`weights[out][in]`), bias, activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerFile {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

/// Fitted label-encoder classes, in fitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoderFile {
    pub classes: Vec<String>,
}

/// Fitted one-hot-encoder categories, in fitted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoderFile {
    pub categories: Vec<String>,
}

/// Fitted standardization parameters, aligned with `columns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerFile {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// All four artifact files, read but not yet composed/validated.
#[derive(Debug, Clone)]
pub struct ArtifactFiles {
    pub model: ModelFile,
    pub gender: LabelEncoderFile,
    pub geography: OneHotEncoderFile,
    pub scaler: ScalerFile,
}

/// Read the full artifact set from a directory.
pub fn read_artifact_files(dir: &Path) -> Result<ArtifactFiles, AppError> {
    Ok(ArtifactFiles {
        model: read_json(&dir.join(MODEL_FILE))?,
        gender: read_json(&dir.join(GENDER_ENCODER_FILE))?,
        geography: read_json(&dir.join(GEOGRAPHY_ENCODER_FILE))?,
        scaler: read_json(&dir.join(SCALER_FILE))?,
    })
}

fn read_json<T: DeserializeOwned>(path: &PathBuf) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open artifact '{}': {e}", path.display()),
        )
    })?;
    serde_json::from_reader(file).map_err(|e| {
        AppError::new(
            2,
            format!("Invalid artifact JSON '{}': {e}", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("churn-artifact-io-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = temp_dir("missing");
        let err = read_artifact_files(&dir).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(MODEL_FILE));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn corrupt_json_is_a_load_error() {
        let dir = temp_dir("corrupt");
        std::fs::write(dir.join(MODEL_FILE), b"{ not json").unwrap();
        let err = read_artifact_files(&dir).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid artifact JSON"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn well_formed_files_round_trip() {
        let dir = temp_dir("ok");
        let model = ModelFile {
            input_dim: 2,
            layers: vec![LayerFile {
                weights: vec![vec![0.5, -0.5]],
                bias: vec![0.0],
                activation: Activation::Sigmoid,
            }],
        };
        std::fs::write(dir.join(MODEL_FILE), serde_json::to_vec(&model).unwrap()).unwrap();
        std::fs::write(
            dir.join(GENDER_ENCODER_FILE),
            serde_json::to_vec(&LabelEncoderFile {
                classes: vec!["Female".into(), "Male".into()],
            })
            .unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.join(GEOGRAPHY_ENCODER_FILE),
            serde_json::to_vec(&OneHotEncoderFile {
                categories: vec!["France".into()],
            })
            .unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.join(SCALER_FILE),
            serde_json::to_vec(&ScalerFile {
                columns: vec!["a".into(), "b".into()],
                mean: vec![0.0, 0.0],
                scale: vec![1.0, 1.0],
            })
            .unwrap(),
        )
        .unwrap();

        let files = read_artifact_files(&dir).unwrap();
        assert_eq!(files.model.input_dim, 2);
        assert_eq!(files.gender.classes.len(), 2);
        assert_eq!(files.geography.categories, vec!["France".to_string()]);
        assert_eq!(files.scaler.columns.len(), 2);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

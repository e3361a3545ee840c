//! The artifact store: fitted encoders, scaler, and network composed into
//! one read-only object.
//!
//! Loading validates the artifact set as a whole, not just file by file: the
//! scaler's stored column names must equal the canonical feature order
//! derived from the geography categories, and the network's input width must
//! match the column count. A mismatch here would otherwise corrupt every
//! prediction silently.

use std::path::Path;

use nalgebra::DVector;

use crate::domain::{CustomerRecord, PredictionResult};
use crate::error::AppError;
use crate::features::{
    assemble_row, feature_columns, EncodedFeatureVector, LabelEncoding, OneHotEncoding,
    StandardScaler,
};
use crate::io::artifact::{read_artifact_files, ArtifactFiles};
use crate::model::{DenseLayer, Network};

#[derive(Debug)]
pub struct ArtifactStore {
    network: Network,
    gender: LabelEncoding,
    geography: OneHotEncoding,
    scaler: StandardScaler,
    columns: Vec<String>,
}

impl ArtifactStore {
    /// Load and validate the full artifact set from a directory.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let files = read_artifact_files(dir)?;
        Self::from_files(files)
    }

    /// Compose already-read artifact files into a validated store.
    pub fn from_files(files: ArtifactFiles) -> Result<Self, AppError> {
        let gender = LabelEncoding::new("gender", files.gender.classes)?;
        let geography = OneHotEncoding::new("geography", files.geography.categories)?;

        let columns = feature_columns(geography.categories());
        let scaler = StandardScaler::new(files.scaler.columns, files.scaler.mean, files.scaler.scale)?;
        if scaler.columns() != columns.as_slice() {
            return Err(AppError::new(
                2,
                format!(
                    "Scaler column order does not match the fitted feature order.\n  expected: {}\n  found:    {}",
                    columns.join(", "),
                    scaler.columns().join(", ")
                ),
            ));
        }

        let mut layers = Vec::with_capacity(files.model.layers.len());
        for layer in files.model.layers {
            layers.push(DenseLayer::new(layer.weights, layer.bias, layer.activation)?);
        }
        let network = Network::new(layers, files.model.input_dim)?;
        if network.input_dim() != columns.len() {
            return Err(AppError::new(
                2,
                format!(
                    "Model takes {} inputs but the fitted feature order has {} columns.",
                    network.input_dim(),
                    columns.len()
                ),
            ));
        }

        Ok(Self {
            network,
            gender,
            geography,
            scaler,
            columns,
        })
    }

    /// Known geography categories, fitted order.
    pub fn geography_categories(&self) -> &[String] {
        self.geography.categories()
    }

    /// Known gender classes, fitted order.
    pub fn gender_classes(&self) -> &[String] {
        self.gender.classes()
    }

    /// Feature column names, fitted order.
    pub fn feature_columns(&self) -> &[String] {
        &self.columns
    }

    /// Network layer shapes, for the artifact summary.
    pub fn layer_dims(&self) -> Vec<(usize, usize)> {
        self.network.layer_dims()
    }

    /// Encode and scale a record into the vector the model expects.
    pub fn transform(&self, record: &CustomerRecord) -> Result<EncodedFeatureVector, AppError> {
        let row = assemble_row(record, &self.gender, &self.geography)?;
        let scaled = self.scaler.transform(&row)?;
        Ok(DVector::from_vec(scaled))
    }

    /// Run the model on an encoded feature vector.
    pub fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, AppError> {
        let p = self.network.predict_proba(features)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(AppError::new(
                4,
                format!("Model produced probability {p} outside [0, 1]."),
            ));
        }
        Ok(p)
    }

    /// Full scoring: transform, predict, label.
    pub fn score(&self, record: &CustomerRecord) -> Result<PredictionResult, AppError> {
        let features = self.transform(record)?;
        let probability = self.predict(&features)?;
        Ok(PredictionResult::from_probability(probability))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::io::artifact::{
        ArtifactFiles, LabelEncoderFile, LayerFile, ModelFile, OneHotEncoderFile, ScalerFile,
    };
    use crate::features::feature_columns;
    use crate::model::Activation;

    /// A small, fully deterministic artifact set over France/Germany/Spain
    /// and Female/Male: 12 inputs -> 4 relu -> 1 sigmoid.
    pub fn artifact_files() -> ArtifactFiles {
        let categories = vec![
            "France".to_string(),
            "Germany".to_string(),
            "Spain".to_string(),
        ];
        let columns = feature_columns(&categories);
        let n = columns.len();

        let mean = vec![
            650.0, 0.5, 38.0, 5.0, 76000.0, 1.5, 0.7, 0.5, 100000.0, 0.5, 0.25, 0.25,
        ];
        let scale = vec![
            97.0, 0.5, 10.5, 2.9, 62000.0, 0.58, 0.46, 0.5, 57500.0, 0.5, 0.43, 0.43,
        ];

        let mut hidden = Vec::new();
        for r in 0..4 {
            let row: Vec<f64> = (0..n)
                .map(|c| 0.05 * ((r * n + c) % 7) as f64 - 0.1)
                .collect();
            hidden.push(row);
        }

        ArtifactFiles {
            model: ModelFile {
                input_dim: n,
                layers: vec![
                    LayerFile {
                        weights: hidden,
                        bias: vec![0.1, -0.1, 0.05, 0.0],
                        activation: Activation::Relu,
                    },
                    LayerFile {
                        weights: vec![vec![0.6, -0.4, 0.3, 0.2]],
                        bias: vec![-0.2],
                        activation: Activation::Sigmoid,
                    },
                ],
            },
            gender: LabelEncoderFile {
                classes: vec!["Female".to_string(), "Male".to_string()],
            },
            geography: OneHotEncoderFile { categories },
            scaler: ScalerFile {
                columns,
                mean,
                scale,
            },
        }
    }
}

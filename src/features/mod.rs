//! Fitted feature transformations.
//!
//! Everything here reproduces a mapping fixed at training time; nothing is
//! fitted at runtime. The transforms are small, pure, and individually
//! testable:
//!
//! - categorical encoders (`encode`)
//! - standardization (`scale`)
//! - feature row assembly in the fitted column order (`row`)

pub mod encode;
pub mod row;
pub mod scale;

/// A record after categorical encoding and scaling, in the fitted column
/// order the model expects. Derived per request, never stored.
pub type EncodedFeatureVector = nalgebra::DVector<f64>;

pub use encode::{LabelEncoding, OneHotEncoding};
pub use row::{assemble_row, feature_columns};
pub use scale::StandardScaler;

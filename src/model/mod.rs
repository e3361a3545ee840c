//! Trained classifier evaluation.
//!
//! The model is a small dense feed-forward network whose fitted weights are
//! loaded from an artifact file; evaluation is a pure forward pass so the
//! pipeline code can stay simple and deterministic.

pub mod network;

pub use network::*;

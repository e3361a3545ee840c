//! Input/output helpers.
//!
//! - artifact JSON read + schema types (`artifact`)
//! - prediction exports (CSV/JSON) (`export`)

pub mod artifact;
pub mod export;

//! `churn-screen` library crate.
//!
//! The binary (`churn`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future API/daemon front-ends)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod artifacts;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod model;
pub mod report;
pub mod tui;

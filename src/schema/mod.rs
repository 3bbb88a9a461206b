//! Schema module - Configuration and report types for evolution runs.

mod config;
mod report;

pub use config::*;
pub use report::*;

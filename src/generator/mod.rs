//! Go harness generation for auto-benchable signatures.
//!
//! A signature qualifies when every parameter and result type is basic and it
//! returns exactly one value, optionally followed by an `error`.

pub mod go_runner;

pub use go_runner::{generate_harness, GeneratedHarness};

use crate::config::BenchgenConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("signature has non-basic types: {}", .types.join(", "))]
    NonBasicTypes { types: Vec<String> },

    #[error("signature has no function name")]
    MissingName,

    #[error("methods cannot be called without a receiver value")]
    Method,

    #[error("generic functions need explicit type arguments")]
    TypeParameters,

    #[error("signature has no result to compare")]
    NoResults,

    #[error("signature has {count} non-error results, expected exactly one")]
    MultipleResults { count: usize },

    #[error("signature returns more than one error")]
    MultipleErrors,

    #[error("failed to render harness")]
    Render(#[from] std::fmt::Error),
}

/// Settings that shape generated harnesses.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Tolerance used when the result type holds `float32`/`float64`.
    pub float_tolerance: f64,
    pub default_tolerance: f64,
    /// Path of the test-case file as seen from the Go package directory.
    pub test_cases_path: String,
    pub package: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            float_tolerance: 1e-6,
            default_tolerance: 0.0,
            test_cases_path: "test_cases/test_cases.json".to_string(),
            package: "main".to_string(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &BenchgenConfig) -> Self {
        Self {
            float_tolerance: config.comparison.float_tolerance,
            default_tolerance: config.comparison.default_tolerance,
            test_cases_path: config.generator.test_cases_path.clone(),
            package: config.generator.package.clone(),
        }
    }
}

// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod generator;
pub mod io;
pub mod runner;
pub mod testcases;

// Re-export commonly used types
pub use crate::core::{
    Error, FolderEntry, Record, Result, ScanReport, SkippedFolder, Value, ValueKind,
};

pub use crate::analysis::{
    classify_signature, classify_signature_lenient, Classification, GoSignature, GoType,
    SignatureError, TypeCheckResult,
};

pub use crate::comparison::{deep_compare, Comparator};

pub use crate::config::{load_config, BenchgenConfig};

pub use crate::generator::{generate_harness, GeneratedHarness, GeneratorError, GeneratorOptions};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::runner::{parse_go_test_output, run_cases, CaseOutcome, GoTestSummary, RunReport};

pub use crate::testcases::{load_test_cases, parse_test_cases, TestCase};

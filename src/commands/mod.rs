//! CLI command implementations for benchgen operations.
//!
//! Available commands:
//! - **scan**: Report benchmark folders whose signatures use non-basic types
//! - **classify**: Classify a single Go signature
//! - **generate**: Write a Go test harness for one benchmark folder
//! - **compare**: Structurally compare two JSON documents
//! - **results**: Summarise `go test -v` output
//! - **init**: Initialize a new benchgen configuration file

pub mod classify;
pub mod compare;
pub mod generate;
pub mod init;
pub mod results;
pub mod scan;

pub use classify::classify_source;
pub use compare::compare_files;
pub use generate::{generate_harness_files, GenerateConfig};
pub use init::init_config;
pub use results::summarize_results;
pub use scan::{scan_benchmarks, ScanConfig};

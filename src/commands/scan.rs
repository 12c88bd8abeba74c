use crate::cli::OutputFormat;
use crate::config::BenchgenConfig;
use crate::io::{create_writer, BenchmarkScanner};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ScanConfig {
    pub base_dir: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub instruction_file: Option<String>,
}

impl ScanConfig {
    /// Markdown reports go to the configured report file unless `-o` says otherwise.
    fn destination(&self, settings: &BenchgenConfig) -> Option<PathBuf> {
        match (&self.output, self.format) {
            (Some(path), _) => Some(path.clone()),
            (None, OutputFormat::Markdown) => Some(PathBuf::from(&settings.scan.report_file)),
            (None, _) => None,
        }
    }
}

pub fn scan_benchmarks(config: ScanConfig, settings: &BenchgenConfig) -> Result<()> {
    let instruction_file = config
        .instruction_file
        .clone()
        .unwrap_or_else(|| settings.scan.instruction_file.clone());

    let report = BenchmarkScanner::new(&config.base_dir)
        .with_instruction_file(instruction_file)
        .scan()
        .with_context(|| format!("Failed to scan {}", config.base_dir.display()))?;

    let destination = config.destination(settings);
    let mut writer = create_writer(config.format.into(), destination.as_deref())?;
    writer.write_report(&report)?;

    if let Some(path) = destination {
        println!(
            "Total folders with non-basic types: {}",
            report.non_basic_count()
        );
        println!("Results written to {}", path.display());
    }

    Ok(())
}

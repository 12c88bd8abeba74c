use crate::analysis::classify_signature;
use crate::config::BenchgenConfig;
use crate::generator::{generate_harness, GeneratorOptions};
use crate::io;
use crate::testcases::load_test_cases;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct GenerateConfig {
    pub bench_dir: PathBuf,
    pub test_cases: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub force: bool,
}

/// Write the harness for one benchmark folder and return the written paths.
pub fn generate_harness_files(
    config: GenerateConfig,
    settings: &BenchgenConfig,
) -> Result<Vec<PathBuf>> {
    let instruction_path = config.bench_dir.join(&settings.scan.instruction_file);
    let source = io::read_file(&instruction_path)?;
    let classification = classify_signature(&source).with_context(|| {
        format!(
            "Failed to parse a signature from {}",
            instruction_path.display()
        )
    })?;

    let test_cases_path = config
        .test_cases
        .unwrap_or_else(|| config.bench_dir.join(&settings.generator.test_cases_path));
    let cases = if test_cases_path.exists() {
        load_test_cases(&test_cases_path)?
    } else {
        warn!(
            path = %test_cases_path.display(),
            "test cases not found, JSON tags will use parameter names"
        );
        Vec::new()
    };

    let options = GeneratorOptions::from_config(settings);
    let harness = generate_harness(&classification.parsed, &cases, &options)
        .with_context(|| format!("Cannot generate a harness for `{}`", classification.signature))?;

    let out_dir = config.out.unwrap_or(config.bench_dir);
    io::ensure_dir(&out_dir)?;

    let targets: Vec<(PathBuf, &str)> = harness
        .files()
        .into_iter()
        .map(|(name, content)| (out_dir.join(name), content))
        .collect();

    if !config.force {
        if let Some((existing, _)) = targets.iter().find(|(path, _)| path.exists()) {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite.",
                existing.display()
            );
        }
    }

    let mut written = Vec::with_capacity(targets.len());
    for (path, content) in targets {
        io::write_file(&path, content)?;
        info!(path = %path.display(), "wrote harness file");
        written.push(path);
    }
    Ok(written)
}

pub mod output;
pub mod scanner;
pub mod writers;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use scanner::BenchmarkScanner;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

pub fn read_stdin() -> Result<String> {
    use std::io::Read;

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

/// Contents of `path`, or of stdin when no path is given.
pub fn read_file_or_stdin(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_file(path),
        None => read_stdin(),
    }
}

//! Scanning of numbered benchmark folders.
//!
//! The base directory holds one folder per benchmark, named by number, each
//! with an instruction file containing the Go signature. Folders are read and
//! classified in parallel and reported in ascending numeric order.

use crate::analysis::classify_signature;
use crate::core::{Error, FolderEntry, Result, ScanReport, SkippedFolder};
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const DEFAULT_INSTRUCTION_FILE: &str = "instruction.txt";

enum FolderOutcome {
    Classified(FolderEntry),
    Skipped(SkippedFolder),
}

pub struct BenchmarkScanner {
    base: PathBuf,
    instruction_file: String,
}

impl BenchmarkScanner {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            instruction_file: DEFAULT_INSTRUCTION_FILE.to_string(),
        }
    }

    pub fn with_instruction_file(mut self, name: impl Into<String>) -> Self {
        self.instruction_file = name.into();
        self
    }

    /// Numerically named subdirectories, sorted by number.
    pub fn numeric_dirs(&self) -> Result<Vec<(u64, PathBuf)>> {
        if !self.base.is_dir() {
            return Err(Error::file_system(
                "base directory does not exist or is not a directory",
                &self.base,
            ));
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(&self.base).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(Error::file_system(
                        format!("failed to read base directory: {e}"),
                        &self.base,
                    ))
                }
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(|n| n.parse::<u64>().ok()) {
                dirs.push((id, entry.into_path()));
            }
        }

        dirs.sort_by_key(|(id, _)| *id);
        Ok(dirs)
    }

    pub fn scan(&self) -> Result<ScanReport> {
        let dirs = self.numeric_dirs()?;
        info!(
            base = %self.base.display(),
            folders = dirs.len(),
            "scanning benchmark folders"
        );

        let outcomes: Vec<FolderOutcome> = dirs
            .par_iter()
            .map(|(id, dir)| self.scan_folder(*id, dir))
            .collect();

        let mut report = ScanReport::new(self.base.clone());
        for outcome in outcomes {
            match outcome {
                FolderOutcome::Classified(entry) => report.entries.push(entry),
                FolderOutcome::Skipped(skipped) => report.skipped.push(skipped),
            }
        }

        info!(
            classified = report.entries.len(),
            skipped = report.skipped.len(),
            non_basic = report.non_basic_count(),
            "scan finished"
        );
        Ok(report)
    }

    fn scan_folder(&self, id: u64, dir: &Path) -> FolderOutcome {
        let path = dir.join(&self.instruction_file);
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                let reason = if e.kind() == ErrorKind::NotFound {
                    format!("No {} in folder", self.instruction_file)
                } else {
                    format!("Failed to read {}: {e}", self.instruction_file)
                };
                warn!(folder = id, "{reason}");
                return FolderOutcome::Skipped(SkippedFolder { id, reason });
            }
        };

        match classify_signature(&source) {
            Ok(classification) => {
                if classification.result.has_non_basic_types {
                    debug!(
                        folder = id,
                        types = ?classification.result.non_basic_types,
                        "found non-basic types"
                    );
                }
                FolderOutcome::Classified(FolderEntry {
                    id,
                    signature: classification.signature,
                    result: classification.result,
                    error: None,
                })
            }
            Err(e) => {
                warn!(folder = id, error = %e, "failed to classify signature");
                FolderOutcome::Classified(FolderEntry {
                    id,
                    signature: String::new(),
                    result: e.poisoned_result(),
                    error: Some(e.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn folder(base: &Path, name: &str, instruction: Option<&str>) {
        let dir = base.join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(text) = instruction {
            fs::write(dir.join(DEFAULT_INSTRUCTION_FILE), text).unwrap();
        }
    }

    #[test]
    fn numeric_dirs_are_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        for name in ["10", "2", "notes", "1"] {
            folder(temp.path(), name, None);
        }
        fs::write(temp.path().join("3"), "a file, not a folder").unwrap();

        let ids: Vec<u64> = BenchmarkScanner::new(temp.path())
            .numeric_dirs()
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![1, 2, 10]);
    }

    #[test]
    fn missing_instruction_is_skipped() {
        let temp = TempDir::new().unwrap();
        folder(temp.path(), "1", Some("func Add(a, b int) int"));
        folder(temp.path(), "2", None);

        let report = BenchmarkScanner::new(temp.path()).scan().unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, 2);
        assert!(report.skipped[0].reason.contains("instruction.txt"));
    }

    #[test]
    fn custom_instruction_file_name() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("4");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("task.md"), "func Walk(n *Node) int").unwrap();

        let report = BenchmarkScanner::new(temp.path())
            .with_instruction_file("task.md")
            .scan()
            .unwrap();
        assert_eq!(report.non_basic_count(), 1);
        assert_eq!(report.entries[0].result.non_basic_types, vec!["Node"]);
    }

    #[test]
    fn missing_base_directory_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = BenchmarkScanner::new(temp.path().join("absent")).scan();
        assert!(matches!(result, Err(Error::FileSystem { .. })));
    }
}

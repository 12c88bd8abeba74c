pub mod errors;
pub mod value;

pub use errors::{Error, Result, ResultExt};
pub use value::{Record, Value, ValueKind};

use crate::analysis::type_signatures::TypeCheckResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of scanning a directory of numbered benchmark folders.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScanReport {
    pub base_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub entries: Vec<FolderEntry>,
    pub skipped: Vec<SkippedFolder>,
}

/// One benchmark folder whose instruction file was classified.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FolderEntry {
    pub id: u64,
    pub signature: String,
    pub result: TypeCheckResult,
    /// Set when classification failed and `result` holds the poisoned entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SkippedFolder {
    pub id: u64,
    pub reason: String,
}

impl ScanReport {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            timestamp: Utc::now(),
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Folders with at least one non-basic type, in folder order.
    pub fn non_basic_entries(&self) -> impl Iterator<Item = &FolderEntry> {
        self.entries.iter().filter(|e| e.result.has_non_basic_types)
    }

    pub fn non_basic_count(&self) -> usize {
        self.non_basic_entries().count()
    }
}

impl FolderEntry {
    /// Signature text with line breaks flattened for single-line tables.
    pub fn clean_signature(&self) -> String {
        self.signature.replace("\r\n", " ").replace('\n', " ")
    }

    pub fn joined_types(&self) -> String {
        self.result.non_basic_types.join(", ")
    }
}

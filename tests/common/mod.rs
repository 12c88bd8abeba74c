// Test utility module for benchgen integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a base directory of numbered benchmark folders.
///
/// A `None` instruction leaves the folder without an instruction file.
pub fn bench_tree(folders: &[(&str, Option<&str>)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (name, instruction) in folders {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(text) = instruction {
            fs::write(dir.join("instruction.txt"), text).unwrap();
        }
    }
    temp
}

pub fn write_json(dir: &Path, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, json).unwrap();
    path
}

/// The benchgen binary, isolated from any config in the developer's tree.
pub fn benchgen(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("benchgen").unwrap();
    cmd.current_dir(dir).env_remove("BENCHGEN_CONFIG").env_remove("RUST_LOG");
    cmd
}

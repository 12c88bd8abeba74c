use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::BenchgenConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".benchgen.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and reject invalid settings
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<BenchgenConfig, String> {
    let config = toml::from_str::<BenchgenConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;
    config.validate()?;
    Ok(config)
}

/// Load a discovered config file; unreadable or invalid files are skipped
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<BenchgenConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its parents, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.benchgen.toml`
pub fn load_config_from_dir(start: &Path) -> BenchgenConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            BenchgenConfig::default()
        })
}

pub fn load_config() -> BenchgenConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            BenchgenConfig::default()
        }
    }
}

/// Load an explicitly named config file; any failure is an error
pub fn load_config_from(path: &Path) -> Result<BenchgenConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system_io("failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents).map_err(Error::configuration)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

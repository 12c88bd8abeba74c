mod core;
mod loader;

pub use self::core::{BenchgenConfig, ComparisonConfig, GeneratorConfig, ScanConfig, DEFAULT_CONFIG};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_dir,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

use crate::comparison::Comparator;
use std::path::Path;

impl BenchgenConfig {
    /// Comparator for results that hold floats when `floats` is set.
    pub fn comparator(&self, floats: bool) -> Comparator {
        if floats {
            Comparator::new(self.comparison.float_tolerance)
        } else {
            Comparator::new(self.comparison.default_tolerance)
        }
    }
}

/// Explicit path when given, otherwise ancestor search from the working directory
pub fn resolve_config(explicit: Option<&Path>) -> crate::core::Result<BenchgenConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}

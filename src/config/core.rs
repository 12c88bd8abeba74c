use serde::{Deserialize, Serialize};

/// Root configuration structure for benchgen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BenchgenConfig {
    #[serde(default)]
    pub comparison: ComparisonConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Tolerance used when a result type holds floats
    #[serde(default = "default_float_tolerance")]
    pub float_tolerance: f64,

    #[serde(default)]
    pub default_tolerance: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            float_tolerance: default_float_tolerance(),
            default_tolerance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File read from each numbered benchmark folder
    #[serde(default = "default_instruction_file")]
    pub instruction_file: String,

    #[serde(default = "default_report_file")]
    pub report_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            instruction_file: default_instruction_file(),
            report_file: default_report_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Test-case file path as seen from the generated Go package
    #[serde(default = "default_test_cases_path")]
    pub test_cases_path: String,

    #[serde(default = "default_package")]
    pub package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            test_cases_path: default_test_cases_path(),
            package: default_package(),
        }
    }
}

fn default_float_tolerance() -> f64 {
    1e-6
}

fn default_instruction_file() -> String {
    "instruction.txt".to_string()
}

fn default_report_file() -> String {
    "go_custom_types.md".to_string()
}

fn default_test_cases_path() -> String {
    "test_cases/test_cases.json".to_string()
}

fn default_package() -> String {
    "main".to_string()
}

fn validate_tolerance(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "comparison.{name} must be a finite non-negative number, got {value}"
        ));
    }
    Ok(())
}

fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

impl BenchgenConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_tolerance("float_tolerance", self.comparison.float_tolerance)?;
        validate_tolerance("default_tolerance", self.comparison.default_tolerance)?;

        if self.scan.instruction_file.trim().is_empty() {
            return Err("scan.instruction_file must not be empty".to_string());
        }
        if !is_go_identifier(&self.generator.package) {
            return Err(format!(
                "generator.package `{}` is not a valid Go package name",
                self.generator.package
            ));
        }
        Ok(())
    }
}

pub const DEFAULT_CONFIG: &str = r#"# Benchgen Configuration

[comparison]
# Tolerance used when a result type holds float32/float64
float_tolerance = 1e-6
default_tolerance = 0.0

[scan]
instruction_file = "instruction.txt"
report_file = "go_custom_types.md"

[generator]
test_cases_path = "test_cases/test_cases.json"
package = "main"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_matches_default_config() {
        let parsed: BenchgenConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, BenchgenConfig::default());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: BenchgenConfig = toml::from_str("[comparison]\nfloat_tolerance = 0.01\n").unwrap();
        assert_eq!(parsed.comparison.float_tolerance, 0.01);
        assert_eq!(parsed.comparison.default_tolerance, 0.0);
        assert_eq!(parsed.scan, ScanConfig::default());
    }

    #[test]
    fn rejects_negative_tolerance() {
        let mut config = BenchgenConfig::default();
        config.comparison.default_tolerance = -1.0;
        assert!(config.validate().unwrap_err().contains("default_tolerance"));
    }

    #[test]
    fn rejects_non_finite_tolerance() {
        let mut config = BenchgenConfig::default();
        config.comparison.float_tolerance = f64::NAN;
        assert!(config.validate().is_err());
        config.comparison.float_tolerance = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_package_name() {
        let mut config = BenchgenConfig::default();
        config.generator.package = "my-bench".to_string();
        assert!(config.validate().is_err());
        config.generator.package = "bench_2".to_string();
        assert!(config.validate().is_ok());
    }
}

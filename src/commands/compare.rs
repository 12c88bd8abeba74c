use crate::comparison::Comparator;
use crate::config::BenchgenConfig;
use crate::core::Value;
use crate::io;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

fn read_value(path: &Path) -> Result<Value> {
    let text = io::read_file(path)?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Pick the comparator: an explicit tolerance wins, otherwise floats in
/// either document select the configured float tolerance.
fn comparator_for(
    expected: &Value,
    actual: &Value,
    tolerance: Option<f64>,
    settings: &BenchgenConfig,
) -> Result<Comparator> {
    match tolerance {
        Some(t) if !t.is_finite() || t < 0.0 => {
            anyhow::bail!("Tolerance must be a finite non-negative number, got {t}")
        }
        Some(t) => Ok(Comparator::new(t)),
        None => Ok(settings.comparator(expected.contains_float() || actual.contains_float())),
    }
}

/// Compare two JSON files; a mismatch is reported as an error.
pub fn compare_files(
    expected: &Path,
    actual: &Path,
    tolerance: Option<f64>,
    settings: &BenchgenConfig,
) -> Result<()> {
    let expected_value = read_value(expected)?;
    let actual_value = read_value(actual)?;
    let comparator = comparator_for(&expected_value, &actual_value, tolerance, settings)?;

    if comparator.compare(&expected_value, &actual_value) {
        println!(
            "{} (tolerance {})",
            "Values match".green(),
            comparator.tolerance()
        );
        return Ok(());
    }

    println!(
        "{} (tolerance {})",
        "Values differ".red().bold(),
        comparator.tolerance()
    );
    println!("Expected: {expected_value}");
    println!("Actual:   {actual_value}");
    anyhow::bail!("Comparison failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_tolerance_wins() {
        let settings = BenchgenConfig::default();
        let c = comparator_for(&Value::Int(1), &Value::Int(1), Some(0.25), &settings).unwrap();
        assert_eq!(c.tolerance(), 0.25);
    }

    #[test]
    fn floats_select_float_tolerance() {
        let settings = BenchgenConfig::default();
        let floats = Value::from(vec![1.5, 2.0]);
        let c = comparator_for(&floats, &Value::Null, None, &settings).unwrap();
        assert_eq!(c.tolerance(), settings.comparison.float_tolerance);

        let c = comparator_for(&Value::Int(1), &Value::Int(2), None, &settings).unwrap();
        assert_eq!(c.tolerance(), settings.comparison.default_tolerance);
    }

    #[test]
    fn rejects_negative_tolerance() {
        let settings = BenchgenConfig::default();
        assert!(comparator_for(&Value::Null, &Value::Null, Some(-0.1), &settings).is_err());
    }
}

//! Running test cases and summarising their outcomes.
//!
//! [`run_cases`] drives a Rust closure through loaded test cases;
//! [`go_test_output`] reads the same kind of summary back from `go test -v`.

pub mod go_test_output;

pub use go_test_output::{parse_go_test_output, FailedCase, GoTestCase, GoTestSummary};

use crate::comparison::Comparator;
use crate::core::Value;
use crate::testcases::TestCase;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    Failed { expected: Value, actual: Value },
    Errored { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    pub index: usize,
    pub name: String,
    #[serde(flatten)]
    pub outcome: CaseOutcome,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub tolerance: f64,
    pub cases: Vec<CaseResult>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| !c.passed())
    }

    pub fn pass_rate(&self) -> f64 {
        if self.cases.is_empty() {
            0.0
        } else {
            self.passed_count() as f64 / self.total() as f64
        }
    }

    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(CaseResult::passed)
    }
}

/// Invoke `f` on each case's inputs and compare its output with `Expected`.
///
/// Cases are named `Case<i>` to match the subtests of generated Go runners.
pub fn run_cases<F, E>(cases: &[TestCase], comparator: &Comparator, mut f: F) -> RunReport
where
    F: FnMut(&BTreeMap<String, Value>) -> Result<Value, E>,
    E: Display,
{
    let results = cases
        .iter()
        .enumerate()
        .map(|(index, case)| {
            let outcome = match f(&case.inputs) {
                Ok(actual) if comparator.compare(&case.expected, &actual) => CaseOutcome::Passed,
                Ok(actual) => CaseOutcome::Failed {
                    expected: case.expected.clone(),
                    actual,
                },
                Err(e) => CaseOutcome::Errored {
                    message: e.to_string(),
                },
            };
            debug!(case = index, ?outcome, "case finished");
            CaseResult {
                index,
                name: format!("Case{index}"),
                outcome,
            }
        })
        .collect();

    RunReport {
        tolerance: comparator.tolerance(),
        cases: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testcases::parse_test_cases;

    fn cases() -> Vec<TestCase> {
        parse_test_cases(
            r#"[
                {"Inputs": {"a": 1.0, "b": 2.0}, "Expected": 3.0},
                {"Inputs": {"a": 0.1, "b": 0.2}, "Expected": 0.3},
                {"Inputs": {"a": 1.0, "b": 1.0}, "Expected": 3.0},
                {"Inputs": {"a": 1.0}, "Expected": 1.0}
            ]"#,
        )
        .unwrap()
    }

    fn add(inputs: &BTreeMap<String, Value>) -> Result<Value, String> {
        let get = |key: &str| match inputs.get(key) {
            Some(Value::Float(x)) => Ok(*x),
            _ => Err(format!("missing input `{key}`")),
        };
        Ok(Value::Float(get("a")? + get("b")?))
    }

    #[test]
    fn classifies_each_case() {
        let report = run_cases(&cases(), &Comparator::new(1e-9), add);
        assert_eq!(report.total(), 4);
        assert_eq!(report.passed_count(), 2);
        assert!(matches!(report.cases[2].outcome, CaseOutcome::Failed { .. }));
        assert_eq!(
            report.cases[3].outcome,
            CaseOutcome::Errored {
                message: "missing input `b`".into()
            }
        );
        assert_eq!(report.cases[1].name, "Case1");
        assert!(!report.all_passed());
        assert_eq!(report.pass_rate(), 0.5);
    }

    #[test]
    fn exact_comparator_rejects_rounding() {
        let report = run_cases(&cases()[1..2], &Comparator::exact(), add);
        assert_eq!(report.passed_count(), 0);
    }

    #[test]
    fn empty_run_has_zero_rate() {
        let report = run_cases(&[], &Comparator::exact(), add);
        assert_eq!(report.pass_rate(), 0.0);
        assert!(report.all_passed());
    }
}

//! Summaries of `go test -v` output produced by generated runners.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static RESULT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--- (PASS|FAIL): ([\w/]+) \(([\d.]+)s\)").unwrap());

static CASE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Case(\d+)").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoTestCase {
    pub test_name: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedCase {
    pub test_name: String,
    /// Digits after `Case` in the subtest name, or `Unknown`.
    pub case_number: String,
    pub duration: String,
    pub full_details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoTestSummary {
    pub passed_count: usize,
    pub failed_count: usize,
    pub failed_cases: Vec<FailedCase>,
    pub total_tests: usize,
    pub pass_rate: f64,
    pub pass_percentage: String,
}

impl Default for GoTestSummary {
    fn default() -> Self {
        Self {
            passed_count: 0,
            failed_count: 0,
            failed_cases: Vec::new(),
            total_tests: 0,
            pass_rate: 0.0,
            pass_percentage: "0.00%".to_string(),
        }
    }
}

impl GoTestSummary {
    pub fn all_passed(&self) -> bool {
        self.failed_count == 0 && self.passed_count == self.total_tests
    }
}

/// Summarise every `--- PASS`/`--- FAIL` line in `text`.
///
/// Parent tests report their own line too, so a run of N subtests under one
/// `TestX` counts N + 1 results. When `total` is `None` it is taken as
/// passed + failed.
pub fn parse_go_test_output(text: &str, total: Option<usize>) -> GoTestSummary {
    let mut passed = Vec::new();
    let mut failed = Vec::new();

    for caps in RESULT_LINE.captures_iter(text) {
        let case = GoTestCase {
            test_name: caps[2].to_string(),
            duration: caps[3].to_string(),
        };
        if &caps[1] == "PASS" {
            passed.push(case);
        } else {
            failed.push(case);
        }
    }

    let passed_count = passed.len();
    let failed_count = failed.len();
    let total_tests = total.unwrap_or(passed_count + failed_count);

    let failed_cases = failed
        .into_iter()
        .map(|case| {
            let case_number = CASE_NUMBER
                .captures(&case.test_name)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            FailedCase {
                full_details: format!("--- FAIL: {} ({}s)", case.test_name, case.duration),
                test_name: case.test_name,
                case_number,
                duration: case.duration,
            }
        })
        .collect();

    let mut summary = GoTestSummary {
        passed_count,
        failed_count,
        failed_cases,
        total_tests,
        ..GoTestSummary::default()
    };
    if total_tests > 0 {
        summary.pass_rate = passed_count as f64 / total_tests as f64;
        summary.pass_percentage = format!("{:.2}%", summary.pass_rate * 100.0);
    }
    summary
}

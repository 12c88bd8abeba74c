//! Loading of JSON test-case files.
//!
//! A test-case file is a JSON array; each element carries `Inputs` (parameter
//! name to value) and `Expected`, plus an optional `Description`.

use crate::core::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(
        rename = "Description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "Inputs")]
    pub inputs: BTreeMap<String, Value>,
    #[serde(rename = "Expected")]
    pub expected: Value,
}

pub fn parse_test_cases(json: &str) -> std::result::Result<Vec<TestCase>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system_io("failed to read test cases", path, e))?;
    parse_test_cases(&contents).map_err(|e| Error::test_cases(path, e.to_string()))
}

/// Input keys across all cases, in first-seen order.
pub fn input_keys(cases: &[TestCase]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in cases.iter().flat_map(|case| case.inputs.keys()) {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    keys
}

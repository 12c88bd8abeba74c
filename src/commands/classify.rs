use crate::analysis::{classify_signature, TypeCheckResult};
use crate::io;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    signature: String,
    #[serde(flatten)]
    result: TypeCheckResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn classify(source: &str) -> ClassifyOutput {
    match classify_signature(source) {
        Ok(classification) => ClassifyOutput {
            signature: classification.signature,
            result: classification.result,
            error: None,
        },
        Err(e) => {
            warn!(error = %e, "failed to classify signature");
            ClassifyOutput {
                signature: String::new(),
                result: e.poisoned_result(),
                error: Some(e.to_string()),
            }
        }
    }
}

/// Classify a signature given inline, in a file, or on stdin.
pub fn classify_source(signature: Option<String>, file: Option<PathBuf>, json: bool) -> Result<()> {
    let source = match signature {
        Some(source) => source,
        None => io::read_file_or_stdin(file.as_deref())?,
    };

    let output = classify(&source);
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !output.signature.is_empty() {
        println!("{} {}", "Signature:".bold(), output.signature);
    }
    if let Some(error) = &output.error {
        println!("{} {}", "Error:".bold(), error.red());
    }
    if output.result.has_non_basic_types {
        println!(
            "{} {}",
            "Non-basic types:".bold(),
            output.result.non_basic_types.join(", ").yellow()
        );
    } else {
        println!("{} {}", "Non-basic types:".bold(), "none".green());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_classification_is_poisoned() {
        let output = classify("x + 1");
        assert_eq!(output.signature, "");
        assert_eq!(output.result.non_basic_types, vec!["INVALID_SIGNATURE"]);
        assert!(output.error.is_some());
    }

    #[test]
    fn json_output_flattens_result() {
        let output = classify("func Add(a, b int) int");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["signature"], "func Add(a, b int) int");
        assert_eq!(json["has_non_basic_types"], false);
        assert!(json.get("error").is_none());
    }
}

//! Type Signature Analyzer
//!
//! Decides whether a Go function can be benchmarked with generated
//! marshaling code:
//! - Every parameter and result type is walked recursively
//! - Predeclared scalar types are basic, everything else is recorded
//! - Parse failures produce a poisoned result instead of aborting a batch

use super::extractors::go::parse_signature;
use super::normalizer::GoType;
use super::patterns::is_basic_type;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, debug_span};

/// A parsed Go function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoSignature {
    pub receiver: Option<GoParam>,
    /// `None` for function literals.
    pub name: Option<String>,
    /// `[T any, K comparable]` on generic declarations.
    pub type_params: Vec<GoParam>,
    pub params: Vec<GoParam>,
    pub results: Vec<GoParam>,
}

/// One entry of a parameter or result list, e.g. `a, b int`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoParam {
    pub names: Vec<String>,
    pub ty: GoType,
}

impl GoSignature {
    /// Parameter and result types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &GoType> {
        self.params.iter().chain(&self.results).map(|p| &p.ty)
    }
}

/// Non-basic types found in a signature, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCheckResult {
    pub has_non_basic_types: bool,
    pub non_basic_types: Vec<String>,
}

impl TypeCheckResult {
    /// Record a non-basic type description, ignoring duplicates.
    pub fn record(&mut self, description: impl Into<String>) {
        let description = description.into();
        if !self.non_basic_types.contains(&description) {
            self.non_basic_types.push(description);
        }
        self.has_non_basic_types = true;
    }

    fn poisoned(entry: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.record(entry);
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("failed to parse signature: {message}")]
    Parse { message: String },
    #[error("source is a valid expression but not a function signature")]
    Invalid,
}

impl SignatureError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// The entry recorded in place of real types when classification fails.
    pub fn entry(&self) -> String {
        match self {
            Self::Parse { message } => format!("PARSE_ERROR: {message}"),
            Self::Invalid => "INVALID_SIGNATURE".to_string(),
        }
    }

    pub fn poisoned_result(&self) -> TypeCheckResult {
        TypeCheckResult::poisoned(self.entry())
    }
}

/// A classified signature together with its canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub result: TypeCheckResult,
    pub signature: String,
    pub parsed: GoSignature,
}

/// Classify one type expression, appending non-basic descriptions to `result`.
pub fn classify_type(ty: &GoType, result: &mut TypeCheckResult) {
    match ty {
        GoType::Named(name) => {
            if !is_basic_type(name) {
                result.record(name.as_str());
            }
        }
        GoType::Pointer(inner) | GoType::Slice(inner) | GoType::Variadic(inner) => {
            classify_type(inner, result)
        }
        GoType::Array { elem, .. } | GoType::Chan { elem, .. } => classify_type(elem, result),
        GoType::Map { key, value } => {
            classify_type(key, result);
            classify_type(value, result);
        }
        GoType::Struct | GoType::Interface | GoType::Func | GoType::Qualified { .. } => {
            result.record(ty.to_string())
        }
        GoType::Other { kind, .. } => result.record(kind.as_str()),
    }
}

/// Classify every parameter and result type of a parsed signature.
pub fn check_signature_types(signature: &GoSignature) -> TypeCheckResult {
    let mut result = TypeCheckResult::default();
    for ty in signature.types() {
        classify_type(ty, &mut result);
    }
    result
}

/// Parse `source` as a Go signature and classify its types.
///
/// `source` may be a full declaration, a file containing one, or a bare
/// fragment such as `GetLevel(lines []string) int`.
pub fn classify_signature(source: &str) -> Result<Classification, SignatureError> {
    let _span = debug_span!("classify_signature", bytes = source.len()).entered();

    let parsed = parse_signature(source)?;
    let result = check_signature_types(&parsed);
    debug!(
        non_basic = result.non_basic_types.len(),
        "classified {}", parsed
    );

    Ok(Classification {
        signature: parsed.to_string(),
        result,
        parsed,
    })
}

/// Like [`classify_signature`], but folds failures into a poisoned result.
pub fn classify_signature_lenient(source: &str) -> (TypeCheckResult, String) {
    match classify_signature(source) {
        Ok(classification) => (classification.result, classification.signature),
        Err(e) => (e.poisoned_result(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::type_signatures::ChanDir;

    fn classify(ty: GoType) -> Vec<String> {
        let mut result = TypeCheckResult::default();
        classify_type(&ty, &mut result);
        assert_eq!(result.has_non_basic_types, !result.non_basic_types.is_empty());
        result.non_basic_types
    }

    #[test]
    fn wrappers_defer_to_their_element() {
        assert!(classify(GoType::pointer(GoType::named("int"))).is_empty());
        assert!(classify(GoType::slice(GoType::named("string"))).is_empty());
        assert!(classify(GoType::Variadic(Box::new(GoType::named("byte")))).is_empty());
        assert_eq!(
            classify(GoType::Chan {
                dir: ChanDir::Send,
                elem: Box::new(GoType::named("Event")),
            }),
            vec!["Event"]
        );
    }

    #[test]
    fn map_checks_key_and_value() {
        let ty = GoType::map(GoType::named("Key"), GoType::named("Value"));
        assert_eq!(classify(ty), vec!["Key", "Value"]);
    }

    #[test]
    fn inline_literals_use_placeholders() {
        assert_eq!(classify(GoType::Struct), vec!["struct{...}"]);
        assert_eq!(classify(GoType::Interface), vec!["interface{...}"]);
        assert_eq!(classify(GoType::Func), vec!["func(...)"]);
        assert_eq!(
            classify(GoType::Qualified {
                package: "time".into(),
                name: "Duration".into(),
            }),
            vec!["time.Duration"]
        );
    }

    #[test]
    fn other_shapes_are_recorded_by_kind() {
        let ty = GoType::Other {
            kind: "generic_type".into(),
            text: "List[int]".into(),
        };
        assert_eq!(classify(ty), vec!["generic_type"]);
    }

    #[test]
    fn record_deduplicates_in_first_seen_order() {
        let mut result = TypeCheckResult::default();
        result.record("B");
        result.record("A");
        result.record("B");
        assert_eq!(result.non_basic_types, vec!["B", "A"]);
    }

    #[test]
    fn poisoned_results_are_non_basic() {
        let parse = SignatureError::parse("unexpected `)` on line 1");
        assert_eq!(
            parse.poisoned_result().non_basic_types,
            vec!["PARSE_ERROR: unexpected `)` on line 1"]
        );
        let invalid = SignatureError::Invalid.poisoned_result();
        assert!(invalid.has_non_basic_types);
        assert_eq!(invalid.non_basic_types, vec!["INVALID_SIGNATURE"]);
    }
}

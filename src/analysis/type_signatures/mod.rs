//! Type Signature-Based Classification
//!
//! Classifies Go function signatures by whether every parameter and result
//! type can be marshaled without hand-written adapters:
//! - Predeclared scalars (`int`, `string`, `float64`, `error`, ...) are basic
//! - Pointers, slices, arrays, channels and variadics defer to their element
//! - Maps check both key and value
//! - Inline structs, interfaces, func types and qualified types are not basic

pub mod analyzer;
pub mod extractors;
pub mod normalizer;
pub mod patterns;

pub use analyzer::{
    check_signature_types, classify_signature, classify_signature_lenient, classify_type,
    Classification, GoParam, GoSignature, SignatureError, TypeCheckResult,
};
pub use extractors::parse_signature;
pub use normalizer::{ChanDir, GoType};
pub use patterns::{is_basic_type, is_float_type};

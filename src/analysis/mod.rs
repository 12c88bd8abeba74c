//! Signature Analysis Module
//!
//! Parses Go function signatures out of benchmark instruction text and
//! classifies their parameter and result types.

pub mod type_signatures;

pub use type_signatures::{
    classify_signature, classify_signature_lenient, Classification, GoSignature, GoType,
    SignatureError, TypeCheckResult,
};

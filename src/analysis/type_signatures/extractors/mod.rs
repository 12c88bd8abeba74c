//! Signature extractors, one per source language.

pub mod go;

pub use go::parse_signature;

//! Structural comparison of expected and actual benchmark outputs.

pub mod comparator;

pub use comparator::{deep_compare, Comparator};

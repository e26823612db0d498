//! Rule-based field extractors for CRM work-order pages.

pub mod aux_fields;
pub mod patterns;
pub mod unit_port;

pub use aux_fields::{extract_aux_fields, AuxiliaryFields};
pub use unit_port::{extract_port_number, UnitPortExtractor};

use std::collections::HashSet;
use std::hash::Hash;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first occurrence of each distinct key, preserving input order.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

//! Validating builders for multi-level entity graphs.
//!
//! A factory takes a nested request payload, cross-validates the whole
//! graph in memory, and reports every violation at once. Nothing is
//! persisted until validation passes; the db crate then writes the
//! graph in a single transaction.

pub mod ont;
pub mod pacbio;

use serde::Serialize;

/// A single validation failure, attributed to a field or association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulator for validation failures across a factory graph.
///
/// Factories collect every violation rather than stopping at the first,
/// so a caller fixing a payload sees the full picture in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }

    /// Merge another list into this one.
    pub fn extend(&mut self, other: ErrorList) {
        self.0.extend(other.0);
    }
}

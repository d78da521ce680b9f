//! Validation boundary shared by every flow contract.
//!
//! Each request and response type implements [`Validate`]; handlers call
//! [`validate`] once before anything touches the network.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ActionError;

/// Per-field validation messages, keyed by the wire (camelCase) field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// A contract that can check its own declared constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// The single validation boundary for request contracts.
pub fn validate<T: Validate>(input: &T) -> Result<(), ActionError> {
    input.validate().map_err(ActionError::Validation)
}

// ────────────────────────────────────────────────────────────────────────────
// Field checks
// ────────────────────────────────────────────────────────────────────────────

/// Checks the trimmed character length of a text field.
pub fn check_text(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len < min {
        if min == 1 {
            errors.add(field, format!("{label} cannot be empty."));
        } else {
            errors.add(field, format!("{label} must be at least {min} characters."));
        }
    } else if len > max {
        errors.add(field, format!("{label} must be at most {max} characters."));
    }
}

/// Checks that an integer field lies in `min..=max`.
pub fn check_range(
    errors: &mut FieldErrors,
    field: &str,
    label: &str,
    value: u32,
    min: u32,
    max: u32,
) {
    if value < min || value > max {
        errors.add(field, format!("{label} must be between {min} and {max}."));
    }
}

/// Checks that a text field in model output is present.
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be empty");
    }
}

/// Checks that a list in model output is not empty.
pub fn require_items<T>(errors: &mut FieldErrors, field: &str, items: &[T]) {
    if items.is_empty() {
        errors.add(field, "must contain at least one item");
    }
}

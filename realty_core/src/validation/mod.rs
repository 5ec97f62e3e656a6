//! Schema-driven validation of raw form input

pub mod rules;
pub mod schema;

pub use rules::*;
pub use schema::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw field values as typed by the user. Nothing is checked until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput(BTreeMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Missing fields read as empty, the same as an untouched input.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn extend(&mut self, other: FormInput) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One message per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Input that passed every rule of its schema, restricted to the schema's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedData {
    schema: &'static str,
    values: BTreeMap<&'static str, String>,
}

impl ValidatedData {
    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

/// Every field is checked; a failure in one never hides a failure in another.
pub fn validate(
    input: &FormInput,
    schema: &'static ValidationSchema,
) -> Result<ValidatedData, FieldErrors> {
    let mut errors = FieldErrors::default();
    let mut values = BTreeMap::new();

    for field in &schema.fields {
        let value = input.get(field.field);
        match field.failure(value) {
            Some(message) => errors.insert(field.field, message),
            None => {
                values.insert(field.field, value.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(ValidatedData {
            schema: schema.name,
            values,
        })
    } else {
        Err(errors)
    }
}

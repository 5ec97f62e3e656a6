//! Field rules shared by the lead-capture schemas

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidateEmail, ValidationError};

lazy_static! {
    /// North American number with an optional `+1` prefix. Separators between
    /// groups may be a space, dash or dot, and the area code may be parenthesized.
    pub static ref PHONE_REGEX: Regex = Regex::new(
        r"^(?:\+1\s?)?(\(?\d{3}\)?)[-.\s]?\d{3}[-.\s]?\d{4}$"
    ).unwrap();

    /// Currency, percentage and term amounts: `450,000`, `6.5`, `30`.
    pub static ref NUMERIC_REGEX: Regex = Regex::new(
        r"^\d{1,3}(?:[,\.]\d{3})*(?:[\.]?\d+)?$"
    ).unwrap();
}

pub fn validate_min_length(value: &str, min: usize) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        return Err(error);
    }
    Ok(())
}

pub fn validate_max_length(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        let mut error = ValidationError::new("length");
        error.add_param("max".into(), &max);
        return Err(error);
    }
    Ok(())
}

pub fn validate_non_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.validate_email() {
        return Err(ValidationError::new("email"));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if !PHONE_REGEX.is_match(value) {
        return Err(ValidationError::new("phone"));
    }
    Ok(())
}

pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if !NUMERIC_REGEX.is_match(value) {
        return Err(ValidationError::new("numeric"));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    NonEmpty,
    Email,
    Phone,
    Numeric,
}

impl Rule {
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        match *self {
            Rule::MinLength(min) => validate_min_length(value, min),
            Rule::MaxLength(max) => validate_max_length(value, max),
            Rule::NonEmpty => validate_non_empty(value),
            Rule::Email => validate_email(value),
            Rule::Phone => validate_phone(value),
            Rule::Numeric => validate_numeric(value),
        }
    }
}

/// A rule paired with the message shown next to the input when it fails.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldRule {
    pub fn new(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }
}

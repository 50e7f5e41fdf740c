//! Field-level admission rules for the search form.
//!
//! Rules are field-local: each field is checked on its own and every failing
//! field is reported, so the form can mark all of them at once.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    domain::{FormField, FormInput, SearchQuery},
    error::{ValidationError, ValidationKind},
};

/// Two-digit groups separated by hyphens, e.g. `12-34-56`.
pub const NUMBER_PATTERN: &str = "^[0-9]{2}-[0-9]{2}-[0-9]{2}$";

static NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_RE.get_or_init(|| {
        Regex::new(NUMBER_PATTERN)
            .unwrap_or_else(|error| panic!("number regex failed to compile: {error}"))
    })
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::new(
            FormField::Email,
            ValidationKind::Required,
        ));
    }
    Ok(())
}

/// An empty number is always admissible because the field is optional.
pub fn validate_number(number: &str) -> Result<(), ValidationError> {
    let number = number.trim();
    if number.is_empty() || number_regex().is_match(number) {
        return Ok(());
    }
    Err(ValidationError::new(
        FormField::Number,
        ValidationKind::PatternMismatch,
    ))
}

impl FormInput {
    /// Checks every field and derives the query sent to the service.
    pub fn validate(&self) -> Result<SearchQuery, Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Err(err) = validate_email(&self.email) {
            errors.push(err);
        }
        if let Some(number) = &self.number {
            if let Err(err) = validate_number(number) {
                errors.push(err);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let number = self
            .number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
            .map(str::to_string);
        Ok(SearchQuery::new(self.email.trim().to_string(), number))
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;

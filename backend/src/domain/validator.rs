//! Field-error accumulator used by every form.

use std::collections::BTreeMap;

/// Map from form field name to the message shown next to it.
pub type FieldErrors = BTreeMap<String, String>;

/// Collects the first failing check per field.
///
/// Later failures on a field that already has an error are ignored, so the
/// message a user sees is the one from the earliest rule in the sequence.
///
/// # Examples
/// ```
/// use study_tracker::domain::Validator;
///
/// let mut validator = Validator::new();
/// validator.check(false, "title", "This field cannot be left blank");
/// validator.check(false, "title", "Must not be more than 50 characters long");
/// assert!(!validator.is_valid());
/// assert_eq!(
///     validator.errors().get("title").map(String::as_str),
///     Some("This field cannot be left blank")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` under `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Record an error unconditionally, unless `field` already has one.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_owned())
            .or_insert_with(|| message.to_owned());
    }

    /// True when no check has failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, returning the recorded errors.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_validator_is_valid() {
        let validator = Validator::new();
        assert!(validator.is_valid());
        assert!(validator.errors().is_empty());
    }

    #[rstest]
    fn passing_checks_record_nothing() {
        let mut validator = Validator::new();
        validator.check(true, "content", "unused");
        assert!(validator.is_valid());
    }

    #[rstest]
    fn first_failure_per_field_wins() {
        let mut validator = Validator::new();
        validator.check(false, "content", "first");
        validator.check(false, "content", "second");
        validator.add_error("content", "third");

        let errors = validator.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("content").map(String::as_str), Some("first"));
    }

    #[rstest]
    fn failures_on_distinct_fields_accumulate() {
        let mut validator = Validator::new();
        validator.check(false, "title", "blank");
        validator.check(true, "subject", "unused");
        validator.check(false, "description", "blank");

        assert!(!validator.is_valid());
        let fields: Vec<&str> = validator.errors().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["description", "title"]);
    }
}

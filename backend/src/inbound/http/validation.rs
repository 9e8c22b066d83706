//! Boundary parsing of urlencoded form and query fields.
//!
//! Values that cannot be parsed at all (dates, flags, ids) are malformed
//! input and end the request with a 400. Values that parse but break a field
//! rule are left to the domain validator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, RecordId};

/// Accepted date layout for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a field could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseFailure {
    InvalidDate,
    InvalidFlag,
    InvalidId,
}

impl ParseFailure {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDate => "invalid_date",
            Self::InvalidFlag => "invalid_flag",
            Self::InvalidId => "invalid_id",
        }
    }
}

fn malformed(field: &str, value: &str, failure: ParseFailure, message: &str) -> Error {
    Error::invalid_request(format!("{field} {message}")).with_details(json!({
        "field": field,
        "value": value,
        "code": failure.as_str(),
    }))
}

/// Raw field values of one form submission or query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    /// Value of `field`, or the empty string when absent.
    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    /// Parse a `YYYY-MM-DD` date.
    pub fn date(&self, field: &str) -> Result<NaiveDate, Error> {
        let raw = self.text(field);
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            malformed(field, raw, ParseFailure::InvalidDate, "is not a valid YYYY-MM-DD date")
        })
    }

    /// Parse a checkbox-style flag; an absent or empty field is `false`.
    pub fn flag(&self, field: &str) -> Result<bool, Error> {
        let raw = self.text(field);
        parse_flag(raw)
            .ok_or_else(|| malformed(field, raw, ParseFailure::InvalidFlag, "is not a boolean"))
    }

    /// Parse a record identifier.
    pub fn record_id<I: RecordId>(&self, field: &str) -> Result<I, Error> {
        let raw = self.text(field);
        raw.parse::<I>()
            .map_err(|_| malformed(field, raw, ParseFailure::InvalidId, "is not a valid id"))
    }

    /// Copy the named fields for echoing back into a re-rendered form.
    pub fn echo(&self, fields: &[&str]) -> BTreeMap<String, String> {
        fields
            .iter()
            .map(|field| ((*field).to_owned(), self.text(field).to_owned()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "" => Some(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "on" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

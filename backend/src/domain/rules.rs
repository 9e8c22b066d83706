//! Pure field predicates composed by the entity validators.
//!
//! Lengths are measured in Unicode scalar values, not bytes.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Earliest year accepted by [`is_valid_date`].
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted by [`is_valid_date`].
pub const MAX_YEAR: i32 = 9999;

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
            )
            .ok()
        })
        .as_ref()
}

/// True when `value` contains something other than whitespace.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True when `value` has at most `max` characters.
pub fn max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True when `value` has at least `min` characters.
pub fn min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// True when `value` looks like a deliverable email address.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(value))
}

/// True when `date` falls inside the supported calendar range.
pub fn is_valid_date(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// True when `value` contains an ASCII digit.
pub fn has_number(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// True when `value` contains an uppercase letter.
pub fn has_upper(value: &str) -> bool {
    value.chars().any(char::is_uppercase)
}

/// True when `value` contains a punctuation or symbol character.
pub fn has_symbol(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   \t", false)]
    #[case(" x ", true)]
    fn not_blank_rejects_whitespace(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(not_blank(value), expected);
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let value = "é".repeat(50);
        assert!(max_length(&value, 50));
        assert!(!max_length(&value, 49));
        assert!(min_length(&value, 50));
        assert!(!min_length(&value, 51));
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("ada.lovelace+notes@mail.example.org", true)]
    #[case("ada@", false)]
    #[case("@example.com", false)]
    #[case("ada example.com", false)]
    #[case("ada@exa mple.com", false)]
    fn email_shape(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(value), expected);
    }

    #[rstest]
    #[case(NaiveDate::from_ymd_opt(2025, 1, 10), true)]
    #[case(NaiveDate::from_ymd_opt(1899, 12, 31), false)]
    #[case(NaiveDate::from_ymd_opt(1900, 1, 1), true)]
    fn date_range(#[case] date: Option<NaiveDate>, #[case] expected: bool) {
        let date = date.expect("fixture date");
        assert_eq!(is_valid_date(date), expected);
    }

    #[rstest]
    #[case("Passw0rd!", true, true, true)]
    #[case("password", false, false, false)]
    #[case("PASSWORD1", true, true, false)]
    #[case("pass word#", false, false, true)]
    fn password_character_classes(
        #[case] value: &str,
        #[case] number: bool,
        #[case] upper: bool,
        #[case] symbol: bool,
    ) {
        assert_eq!(has_number(value), number);
        assert_eq!(has_upper(value), upper);
        assert_eq!(has_symbol(value), symbol);
    }
}

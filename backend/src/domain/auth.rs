//! Credential primitives: login and signup inputs, and password hashes.
//!
//! Inputs are validated here so handlers only talk to the account service
//! with well-formed values. Plaintext passwords are held in [`Zeroizing`]
//! buffers and wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::rules::{
    has_number, has_symbol, has_upper, is_valid_email, max_length, min_length, not_blank,
};
use super::user::normalise_email;
use super::{FieldErrors, Validator};

const BLANK: &str = "This field cannot be left blank";

/// Maximum display name length.
pub const NAME_MAX: usize = 50;
/// Maximum email length.
pub const EMAIL_MAX: usize = 100;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;
/// Maximum password length.
pub const PASSWORD_MAX: usize = 72;

/// PHC-encoded password hash.
///
/// `Debug` is redacted so hashes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated login form input.
///
/// # Examples
/// ```
/// use study_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::parse(" Ada@Example.com ", "Secr3t!pw").expect("valid");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Check that both fields are present; the email is normalised.
    pub fn parse(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut validator = Validator::new();
        validator.check(not_blank(email), "email", BLANK);
        validator.check(not_blank(password), "password", BLANK);
        if !validator.is_valid() {
            return Err(validator.into_errors());
        }
        Ok(Self {
            email: normalise_email(email),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Validated signup form input.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Apply the account rules to raw form values.
    pub fn parse(name: &str, email: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut v = Validator::new();
        v.check(not_blank(name), "name", BLANK);
        v.check(
            max_length(name, NAME_MAX),
            "name",
            "Must not be more than 50 characters long",
        );

        let email = normalise_email(email);
        v.check(not_blank(&email), "email", BLANK);
        v.check(is_valid_email(&email), "email", "Must be a valid email address");
        v.check(
            max_length(&email, EMAIL_MAX),
            "email",
            "Must not be more than 100 characters long",
        );

        v.check(not_blank(password), "password", BLANK);
        v.check(
            min_length(password, PASSWORD_MIN),
            "password",
            "Password must be at least 8 characters long",
        );
        v.check(
            max_length(password, PASSWORD_MAX),
            "password",
            "Password must not be more than 72 characters long",
        );
        v.check(
            has_number(password),
            "password",
            "Password must contain at least one number",
        );
        v.check(
            has_upper(password),
            "password",
            "Password must contain at least one uppercase letter",
        );
        v.check(
            has_symbol(password),
            "password",
            "Password must contain at least one special character (!@#$ etc.)",
        );

        if !v.is_valid() {
            return Err(v.into_errors());
        }
        Ok(Self {
            name: name.trim().to_owned(),
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Normalised email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", &["email"])]
    #[case("ada@example.com", "", &["password"])]
    #[case("  ", " ", &["email", "password"])]
    fn login_requires_both_fields(
        #[case] email: &str,
        #[case] password: &str,
        #[case] fields: &[&str],
    ) {
        let errors = LoginCredentials::parse(email, password).expect_err("blank input");
        let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, fields);
    }

    #[rstest]
    fn login_debug_hides_password() {
        let creds = LoginCredentials::parse("ada@example.com", "hunter2").expect("valid");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[rstest]
    fn signup_accepts_strong_password() {
        let request =
            SignupRequest::parse(" Ada ", "ADA@example.com", "Analyt1cal!").expect("valid");
        assert_eq!(request.name(), "Ada");
        assert_eq!(request.email(), "ada@example.com");
    }

    #[rstest]
    #[case("short1!A", None)]
    #[case("short!A", Some("Password must be at least 8 characters long"))]
    #[case("nouppercase1!", Some("Password must contain at least one uppercase letter"))]
    #[case("NoNumbers!!", Some("Password must contain at least one number"))]
    #[case("NoSymbols123", Some("Password must contain at least one special character (!@#$ etc.)"))]
    fn signup_password_rules(#[case] password: &str, #[case] expected: Option<&str>) {
        let result = SignupRequest::parse("Ada", "ada@example.com", password);
        match expected {
            None => assert!(result.is_ok()),
            Some(message) => {
                let errors = result.expect_err("weak password");
                assert_eq!(errors.get("password").map(String::as_str), Some(message));
            }
        }
    }

    #[rstest]
    fn signup_reports_first_email_failure_only() {
        let errors = SignupRequest::parse("Ada", "", "Analyt1cal!").expect_err("blank email");
        assert_eq!(errors.get("email").map(String::as_str), Some(BLANK));
    }

    #[rstest]
    fn hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}

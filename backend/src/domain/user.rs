//! Account holder identity.
//!
//! A [`User`] never carries its password hash; the hash stays inside the
//! account service and the user repository.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a raw string is not a valid [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be a valid UUID")]
pub struct InvalidUserId;

/// Stable user identifier stored as a UUID.
///
/// Every owned record carries the [`UserId`] of its owner; handlers receive
/// it only through the authentication guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its canonical string form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidUserId> {
        let raw = raw.as_ref();
        if raw.trim() != raw {
            return Err(InvalidUserId);
        }
        Uuid::parse_str(raw).map(Self).map_err(|_| InvalidUserId)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Normalised (trimmed, lower-case) email address.
    pub email: String,
    /// Only activated users may authenticate.
    pub activated: bool,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

/// Normalise an email address for storage and lookup.
pub fn normalise_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

//! Shared shape of owner-scoped records (goals, study sessions, quotes).
//!
//! Each record kind pairs a persisted entity with a *draft*: the mutable,
//! user-editable fields. Inserts and edits both take a draft; ids, owners and
//! creation times are assigned by storage and never change afterwards.

use std::fmt::{Debug, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{UserId, Validator};

/// Numeric identifier for one record kind.
pub trait RecordId:
    Copy + Eq + Ord + Debug + Display + FromStr + Send + Sync + 'static
{
    /// Wrap a raw storage id.
    fn from_raw(raw: i64) -> Self;

    /// Raw storage id.
    fn raw(self) -> i64;
}

/// Declare an `i64`-backed identifier newtype implementing [`RecordId`].
macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $crate::domain::RecordId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

pub(crate) use define_record_id;

/// A record owned by exactly one user.
pub trait OwnedEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifier type.
    type Id: RecordId;
    /// Mutable fields supplied by the owner.
    type Draft: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Lower-case noun used in logs and messages (`"goal"`).
    const KIND: &'static str;

    /// Storage-assigned identifier.
    fn id(&self) -> Self::Id;

    /// Owning user.
    fn owner(&self) -> UserId;

    /// Storage-assigned creation time.
    fn created_at(&self) -> DateTime<Utc>;

    /// Current mutable fields.
    fn draft(&self) -> Self::Draft;

    /// Build a persisted record from its parts.
    fn assemble(id: Self::Id, owner: UserId, draft: Self::Draft, created_at: DateTime<Utc>)
    -> Self;

    /// Run the kind-specific field rules against `draft`.
    fn validate(draft: &Self::Draft, validator: &mut Validator);
}

/// Order records newest first, breaking timestamp ties by descending id.
pub fn sort_newest_first<E: OwnedEntity>(records: &mut [E]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

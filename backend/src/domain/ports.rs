//! Domain ports: the traits adapters implement.
//!
//! Each port carries its own error enum so adapters map their failures into
//! a small, predictable set of variants.

mod macros;
mod password_hasher;
mod record_repository;
mod user_repository;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use record_repository::{
    GoalRepository, OwnerScopedRepository, QuoteRepository, RepositoryError,
    StudySessionRepository,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, StoredCredentials, UserRepository};

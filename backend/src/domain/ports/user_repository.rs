//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId};

use super::RepositoryError;

/// Account ready to be stored. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Normalised email address.
    pub email: String,
    /// PHC-encoded password hash.
    pub password_hash: PasswordHash,
}

/// Data needed to check a password for an active account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Account the hash belongs to.
    pub user_id: UserId,
    /// PHC-encoded password hash.
    pub password_hash: PasswordHash,
}

/// Stores accounts and serves credential lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account. A taken email yields [`RepositoryError::Conflict`].
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Credentials for the *activated* account registered under `email`.
    async fn find_active_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError>;
}

//! Port for slow, salted password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Deriving a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Derives and checks password hashes.
///
/// Implementations are expected to be deliberately slow; callers must not
/// run them on the async executor threads directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// True when `plaintext` matches `hash`.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}

//! Account registration and authentication.
//!
//! [`PasswordAccountService`] is the only component that sees password
//! hashes. Authentication reports one [`AccountError::InvalidCredentials`]
//! for both an unknown email and a wrong password; for unknown emails it
//! still verifies the supplied password against a decoy hash so both paths
//! cost roughly the same time.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::ports::{
    NewUser, PasswordHashError, PasswordHasher, RepositoryError, UserRepository,
    define_port_error,
};
use super::{LoginCredentials, PasswordHash, SignupRequest, User, UserId};

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

define_port_error! {
    /// Errors surfaced by the account service.
    pub enum AccountError {
        /// Email unknown, account inactive, or password mismatch.
        InvalidCredentials => "invalid email or password",
        /// Another account already uses the email.
        DuplicateEmail => "email address is already in use",
        /// The hasher failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The user store failed.
        Persistence { message: String } => "account storage failed: {message}",
    }
}

impl From<PasswordHashError> for AccountError {
    fn from(value: PasswordHashError) -> Self {
        Self::hashing(value.to_string())
    }
}

impl From<RepositoryError> for AccountError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict { .. } => Self::DuplicateEmail,
            other => Self::persistence(other.to_string()),
        }
    }
}

/// Use-case port for signup and login handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Hash the password and store a new activated account.
    async fn register(&self, request: SignupRequest) -> Result<User, AccountError>;

    /// Resolve credentials to the owning user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, AccountError>;
}

/// [`AccountService`] backed by a user repository and a password hasher.
pub struct PasswordAccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    decoy: OnceCell<PasswordHash>,
}

impl PasswordAccountService {
    /// Build the service from its ports.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            hasher,
            decoy: OnceCell::new(),
        }
    }

    /// Hash the decoy now, so the first unknown-email login pays for one
    /// verification like every other failed login.
    ///
    /// # Errors
    ///
    /// [`AccountError::Hashing`] when the hasher fails.
    pub async fn warm(&self) -> Result<(), AccountError> {
        self.decoy_hash().await?;
        Ok(())
    }

    async fn decoy_hash(&self) -> Result<&PasswordHash, PasswordHashError> {
        self.decoy
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await
    }
}

#[async_trait]
impl AccountService for PasswordAccountService {
    async fn register(&self, request: SignupRequest) -> Result<User, AccountError> {
        let password_hash = self.hasher.hash(request.password()).await?;
        let user = self
            .users
            .insert(NewUser {
                name: request.name().to_owned(),
                email: request.email().to_owned(),
                password_hash,
            })
            .await?;
        info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, AccountError> {
        let stored = self
            .users
            .find_active_credentials(credentials.email())
            .await?;

        let Some(stored) = stored else {
            let decoy = self.decoy_hash().await?;
            if let Err(error) = self.hasher.verify(credentials.password(), decoy).await {
                warn!(%error, "decoy verification failed");
            }
            return Err(AccountError::InvalidCredentials);
        };

        if self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await?
        {
            Ok(stored.user_id)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests;

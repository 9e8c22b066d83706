//! Argon2id implementation of the password hashing port.
//!
//! Hashes are stored as PHC strings, so the parameters travel with each
//! hash and verification keeps working after the defaults change. Work is
//! moved to the blocking pool so the executor threads never stall on it.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with fixed cost parameters.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Hasher with explicit memory (KiB), iteration and lane costs.
    ///
    /// # Errors
    ///
    /// [`PasswordHashError::Hash`] when argon2 rejects the combination.
    pub fn with_costs(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(Self { params })
    }

    fn engine(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_blocking(engine: &Argon2<'_>, plaintext: &[u8]) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    engine
        .hash_password(plaintext, &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(
    engine: &Argon2<'_>,
    plaintext: &[u8],
    encoded: &str,
) -> Result<bool, PasswordHashError> {
    let parsed = password_hash::PasswordHash::new(encoded)
        .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match engine.verify_password(plaintext, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::malformed_hash(err.to_string())),
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let engine = self.engine();
        let secret = Zeroizing::new(plaintext.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hash_blocking(&engine, &secret))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }

    async fn verify(
        &self,
        plaintext: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let engine = self.engine();
        let secret = Zeroizing::new(plaintext.as_bytes().to_vec());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&engine, &secret, &encoded))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
    }
}

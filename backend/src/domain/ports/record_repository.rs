//! Port for owner-scoped persistence of goals, study sessions and quotes.

use async_trait::async_trait;

use crate::domain::{Goal, OwnedEntity, Quote, StudySession, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    ///
    /// `NotFound` covers both "absent" and "owned by someone else" so callers
    /// cannot discover other users' ids. `Timeout` is reported separately
    /// from query and connection failures.
    pub enum RepositoryError {
        /// No row matched the id within the caller's ownership scope.
        NotFound => "record not found",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "constraint violated: {message}",
        /// The operation did not finish inside the storage time budget.
        Timeout { operation: String } => "{operation} timed out",
        /// A connection could not be obtained or was lost.
        Connection { message: String } => "repository connection failed: {message}",
        /// The statement failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}

/// CRUD over one record kind, always restricted to a single owner.
///
/// Every method takes the owner explicitly; adapters must never read or
/// touch rows belonging to another user.
#[async_trait]
pub trait OwnerScopedRepository<E: OwnedEntity>: Send + Sync {
    /// Persist a new record, assigning its id and creation time.
    async fn insert(&self, owner: &UserId, draft: E::Draft) -> Result<E, RepositoryError>;

    /// All records of `owner`, newest first. Empty when there are none.
    async fn list_for(&self, owner: &UserId) -> Result<Vec<E>, RepositoryError>;

    /// One record of `owner`; [`RepositoryError::NotFound`] when absent.
    async fn get(&self, owner: &UserId, id: E::Id) -> Result<E, RepositoryError>;

    /// Overwrite every mutable field of an owned record.
    async fn update(&self, owner: &UserId, id: E::Id, draft: E::Draft)
    -> Result<E, RepositoryError>;

    /// Remove exactly one owned record.
    async fn delete(&self, owner: &UserId, id: E::Id) -> Result<(), RepositoryError>;
}

/// Goal persistence port.
pub type GoalRepository = dyn OwnerScopedRepository<Goal>;
/// Study session persistence port.
pub type StudySessionRepository = dyn OwnerScopedRepository<StudySession>;
/// Quote persistence port.
pub type QuoteRepository = dyn OwnerScopedRepository<Quote>;

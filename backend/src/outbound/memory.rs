//! In-process repositories.
//!
//! Used when no database URL is configured and throughout the test suites.
//! State lives behind a `std::sync::Mutex`; no lock is held across an await.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    NewUser, OwnerScopedRepository, RepositoryError, StoredCredentials, UserRepository,
};
use crate::domain::{OwnedEntity, RecordId, User, UserId, sort_newest_first};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct RecordTable<E> {
    next_id: i64,
    rows: Vec<E>,
}

/// Owner-scoped store for one record kind.
pub struct InMemoryRecords<E: OwnedEntity> {
    table: Mutex<RecordTable<E>>,
    clock: Arc<dyn Clock>,
}

impl<E: OwnedEntity> InMemoryRecords<E> {
    /// Empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(RecordTable {
                next_id: 1,
                rows: Vec::new(),
            }),
            clock,
        }
    }

    fn position(rows: &[E], owner: &UserId, id: E::Id) -> Result<usize, RepositoryError> {
        rows.iter()
            .position(|row| row.id() == id && row.owner() == *owner)
            .ok_or_else(RepositoryError::not_found)
    }
}

#[async_trait]
impl<E: OwnedEntity> OwnerScopedRepository<E> for InMemoryRecords<E> {
    async fn insert(&self, owner: &UserId, draft: E::Draft) -> Result<E, RepositoryError> {
        let created_at = self.clock.utc();
        let mut table = lock(&self.table);
        let id = E::Id::from_raw(table.next_id);
        table.next_id += 1;
        let record = E::assemble(id, *owner, draft, created_at);
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn list_for(&self, owner: &UserId) -> Result<Vec<E>, RepositoryError> {
        let mut owned: Vec<E> = lock(&self.table)
            .rows
            .iter()
            .filter(|row| row.owner() == *owner)
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }

    async fn get(&self, owner: &UserId, id: E::Id) -> Result<E, RepositoryError> {
        let table = lock(&self.table);
        let index = Self::position(&table.rows, owner, id)?;
        table
            .rows
            .get(index)
            .cloned()
            .ok_or_else(RepositoryError::not_found)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: E::Id,
        draft: E::Draft,
    ) -> Result<E, RepositoryError> {
        let mut table = lock(&self.table);
        let index = Self::position(&table.rows, owner, id)?;
        let slot = table
            .rows
            .get_mut(index)
            .ok_or_else(RepositoryError::not_found)?;
        let updated = E::assemble(id, *owner, draft, slot.created_at());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, owner: &UserId, id: E::Id) -> Result<(), RepositoryError> {
        let mut table = lock(&self.table);
        let index = Self::position(&table.rows, owner, id)?;
        table.rows.remove(index);
        Ok(())
    }
}

struct UserRow {
    user: User,
    credentials: StoredCredentials,
}

/// Account store keyed by normalised email.
pub struct InMemoryUsers {
    rows: Mutex<HashMap<String, UserRow>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUsers {
    /// Empty store stamping accounts with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Flip the activation flag of the account registered under `email`.
    ///
    /// Returns `false` when no such account exists.
    pub fn set_activated(&self, email: &str, activated: bool) -> bool {
        match lock(&self.rows).get_mut(email) {
            Some(row) => {
                row.user.activated = activated;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut rows = lock(&self.rows);
        if rows.contains_key(&user.email) {
            return Err(RepositoryError::conflict("users_email_key"));
        }
        let id = UserId::random();
        let stored = User {
            id,
            name: user.name,
            email: user.email.clone(),
            activated: true,
            created_at: self.clock.utc(),
        };
        rows.insert(
            user.email,
            UserRow {
                user: stored.clone(),
                credentials: StoredCredentials {
                    user_id: id,
                    password_hash: user.password_hash,
                },
            },
        );
        Ok(stored)
    }

    async fn find_active_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError> {
        Ok(lock(&self.rows)
            .get(email)
            .filter(|row| row.user.activated)
            .map(|row| row.credentials.clone()))
    }
}

/// Wall clock used when no other clock is injected.
pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(mockable::DefaultClock)
}

//! PostgreSQL-backed account store.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{NewUser, RepositoryError, StoredCredentials, UserRepository};
use crate::domain::User;

use super::error_mapping::{map_diesel_error, map_pool_error, within};
use super::models::{CredentialsRow, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    budget: Duration,
}

impl DieselUserRepository {
    /// Repository whose every call is bounded by `budget`.
    pub fn new(pool: DbPool, budget: Duration) -> Self {
        Self { pool, budget }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        within(self.budget, "insert user", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewUserRow {
                id: Uuid::new_v4(),
                name: &user.name,
                email: &user.email,
                password_hash: user.password_hash.as_str(),
                activated: true,
            };
            diesel::insert_into(users::table)
                .values(&row)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .map(User::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_active_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError> {
        within(self.budget, "find user by email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            users::table
                .filter(users::email.eq(email))
                .filter(users::activated.eq(true))
                .select(CredentialsRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map(|row| row.map(StoredCredentials::from))
                .map_err(map_diesel_error)
        })
        .await
    }
}

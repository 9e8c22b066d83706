//! Code generation for owner-scoped Diesel repositories.
//!
//! Goals, study sessions and quotes share one statement shape: every query
//! filters on `user_id`, listings sort by `created_at DESC, id DESC`, and an
//! update or delete that touches no row reports
//! [`RepositoryError::NotFound`](crate::domain::ports::RepositoryError::NotFound).
//! The table module, row type and changeset type differ per kind, which Diesel
//! cannot abstract over without a wall of trait bounds, so the adapter is
//! stamped out per table instead.

macro_rules! define_owner_scoped_repository {
    (
        $(#[$outer:meta])*
        pub struct $name:ident for $entity:ident {
            table: $table:ident,
            row: $row:ident,
            changes: $changes:ident,
            noun: $noun:literal $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Clone)]
        pub struct $name {
            pool: $crate::outbound::persistence::DbPool,
            budget: ::std::time::Duration,
        }

        impl $name {
            /// Repository whose every call is bounded by `budget`.
            pub fn new(
                pool: $crate::outbound::persistence::DbPool,
                budget: ::std::time::Duration,
            ) -> Self {
                Self { pool, budget }
            }
        }

        #[::async_trait::async_trait]
        impl $crate::domain::ports::OwnerScopedRepository<$entity> for $name {
            async fn insert(
                &self,
                owner: &$crate::domain::UserId,
                draft: <$entity as $crate::domain::OwnedEntity>::Draft,
            ) -> Result<$entity, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::outbound::persistence::error_mapping::{
                    map_diesel_error, map_pool_error, within,
                };

                within(self.budget, concat!("insert ", $noun), async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    ::diesel::insert_into($table::table)
                        .values(($table::user_id.eq(owner.as_uuid()), $changes::from(&draft)))
                        .returning($row::as_returning())
                        .get_result(&mut conn)
                        .await
                        .map($entity::from)
                        .map_err(map_diesel_error)
                })
                .await
            }

            async fn list_for(
                &self,
                owner: &$crate::domain::UserId,
            ) -> Result<Vec<$entity>, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::outbound::persistence::error_mapping::{
                    map_diesel_error, map_pool_error, within,
                };

                within(self.budget, concat!("list ", $noun, "s"), async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let rows: Vec<$row> = $table::table
                        .filter($table::user_id.eq(owner.as_uuid()))
                        .order(($table::created_at.desc(), $table::id.desc()))
                        .select($row::as_select())
                        .load(&mut conn)
                        .await
                        .map_err(map_diesel_error)?;
                    Ok(rows.into_iter().map($entity::from).collect())
                })
                .await
            }

            async fn get(
                &self,
                owner: &$crate::domain::UserId,
                id: <$entity as $crate::domain::OwnedEntity>::Id,
            ) -> Result<$entity, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::domain::RecordId as _;
                use $crate::outbound::persistence::error_mapping::{
                    map_diesel_error, map_pool_error, within,
                };

                within(self.budget, concat!("get ", $noun), async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    $table::table
                        .filter($table::id.eq(id.raw()))
                        .filter($table::user_id.eq(owner.as_uuid()))
                        .select($row::as_select())
                        .first(&mut conn)
                        .await
                        .map($entity::from)
                        .map_err(map_diesel_error)
                })
                .await
            }

            async fn update(
                &self,
                owner: &$crate::domain::UserId,
                id: <$entity as $crate::domain::OwnedEntity>::Id,
                draft: <$entity as $crate::domain::OwnedEntity>::Draft,
            ) -> Result<$entity, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::domain::RecordId as _;
                use $crate::outbound::persistence::error_mapping::{
                    map_diesel_error, map_pool_error, within,
                };

                within(self.budget, concat!("update ", $noun), async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    ::diesel::update(
                        $table::table
                            .filter($table::id.eq(id.raw()))
                            .filter($table::user_id.eq(owner.as_uuid())),
                    )
                    .set($changes::from(&draft))
                    .returning($row::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?
                    .map($entity::from)
                    .ok_or_else($crate::domain::ports::RepositoryError::not_found)
                })
                .await
            }

            async fn delete(
                &self,
                owner: &$crate::domain::UserId,
                id: <$entity as $crate::domain::OwnedEntity>::Id,
            ) -> Result<(), $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::domain::RecordId as _;
                use $crate::outbound::persistence::error_mapping::{
                    exactly_one_row, map_diesel_error, map_pool_error, within,
                };

                within(self.budget, concat!("delete ", $noun), async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let affected = ::diesel::delete(
                        $table::table
                            .filter($table::id.eq(id.raw()))
                            .filter($table::user_id.eq(owner.as_uuid())),
                    )
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                    exactly_one_row(affected)
                })
                .await
            }
        }
    };
}

pub(crate) use define_owner_scoped_repository;

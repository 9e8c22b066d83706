//! PostgreSQL-backed study session repository.
//!
//! The table is called `sessions`; login sessions never touch the database.

use crate::domain::StudySession;

use super::macros::define_owner_scoped_repository;
use super::models::{StudySessionChanges, StudySessionRow};
use super::schema::sessions;

define_owner_scoped_repository! {
    /// Diesel implementation of the study session port.
    pub struct DieselStudySessionRepository for StudySession {
        table: sessions,
        row: StudySessionRow,
        changes: StudySessionChanges,
        noun: "study session",
    }
}

//! Row types mapping tables to domain records.
//!
//! Read rows convert into domain types; write rows borrow from drafts so no
//! string is cloned on the way in.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Goal, GoalDraft, GoalId, PasswordHash, Quote, QuoteDraft, QuoteId, RecordId, StudySession,
    StudySessionDraft, StudySessionId, User, UserId,
};
use crate::domain::ports::StoredCredentials;

use super::schema::{goals, quotes, sessions, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub activated: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            activated: row.activated,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialsRow {
    pub id: Uuid,
    pub password_hash: String,
}

impl From<CredentialsRow> for StoredCredentials {
    fn from(row: CredentialsRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.id),
            password_hash: PasswordHash::new(row.password_hash),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub activated: bool,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GoalRow {
    pub id: i64,
    pub user_id: Uuid,
    pub goal_text: String,
    pub is_completed: bool,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: GoalId::from_raw(row.id),
            owner: UserId::from_uuid(row.user_id),
            text: row.goal_text,
            completed: row.is_completed,
            target_date: row.target_date,
            created_at: row.created_at,
        }
    }
}

/// Insert and full-overwrite payload for `goals`.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = goals)]
pub(crate) struct GoalChanges<'a> {
    pub goal_text: &'a str,
    pub is_completed: bool,
    pub target_date: NaiveDate,
}

impl<'a> From<&'a GoalDraft> for GoalChanges<'a> {
    fn from(draft: &'a GoalDraft) -> Self {
        Self {
            goal_text: &draft.text,
            is_completed: draft.completed,
            target_date: draft.target_date,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudySessionRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StudySessionRow> for StudySession {
    fn from(row: StudySessionRow) -> Self {
        Self {
            id: StudySessionId::from_raw(row.id),
            owner: UserId::from_uuid(row.user_id),
            title: row.title,
            description: row.description,
            subject: row.subject,
            start_date: row.start_date,
            end_date: row.end_date,
            completed: row.is_completed,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = sessions)]
pub(crate) struct StudySessionChanges<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub subject: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_completed: bool,
}

impl<'a> From<&'a StudySessionDraft> for StudySessionChanges<'a> {
    fn from(draft: &'a StudySessionDraft) -> Self {
        Self {
            title: &draft.title,
            description: &draft.description,
            subject: &draft.subject,
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_completed: draft.completed,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QuoteRow {
    pub id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Self {
            id: QuoteId::from_raw(row.id),
            owner: UserId::from_uuid(row.user_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = quotes)]
pub(crate) struct QuoteChanges<'a> {
    pub content: &'a str,
}

impl<'a> From<&'a QuoteDraft> for QuoteChanges<'a> {
    fn from(draft: &'a QuoteDraft) -> Self {
        Self {
            content: &draft.content,
        }
    }
}

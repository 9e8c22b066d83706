//! Domain primitives, rules and use-cases.
//!
//! Nothing in here knows about HTTP, cookies or SQL. Handlers reach the
//! domain through [`accounts::AccountService`], the submission pipeline in
//! [`submission`], and the repository traits in [`ports`].

pub mod accounts;
pub mod auth;
pub mod error;
pub mod goal;
pub mod ports;
pub mod quote;
pub mod records;
pub mod rules;
pub mod study_session;
pub mod submission;
pub mod trace_id;
pub mod user;
pub mod validator;

pub use self::accounts::{AccountError, AccountService, PasswordAccountService};
#[cfg(test)]
pub use self::accounts::MockAccountService;
pub use self::auth::{LoginCredentials, PasswordHash, SignupRequest};
pub use self::error::{Error, ErrorCode};
pub use self::goal::{Goal, GoalDraft, GoalId};
pub use self::quote::{Quote, QuoteDraft, QuoteId};
pub use self::records::{OwnedEntity, RecordId, sort_newest_first};
pub use self::study_session::{StudySession, StudySessionDraft, StudySessionId};
pub use self::submission::{SubmissionOutcome, submit_edit, submit_new};
pub use self::trace_id::TraceId;
pub use self::user::{InvalidUserId, User, UserId};
pub use self::validator::{FieldErrors, Validator};

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

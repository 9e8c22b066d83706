//! Study sessions: planned blocks of study on one subject.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::records::define_record_id;
use super::rules::{is_valid_date, max_length, not_blank};
use super::{OwnedEntity, UserId, Validator};

/// Maximum length of each text field in characters.
pub const SESSION_FIELD_MAX: usize = 50;

const BLANK: &str = "This field cannot be left blank";
const TOO_LONG: &str = "Must not be more than 50 characters long";

define_record_id!(
    /// Identifier of a [`StudySession`].
    StudySessionId
);

/// Owner-editable study session fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudySessionDraft {
    /// Short title.
    pub title: String,
    /// What the session covers.
    pub description: String,
    /// Subject studied.
    pub subject: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Whether the session is done.
    pub completed: bool,
}

/// Persisted study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudySession {
    /// Identifier.
    pub id: StudySessionId,
    /// Owner, fixed at creation.
    pub owner: UserId,
    /// Short title.
    pub title: String,
    /// What the session covers.
    pub description: String,
    /// Subject studied.
    pub subject: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Completion flag.
    pub completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl OwnedEntity for StudySession {
    type Id = StudySessionId;
    type Draft = StudySessionDraft;

    const KIND: &'static str = "session";

    fn id(&self) -> StudySessionId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn draft(&self) -> StudySessionDraft {
        StudySessionDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            subject: self.subject.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            completed: self.completed,
        }
    }

    fn assemble(
        id: StudySessionId,
        owner: UserId,
        draft: StudySessionDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            title: draft.title,
            description: draft.description,
            subject: draft.subject,
            start_date: draft.start_date,
            end_date: draft.end_date,
            completed: draft.completed,
            created_at,
        }
    }

    fn validate(draft: &StudySessionDraft, validator: &mut Validator) {
        for (field, value) in [
            ("title", &draft.title),
            ("description", &draft.description),
            ("subject", &draft.subject),
        ] {
            validator.check(not_blank(value), field, BLANK);
            validator.check(max_length(value, SESSION_FIELD_MAX), field, TOO_LONG);
        }
        validator.check(
            is_valid_date(draft.start_date),
            "start_date",
            "Must be a valid date",
        );
        validator.check(
            is_valid_date(draft.end_date),
            "end_date",
            "Must be a valid date",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> StudySessionDraft {
        StudySessionDraft {
            title: "Linear algebra".to_owned(),
            description: "Eigenvalues chapter".to_owned(),
            subject: "Maths".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("fixture date"),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 2).expect("fixture date"),
            completed: false,
        }
    }

    #[rstest]
    fn accepts_well_formed_session(draft: StudySessionDraft) {
        let mut validator = Validator::new();
        StudySession::validate(&draft, &mut validator);
        assert!(validator.is_valid());
    }

    #[rstest]
    fn every_blank_text_field_is_reported(mut draft: StudySessionDraft) {
        draft.title = String::new();
        draft.description = " ".to_owned();
        draft.subject = String::new();

        let mut validator = Validator::new();
        StudySession::validate(&draft, &mut validator);

        let errors = validator.into_errors();
        for field in ["title", "description", "subject"] {
            assert_eq!(errors.get(field).map(String::as_str), Some(BLANK), "{field}");
        }
    }

    #[rstest]
    #[case("title")]
    #[case("description")]
    #[case("subject")]
    fn fifty_one_characters_is_too_long(mut draft: StudySessionDraft, #[case] field: &str) {
        let long = "x".repeat(SESSION_FIELD_MAX + 1);
        match field {
            "title" => draft.title = long,
            "description" => draft.description = long,
            _ => draft.subject = long,
        }

        let mut validator = Validator::new();
        StudySession::validate(&draft, &mut validator);
        assert_eq!(
            validator.errors().get(field).map(String::as_str),
            Some(TOO_LONG)
        );
        assert_eq!(validator.errors().len(), 1);
    }
}

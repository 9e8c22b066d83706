//! Daily goals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::records::define_record_id;
use super::rules::{is_valid_date, max_length, not_blank};
use super::{OwnedEntity, UserId, Validator};

/// Maximum goal text length in characters.
pub const GOAL_TEXT_MAX: usize = 100;

define_record_id!(
    /// Identifier of a [`Goal`].
    GoalId
);

/// Owner-editable goal fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalDraft {
    /// Free-text description of the goal.
    pub text: String,
    /// Whether the goal has been met.
    pub completed: bool,
    /// Day the goal should be met by.
    pub target_date: NaiveDate,
}

/// Persisted goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    /// Identifier.
    pub id: GoalId,
    /// Owner, fixed at creation.
    pub owner: UserId,
    /// Free-text description.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Target day.
    pub target_date: NaiveDate,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl OwnedEntity for Goal {
    type Id = GoalId;
    type Draft = GoalDraft;

    const KIND: &'static str = "goal";

    fn id(&self) -> GoalId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn draft(&self) -> GoalDraft {
        GoalDraft {
            text: self.text.clone(),
            completed: self.completed,
            target_date: self.target_date,
        }
    }

    fn assemble(id: GoalId, owner: UserId, draft: GoalDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            text: draft.text,
            completed: draft.completed,
            target_date: draft.target_date,
            created_at,
        }
    }

    fn validate(draft: &GoalDraft, validator: &mut Validator) {
        validator.check(
            not_blank(&draft.text),
            "goal_text",
            "This field cannot be left blank",
        );
        validator.check(
            max_length(&draft.text, GOAL_TEXT_MAX),
            "goal_text",
            "Must not be more than 100 characters long",
        );
        validator.check(
            is_valid_date(draft.target_date),
            "target_date",
            "Must be a valid date",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> GoalDraft {
        GoalDraft {
            text: "Study algebra".to_owned(),
            completed: false,
            target_date: NaiveDate::from_ymd_opt(2025, 1, 10).expect("fixture date"),
        }
    }

    fn errors_for(draft: &GoalDraft) -> Validator {
        let mut validator = Validator::new();
        Goal::validate(draft, &mut validator);
        validator
    }

    #[rstest]
    fn accepts_well_formed_goal(draft: GoalDraft) {
        assert!(errors_for(&draft).is_valid());
    }

    #[rstest]
    #[case(GOAL_TEXT_MAX, true)]
    #[case(GOAL_TEXT_MAX + 1, false)]
    fn text_length_boundary(mut draft: GoalDraft, #[case] len: usize, #[case] valid: bool) {
        draft.text = "a".repeat(len);
        let validator = errors_for(&draft);
        assert_eq!(validator.is_valid(), valid);
        if !valid {
            assert_eq!(
                validator.errors().get("goal_text").map(String::as_str),
                Some("Must not be more than 100 characters long")
            );
        }
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    fn blank_text_is_rejected(mut draft: GoalDraft, #[case] text: &str) {
        draft.text = text.to_owned();
        let validator = errors_for(&draft);
        assert_eq!(
            validator.errors().get("goal_text").map(String::as_str),
            Some("This field cannot be left blank")
        );
    }

    #[rstest]
    fn draft_round_trips_through_assemble(draft: GoalDraft) {
        let goal = Goal::assemble(GoalId(7), UserId::random(), draft.clone(), Utc::now());
        assert_eq!(goal.draft(), draft);
        assert_eq!(goal.id().to_string(), "7");
    }
}

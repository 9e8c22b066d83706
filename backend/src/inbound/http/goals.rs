//! Goal pages.

use std::collections::BTreeMap;

use crate::domain::ports::OwnerScopedRepository;
use crate::domain::{Error, Goal, GoalDraft};

use super::forms::{FormResource, PageMeta};
use super::state::HttpState;
use super::validation::{DATE_FORMAT, FormFields};
use super::views::{Page, TemplateData};

impl FormResource for Goal {
    const NOUN: &'static str = "Goal";
    const LIST_PATH: &'static str = "/goals";
    const ID_FIELD: &'static str = "goal_id";
    const FIELDS: &'static [&'static str] = &["goal_text", "is_completed", "target_date"];

    const CREATE_PAGE: PageMeta = PageMeta {
        page: Page::GoalForm,
        title: "Daily Goals",
        header: "Daily Goals",
    };
    const LIST_PAGE: PageMeta = PageMeta {
        page: Page::GoalList,
        title: "Goal List",
        header: "All Goal Entries",
    };
    const EDIT_PAGE: PageMeta = PageMeta {
        page: Page::GoalEdit,
        title: "Edit Goal",
        header: "Edit Goal",
    };

    fn repository(state: &HttpState) -> &dyn OwnerScopedRepository<Self> {
        state.goals.as_ref()
    }

    fn parse_draft(fields: &FormFields) -> Result<GoalDraft, Error> {
        Ok(GoalDraft {
            text: fields.text("goal_text").to_owned(),
            completed: fields.flag("is_completed")?,
            target_date: fields.date("target_date")?,
        })
    }

    fn prefill(draft: &GoalDraft) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("goal_text".to_owned(), draft.text.clone()),
            ("is_completed".to_owned(), draft.completed.to_string()),
            (
                "target_date".to_owned(),
                draft.target_date.format(DATE_FORMAT).to_string(),
            ),
        ])
    }

    fn attach_listing(data: &mut TemplateData, records: Vec<Self>) {
        data.goals = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    fn draft_parses_from_form_fields() {
        let fields: FormFields = [
            ("goal_text", "Study algebra"),
            ("is_completed", "true"),
            ("target_date", "2025-01-10"),
        ]
        .into_iter()
        .collect();

        let draft = Goal::parse_draft(&fields).expect("well formed");

        assert_eq!(draft.text, "Study algebra");
        assert!(draft.completed);
        assert_eq!(
            draft.target_date,
            NaiveDate::from_ymd_opt(2025, 1, 10).expect("date")
        );
    }

    #[rstest]
    fn bad_date_is_malformed_not_a_field_error() {
        let fields: FormFields = [("goal_text", "x"), ("target_date", "tomorrow")]
            .into_iter()
            .collect();
        assert!(Goal::parse_draft(&fields).is_err());
    }

    #[rstest]
    fn prefill_round_trips_through_parse() {
        let draft = GoalDraft {
            text: "Finish chapter 3".to_owned(),
            completed: false,
            target_date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("date"),
        };
        let fields: FormFields = Goal::prefill(&draft).into_iter().collect();
        assert_eq!(Goal::parse_draft(&fields).expect("parses"), draft);
    }
}

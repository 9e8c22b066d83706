//! Motivational quotes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::records::define_record_id;
use super::rules::{max_length, not_blank};
use super::{OwnedEntity, UserId, Validator};

/// Maximum quote length in characters.
pub const QUOTE_CONTENT_MAX: usize = 50;

define_record_id!(
    /// Identifier of a [`Quote`].
    QuoteId
);

/// Owner-editable quote fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteDraft {
    /// Quote text.
    pub content: String,
}

/// Persisted quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Identifier.
    pub id: QuoteId,
    /// Owner, fixed at creation.
    pub owner: UserId,
    /// Quote text.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl OwnedEntity for Quote {
    type Id = QuoteId;
    type Draft = QuoteDraft;

    const KIND: &'static str = "quote";

    fn id(&self) -> QuoteId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn draft(&self) -> QuoteDraft {
        QuoteDraft {
            content: self.content.clone(),
        }
    }

    fn assemble(id: QuoteId, owner: UserId, draft: QuoteDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            content: draft.content,
            created_at,
        }
    }

    fn validate(draft: &QuoteDraft, validator: &mut Validator) {
        validator.check(
            not_blank(&draft.content),
            "content",
            "This field cannot be left blank",
        );
        validator.check(
            max_length(&draft.content, QUOTE_CONTENT_MAX),
            "content",
            "Must not be more than 50 characters long",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Stay curious", true)]
    #[case("", false)]
    #[case(&"q".repeat(QUOTE_CONTENT_MAX), true)]
    #[case(&"q".repeat(QUOTE_CONTENT_MAX + 1), false)]
    fn content_rules(#[case] content: &str, #[case] valid: bool) {
        let draft = QuoteDraft {
            content: content.to_owned(),
        };
        let mut validator = Validator::new();
        Quote::validate(&draft, &mut validator);
        assert_eq!(validator.is_valid(), valid);
        assert_eq!(validator.errors().contains_key("content"), !valid);
    }
}

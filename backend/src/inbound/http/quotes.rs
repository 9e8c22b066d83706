//! Motivational quote pages.

use std::collections::BTreeMap;

use crate::domain::ports::OwnerScopedRepository;
use crate::domain::{Error, Quote, QuoteDraft};

use super::forms::{FormResource, PageMeta};
use super::state::HttpState;
use super::validation::FormFields;
use super::views::{Page, TemplateData};

impl FormResource for Quote {
    const NOUN: &'static str = "Quote";
    const LIST_PATH: &'static str = "/quotes";
    const ID_FIELD: &'static str = "quote_id";
    const FIELDS: &'static [&'static str] = &["content"];

    const CREATE_PAGE: PageMeta = PageMeta {
        page: Page::QuoteForm,
        title: "Quote",
        header: "Add a Motivational Quote",
    };
    const LIST_PAGE: PageMeta = PageMeta {
        page: Page::QuoteList,
        title: "Quotes",
        header: "Quotes",
    };
    const EDIT_PAGE: PageMeta = PageMeta {
        page: Page::QuoteEdit,
        title: "Edit Quote",
        header: "Edit Quote",
    };

    fn repository(state: &HttpState) -> &dyn OwnerScopedRepository<Self> {
        state.quotes.as_ref()
    }

    fn parse_draft(fields: &FormFields) -> Result<QuoteDraft, Error> {
        Ok(QuoteDraft {
            content: fields.text("content").to_owned(),
        })
    }

    fn prefill(draft: &QuoteDraft) -> BTreeMap<String, String> {
        BTreeMap::from([("content".to_owned(), draft.content.clone())])
    }

    fn attach_listing(data: &mut TemplateData, records: Vec<Self>) {
        data.quotes = records;
    }
}

//! PostgreSQL-backed quote repository.

use crate::domain::Quote;

use super::macros::define_owner_scoped_repository;
use super::models::{QuoteChanges, QuoteRow};
use super::schema::quotes;

define_owner_scoped_repository! {
    /// Diesel implementation of the quote port.
    pub struct DieselQuoteRepository for Quote {
        table: quotes,
        row: QuoteRow,
        changes: QuoteChanges,
        noun: "quote",
    }
}

//! PostgreSQL persistence via Diesel and `diesel-async`.
//!
//! Every repository call checks out its own pooled connection and runs under
//! the storage time budget handed to the constructor.

mod diesel_goal_repository;
mod diesel_quote_repository;
mod diesel_study_session_repository;
mod diesel_user_repository;
mod error_mapping;
mod macros;
mod models;
mod pool;
mod schema;

pub use diesel_goal_repository::DieselGoalRepository;
pub use diesel_quote_repository::DieselQuoteRepository;
pub use diesel_study_session_repository::DieselStudySessionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

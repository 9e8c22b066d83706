//! Form-driven HTTP adapter.
//!
//! Handlers take a [`guard::CurrentUser`] when the route is protected, read
//! form or query fields into a [`validation::FormFields`], call domain ports
//! through [`state::HttpState`] and answer with a rendered page or a `303`.

pub mod cache_control;
pub mod csrf;
pub mod error;
pub mod forms;
pub mod goals;
pub mod guard;
pub mod home;
pub mod quotes;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
pub mod study_sessions;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod views;

pub use error::ApiResult;

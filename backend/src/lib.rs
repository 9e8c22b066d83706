//! Study tracker backend: goals, study sessions and quotes behind a
//! session-authenticated form interface.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;

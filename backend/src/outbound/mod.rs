//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel
//! - **memory**: process-local repositories for database-less runs and tests
//! - **argon2_hasher**: password hashing
//! - **session_store**: server-side login session records
//!
//! Adapters translate between domain types and infrastructure types. They
//! hold no business rules.

pub mod argon2_hasher;
pub mod memory;
pub mod persistence;
pub mod session_store;

pub use argon2_hasher::Argon2PasswordHasher;
pub use memory::{InMemoryRecords, InMemoryUsers, system_clock};
pub use session_store::InMemorySessionStore;

//! # Connection Provider
//!
//! Owns the PostgreSQL pool and hands out one transactional scope per
//! request.
//!
//! # Lifecycle
//!
//! 1. `ConnectionProvider::begin` checks a connection out of the pool and
//!    opens a transaction
//! 2. The handler runs exactly one statement through `TxScope::conn`
//! 3. `TxScope::finish` commits on success, rolls back on failure
//! 4. The connection returns to the pool when the scope is dropped, on every
//!    exit path

pub mod config;
pub mod errors;
pub mod provider;

pub use config::{DatabaseConfig, SslMode};
pub use errors::{DbError, DbResult};
pub use provider::{ConnectionProvider, TxScope};

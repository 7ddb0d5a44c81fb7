//! Observability for the engine API
//!
//! Structured `tracing` logs. Request spans come from the HTTP trace layer,
//! store and transaction events from the connection provider.

pub mod logger;

pub use logger::{init, LogFormat, LoggerError};

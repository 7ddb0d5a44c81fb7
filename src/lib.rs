//! motores-api - CRUD HTTP service for the engine catalogue
//!
//! Engine records (`motores`) with foreign keys to brands (`marcas`) and
//! engine types (`tipos_motor`), stored in PostgreSQL and served as JSON.

pub mod cli;
pub mod db;
pub mod http_server;
pub mod motores;
pub mod observability;

//! # Engine Resource
//!
//! Schema, persistence seam and HTTP routes for engine records.

pub mod memory;
pub mod routes;
pub mod schema;
pub mod store;

pub use memory::InMemoryMotorStore;
pub use routes::{motor_routes, MOTORES_PATH};
pub use schema::{Marca, Motor, MotorCreate, TipoMotor, SCHEMA_SQL};
pub use store::{MotorStore, PgMotorStore};

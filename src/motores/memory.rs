//! # In-Memory Engine Store
//!
//! `MotorStore` implementation over a lock-protected vector.
//!
//! It mirrors the store guarantees the router relies on: foreign keys are
//! checked against the registered brands and engine types, `litraje` is
//! coerced like `NUMERIC(3, 1)` (halves rounded away from zero, magnitudes
//! of 100 or more rejected), and rows come back in insertion order.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::{DbError, DbResult};

use super::schema::{Marca, Motor, MotorCreate, TipoMotor};
use super::store::{new_motor_id, MotorStore};

/// In-memory engine store for testing
pub struct InMemoryMotorStore {
    motores: RwLock<Vec<Motor>>,
    marcas: RwLock<BTreeMap<i32, Marca>>,
    tipos: RwLock<BTreeMap<i32, TipoMotor>>,
    available: AtomicBool,
}

impl InMemoryMotorStore {
    pub fn new() -> Self {
        Self {
            motores: RwLock::new(Vec::new()),
            marcas: RwLock::new(BTreeMap::new()),
            tipos: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Register a brand that engines may reference
    pub fn with_marca(self, id: i32, nombre: &str) -> Self {
        if let Ok(mut marcas) = self.marcas.write() {
            marcas.insert(
                id,
                Marca {
                    id,
                    nombre: nombre.to_string(),
                },
            );
        }
        self
    }

    /// Register an engine type that engines may reference
    pub fn with_tipo_motor(self, id: i32, nombre: &str) -> Self {
        if let Ok(mut tipos) = self.tipos.write() {
            tipos.insert(
                id,
                TipoMotor {
                    id,
                    nombre: nombre.to_string(),
                },
            );
        }
        self
    }

    /// Simulate losing the connection: every operation fails with a
    /// connection fault until switched back on.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored engines
    pub fn len(&self) -> usize {
        self.motores.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> DbResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DbError::Connection(sqlx::Error::PoolTimedOut))
        }
    }

    fn poisoned() -> DbError {
        DbError::Connection(sqlx::Error::Protocol("lock poisoned".to_string()))
    }

    /// Enforce the two foreign keys the way the store reports them
    fn check_references(&self, payload: &MotorCreate) -> DbResult<()> {
        let marcas = self.marcas.read().map_err(|_| Self::poisoned())?;
        if !marcas.contains_key(&payload.marca_id) {
            return Err(fk_violation("motores_marca_id_fkey"));
        }

        let tipos = self.tipos.read().map_err(|_| Self::poisoned())?;
        if !tipos.contains_key(&payload.tipo_motor_id) {
            return Err(fk_violation("motores_tipo_motor_id_fkey"));
        }

        Ok(())
    }
}

impl Default for InMemoryMotorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn fk_violation(constraint: &str) -> DbError {
    DbError::Rejected(format!(
        "insert or update on table \"motores\" violates foreign key constraint \"{}\"",
        constraint
    ))
}

/// Coerce `litraje` into `NUMERIC(3, 1)`: one fractional digit, at most
/// two integer digits after rounding
fn normalize(mut payload: MotorCreate) -> DbResult<MotorCreate> {
    let litraje = payload
        .litraje
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

    if litraje.abs() >= Decimal::ONE_HUNDRED {
        return Err(DbError::Rejected("numeric field overflow".to_string()));
    }

    payload.litraje = litraje;
    Ok(payload)
}

impl MotorStore for InMemoryMotorStore {
    async fn list(&self) -> DbResult<Vec<Motor>> {
        self.check_available()?;
        let motores = self.motores.read().map_err(|_| Self::poisoned())?;
        Ok(motores.clone())
    }

    async fn get(&self, id: &str) -> DbResult<Option<Motor>> {
        self.check_available()?;
        let motores = self.motores.read().map_err(|_| Self::poisoned())?;
        Ok(motores.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, payload: MotorCreate) -> DbResult<Motor> {
        self.check_available()?;
        let payload = normalize(payload)?;
        self.check_references(&payload)?;

        let motor = payload.into_motor(new_motor_id());
        let mut motores = self.motores.write().map_err(|_| Self::poisoned())?;
        motores.push(motor.clone());

        Ok(motor)
    }

    async fn update(&self, id: &str, payload: MotorCreate) -> DbResult<Option<Motor>> {
        self.check_available()?;

        let mut motores = self.motores.write().map_err(|_| Self::poisoned())?;
        let Some(record) = motores.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        let payload = normalize(payload)?;
        self.check_references(&payload)?;
        *record = payload.into_motor(id.to_string());

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: &str) -> DbResult<bool> {
        self.check_available()?;

        let mut motores = self.motores.write().map_err(|_| Self::poisoned())?;
        let before = motores.len();
        motores.retain(|m| m.id != id);

        Ok(motores.len() < before)
    }
}

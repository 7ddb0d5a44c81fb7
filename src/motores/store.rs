//! # Engine Store
//!
//! `MotorStore` is the seam between the HTTP router and persistence.
//! `PgMotorStore` runs each operation as one parameterized statement inside
//! its own transaction scope.

use std::future::Future;

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use uuid::Uuid;

use crate::db::{ConnectionProvider, DbError, DbResult, TxScope};

use super::schema::{Motor, MotorCreate, MOTORES_TABLE};

/// Store operations for the engine resource.
///
/// `get` and `update` return `None` when no row matches; `delete` returns
/// whether a row was removed.
pub trait MotorStore: Send + Sync {
    /// All engines, in store order
    fn list(&self) -> impl Future<Output = DbResult<Vec<Motor>>> + Send;

    /// One engine by id
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Option<Motor>>> + Send;

    /// Insert with a freshly generated id
    fn create(&self, payload: MotorCreate) -> impl Future<Output = DbResult<Motor>> + Send;

    /// Replace every writable field of an existing engine
    fn update(
        &self,
        id: &str,
        payload: MotorCreate,
    ) -> impl Future<Output = DbResult<Option<Motor>>> + Send;

    /// Remove an engine
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Generate an engine id
pub fn new_motor_id() -> String {
    Uuid::new_v4().to_string()
}

// ==================
// Statements
// ==================

fn select_all_sql() -> String {
    format!(r#"SELECT * FROM "{}";"#, MOTORES_TABLE)
}

fn select_one_sql() -> String {
    format!(r#"SELECT * FROM "{}" WHERE id = $1;"#, MOTORES_TABLE)
}

fn insert_sql() -> String {
    let columns = std::iter::once("id")
        .chain(MotorCreate::COLUMNS)
        .collect::<Vec<_>>();
    let placeholders = (1..=columns.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>();

    format!(
        r#"INSERT INTO "{}" ({}) VALUES ({}) RETURNING *;"#,
        MOTORES_TABLE,
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn update_sql() -> String {
    let set_clauses = MotorCreate::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!(r#""{}" = ${}"#, column, i + 1))
        .collect::<Vec<_>>();

    format!(
        r#"UPDATE "{}" SET {} WHERE id = ${} RETURNING *;"#,
        MOTORES_TABLE,
        set_clauses.join(", "),
        MotorCreate::COLUMNS.len() + 1
    )
}

fn delete_sql() -> String {
    format!(r#"DELETE FROM "{}" WHERE id = $1 RETURNING id;"#, MOTORES_TABLE)
}

/// Bind the writable fields in `MotorCreate::COLUMNS` order
fn bind_payload<'q>(
    query: QueryAs<'q, Postgres, Motor, PgArguments>,
    payload: MotorCreate,
) -> QueryAs<'q, Postgres, Motor, PgArguments> {
    query
        .bind(payload.nombre_modelo)
        .bind(payload.litraje)
        .bind(payload.potencia_hp)
        .bind(payload.fecha_lanzamiento)
        .bind(payload.marca_id)
        .bind(payload.tipo_motor_id)
}

// ==================
// PostgreSQL Store
// ==================

/// Engine store backed by PostgreSQL
#[derive(Clone)]
pub struct PgMotorStore {
    provider: ConnectionProvider,
}

impl PgMotorStore {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    async fn scope(&self) -> DbResult<TxScope> {
        self.provider.begin().await
    }
}

impl MotorStore for PgMotorStore {
    async fn list(&self) -> DbResult<Vec<Motor>> {
        let mut scope = self.scope().await?;
        let sql = select_all_sql();
        let outcome = sqlx::query_as::<_, Motor>(&sql)
            .fetch_all(scope.conn())
            .await
            .map_err(DbError::from);
        scope.finish(outcome).await
    }

    async fn get(&self, id: &str) -> DbResult<Option<Motor>> {
        let mut scope = self.scope().await?;
        let sql = select_one_sql();
        let outcome = sqlx::query_as::<_, Motor>(&sql)
            .bind(id)
            .fetch_optional(scope.conn())
            .await
            .map_err(DbError::from);
        scope.finish(outcome).await
    }

    async fn create(&self, payload: MotorCreate) -> DbResult<Motor> {
        let mut scope = self.scope().await?;
        let sql = insert_sql();
        let query = sqlx::query_as::<_, Motor>(&sql).bind(new_motor_id());
        let outcome = bind_payload(query, payload)
            .fetch_one(scope.conn())
            .await
            .map_err(DbError::from_write);
        scope.finish(outcome).await
    }

    async fn update(&self, id: &str, payload: MotorCreate) -> DbResult<Option<Motor>> {
        let mut scope = self.scope().await?;
        let sql = update_sql();
        let query = sqlx::query_as::<_, Motor>(&sql);
        let outcome = bind_payload(query, payload)
            .bind(id)
            .fetch_optional(scope.conn())
            .await
            .map_err(DbError::from_write);
        scope.finish(outcome).await
    }

    async fn delete(&self, id: &str) -> DbResult<bool> {
        let mut scope = self.scope().await?;
        let sql = delete_sql();
        let outcome = sqlx::query_scalar::<_, String>(&sql)
            .bind(id)
            .fetch_optional(scope.conn())
            .await
            .map(|deleted| deleted.is_some())
            .map_err(DbError::from);
        scope.finish(outcome).await
    }
}

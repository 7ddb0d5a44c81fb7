//! # Transaction-Scoped Connections
//!
//! `ConnectionProvider` wraps a bounded `PgPool`. Every request calls
//! `begin()` once and receives a `TxScope` that exclusively owns one pooled
//! connection with an open transaction.
//!
//! The scope guarantees release: `finish` commits or rolls back explicitly,
//! and dropping an unfinished scope rolls back and returns the connection to
//! the pool.

use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use tracing::{debug, warn};

use super::config::DatabaseConfig;
use super::errors::{DbError, DbResult};

/// Hands out one transactional scope per request
#[derive(Clone)]
pub struct ConnectionProvider {
    pool: PgPool,
}

impl ConnectionProvider {
    /// Build the pool without opening any connection yet.
    ///
    /// Fails only on configuration faults (unparseable URL).
    pub fn connect_lazy(config: &DatabaseConfig) -> DbResult<Self> {
        let options = config.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(options);

        debug!(
            event = "pool_configured",
            max_connections = config.max_connections,
            ssl_mode = ?config.ssl_mode,
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check out a connection and open a transaction on it
    pub async fn begin(&self) -> DbResult<TxScope> {
        let tx = self.pool.begin().await.map_err(|e| {
            warn!(event = "connection_acquire_failed", error = %e);
            DbError::Connection(e)
        })?;

        Ok(TxScope { tx })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One request's exclusive connection plus its open transaction
pub struct TxScope {
    tx: Transaction<'static, Postgres>,
}

impl TxScope {
    /// The connection to run the request's statement on
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit if `outcome` is `Ok`, roll back otherwise.
    ///
    /// A failed commit is reported as a connection fault. A failed rollback
    /// is logged and the original error is returned unchanged.
    pub async fn finish<T>(self, outcome: DbResult<T>) -> DbResult<T> {
        match outcome {
            Ok(value) => {
                self.tx.commit().await.map_err(|e| {
                    warn!(event = "transaction_commit_failed", error = %e);
                    DbError::Connection(e)
                })?;
                debug!(event = "transaction_committed");
                Ok(value)
            }
            Err(err) => {
                match self.tx.rollback().await {
                    Ok(()) => debug!(event = "transaction_rolled_back", cause = %err),
                    Err(rb) => warn!(
                        event = "transaction_rollback_failed",
                        cause = %err,
                        error = %rb,
                    ),
                }
                Err(err)
            }
        }
    }
}

//! Bounded connection pool over a libsql [`Database`].
//!
//! Checkout waits on a semaphore so at most `max_connections` connections are
//! in use at once. Connections go back to the idle list when the
//! [`PooledConnection`] guard is dropped.

use crate::db::DbResultExt;
use crate::types::{AppError, Result};
use libsql::{Connection, Database};
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// How many milliseconds a local connection waits on a locked database file.
const BUSY_TIMEOUT_MS: u32 = 5_000;

enum Backend {
    /// A single connection handed out to every checkout. In-memory databases
    /// live exactly as long as their connection, so they cannot open more.
    Shared {
        _db: Database,
        conn: Connection,
    },
    /// A database file on local disk.
    Local(Database),
    /// A remote libsql server.
    #[cfg(feature = "turso")]
    Remote(Database),
}

pub struct ConnectionPool {
    backend: Backend,
    idle: Arc<Mutex<Vec<Connection>>>,
    permits: Arc<Semaphore>,
    max_connections: usize,
}

impl ConnectionPool {
    /// Pool over one shared connection (used for `:memory:`).
    pub fn shared(db: Database, conn: Connection) -> Self {
        Self::with_backend(Backend::Shared { _db: db, conn }, 1)
    }

    /// Pool over a local database file.
    pub fn local(db: Database, max_connections: usize) -> Self {
        Self::with_backend(Backend::Local(db), max_connections)
    }

    /// Pool over a remote database.
    #[cfg(feature = "turso")]
    pub fn remote(db: Database, max_connections: usize) -> Self {
        Self::with_backend(Backend::Remote(db), max_connections)
    }

    fn with_backend(backend: Backend, max_connections: usize) -> Self {
        let max_connections = max_connections.max(1);
        Self {
            backend,
            idle: Arc::new(Mutex::new(Vec::with_capacity(max_connections))),
            permits: Arc::new(Semaphore::new(max_connections)),
            max_connections,
        }
    }

    /// Checks out a connection, waiting while the pool is exhausted.
    pub async fn get(&self) -> Result<PooledConnection> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| AppError::Database("Connection pool is closed".to_string()))?;

        let conn = match &self.backend {
            Backend::Shared { conn, .. } => conn.clone(),
            _ => {
                let reused = self.idle.lock().pop();
                match reused {
                    Some(conn) => conn,
                    None => self.open().await?,
                }
            }
        };

        Ok(PooledConnection {
            conn,
            idle: Arc::clone(&self.idle),
            shared: matches!(self.backend, Backend::Shared { .. }),
            _permit: permit,
        })
    }

    async fn open(&self) -> Result<Connection> {
        match &self.backend {
            Backend::Shared { conn, .. } => Ok(conn.clone()),
            Backend::Local(db) => {
                let conn = db.connect().db_context("Failed to open connection")?;
                // PRAGMA busy_timeout answers with a row, so it goes through query()
                conn.query(&format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT_MS), ())
                    .await
                    .db_context("Failed to set busy timeout")?;
                Ok(conn)
            }
            #[cfg(feature = "turso")]
            Backend::Remote(db) => db.connect().db_context("Failed to open remote connection"),
        }
    }

    /// Upper bound on simultaneously checked-out connections.
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Number of checkouts that would succeed without waiting.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// A checked-out connection. Dereferences to [`Connection`].
pub struct PooledConnection {
    conn: Connection,
    idle: Arc<Mutex<Vec<Connection>>>,
    shared: bool,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if self.shared {
            return;
        }
        self.idle.lock().push(self.conn.clone());
    }
}

use crate::db::pool::{ConnectionPool, PooledConnection};
use crate::db::DbResultExt;
use crate::types::Result;
use libsql::Builder;
use tracing::{debug, info};

/// Tables created on startup. Existing tables are left untouched.
const SCHEMA: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            email TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'admin'
        )",
    ),
    (
        "home",
        "CREATE TABLE IF NOT EXISTS home (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )",
    ),
    (
        "about",
        "CREATE TABLE IF NOT EXISTS about (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL
        )",
    ),
    (
        "projects",
        "CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            message TEXT NOT NULL DEFAULT '',
            image_url TEXT,
            technologies TEXT,
            github_url TEXT,
            demo_url TEXT
        )",
    ),
    (
        "contact",
        "CREATE TABLE IF NOT EXISTS contact (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            message TEXT NOT NULL
        )",
    ),
];

/// Relational store for portfolio content and accounts.
///
/// Constructed once at startup and shared through `AppState`; every query
/// checks a connection out of the bounded pool.
pub struct PortfolioDb {
    pool: ConnectionPool,
}

impl PortfolioDb {
    /// In-memory database. Contents are lost when the value is dropped.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .db_context("Failed to open in-memory database")?;
        let conn = db.connect().db_context("Failed to get connection")?;

        Self::with_pool(ConnectionPool::shared(db, conn)).await
    }

    /// Database file on local disk. The parent directory is created if needed.
    pub async fn new_local(path: &str, max_connections: usize) -> Result<Self> {
        if path == ":memory:" {
            return Self::new_memory().await;
        }

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    crate::types::AppError::Database(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .db_context("Failed to open local database")?;

        Self::with_pool(ConnectionPool::local(db, max_connections)).await
    }

    /// Remote Turso/libsql database.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String, max_connections: usize) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .db_context("Failed to connect to Turso")?;

        Self::with_pool(ConnectionPool::remote(db, max_connections)).await
    }

    async fn with_pool(pool: ConnectionPool) -> Result<Self> {
        let client = Self { pool };
        client.ping().await?;
        client.initialize_schema().await?;
        Ok(client)
    }

    /// Checks a connection out of the pool.
    pub async fn connection(&self) -> Result<PooledConnection> {
        self.pool.get().await
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Round-trips `SELECT 1`.
    pub async fn ping(&self) -> Result<()> {
        let conn = self.connection().await?;
        let mut rows = conn.query("SELECT 1", ()).await.db_context("Ping failed")?;
        rows.next().await.db_context("Ping failed")?;
        Ok(())
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection().await?;

        for (table, ddl) in SCHEMA {
            conn.execute(ddl, ())
                .await
                .db_context(&format!("Failed to create {} table", table))?;
        }

        // databases created before roles existed lack the column
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = 'role'",
                (),
            )
            .await
            .db_context("Failed to inspect users table")?;
        let has_role = match rows.next().await.db_context("Failed to inspect users table")? {
            Some(row) => row.get::<i64>(0).db_context("Failed to inspect users table")? > 0,
            None => false,
        };
        if !has_role {
            info!("Adding role column to users table");
            conn.execute(
                "ALTER TABLE users ADD COLUMN role TEXT NOT NULL DEFAULT 'admin'",
                (),
            )
            .await
            .db_context("Failed to add role column")?;
        }

        debug!("Database schema ready");
        Ok(())
    }
}

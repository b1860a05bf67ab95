//! Relational store.
//!
//! [`PortfolioDb`] wraps a libsql database (local SQLite file, `:memory:`, or a
//! remote Turso instance with the `turso` feature) behind a bounded
//! [`ConnectionPool`]. The schema is created on startup; every query is a
//! single parameterized statement.

#![allow(missing_docs)]

pub mod accounts;
pub mod client;
pub mod content;
pub mod pool;
pub mod provider;

pub use accounts::AccountRecord;
pub use client::PortfolioDb;
pub use pool::{ConnectionPool, PooledConnection};
pub use provider::DatabaseProvider;

use crate::types::{AppError, Result};

/// Attaches context to libsql errors and lifts them into [`AppError::Database`].
pub(crate) trait DbResultExt<T> {
    fn db_context(self, context: &str) -> Result<T>;
}

impl<T> DbResultExt<T> for std::result::Result<T, libsql::Error> {
    fn db_context(self, context: &str) -> Result<T> {
        self.map_err(|e| AppError::Database(format!("{}: {}", context, e)))
    }
}

/// Whether libsql rejected a write because it would break a `UNIQUE` index.
pub(crate) fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}

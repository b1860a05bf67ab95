//! # Folio
//!
//! Backend for a personal portfolio site: public read access to the home,
//! about and project sections, a contact form that notifies the owner by
//! mail, and a token-protected admin API for editing everything.
//!
//! ## Overview
//!
//! Folio can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `folio-server` binary
//! 2. **As a library** - Build the router with [`api::build_app`] and serve it
//!    yourself, or drive it in tests
//!
//! ## Trust tiers
//!
//! | Prefix | Requirement |
//! |--------|-------------|
//! | `/api/*` | none |
//! | `/api/admin/*` | valid bearer token |
//! | `/api/superadmin/*` | valid bearer token with the `super_admin` role |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Password hashing, JWT and middleware
//! - [`db`] - Relational store (SQLite, Turso)
//! - [`mail`] - Outbound mail
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
#[allow(missing_docs)]
pub mod api;
/// Password hashing, JWT and middleware.
#[allow(missing_docs)]
pub mod auth;
/// CLI parsing and terminal output.
#[allow(missing_docs)]
pub mod cli;
/// Relational store.
pub mod db;
/// Outbound mail.
#[allow(missing_docs)]
pub mod mail;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration (TOML).
#[allow(missing_docs)]
pub mod utils;

pub use api::build_app;
pub use auth::AuthService;
pub use db::PortfolioDb;
pub use mail::Mailer;
pub use types::{AppError, Result};
pub use utils::toml_config::FolioConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Infrastructure configuration, read once at startup
    pub config: Arc<FolioConfig>,
    /// Database client
    pub db: Arc<PortfolioDb>,
    /// Authentication service
    pub auth_service: Arc<AuthService>,
    /// Outbound mail
    pub mailer: Arc<dyn Mailer>,
}

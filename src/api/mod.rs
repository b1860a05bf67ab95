//! HTTP API Handlers and Routes
//!
//! # API Endpoints
//!
//! ## Public
//! - `GET /health` - Liveness and database ping
//! - `GET /api/home`, `GET /api/about`, `GET /api/projects` - Site content
//! - `POST /api/contact` - Contact form (notifies the owner by mail)
//! - `POST /api/login` - Exchange credentials for a bearer token
//! - `GET /api/openapi.json` - OpenAPI document
//!
//! ## Admin (`/api/admin`, any valid token)
//! - `contact`, `home`, `about`, `projects` - List, create, update, delete
//!
//! ## Super admin (`/api/superadmin`, `super_admin` role)
//! - `users` - Account management
//!
//! # Authentication
//!
//! Admin and super admin endpoints require a valid JWT in the
//! `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```

/// JSON body and path extractors with JSON rejections.
pub mod extract;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI document.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;

pub use routes::{build_app, create_router};

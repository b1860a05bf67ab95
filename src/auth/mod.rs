//! Password hashing, JWT issuance/validation and Axum middleware
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id hashing and verification
//! - [`auth::jwt`](crate::auth::jwt) - HS256 token issuance and validation
//! - [`auth::middleware`](crate::auth::middleware) - bearer-token middleware, super-admin gate
//!   and the [`CurrentUser`](crate::auth::middleware::CurrentUser) extractor
//!
//! # Trust tiers
//!
//! Public routes carry no layer. Admin routes are wrapped in
//! [`auth_middleware`](crate::auth::middleware::auth_middleware), which answers
//! 401 for a missing, non-`Bearer`, invalid or expired token. Super-admin routes
//! additionally pass through
//! [`require_super_admin`](crate::auth::middleware::require_super_admin), which
//! answers 403 unless the token's role is `super_admin`.
//!
//! ```ignore
//! use axum::middleware;
//! use folio::auth::middleware::{auth_middleware, require_super_admin};
//!
//! let users = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(middleware::from_fn(require_super_admin))
//!     .layer(middleware::from_fn_with_state(auth_service, auth_middleware));
//! ```
//!
//! # Tokens
//!
//! Tokens carry `user_id`, `username`, `role`, `iat` and `exp`
//! (`iat + auth.token_ttl_hours`). There is no revocation list; a token is
//! accepted until it expires.

/// HS256 token issuance and validation.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Argon2id password hashing.
pub mod password;

pub use jwt::{AuthError, AuthService};
pub use middleware::CurrentUser;

//! API request handlers.
//!
//! One module per resource. Handlers validate input, run a single store
//! operation and map the result onto a status code.

/// About section CRUD.
pub mod about;
/// Login.
pub mod auth;
/// Contact form submission and admin CRUD.
pub mod contact;
/// Health check.
pub mod health;
/// Home section CRUD.
pub mod home;
/// Project CRUD.
pub mod projects;
/// Account management (super admin).
pub mod users;

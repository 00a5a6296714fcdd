//! mcontrol API service.
//!
//! Serves the machine-monitoring dashboard's single shared state document
//! over a small REST API.
//!
//! # Configuration
//!
//! See [`config::McontrolApiConfig`]. Always set `JWT_SECRET` and
//! `ADMIN_PASSWORD_HASH` outside of local development.
//!
//! # Authentication
//!
//! One shared password, exchanged for a 24 hour bearer token. See
//! [`auth`] for details.

pub mod auth;
pub mod config;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;

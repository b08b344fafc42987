//! HTTP layer for the Wafflemarket backend.
//!
//! Exposes the REST API on top of the core services: phone verification,
//! signup, Google sign-in, session management and profile endpoints.

pub mod app;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;

//! Domain entities.

pub mod auth_request;
pub mod token;
pub mod user;

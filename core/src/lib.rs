//! Core business logic and domain layer for the Wafflemarket backend.
//!
//! This crate holds the domain entities, repository traits, and services for
//! phone-verification sign-in, Google sign-in, token issuance, and account
//! management. Infrastructure concerns (database, SMS, outbound HTTP) live in
//! `wm_infra` behind the traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

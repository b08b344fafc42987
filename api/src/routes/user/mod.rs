//! User profile and account route handlers

pub mod leave;
pub mod profile;

//! Shared utilities and common types for the Wafflemarket server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Utility functions (phone validation, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, GoogleConfig, JwtConfig, ServerConfig, VerificationConfig};
pub use types::ErrorResponse;
pub use utils::phone;

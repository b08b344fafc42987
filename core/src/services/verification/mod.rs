//! Verification service module for SMS-based authentication
//!
//! Provides the verification code workflow: code generation, SMS dispatch,
//! resend cooldown, and code verification with attempt tracking.

mod service;
mod traits;

pub use service::VerificationService;
pub use traits::SmsSender;

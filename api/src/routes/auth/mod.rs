//! Authentication route handlers
//!
//! - Phone verification (requesting and verifying codes)
//! - Signup with a verified phone number
//! - Google sign-in
//! - Token refresh and logout

pub mod google;
pub mod logout;
pub mod phone;
pub mod refresh;
pub mod signup;

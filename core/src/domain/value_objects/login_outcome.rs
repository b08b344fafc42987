//! Value objects describing the result of a successful phone verification.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Session data returned to a client that has logged in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSession {
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// True when this is the account's first login ever
    pub first_login: bool,
    pub tokens: TokenPair,
}

impl LoginSession {
    /// Builds a session from a user snapshot taken before the login
    /// timestamp was touched, so `first_login` reflects the pre-login state.
    pub fn new(user: &User, first_login: bool, tokens: TokenPair) -> Self {
        Self {
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            first_login,
            tokens,
        }
    }
}

/// Outcome of verifying a phone code: either the phone maps to an
/// existing account and the client is logged in, or the client must
/// complete signup first.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    LoggedIn(LoginSession),
    NeedsSignup { phone_number: String },
}

impl LoginOutcome {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, LoginOutcome::LoggedIn(_))
    }
}

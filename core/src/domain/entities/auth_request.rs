//! Authentication request entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default maximum number of verification attempts allowed
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Outcome of checking a submitted code against an auth request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The code has passed its expiry timestamp
    Expired,
    /// The code was already consumed by a successful verification
    AlreadyConsumed,
    /// Too many failed attempts were made against this code
    AttemptsExhausted,
    /// The submitted code does not match
    Mismatch { remaining_attempts: i32 },
}

/// A pending phone verification: one SMS code sent to one phone number.
///
/// A phone number has at most one active unconsumed request at a time;
/// the repository enforces this by replacing any previous row on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Unique identifier for the request
    pub id: Uuid,

    /// Phone number the code was sent to (E.164 format)
    pub phone_number: String,

    /// The 6-digit verification code
    pub auth_number: String,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Maximum number of attempts this code allows
    pub max_attempts: i32,

    /// Timestamp when the request was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub consumed: bool,
}

impl AuthRequest {
    /// Creates a new auth request with a random 6-digit code
    pub fn new(phone_number: String) -> Self {
        Self::new_with_policy(phone_number, DEFAULT_EXPIRATION_MINUTES, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a new auth request with a custom expiration and attempt limit
    pub fn new_with_policy(
        phone_number: String,
        expiration_minutes: i64,
        max_attempts: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone_number,
            auth_number: Self::generate_code(),
            attempts: 0,
            max_attempts,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            consumed: false,
        }
    }

    /// Generates a random 6-digit code
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the request can still be verified against
    pub fn is_active(&self) -> bool {
        !self.is_expired() && !self.consumed && self.attempts < self.max_attempts
    }

    /// Verifies a submitted code against this request.
    ///
    /// A mismatch charges one attempt; a match consumes the code so it
    /// cannot be replayed. Expired and already-consumed requests are
    /// rejected without charging an attempt.
    pub fn verify(&mut self, input: &str) -> Result<(), VerifyError> {
        if self.is_expired() {
            return Err(VerifyError::Expired);
        }
        if self.consumed {
            return Err(VerifyError::AlreadyConsumed);
        }
        if self.attempts >= self.max_attempts {
            return Err(VerifyError::AttemptsExhausted);
        }

        self.attempts += 1;

        if self.auth_number == input {
            self.consumed = true;
            Ok(())
        } else if self.attempts >= self.max_attempts {
            Err(VerifyError::AttemptsExhausted)
        } else {
            Err(VerifyError::Mismatch {
                remaining_attempts: self.max_attempts - self.attempts,
            })
        }
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (self.max_attempts - self.attempts).max(0)
    }

    /// Seconds until another code may be requested for this phone number,
    /// given a resend cooldown measured from creation. Zero when elapsed.
    pub fn resend_available_in(&self, cooldown_seconds: i64) -> i64 {
        let resend_at = self.created_at + Duration::seconds(cooldown_seconds);
        (resend_at - Utc::now()).num_seconds().max(0)
    }
}

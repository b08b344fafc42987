//! Console SMS sender for development and testing.
//!
//! Writes the verification code to the application log instead of
//! dispatching a real SMS. A production deployment swaps this for a
//! provider-backed implementation of the same trait.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;
use wm_shared::utils::phone::mask_phone_number;

use wm_core::errors::DomainError;
use wm_core::services::verification::SmsSender;

/// SMS sender that logs codes instead of sending them
pub struct ConsoleSmsSender {
    counter: AtomicU64,
}

impl ConsoleSmsSender {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Number of messages "sent" so far
    pub fn sent_count(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for ConsoleSmsSender {
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, DomainError> {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("console-{}", seq);

        info!(
            phone = %mask_phone_number(phone_number),
            code,
            message_id = %message_id,
            "verification SMS (console delivery)"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_returns_sequential_message_ids() {
        let sender = ConsoleSmsSender::new();

        let first = sender
            .send_verification_code("01012345678", "123456")
            .await
            .unwrap();
        let second = sender
            .send_verification_code("01012345678", "654321")
            .await
            .unwrap();

        assert_eq!(first, "console-1");
        assert_eq!(second, "console-2");
        assert_eq!(sender.sent_count(), 2);
    }
}

//! Stands in for the out-of-scope messaging-platform client — real
//! authentication against a messaging platform is handled elsewhere. The
//! dispatcher in `salon-core::notify` already renders the user-visible
//! text; this `Notifier` only needs to get it out the door.

use async_trait::async_trait;
use salon_core::{NotifyError, Notifier};

/// Records every send via `tracing` instead of calling a real transport.
/// A production deployment swaps this for a Telegram/WhatsApp/SMS client
/// implementing the same trait — the dispatcher boundary doesn't change.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send(&self, recipient_external_id: &str, locale: &str, rendered_text: &str) -> Result<(), NotifyError> {
        tracing::info!(recipient = recipient_external_id, locale, message = rendered_text, "notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn logging_notifier_never_fails() {
        let notifier = LoggingNotifier::new();
        assert!(notifier.send("123", "en", "hello").await.is_ok());
    }
}

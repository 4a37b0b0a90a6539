//! The external payment collaborator — the payment provider itself is
//! treated as an opaque side-effect: "create invoice", "payment
//! succeeded". A narrow trait the lifecycle orchestrator calls through,
//! concrete implementations living in `salon-integrations`.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// One pending invoice created for a booking awaiting online payment.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub invoice_url: String,
    pub provider: String,
    pub external_payment_id: String,
}

#[async_trait]
pub trait PaymentCollaborator: Send + Sync {
    /// Creates an invoice for `final_price_cents` in `currency`, returning
    /// the URL the client completes payment at.
    async fn create_invoice(
        &self,
        booking_id: i64,
        final_price_cents: i64,
        currency: &str,
    ) -> Result<Invoice, PaymentError>;
}

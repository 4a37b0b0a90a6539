//! The payment provider itself is treated as an opaque side-effect —
//! "create invoice", "payment succeeded". This
//! workspace has no concrete provider to integrate against, so
//! `HttpPaymentCollaborator` speaks a small, provider-agnostic HTTP
//! contract — `POST {base_url}/invoices` — wrapping it behind a thin
//! client struct holding a `reqwest` client and a secret key.

use async_trait::async_trait;
use salon_core::{Invoice, PaymentCollaborator, PaymentError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CreateInvoiceRequest<'a> {
    booking_id: i64,
    amount_cents: i64,
    currency: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateInvoiceResponseBody {
    invoice_url: String,
    payment_id: String,
}

/// A thin client over a configured payment endpoint, authenticated with a
/// bearer secret key — the core only ever sees the resulting `invoice_url`.
#[derive(Clone)]
pub struct HttpPaymentCollaborator {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
    provider_name: String,
}

impl HttpPaymentCollaborator {
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>, provider_name: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            secret_key: secret_key.into(),
            provider_name: provider_name.into(),
        }
    }
}

#[async_trait]
impl PaymentCollaborator for HttpPaymentCollaborator {
    async fn create_invoice(
        &self,
        booking_id: i64,
        final_price_cents: i64,
        currency: &str,
    ) -> Result<Invoice, PaymentError> {
        let url = format!("{}/invoices", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&CreateInvoiceRequest { booking_id, amount_cents: final_price_cents, currency })
            .send()
            .await
            .map_err(|e| PaymentError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Unavailable(format!("payment provider returned {}", response.status())));
        }

        let body: CreateInvoiceResponseBody = response
            .json()
            .await
            .map_err(|e| PaymentError::Unavailable(e.to_string()))?;

        Ok(Invoice {
            invoice_url: body.invoice_url,
            provider: self.provider_name.clone(),
            external_payment_id: body.payment_id,
        })
    }
}

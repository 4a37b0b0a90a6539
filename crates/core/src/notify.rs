//! Notification dispatcher: the only place in this
//! workspace that renders user-visible booking text. Delivery itself is
//! delegated to a [`Notifier`] implementation supplied by
//! `salon-integrations`, keeping the external collaborator behind a
//! narrow trait.

use async_trait::async_trait;
use salon_db::models::Booking;
use salon_db::queries::bookings as booking_queries;
use salon_db::queries::{masters, users};
use salon_types::NotificationEvent;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Transport(String),
}

/// One outbound message; `locale` is a best-effort hint, defaulting to the
/// process-wide `default_language` when a recipient has none on file.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient_external_id: &str, locale: &str, rendered_text: &str) -> Result<(), NotifyError>;
}

/// Renders the fixed per-event template. Kept deliberately plain (no i18n
/// catalog) — a real deployment would swap this for locale lookups, but
/// the dispatcher boundary (`notify`) is what matters for this workspace.
fn render(event: NotificationEvent, booking: &Booking, service_names: &[String]) -> String {
    let services = if service_names.is_empty() {
        "your appointment".to_string()
    } else {
        service_names.join(", ")
    };
    let when = booking.starts_at.format("%Y-%m-%d %H:%M UTC");
    match event {
        NotificationEvent::Reserved => format!("Hold placed for {services} at {when}."),
        NotificationEvent::Confirmed => format!("Booking confirmed for {services} at {when}."),
        NotificationEvent::Paid => format!("Payment received for {services} at {when}."),
        NotificationEvent::CashConfirmed => format!("Cash booking confirmed for {services} at {when}."),
        NotificationEvent::Cancelled => format!("Booking for {services} at {when} was cancelled."),
        NotificationEvent::RescheduledByClient => format!("Booking for {services} moved to {when} by the client."),
        NotificationEvent::RescheduledByMaster => format!("Booking for {services} moved to {when} by the master."),
        NotificationEvent::NoShow => format!("Booking for {services} at {when} was marked a no-show."),
        NotificationEvent::Reminder => format!("Reminder: {services} at {when}."),
    }
}

/// Recipients for a booking event are the client, the assigned master, and
/// every boot-time admin; [`notify`] deduplicates.
pub async fn recipients_for_booking(pool: &PgPool, admin_external_ids: &[String], user_id: i64, master_id: i64) -> Vec<String> {
    let mut recipients: Vec<String> = admin_external_ids.to_vec();
    if let Ok(Some(user)) = users::find_by_id(pool, user_id).await {
        recipients.push(user.external_id);
    }
    if let Ok(Some(master)) = masters::find_by_id(pool, master_id).await {
        if let Some(ext) = master.external_id {
            recipients.push(ext);
        }
    }
    recipients
}

/// Fetches the booking snapshot once, renders per recipient, deduplicates,
/// and best-effort sends — a send failure is logged but never propagated
/// to the caller.
pub async fn notify(
    pool: &PgPool,
    notifier: &Arc<dyn Notifier>,
    event: NotificationEvent,
    booking_id: i64,
    recipients: &[String],
) {
    let booking = match booking_queries::get(pool, booking_id).await {
        Ok(Some(b)) => b,
        Ok(None) => {
            tracing::warn!(booking_id, "notify: booking not found, skipping");
            return;
        }
        Err(err) => {
            tracing::warn!(booking_id, error = %err, "notify: failed to load booking snapshot");
            return;
        }
    };
    let service_names = booking_queries::get_booking_service_names(pool, booking_id)
        .await
        .unwrap_or_default();
    let text = render(event, &booking, &service_names);

    let mut seen = HashSet::new();
    for recipient in recipients {
        if !seen.insert(recipient.clone()) {
            continue;
        }
        if let Err(err) = notifier.send(recipient, "en", &text).await {
            tracing::warn!(booking_id, recipient, error = %err, "notify: send failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use salon_types::BookingStatus;

    fn booking() -> Booking {
        Booking {
            id: 1,
            user_id: 1,
            master_id: 1,
            status: BookingStatus::Confirmed,
            starts_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            ends_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()),
            original_price_cents: 1000,
            final_price_cents: 1000,
            discount_applied: None,
            cash_hold_expires_at: None,
            paid_at: None,
            payment_provider: None,
            payment_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 2, 28, 9, 0, 0).unwrap(),
            last_reminder_sent_at: None,
            last_reminder_lead_minutes: None,
        }
    }

    #[test]
    fn renders_service_names_when_present() {
        let text = render(NotificationEvent::Confirmed, &booking(), &["Haircut".to_string()]);
        assert!(text.contains("Haircut"));
        assert!(text.contains("2025-03-01 09:00"));
    }

    #[test]
    fn falls_back_to_generic_phrase_with_no_service_names() {
        let text = render(NotificationEvent::Reminder, &booking(), &[]);
        assert!(text.contains("your appointment"));
    }
}

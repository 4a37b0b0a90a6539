//! Reminder worker: sends one-time visit reminders within
//! a configured lead window, marking `last_reminder_sent_at` /
//! `last_reminder_lead_minutes` only on a successful send — a failed send
//! leaves the flag untouched so the next tick retries.

use crate::worker::WorkerHandle;
use salon_core::settings::SharedStore;
use salon_core::{notify, CoreConfig, Notifier};
use salon_db::queries::bookings;
use salon_types::settings::keys;
use salon_types::NotificationEvent;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub fn start(pool: PgPool, settings: SharedStore, notifier: Arc<dyn Notifier>, config: CoreConfig) -> WorkerHandle {
    WorkerHandle::start("reminder", move |cancel: Arc<Notify>| async move {
        WorkerHandle::wait_for_start_or_cancel(&cancel).await;
        loop {
            let lead_minutes = settings.get_int(keys::REMINDER_LEAD_MINUTES).await;
            let now = chrono::Utc::now();
            match bookings::list_due_for_reminder(&pool, now, lead_minutes).await {
                Ok(due) => {
                    for booking in due {
                        let recipients =
                            notify::recipients_for_booking(&pool, &config.admin_external_ids, booking.user_id, booking.master_id).await;
                        notify::notify(&pool, &notifier, NotificationEvent::Reminder, booking.id, &recipients).await;
                        if let Err(err) = bookings::mark_reminder_sent(&pool, booking.id, lead_minutes as i32, now).await {
                            tracing::warn!(booking_id = booking.id, error = %err, "failed to record reminder send, will retry");
                        }
                    }
                }
                Err(err) => tracing::warn!(error = %err, "reminder worker tick failed"),
            }

            let cadence = settings.get_int(keys::REMINDERS_CHECK_SECONDS).await.max(1) as u64;
            tokio::select! {
                _ = cancel.notified() => break,
                _ = tokio::time::sleep(Duration::from_secs(cadence)) => {}
            }
        }
        tracing::info!("reminder worker stopped");
    })
}

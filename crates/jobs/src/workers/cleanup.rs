//! Cleanup worker: transitions past-start active bookings
//! to NO_SHOW after a grace period, notifying client + master + admins for
//! each one.

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
    WorkerHandle::start("cleanup", move |cancel: Arc<Notify>| async move {
        WorkerHandle::wait_for_start_or_cancel(&cancel).await;
        loop {
            let grace_hours = settings.get_int(keys::NO_SHOW_GRACE_HOURS).await;
            match bookings::mark_noshow_past(&pool, chrono::Utc::now(), grace_hours).await {
                Ok(ids) => {
                    for booking_id in ids {
                        let Ok(Some(booking)) = bookings::get(&pool, booking_id).await else {
                            continue;
                        };
                        let recipients =
                            notify::recipients_for_booking(&pool, &config.admin_external_ids, booking.user_id, booking.master_id).await;
                        notify::notify(&pool, &notifier, NotificationEvent::NoShow, booking_id, &recipients).await;
                    }
                }
                Err(err) => tracing::warn!(error = %err, "cleanup worker tick failed"),
            }

            let cadence = settings.get_int(keys::CLEANUP_CHECK_SECONDS).await.max(1) as u64;
            tokio::select! {
                _ = cancel.notified() => break,
                _ = tokio::time::sleep(Duration::from_secs(cadence)) => {}
            }
        }
        tracing::info!("cleanup worker stopped");
    })
}

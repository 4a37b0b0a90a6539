//! Expiration worker: periodically transitions overdue
//! RESERVED/PENDING_PAYMENT holds to EXPIRED. Silent — no notification is
//! sent for an expired hold.

use crate::worker::WorkerHandle;
use salon_core::settings::SharedStore;
use salon_db::queries::bookings;
use salon_types::settings::keys;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub fn start(pool: PgPool, settings: SharedStore) -> WorkerHandle {
    WorkerHandle::start("expiration", move |cancel: Arc<Notify>| async move {
        WorkerHandle::wait_for_start_or_cancel(&cancel).await;
        loop {
            let hold_minutes = settings.get_int(keys::RESERVATION_HOLD_MINUTES).await;
            match bookings::expire_overdue(&pool, chrono::Utc::now(), hold_minutes).await {
                Ok(count) if count > 0 => tracing::info!(count, "expired overdue holds"),
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "expiration worker tick failed"),
            }

            let cadence = settings.get_int(keys::RESERVATION_EXPIRE_CHECK_SECONDS).await.max(1) as u64;
            tokio::select! {
                _ = cancel.notified() => break,
                _ = tokio::time::sleep(Duration::from_secs(cadence)) => {}
            }
        }
        tracing::info!("expiration worker stopped");
    })
}

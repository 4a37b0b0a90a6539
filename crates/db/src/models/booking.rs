use chrono::{DateTime, Utc};
use salon_types::BookingStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The reservation itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub master_id: i64,
    pub status: BookingStatus,
    pub starts_at: DateTime<Utc>,
    /// Legacy rows may have no `ends_at`; such rows
    /// never block the exclusion constraint or slot calculation.
    pub ends_at: Option<DateTime<Utc>>,
    pub original_price_cents: i64,
    pub final_price_cents: i64,
    pub discount_applied: Option<String>,
    pub cash_hold_expires_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_provider: Option<String>,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_reminder_sent_at: Option<DateTime<Utc>>,
    pub last_reminder_lead_minutes: Option<i32>,
}

/// An ordered line item of a booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingItem {
    pub booking_id: i64,
    pub service_id: String,
    pub position: i32,
    pub price_cents_snapshot: i64,
}

/// One row per status transition, appended in the same transaction as the
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingStatusHistoryRow {
    pub booking_id: i64,
    pub old_status: Option<BookingStatus>,
    pub new_status: BookingStatus,
    pub changed_at: DateTime<Utc>,
}

/// Exactly one per DONE booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingRating {
    pub booking_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
}

/// A single free-text note a master keeps on a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MasterClientNote {
    pub master_id: i64,
    pub user_id: i64,
    pub note: String,
}

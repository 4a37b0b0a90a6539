//! The booking repository: every atomic mutation of a booking
//! goes through one of these functions, each its own serializable
//! transaction. The DB exclusion constraint
//! (`bookings_no_overlap`, migration 0001) is the actual guarantee that no
//! two active bookings on the same master ever overlap — these functions
//! only need to translate a constraint violation into
//! [`BookingRepoError::Conflict`].

use crate::errors::{classify, BookingRepoError};
use crate::models::{Booking, BookingItem};
use chrono::{DateTime, Duration, Utc};
use salon_types::{BookingListMode, BookingStatus};
use sqlx::{PgPool, Postgres, Transaction};

const BOOKING_COLUMNS: &str = "id, user_id, master_id, status, starts_at, ends_at, \
    original_price_cents, final_price_cents, discount_applied, cash_hold_expires_at, \
    paid_at, payment_provider, payment_id, created_at, last_reminder_sent_at, \
    last_reminder_lead_minutes";

pub struct NewBookingItem {
    pub service_id: String,
    pub price_cents_snapshot: i64,
}

async fn append_history(
    tx: &mut Transaction<'_, Postgres>,
    booking_id: i64,
    old_status: Option<BookingStatus>,
    new_status: BookingStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO booking_status_history (booking_id, old_status, new_status) \
         VALUES ($1, $2, $3)",
    )
    .bind(booking_id)
    .bind(old_status)
    .bind(new_status)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn fetch_for_update(
    tx: &mut Transaction<'_, Postgres>,
    booking_id: i64,
) -> Result<Booking, BookingRepoError> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(classify)?
        .ok_or(BookingRepoError::NotFound(booking_id))
}

/// Inserts a RESERVED booking plus its line items and a creation history
/// row in one transaction. A constraint
/// violation on insert surfaces as [`BookingRepoError::Conflict`].
#[allow(clippy::too_many_arguments)]
pub async fn create_hold(
    pool: &PgPool,
    user_id: i64,
    master_id: i64,
    items: &[NewBookingItem],
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    hold_minutes: i64,
    original_price_cents: i64,
    final_price_cents: i64,
    discount_applied: Option<&str>,
) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let hold_deadline = Utc::now() + Duration::minutes(hold_minutes);

    let sql = format!(
        "INSERT INTO bookings (user_id, master_id, status, starts_at, ends_at, \
         original_price_cents, final_price_cents, discount_applied, cash_hold_expires_at) \
         VALUES ($1, $2, 'reserved', $3, $4, $5, $6, $7, $8) \
         RETURNING {BOOKING_COLUMNS}"
    );
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(user_id)
        .bind(master_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(original_price_cents)
        .bind(final_price_cents)
        .bind(discount_applied)
        .bind(hold_deadline)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;

    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO booking_items (booking_id, service_id, position, price_cents_snapshot) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(booking.id)
        .bind(&item.service_id)
        .bind(position as i32)
        .bind(item.price_cents_snapshot)
        .execute(&mut *tx)
        .await
        .map_err(classify)?;
    }

    append_history(&mut tx, booking.id, None, BookingStatus::Reserved)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(booking)
}

/// RESERVED/PENDING_PAYMENT → CONFIRMED, clearing the hold deadline. The
/// exclusion constraint is re-checked by Postgres on this very UPDATE,
/// which is how a concurrently-confirmed overlapping hold is caught
/// (other holds could have been confirmed concurrently).
pub async fn confirm_cash(pool: &PgPool, booking_id: i64) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let current = fetch_for_update(&mut tx, booking_id).await?;
    if !matches!(current.status, BookingStatus::Reserved | BookingStatus::PendingPayment) {
        return Err(BookingRepoError::InvalidState(booking_id));
    }
    let sql = format!(
        "UPDATE bookings SET status = 'confirmed', cash_hold_expires_at = NULL \
         WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
    append_history(&mut tx, booking_id, Some(current.status), BookingStatus::Confirmed)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(updated)
}

/// Any of {RESERVED, PENDING_PAYMENT, CONFIRMED} → PAID.
pub async fn mark_paid(
    pool: &PgPool,
    booking_id: i64,
    payment_provider: &str,
    payment_id: &str,
) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let current = fetch_for_update(&mut tx, booking_id).await?;
    if !matches!(
        current.status,
        BookingStatus::Reserved | BookingStatus::PendingPayment | BookingStatus::Confirmed
    ) {
        return Err(BookingRepoError::InvalidState(booking_id));
    }
    let sql = format!(
        "UPDATE bookings SET status = 'paid', cash_hold_expires_at = NULL, paid_at = now(), \
         payment_provider = $2, payment_id = $3 WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .bind(payment_provider)
        .bind(payment_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
    append_history(&mut tx, booking_id, Some(current.status), BookingStatus::Paid)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(updated)
}

/// RESERVED → PENDING_PAYMENT; the hold deadline is preserved unchanged.
pub async fn set_pending_payment(pool: &PgPool, booking_id: i64) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let current = fetch_for_update(&mut tx, booking_id).await?;
    if current.status != BookingStatus::Reserved {
        return Err(BookingRepoError::InvalidState(booking_id));
    }
    let sql = format!(
        "UPDATE bookings SET status = 'pending_payment' WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
    append_history(&mut tx, booking_id, Some(current.status), BookingStatus::PendingPayment)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(updated)
}

/// Moves a non-terminal booking to a new start time, recomputing `ends_at`
/// from the caller-resolved duration (legacy rows without a prior `ends_at`
/// are simply given a fresh one here). Does not change status or append
/// history — rescheduling never changes a booking's status on its own.
pub async fn reschedule(
    pool: &PgPool,
    booking_id: i64,
    new_starts_at: DateTime<Utc>,
    duration_minutes: i64,
) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let current = fetch_for_update(&mut tx, booking_id).await?;
    if current.status.is_terminal() {
        return Err(BookingRepoError::InvalidState(booking_id));
    }
    let new_ends_at = new_starts_at + Duration::minutes(duration_minutes);
    let sql = format!(
        "UPDATE bookings SET starts_at = $2, ends_at = $3 WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .bind(new_starts_at)
        .bind(new_ends_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(updated)
}

/// Any non-terminal booking → CANCELLED.
pub async fn set_cancelled(pool: &PgPool, booking_id: i64) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let current = fetch_for_update(&mut tx, booking_id).await?;
    if current.status.is_terminal() {
        return Err(BookingRepoError::InvalidState(booking_id));
    }
    let sql = format!(
        "UPDATE bookings SET status = 'cancelled', cash_hold_expires_at = NULL \
         WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
    append_history(&mut tx, booking_id, Some(current.status), BookingStatus::Cancelled)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(updated)
}

/// Whether `(from, to)` is one of the legal status transitions —
/// the general-purpose guard behind [`update_status`]. The
/// operation-specific functions above (`confirm_cash`, `mark_paid`, ...)
/// encode their own narrower `from` sets directly; this mirrors the same
/// table for transitions with no dedicated function (`mark_done`,
/// `mark_no_show`).
fn is_legal_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Reserved, PendingPayment)
            | (Reserved, Confirmed)
            | (Reserved, Paid)
            | (Reserved, Cancelled)
            | (Reserved, Expired)
            | (PendingPayment, Paid)
            | (PendingPayment, Cancelled)
            | (PendingPayment, Expired)
            | (Confirmed, Paid)
            | (Confirmed, Done)
            | (Confirmed, NoShow)
            | (Confirmed, Cancelled)
            | (Paid, Done)
            | (Paid, NoShow)
            | (Paid, Cancelled)
    )
}

/// General status transition, validated against the same table as
/// [`is_legal_transition`].
pub async fn update_status(
    pool: &PgPool,
    booking_id: i64,
    new_status: BookingStatus,
) -> Result<Booking, BookingRepoError> {
    let mut tx = pool.begin().await.map_err(classify)?;
    let current = fetch_for_update(&mut tx, booking_id).await?;
    if !is_legal_transition(current.status, new_status) {
        return Err(BookingRepoError::InvalidState(booking_id));
    }
    let clears_hold = new_status != BookingStatus::PendingPayment;
    let sets_paid_at = new_status == BookingStatus::Paid;
    let sql = format!(
        "UPDATE bookings SET status = $2, \
         cash_hold_expires_at = CASE WHEN $3 THEN NULL ELSE cash_hold_expires_at END, \
         paid_at = CASE WHEN $4 THEN now() ELSE paid_at END \
         WHERE id = $1 RETURNING {BOOKING_COLUMNS}"
    );
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking_id)
        .bind(new_status)
        .bind(clears_hold)
        .bind(sets_paid_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify)?;
    append_history(&mut tx, booking_id, Some(current.status), new_status)
        .await
        .map_err(classify)?;
    tx.commit().await.map_err(classify)?;
    Ok(updated)
}

/// Expires overdue RESERVED/PENDING_PAYMENT holds. Candidates are grouped by
/// `(master_id, starts_at)` and an advisory lock is taken per group before
/// the update, so a concurrent `create_hold` for the same pair either wins
/// (the group is re-read empty) or loses (the worker observes and expires
/// it).
pub async fn expire_overdue(
    pool: &PgPool,
    now: DateTime<Utc>,
    hold_minutes: i64,
) -> Result<usize, BookingRepoError> {
    let pairs: Vec<(i64, DateTime<Utc>)> = sqlx::query_as(
        "SELECT DISTINCT master_id, starts_at FROM bookings \
         WHERE status IN ('reserved', 'pending_payment') \
         AND (cash_hold_expires_at <= $1 \
              OR (cash_hold_expires_at IS NULL AND created_at <= $1 - ($2 * interval '1 minute')))",
    )
    .bind(now)
    .bind(hold_minutes as f64)
    .fetch_all(pool)
    .await
    .map_err(classify)?;

    let mut expired_count = 0usize;
    for (master_id, starts_at) in pairs {
        let mut tx = pool.begin().await.map_err(classify)?;
        let lock_key = format!("{master_id}:{starts_at}");
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;

        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM bookings WHERE master_id = $1 AND starts_at = $2 \
             AND status IN ('reserved', 'pending_payment') \
             AND (cash_hold_expires_at <= $3 \
                  OR (cash_hold_expires_at IS NULL AND created_at <= $3 - ($4 * interval '1 minute'))) \
             FOR UPDATE",
        )
        .bind(master_id)
        .bind(starts_at)
        .bind(now)
        .bind(hold_minutes as f64)
        .fetch_all(&mut *tx)
        .await
        .map_err(classify)?;

        for id in ids {
            let current: BookingStatus =
                sqlx::query_scalar("SELECT status FROM bookings WHERE id = $1")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(classify)?;
            sqlx::query("UPDATE bookings SET status = 'expired', cash_hold_expires_at = NULL WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;
            append_history(&mut tx, id, Some(current), BookingStatus::Expired)
                .await
                .map_err(classify)?;
            expired_count += 1;
        }
        tx.commit().await.map_err(classify)?;
    }
    Ok(expired_count)
}

/// Transitions CONFIRMED/PAID bookings whose `starts_at` is far enough in
/// the past to NO_SHOW. Restricted to {CONFIRMED, PAID} rather than every
/// non-terminal status because those are the only legal `-> NoShow`
/// transitions — a RESERVED/PENDING_PAYMENT hold that old will already have been
/// expired by the expiration worker.
pub async fn mark_noshow_past(
    pool: &PgPool,
    now: DateTime<Utc>,
    grace_hours: i64,
) -> Result<Vec<i64>, BookingRepoError> {
    let cutoff = now - Duration::hours(grace_hours);
    let mut tx = pool.begin().await.map_err(classify)?;
    let candidates: Vec<(i64, BookingStatus)> = sqlx::query_as(
        "SELECT id, status FROM bookings WHERE status IN ('confirmed', 'paid') \
         AND starts_at < $1 FOR UPDATE",
    )
    .bind(cutoff)
    .fetch_all(&mut *tx)
    .await
    .map_err(classify)?;

    let mut transitioned = Vec::with_capacity(candidates.len());
    for (id, old_status) in candidates {
        sqlx::query("UPDATE bookings SET status = 'no_show' WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(classify)?;
        append_history(&mut tx, id, Some(old_status), BookingStatus::NoShow)
            .await
            .map_err(classify)?;
        transitioned.push(id);
    }
    tx.commit().await.map_err(classify)?;
    Ok(transitioned)
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<Booking>, sqlx::Error> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1");
    sqlx::query_as::<_, Booking>(&sql).bind(id).fetch_optional(pool).await
}

pub async fn list_items(pool: &PgPool, booking_id: i64) -> Result<Vec<BookingItem>, sqlx::Error> {
    sqlx::query_as::<_, BookingItem>(
        "SELECT booking_id, service_id, position, price_cents_snapshot \
         FROM booking_items WHERE booking_id = $1 ORDER BY position",
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await
}

pub async fn list_active_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Booking>, sqlx::Error> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 \
         AND status NOT IN ('cancelled', 'done', 'no_show', 'expired') ORDER BY starts_at"
    );
    sqlx::query_as::<_, Booking>(&sql).bind(user_id).fetch_all(pool).await
}

pub async fn list_history_by_user(
    pool: &PgPool,
    user_id: i64,
    limit: i64,
) -> Result<Vec<Booking>, sqlx::Error> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 \
         ORDER BY starts_at DESC LIMIT $2"
    );
    sqlx::query_as::<_, Booking>(&sql).bind(user_id).bind(limit).fetch_all(pool).await
}

/// Every booking for a master within `[from, to_exclusive)`, non-terminal
/// only — the single query behind both the slot calculator (one day) and
/// the availability index (one month — one query loads all non-terminal
/// bookings for the month).
pub async fn list_for_range(
    pool: &PgPool,
    master_id: i64,
    from: DateTime<Utc>,
    to_exclusive: DateTime<Utc>,
) -> Result<Vec<Booking>, sqlx::Error> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE master_id = $1 \
         AND starts_at >= $2 AND starts_at < $3 \
         AND status NOT IN ('cancelled', 'done', 'no_show', 'expired') ORDER BY starts_at"
    );
    sqlx::query_as::<_, Booking>(&sql)
        .bind(master_id)
        .bind(from)
        .bind(to_exclusive)
        .fetch_all(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn get_paginated_list(
    pool: &PgPool,
    user_id: Option<i64>,
    master_id: Option<i64>,
    mode: BookingListMode,
    page: i64,
    page_size: i64,
) -> Result<(Vec<Booking>, i64), sqlx::Error> {
    let status_clause = match mode {
        BookingListMode::Upcoming => "status NOT IN ('cancelled', 'done', 'no_show', 'expired')",
        BookingListMode::Completed => "status = 'done'",
        BookingListMode::Cancelled => "status = 'cancelled'",
        BookingListMode::NoShow => "status = 'no_show'",
        BookingListMode::All => "true",
    };
    let page = page.max(1);
    let offset = (page - 1) * page_size;

    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings \
         WHERE ($1::bigint IS NULL OR user_id = $1) \
         AND ($2::bigint IS NULL OR master_id = $2) \
         AND {status_clause} \
         ORDER BY starts_at DESC LIMIT $3 OFFSET $4"
    );
    let items = sqlx::query_as::<_, Booking>(&sql)
        .bind(user_id)
        .bind(master_id)
        .bind(page_size)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let count_sql = format!(
        "SELECT count(*) FROM bookings \
         WHERE ($1::bigint IS NULL OR user_id = $1) \
         AND ($2::bigint IS NULL OR master_id = $2) \
         AND {status_clause}"
    );
    let (total,): (i64,) = sqlx::query_as(&count_sql)
        .bind(user_id)
        .bind(master_id)
        .fetch_one(pool)
        .await?;
    Ok((items, total))
}

/// An active booking for `master_id` overlapping `[starts_at, ends_at)`,
/// excluding `exclude_id` — used by the orchestrator to report a specific
/// conflict rather than a bare constraint-violation code.
pub async fn find_conflicting_booking(
    pool: &PgPool,
    master_id: i64,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Result<Option<Booking>, sqlx::Error> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE master_id = $1 \
         AND status IN ('reserved', 'pending_payment', 'confirmed', 'paid') \
         AND ends_at IS NOT NULL \
         AND tstzrange(starts_at, ends_at) && tstzrange($2, $3) \
         AND ($4::bigint IS NULL OR id <> $4) LIMIT 1"
    );
    sqlx::query_as::<_, Booking>(&sql)
        .bind(master_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(exclude_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_booking_service_names(
    pool: &PgPool,
    booking_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT s.name FROM booking_items bi JOIN services s ON s.id = bi.service_id \
         WHERE bi.booking_id = $1 ORDER BY bi.position",
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await
}

/// CONFIRMED/PAID bookings due a reminder: never reminded, or last
/// reminded at a looser lead than the current one.
pub async fn list_due_for_reminder(
    pool: &PgPool,
    now: DateTime<Utc>,
    lead_minutes: i64,
) -> Result<Vec<Booking>, sqlx::Error> {
    let horizon = now + Duration::minutes(lead_minutes);
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status IN ('confirmed', 'paid') \
         AND starts_at > $1 AND starts_at <= $2 \
         AND (last_reminder_sent_at IS NULL OR last_reminder_lead_minutes > $3) \
         ORDER BY starts_at"
    );
    sqlx::query_as::<_, Booking>(&sql)
        .bind(now)
        .bind(horizon)
        .bind(lead_minutes as i32)
        .fetch_all(pool)
        .await
}

/// Marks a reminder as sent only after the dispatcher has confirmed
/// delivery — a failed send leaves the flag untouched so the next tick retries.
pub async fn mark_reminder_sent(
    pool: &PgPool,
    booking_id: i64,
    lead_minutes: i32,
    sent_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE bookings SET last_reminder_sent_at = $2, last_reminder_lead_minutes = $3 \
         WHERE id = $1",
    )
    .bind(booking_id)
    .bind(sent_at)
    .bind(lead_minutes)
    .execute(pool)
    .await?;
    Ok(())
}

//! The slot calculator: pure arithmetic over already
//! UTC-converted windows and the set of blocking booking ranges. The only
//! place this module touches the database is in [`crate::availability`]
//! and the orchestrator, both of which load the raw rows and hand them
//! here.

use chrono::{DateTime, Duration, Utc};
use salon_db::models::Booking;
use salon_types::BookingStatus;

/// A booking counts as blocking the slot calculator only while its hold
/// is still live; an overdue RESERVED/PENDING_PAYMENT row that the
/// expiration worker hasn't swept yet must not occupy the slot forever
/// still.
pub fn is_blocking(booking: &Booking, now: DateTime<Utc>, hold_minutes: i64) -> bool {
    if booking.ends_at.is_none() {
        // Legacy rows without an end time never block.
        return false;
    }
    match booking.status {
        BookingStatus::Confirmed | BookingStatus::Paid => true,
        BookingStatus::Reserved | BookingStatus::PendingPayment => match booking.cash_hold_expires_at {
            Some(deadline) => deadline > now,
            None => booking.created_at > now - Duration::minutes(hold_minutes),
        },
        _ => false,
    }
}

/// Converts the bookings the caller already loaded for this master/range
/// into `[start, end)` ranges that currently block the slot calculator.
pub fn blocking_ranges(
    bookings: &[Booking],
    now: DateTime<Utc>,
    hold_minutes: i64,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    bookings
        .iter()
        .filter(|b| is_blocking(b, now, hold_minutes))
        .filter_map(|b| b.ends_at.map(|end| (b.starts_at, end)))
        .collect()
}

/// Enumerates candidate start times across the given UTC working windows.
/// `now` together with `same_day_lead_minutes`
/// establishes a single cutoff below which no candidate is offered —
/// this also naturally excludes any already-past start time even when
/// the lead is configured to zero.
pub fn candidate_slots(
    windows_utc: &[(DateTime<Utc>, DateTime<Utc>)],
    blocking: &[(DateTime<Utc>, DateTime<Utc>)],
    duration_minutes: i64,
    now: DateTime<Utc>,
    same_day_lead_minutes: i64,
    is_today: bool,
) -> Vec<DateTime<Utc>> {
    if duration_minutes <= 0 {
        return Vec::new();
    }
    let duration = Duration::minutes(duration_minutes);
    let cutoff = if is_today {
        Some(now + Duration::minutes(same_day_lead_minutes.max(0)))
    } else {
        None
    };

    let mut result = Vec::new();
    for &(w_start, w_end) in windows_utc {
        if w_end <= now {
            continue;
        }
        let mut t = w_start;
        while t + duration <= w_end {
            let slot_end = t + duration;
            let past_cutoff = cutoff.is_some_and(|c| t < c);
            let overlaps = blocking.iter().any(|&(b_s, b_e)| t < b_e && b_s < slot_end);
            if !past_cutoff && !overlaps {
                result.push(t);
            }
            t += duration;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn ninety_minute_service_steps_by_duration() {
        let windows = vec![(dt(9, 0), dt(12, 0))];
        let slots = candidate_slots(&windows, &[], 90, dt(0, 0), 0, false);
        assert_eq!(slots, vec![dt(9, 0), dt(10, 30)]);
    }

    #[test]
    fn existing_booking_splits_window() {
        let windows = vec![(dt(9, 0), dt(12, 0))];
        let blocking = vec![(dt(10, 0), dt(11, 0))];
        let slots = candidate_slots(&windows, &blocking, 60, dt(0, 0), 0, false);
        assert_eq!(slots, vec![dt(9, 0), dt(11, 0)]);
    }

    #[test]
    fn same_day_lead_excludes_near_candidates() {
        let windows = vec![(dt(9, 0), dt(12, 0))];
        let now = dt(10, 15);
        let slots = candidate_slots(&windows, &[], 15, now, 30, true);
        assert!(!slots.contains(&dt(10, 30)));
        assert!(slots.contains(&dt(10, 45)));
    }

    #[test]
    fn non_positive_duration_is_empty() {
        let windows = vec![(dt(9, 0), dt(12, 0))];
        assert!(candidate_slots(&windows, &[], 0, dt(0, 0), 0, false).is_empty());
        assert!(candidate_slots(&windows, &[], -5, dt(0, 0), 0, false).is_empty());
    }

    #[test]
    fn past_windows_are_skipped_entirely() {
        let windows = vec![(dt(9, 0), dt(10, 0))];
        let slots = candidate_slots(&windows, &[], 30, dt(10, 0), 0, false);
        assert!(slots.is_empty());
    }

    #[test]
    fn expired_hold_does_not_block() {
        use salon_db::models::Booking;
        let booking = Booking {
            id: 1,
            user_id: 1,
            master_id: 1,
            status: BookingStatus::Reserved,
            starts_at: dt(10, 0),
            ends_at: Some(dt(11, 0)),
            original_price_cents: 0,
            final_price_cents: 0,
            discount_applied: None,
            cash_hold_expires_at: Some(dt(9, 59)),
            paid_at: None,
            payment_provider: None,
            payment_id: None,
            created_at: dt(9, 0),
            last_reminder_sent_at: None,
            last_reminder_lead_minutes: None,
        };
        assert!(!is_blocking(&booking, dt(10, 0), 10));
    }
}

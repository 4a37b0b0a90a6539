//! Availability index: one DB pass per month, then a
//! plain in-memory simulation of the slot calculator for every day.

use crate::schedule;
use crate::slots;
use crate::time::{iso_weekday, local_date_of, window_to_utc};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use salon_db::models::{Booking, MasterScheduleExceptionRow, MasterScheduleRow, Window};
use std::collections::HashMap;

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid year/month");
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid next month");
    (next_month_first - first).num_days() as u32
}

/// Day numbers (1-based) with at least one candidate slot, computed
/// entirely from data already loaded by the caller — no DB access past
/// this point — must be O(days × windows × bookings_per_day) without
/// additional DB roundtrips per day.
#[allow(clippy::too_many_arguments)]
pub fn available_days(
    year: i32,
    month: u32,
    weekly: &[MasterScheduleRow],
    exceptions: &[MasterScheduleExceptionRow],
    bookings: &[Booking],
    duration_minutes: i64,
    hold_minutes: i64,
    same_day_lead_minutes: i64,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<u32> {
    let total_days = days_in_month(year, month);
    let today_local = local_date_of(now, tz);

    let mut exceptions_by_date: HashMap<NaiveDate, Vec<Window>> = HashMap::new();
    for row in exceptions {
        let entry = exceptions_by_date.entry(row.date).or_default();
        if !row.is_off {
            if let (Some(start), Some(end)) = (row.start_time, row.end_time) {
                if start < end {
                    entry.push(Window { start, end });
                }
            }
        }
    }

    let mut bookings_by_date: HashMap<NaiveDate, Vec<Booking>> = HashMap::new();
    for booking in bookings {
        bookings_by_date
            .entry(local_date_of(booking.starts_at, tz))
            .or_default()
            .push(booking.clone());
    }

    let mut result = Vec::new();
    for day in 1..=total_days {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let weekday = iso_weekday(date);
        let weekly_windows: Vec<Window> = weekly
            .iter()
            .filter(|r| r.weekday == weekday)
            .map(|r| Window { start: r.start_time, end: r.end_time })
            .collect();
        let exception_windows = exceptions_by_date.get(&date).cloned();
        let has_exception_row = exceptions.iter().any(|r| r.date == date);
        let resolved = schedule::resolve_windows(
            weekly_windows,
            if has_exception_row { Some(exception_windows.unwrap_or_default()) } else { None },
        );
        if resolved.is_empty() {
            continue;
        }

        let windows_utc: Vec<_> = resolved.into_iter().map(|w| window_to_utc(date, w, tz)).collect();
        let day_bookings = bookings_by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let blocking = slots::blocking_ranges(day_bookings, now, hold_minutes);
        let is_today = date == today_local;
        let candidates = slots::candidate_slots(
            &windows_utc,
            &blocking,
            duration_minutes,
            now,
            same_day_lead_minutes,
            is_today,
        );
        if !candidates.is_empty() {
            result.push(day);
        }
    }
    result
}

/// Candidate start instants for a single day, consumed by the
/// "available slots" façade operation. `exception` follows the
/// same `None` = no row / `Some` = authoritative convention as
/// [`schedule::resolve_windows`].
#[allow(clippy::too_many_arguments)]
pub fn available_slots(
    date: NaiveDate,
    weekly: &[Window],
    exception: Option<Vec<Window>>,
    bookings: &[Booking],
    duration_minutes: i64,
    hold_minutes: i64,
    same_day_lead_minutes: i64,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let resolved = schedule::resolve_windows(weekly.to_vec(), exception);
    if resolved.is_empty() {
        return Vec::new();
    }
    let windows_utc: Vec<_> = resolved.into_iter().map(|w| window_to_utc(date, w, tz)).collect();
    let blocking = slots::blocking_ranges(bookings, now, hold_minutes);
    let is_today = date == local_date_of(now, tz);
    slots::candidate_slots(&windows_utc, &blocking, duration_minutes, now, same_day_lead_minutes, is_today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn weekly_row(weekday: i16, start: (u32, u32), end: (u32, u32)) -> MasterScheduleRow {
        MasterScheduleRow {
            master_id: 1,
            weekday,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn finds_days_with_weekly_schedule_only() {
        // March 2025: Saturdays are day 1, 8, 15, 22, 29 (weekday index 5).
        let weekly = vec![weekly_row(5, (9, 0), (12, 0))];
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let days = available_days(2025, 3, &weekly, &[], &[], 60, 10, 0, chrono_tz::UTC, now);
        assert_eq!(days, vec![1, 8, 15, 22, 29]);
    }

    #[test]
    fn exception_closes_a_day_that_would_otherwise_be_open() {
        let weekly = vec![weekly_row(5, (9, 0), (12, 0))];
        let exceptions = vec![MasterScheduleExceptionRow {
            master_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            start_time: None,
            end_time: None,
            is_off: true,
            reason: Some("holiday".into()),
        }];
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let days = available_days(2025, 3, &weekly, &exceptions, &[], 60, 10, 0, chrono_tz::UTC, now);
        assert_eq!(days, vec![8, 15, 22, 29]);
    }
}

//! Local-timezone helpers shared by the schedule resolver, slot
//! calculator, and availability index. Presentation and date-bounded
//! queries use the configured local business timezone; storage stays UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use salon_db::models::Window;

/// Converts a local `(date, window)` pair to its UTC instant range. Falls
/// back to the earlier of the two interpretations on a DST-ambiguous
/// local time rather than failing — this system's correctness does not
/// hinge on DST edge behavior, and the slot calculator built on top of
/// this must stay total rather than ever raising on a schedule row.
pub fn window_to_utc(date: NaiveDate, window: Window, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_to_utc(date, window.start, tz);
    let end = local_to_utc(date, window.end, tz);
    (start, end)
}

fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
        chrono::LocalResult::None => {
            // Falls in a spring-forward gap; shift forward an hour, same
            // as most scheduling systems do for a nonexistent local time.
            let shifted = naive + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
        }
    }
}

pub fn local_date_of(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// UTC instant of local midnight for `date` — used to compute month/day
/// boundaries for range queries (availability index, slot calculator).
pub fn local_midnight_to_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_to_utc(date, NaiveTime::MIN, tz)
}

/// ISO weekday index used throughout this workspace: 0 = Monday .. 6 =
/// Sunday.
pub fn iso_weekday(date: NaiveDate) -> i16 {
    use chrono::Datelike;
    date.weekday().num_days_from_monday() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn weekday_monday_is_zero() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(iso_weekday(monday), 0);
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(iso_weekday(sunday), 6);
    }

    #[test]
    fn window_to_utc_roundtrips_for_fixed_offset_zone() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let window = Window {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        };
        let (start, end) = window_to_utc(date, window, chrono_tz::UTC);
        assert_eq!(start.hour(), 9);
        assert_eq!(end.hour(), 18);
    }
}

//! The schedule resolver: pure functions over the windows
//! already loaded from `salon_db::queries::schedules` — no DB access here,
//! so the merge/normalize rules are plain, testable logic.

use salon_db::models::Window;
use chrono::NaiveTime;

/// Resolves the day's working windows: an exception (even an empty one,
/// meaning closed) wins over the weekly schedule; absent both, the master
/// is closed.
pub fn resolve_windows(weekly: Vec<Window>, exception: Option<Vec<Window>>) -> Vec<Window> {
    let raw = match exception {
        Some(windows) => windows,
        None => weekly,
    };
    normalize(raw)
}

/// Drops inverted/degenerate windows, sorts by start, and merges
/// adjacent windows. Adjacency merging is meant to happen on write, not
/// read, but rows may be hand-edited in the DB without going through that
/// path, so this merges defensively too.
pub fn normalize(mut windows: Vec<Window>) -> Vec<Window> {
    windows.retain(|w| w.start < w.end);
    windows.sort_by_key(|w| w.start);

    let mut merged: Vec<Window> = Vec::with_capacity(windows.len());
    for w in windows {
        match merged.last_mut() {
            Some(last) if w.start <= last.end => {
                if w.end > last.end {
                    last.end = w.end;
                }
            }
            _ => merged.push(w),
        }
    }
    merged
}

/// Strict `HH:MM` parse (hours 00–23, minutes 00–59),
/// delegating to the shared validator so the API and the resolver agree
/// on what counts as a valid time-of-day string.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    let (hour, minute) = salon_types::validation::parse_time_of_day(s)?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| format!("invalid time of day: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(sh: u32, sm: u32, eh: u32, em: u32) -> Window {
        Window {
            start: NaiveTime::from_hms_opt(sh, sm, 0).unwrap(),
            end: NaiveTime::from_hms_opt(eh, em, 0).unwrap(),
        }
    }

    #[test]
    fn exception_overrides_weekly_even_when_empty() {
        let weekly = vec![w(9, 0, 18, 0)];
        assert_eq!(resolve_windows(weekly.clone(), Some(vec![])), Vec::<Window>::new());
        assert_eq!(resolve_windows(weekly.clone(), None), vec![w(9, 0, 18, 0)]);
    }

    #[test]
    fn drops_inverted_windows() {
        let bad = vec![w(12, 0, 9, 0)];
        assert!(normalize(bad).is_empty());
    }

    #[test]
    fn merges_adjacent_windows() {
        let windows = vec![w(9, 0, 12, 0), w(12, 0, 15, 0)];
        assert_eq!(normalize(windows), vec![w(9, 0, 15, 0)]);
    }

    #[test]
    fn keeps_disjoint_windows_separate() {
        let windows = vec![w(9, 0, 12, 0), w(14, 0, 18, 0)];
        assert_eq!(normalize(windows), vec![w(9, 0, 12, 0), w(14, 0, 18, 0)]);
    }
}

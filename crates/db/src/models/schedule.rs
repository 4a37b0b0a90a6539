use chrono::NaiveDate;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One working window on a given weekday, normalized `[start_time, end_time)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MasterScheduleRow {
    pub master_id: i64,
    /// ISO weekday convention: 0 = Monday .. 6 = Sunday.
    pub weekday: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A date-specific override of the weekly schedule. `is_off = true` with no
/// windows means the master is closed that date regardless of what the
/// weekly schedule says.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MasterScheduleExceptionRow {
    pub master_id: i64,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_off: bool,
    pub reason: Option<String>,
}

/// A resolved, in-memory working window, independent of
/// whether it came from the weekly schedule or an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

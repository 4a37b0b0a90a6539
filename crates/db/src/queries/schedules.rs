use crate::models::{MasterScheduleExceptionRow, MasterScheduleRow, Window};
use chrono::NaiveDate;
use sqlx::PgPool;

pub async fn weekly_windows(
    pool: &PgPool,
    master_id: i64,
    weekday: i16,
) -> Result<Vec<Window>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MasterScheduleRow>(
        "SELECT master_id, weekday, start_time, end_time \
         FROM master_schedules WHERE master_id = $1 AND weekday = $2 ORDER BY start_time",
    )
    .bind(master_id)
    .bind(weekday)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| Window { start: r.start_time, end: r.end_time })
        .collect())
}

/// `None` means no exception row exists for that date (fall back to the
/// weekly schedule); `Some(windows)` is authoritative, possibly empty
/// (closed).
pub async fn exception_windows(
    pool: &PgPool,
    master_id: i64,
    date: NaiveDate,
) -> Result<Option<Vec<Window>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MasterScheduleExceptionRow>(
        "SELECT master_id, date, start_time, end_time, is_off, reason \
         FROM master_schedule_exceptions WHERE master_id = $1 AND date = $2",
    )
    .bind(master_id)
    .bind(date)
    .fetch_all(pool)
    .await?;
    if rows.is_empty() {
        return Ok(None);
    }
    let windows = rows
        .into_iter()
        .filter(|r| !r.is_off)
        .filter_map(|r| match (r.start_time, r.end_time) {
            (Some(start), Some(end)) if start < end => Some(Window { start, end }),
            _ => None,
        })
        .collect();
    Ok(Some(windows))
}

/// All weekly schedule rows for a master, grouped implicitly by weekday —
/// used by the availability index to avoid one query per day.
pub async fn all_weekly_windows(
    pool: &PgPool,
    master_id: i64,
) -> Result<Vec<MasterScheduleRow>, sqlx::Error> {
    sqlx::query_as::<_, MasterScheduleRow>(
        "SELECT master_id, weekday, start_time, end_time \
         FROM master_schedules WHERE master_id = $1 ORDER BY weekday, start_time",
    )
    .bind(master_id)
    .fetch_all(pool)
    .await
}

/// All exception rows for a master within a month window — one query,
/// consumed by the availability index.
pub async fn exceptions_in_range(
    pool: &PgPool,
    master_id: i64,
    from: NaiveDate,
    to_exclusive: NaiveDate,
) -> Result<Vec<MasterScheduleExceptionRow>, sqlx::Error> {
    sqlx::query_as::<_, MasterScheduleExceptionRow>(
        "SELECT master_id, date, start_time, end_time, is_off, reason \
         FROM master_schedule_exceptions \
         WHERE master_id = $1 AND date >= $2 AND date < $3 ORDER BY date",
    )
    .bind(master_id)
    .bind(from)
    .bind(to_exclusive)
    .fetch_all(pool)
    .await
}

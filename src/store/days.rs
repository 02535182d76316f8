use chrono::Utc;
use sqlx::SqlitePool;

use crate::dates::AppDay;
use crate::models::day::DailyRecord;
use crate::models::focus::FocusCategory;

pub async fn get_record(pool: &SqlitePool, day: AppDay) -> sqlx::Result<Option<DailyRecord>> {
    sqlx::query_as::<_, DailyRecord>("SELECT * FROM daily_records WHERE day_date = ?1")
        .bind(day.date())
        .fetch_optional(pool)
        .await
}

/// Create or update the day's record. An existing journal entry survives a
/// focus change.
pub async fn set_focus(
    pool: &SqlitePool,
    day: AppDay,
    focus: FocusCategory,
) -> sqlx::Result<DailyRecord> {
    let now = Utc::now();
    sqlx::query_as::<_, DailyRecord>(
        r#"
        INSERT INTO daily_records (day_date, focus_id, journal, created_at, updated_at)
        VALUES (?1, ?2, NULL, ?3, ?3)
        ON CONFLICT (day_date) DO UPDATE SET
            focus_id = excluded.focus_id,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(day.date())
    .bind(focus)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Journal text for a day that already has a focus. Returns `None` without
/// writing when no record exists; a journal cannot exist on its own.
/// Blank text unsets the entry.
pub async fn set_journal(
    pool: &SqlitePool,
    day: AppDay,
    text: &str,
) -> sqlx::Result<Option<DailyRecord>> {
    let trimmed = text.trim();
    let journal = if trimmed.is_empty() { None } else { Some(trimmed) };

    sqlx::query_as::<_, DailyRecord>(
        "UPDATE daily_records SET journal = ?2, updated_at = ?3 WHERE day_date = ?1 RETURNING *",
    )
    .bind(day.date())
    .bind(journal)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

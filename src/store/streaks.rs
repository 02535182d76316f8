use chrono::{Local, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dates::week_interval;
use crate::models::focus::FocusCategory;
use crate::models::streak::{Streak, StreakCompletion, StreakKind, StreakRow};

fn row_to_streak(row: StreakRow) -> Streak {
    let associated_focus_ids = match serde_json::from_str(&row.associated_focus_ids) {
        Ok(ids) => ids,
        Err(e) => {
            super::note_decode_failure("streaks.associated_focus_ids", &e);
            Vec::new()
        }
    };
    Streak {
        id: row.id,
        icon: row.icon,
        name: row.name,
        frequency_per_week: row.frequency_per_week,
        kind: row.kind,
        focus_id: row.focus_id,
        associated_focus_ids,
        created_at: row.created_at,
    }
}

pub struct StreakFields {
    pub icon: String,
    pub name: String,
    pub frequency_per_week: i64,
    pub kind: StreakKind,
    pub focus_id: Option<FocusCategory>,
    pub associated_focus_ids: Vec<FocusCategory>,
}

pub async fn add_streak(pool: &SqlitePool, fields: StreakFields) -> sqlx::Result<Streak> {
    let ids_json =
        serde_json::to_string(&fields.associated_focus_ids).unwrap_or_else(|_| "[]".into());
    let row = sqlx::query_as::<_, StreakRow>(
        r#"
        INSERT INTO streaks
            (id, icon, name, frequency_per_week, kind, focus_id, associated_focus_ids, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&fields.icon)
    .bind(&fields.name)
    .bind(fields.frequency_per_week)
    .bind(fields.kind)
    .bind(fields.focus_id)
    .bind(&ids_json)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(row_to_streak(row))
}

pub async fn get_streak(pool: &SqlitePool, id: Uuid) -> sqlx::Result<Option<Streak>> {
    let row = sqlx::query_as::<_, StreakRow>("SELECT * FROM streaks WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(row_to_streak))
}

/// Full replacement of the editable fields. `None` when the streak is gone.
pub async fn update_streak(
    pool: &SqlitePool,
    id: Uuid,
    fields: StreakFields,
) -> sqlx::Result<Option<Streak>> {
    let ids_json =
        serde_json::to_string(&fields.associated_focus_ids).unwrap_or_else(|_| "[]".into());
    let row = sqlx::query_as::<_, StreakRow>(
        r#"
        UPDATE streaks SET
            icon = ?2,
            name = ?3,
            frequency_per_week = ?4,
            kind = ?5,
            focus_id = ?6,
            associated_focus_ids = ?7
        WHERE id = ?1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&fields.icon)
    .bind(&fields.name)
    .bind(fields.frequency_per_week)
    .bind(fields.kind)
    .bind(fields.focus_id)
    .bind(&ids_json)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_streak))
}

/// Removes the streak and every completion logged against it.
pub async fn delete_streak(pool: &SqlitePool, id: Uuid) -> sqlx::Result<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM streak_completions WHERE streak_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM streaks WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

/// Streaks ordered by most recent completion, newest first; streaks never
/// completed sort by creation date.
pub async fn list_streaks_sorted(pool: &SqlitePool) -> sqlx::Result<Vec<Streak>> {
    let rows = sqlx::query_as::<_, StreakRow>(
        r#"
        SELECT s.* FROM streaks s
        LEFT JOIN (
            SELECT streak_id, MAX(completed_date) AS last_done
            FROM streak_completions
            GROUP BY streak_id
        ) c ON c.streak_id = s.id
        ORDER BY COALESCE(c.last_done, substr(s.created_at, 1, 10)) DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(row_to_streak).collect())
}

/// Append-only: a second completion on the same day counts again toward the
/// weekly quota. The completion day is the plain calendar date, not the
/// 4am-boundary app day.
pub async fn mark_complete(
    pool: &SqlitePool,
    streak_id: Uuid,
    date: Option<NaiveDate>,
    focus_id: Option<FocusCategory>,
) -> sqlx::Result<StreakCompletion> {
    let completed_date = date.unwrap_or_else(|| Local::now().date_naive());
    sqlx::query_as::<_, StreakCompletion>(
        r#"
        INSERT INTO streak_completions (id, streak_id, completed_date, focus_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(streak_id)
    .bind(completed_date)
    .bind(focus_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn remove_completion(pool: &SqlitePool, completion_id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM streak_completions WHERE id = ?1")
        .bind(completion_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn completions_for(pool: &SqlitePool, streak_id: Uuid) -> sqlx::Result<Vec<StreakCompletion>> {
    sqlx::query_as::<_, StreakCompletion>(
        "SELECT * FROM streak_completions WHERE streak_id = ?1 ORDER BY completed_date DESC",
    )
    .bind(streak_id)
    .fetch_all(pool)
    .await
}

/// Completions within the Sunday-based week containing `date`, against the
/// streak's weekly quota.
pub async fn week_progress(
    pool: &SqlitePool,
    streak: &Streak,
    date: NaiveDate,
) -> sqlx::Result<(i64, i64)> {
    let (start, end) = week_interval(date);
    let completed: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM streak_completions
        WHERE streak_id = ?1 AND completed_date >= ?2 AND completed_date < ?3
        "#,
    )
    .bind(streak.id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok((completed, streak.frequency_per_week))
}

pub async fn is_complete_for_week(
    pool: &SqlitePool,
    streak: &Streak,
    date: NaiveDate,
) -> sqlx::Result<bool> {
    let (completed, target) = week_progress(pool, streak, date).await?;
    Ok(completed >= target)
}

/// Calendar-day equality, deliberately matching how completions are dated.
pub async fn is_completed_on(
    pool: &SqlitePool,
    streak_id: Uuid,
    date: NaiveDate,
) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM streak_completions WHERE streak_id = ?1 AND completed_date = ?2",
    )
    .bind(streak_id)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

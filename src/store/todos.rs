use std::collections::HashSet;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dates::AppDay;
use crate::models::todo::{NewTodo, TodoChanges, TodoItem, TodoPayload};
use crate::reminders::ReminderGateway;

/// Pure read of a day's list, in user-chosen order. Callers that want
/// recurring items brought forward run [`reconcile_recurring`] first.
pub async fn list_todos(pool: &SqlitePool, day: AppDay) -> sqlx::Result<Vec<TodoItem>> {
    sqlx::query_as::<_, TodoItem>(
        "SELECT * FROM day_todos WHERE day_date = ?1 ORDER BY position ASC",
    )
    .bind(day.date())
    .fetch_all(pool)
    .await
}

pub async fn get_todo(pool: &SqlitePool, day: AppDay, id: Uuid) -> sqlx::Result<Option<TodoItem>> {
    sqlx::query_as::<_, TodoItem>("SELECT * FROM day_todos WHERE day_date = ?1 AND id = ?2")
        .bind(day.date())
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Materialize recurring items onto `day` from all strictly earlier days.
///
/// Source days are scanned newest-first, and each id is seeded at most once,
/// so the most recent qualifying occurrence wins. The clone keeps the source
/// id (making repeated reconciles idempotent), starts incomplete, and drops
/// the notification id so a reminder can be rescheduled for the new day.
/// Returns the number of instances created.
pub async fn reconcile_recurring(pool: &SqlitePool, day: AppDay) -> sqlx::Result<u64> {
    let existing: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM day_todos WHERE day_date = ?1")
        .bind(day.date())
        .fetch_all(pool)
        .await?;
    let mut seen: HashSet<Uuid> = existing.into_iter().collect();

    let sources = sqlx::query_as::<_, TodoItem>(
        r#"
        SELECT * FROM day_todos
        WHERE day_date < ?1 AND recurrence != 'none'
        ORDER BY day_date DESC, position ASC
        "#,
    )
    .bind(day.date())
    .fetch_all(pool)
    .await?;

    let mut next_pos = next_position(pool, day).await?;
    let mut created = 0u64;

    let mut tx = pool.begin().await?;
    for src in sources {
        if seen.contains(&src.id) || !src.recurrence.recurs_on(src.day_date, day.date()) {
            continue;
        }
        sqlx::query(
            r#"
            INSERT INTO day_todos
                (day_date, id, text, is_completed, recurrence, has_reminder,
                 reminder_time, notification_id, position)
            VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6, NULL, ?7)
            "#,
        )
        .bind(day.date())
        .bind(src.id)
        .bind(&src.text)
        .bind(src.recurrence)
        .bind(src.has_reminder)
        .bind(src.reminder_time)
        .bind(next_pos)
        .execute(&mut *tx)
        .await?;

        seen.insert(src.id);
        next_pos += 1;
        created += 1;
    }
    tx.commit().await?;

    if created > 0 {
        tracing::debug!(day = %day, created, "Materialized recurring todos");
    }
    Ok(created)
}

pub async fn add_todo(pool: &SqlitePool, day: AppDay, new: NewTodo) -> sqlx::Result<TodoItem> {
    let position = next_position(pool, day).await?;
    sqlx::query_as::<_, TodoItem>(
        r#"
        INSERT INTO day_todos
            (day_date, id, text, is_completed, recurrence, has_reminder,
             reminder_time, notification_id, position)
        VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6, ?7, ?8)
        RETURNING *
        "#,
    )
    .bind(day.date())
    .bind(new.id)
    .bind(&new.text)
    .bind(new.recurrence)
    .bind(new.has_reminder)
    .bind(new.reminder_time)
    .bind(&new.notification_id)
    .bind(position)
    .fetch_one(pool)
    .await
}

/// Full-item update. `None` when the id is not on this day's list.
pub async fn update_todo(
    pool: &SqlitePool,
    day: AppDay,
    id: Uuid,
    changes: TodoChanges,
) -> sqlx::Result<Option<TodoItem>> {
    sqlx::query_as::<_, TodoItem>(
        r#"
        UPDATE day_todos SET
            text = ?3,
            is_completed = ?4,
            recurrence = ?5,
            has_reminder = ?6,
            reminder_time = ?7,
            notification_id = ?8
        WHERE day_date = ?1 AND id = ?2
        RETURNING *
        "#,
    )
    .bind(day.date())
    .bind(id)
    .bind(&changes.text)
    .bind(changes.is_completed)
    .bind(changes.recurrence)
    .bind(changes.has_reminder)
    .bind(changes.reminder_time)
    .bind(&changes.notification_id)
    .fetch_optional(pool)
    .await
}

pub async fn toggle_todo(
    pool: &SqlitePool,
    day: AppDay,
    id: Uuid,
) -> sqlx::Result<Option<TodoItem>> {
    sqlx::query_as::<_, TodoItem>(
        r#"
        UPDATE day_todos SET is_completed = NOT is_completed
        WHERE day_date = ?1 AND id = ?2
        RETURNING *
        "#,
    )
    .bind(day.date())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Idempotent delete. Cancels the item's pending reminder, if any, exactly
/// once. Returns whether a row was removed.
pub async fn delete_todo(
    pool: &SqlitePool,
    reminders: &dyn ReminderGateway,
    day: AppDay,
    id: Uuid,
) -> sqlx::Result<bool> {
    let existing = get_todo(pool, day, id).await?;
    let Some(item) = existing else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM day_todos WHERE day_date = ?1 AND id = ?2")
        .bind(day.date())
        .bind(id)
        .execute(pool)
        .await?;

    if let Some(nid) = item.notification_id.as_deref() {
        reminders.cancel(nid);
    }
    Ok(true)
}

/// Replace the whole list for a day in one transaction. Payload order becomes
/// list order; items without an id get a fresh one.
pub async fn set_todos(
    pool: &SqlitePool,
    day: AppDay,
    todos: Vec<TodoPayload>,
) -> sqlx::Result<Vec<TodoItem>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM day_todos WHERE day_date = ?1")
        .bind(day.date())
        .execute(&mut *tx)
        .await?;

    for (position, item) in todos.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO day_todos
                (day_date, id, text, is_completed, recurrence, has_reminder,
                 reminder_time, notification_id, position)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(day.date())
        .bind(item.id.unwrap_or_else(Uuid::new_v4))
        .bind(&item.text)
        .bind(item.is_completed)
        .bind(item.recurrence)
        .bind(item.has_reminder)
        .bind(item.reminder_time)
        .bind(&item.notification_id)
        .bind(position as i64)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    list_todos(pool, day).await
}

async fn next_position(pool: &SqlitePool, day: AppDay) -> sqlx::Result<i64> {
    let max: Option<i64> =
        sqlx::query_scalar("SELECT MAX(position) FROM day_todos WHERE day_date = ?1")
            .bind(day.date())
            .fetch_one(pool)
            .await?;
    Ok(max.unwrap_or(-1) + 1)
}

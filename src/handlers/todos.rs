use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{resolve_day, DayQuery};
use crate::models::todo::{
    CreateTodoRequest, NewTodo, SetTodosRequest, TodoChanges, TodoItem, UpdateTodoRequest,
};
use crate::store;
use crate::AppState;

/// Reconcile-then-read: recurring items from earlier days are materialized
/// onto the requested day before the list is returned.
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<TodoItem>>> {
    let day = resolve_day(query.date);
    store::todos::reconcile_recurring(&state.db, day).await?;
    let todos = store::todos::list_todos(&state.db, day).await?;
    Ok(Json(todos))
}

/// The materialization step on its own, for clients that want the pure read
/// elsewhere.
pub async fn reconcile_todos(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let day = resolve_day(query.date);
    let created = store::todos::reconcile_recurring(&state.db, day).await?;
    Ok(Json(serde_json::json!({ "day": day, "created": created })))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> AppResult<Json<TodoItem>> {
    let day = resolve_day(body.date);
    let id = Uuid::new_v4();

    // Schedule before insert so the stored item carries its notification id
    let notification_id = match (body.has_reminder, body.reminder_time) {
        (true, Some(at)) => state.reminders.schedule(day, id, &body.text, at),
        _ => None,
    };

    let todo = store::todos::add_todo(
        &state.db,
        day,
        NewTodo {
            id,
            text: body.text,
            recurrence: body.recurrence,
            has_reminder: body.has_reminder,
            reminder_time: body.reminder_time,
            notification_id,
        },
    )
    .await?;

    broadcast_todos_changed(&state, day);
    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTodoRequest>,
) -> AppResult<Json<TodoItem>> {
    let day = resolve_day(body.date);

    let existing = store::todos::get_todo(&state.db, day, id)
        .await?
        .ok_or(AppError::NotFound("Todo not found".into()))?;

    // Any edit invalidates the previously scheduled reminder; a new one is
    // obtained below when the updated item still wants one.
    if let Some(nid) = existing.notification_id.as_deref() {
        state.reminders.cancel(nid);
    }
    let notification_id = match (body.has_reminder, body.reminder_time) {
        (true, Some(at)) => state.reminders.schedule(day, id, &body.text, at),
        _ => None,
    };

    let updated = store::todos::update_todo(
        &state.db,
        day,
        id,
        TodoChanges {
            text: body.text,
            is_completed: body.is_completed,
            recurrence: body.recurrence,
            has_reminder: body.has_reminder,
            reminder_time: body.reminder_time,
            notification_id,
        },
    )
    .await?
    .ok_or(AppError::NotFound("Todo not found".into()))?;

    broadcast_todos_changed(&state, day);
    Ok(Json(updated))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<TodoItem>> {
    let day = resolve_day(query.date);
    let todo = store::todos::toggle_todo(&state.db, day, id)
        .await?
        .ok_or(AppError::NotFound("Todo not found".into()))?;

    broadcast_todos_changed(&state, day);
    Ok(Json(todo))
}

/// Idempotent: deleting an already-gone item still returns 200.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let day = resolve_day(query.date);
    let deleted = store::todos::delete_todo(&state.db, state.reminders.as_ref(), day, id).await?;

    if deleted {
        broadcast_todos_changed(&state, day);
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn set_todos(
    State(state): State<AppState>,
    Json(body): Json<SetTodosRequest>,
) -> AppResult<Json<Vec<TodoItem>>> {
    let day = resolve_day(body.date);
    let todos = store::todos::set_todos(&state.db, day, body.todos).await?;

    broadcast_todos_changed(&state, day);
    Ok(Json(todos))
}

fn broadcast_todos_changed(state: &AppState, day: crate::dates::AppDay) {
    if let Some(tx) = state.ws_tx.as_ref() {
        let msg = serde_json::json!({
            "type": "todos_changed",
            "day": day,
        });
        let _ = tx.send(msg.to_string());
    }
}

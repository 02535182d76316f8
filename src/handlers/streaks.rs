use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use uuid::Uuid;
use validator::Validate;

use crate::dates::week_interval;
use crate::error::{AppError, AppResult};
use crate::models::streak::{
    CreateStreakRequest, MarkCompleteRequest, Streak, StreakCompletion, StreakKind,
    UpdateStreakRequest, WeekProgressResponse,
};
use crate::store;
use crate::store::streaks::StreakFields;
use crate::AppState;

pub async fn list_streaks(State(state): State<AppState>) -> AppResult<Json<Vec<Streak>>> {
    let streaks = store::streaks::list_streaks_sorted(&state.db).await?;
    Ok(Json(streaks))
}

pub async fn create_streak(
    State(state): State<AppState>,
    Json(body): Json<CreateStreakRequest>,
) -> AppResult<Json<Streak>> {
    body.validate()?;
    validate_kind(body.kind, body.focus_id.is_some())?;

    let streak = store::streaks::add_streak(
        &state.db,
        StreakFields {
            icon: body.icon,
            name: body.name,
            frequency_per_week: body.frequency_per_week,
            kind: body.kind,
            focus_id: body.focus_id,
            associated_focus_ids: body.associated_focus_ids,
        },
    )
    .await?;

    broadcast_streaks_changed(&state);
    Ok(Json(streak))
}

pub async fn update_streak(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStreakRequest>,
) -> AppResult<Json<Streak>> {
    body.validate()?;
    validate_kind(body.kind, body.focus_id.is_some())?;

    let streak = store::streaks::update_streak(
        &state.db,
        id,
        StreakFields {
            icon: body.icon,
            name: body.name,
            frequency_per_week: body.frequency_per_week,
            kind: body.kind,
            focus_id: body.focus_id,
            associated_focus_ids: body.associated_focus_ids,
        },
    )
    .await?
    .ok_or(AppError::NotFound("Streak not found".into()))?;

    broadcast_streaks_changed(&state);
    Ok(Json(streak))
}

/// Deletes the streak and all of its completions.
pub async fn delete_streak(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = store::streaks::delete_streak(&state.db, id).await?;
    if deleted {
        broadcast_streaks_changed(&state);
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn mark_complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MarkCompleteRequest>,
) -> AppResult<Json<StreakCompletion>> {
    store::streaks::get_streak(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Streak not found".into()))?;

    let completion =
        store::streaks::mark_complete(&state.db, id, body.date, body.focus_id).await?;

    broadcast_streaks_changed(&state);
    Ok(Json(completion))
}

pub async fn remove_completion(
    State(state): State<AppState>,
    Path(completion_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = store::streaks::remove_completion(&state.db, completion_id).await?;
    if removed {
        broadcast_streaks_changed(&state);
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn get_week_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<super::DayQuery>,
) -> AppResult<Json<WeekProgressResponse>> {
    let streak = store::streaks::get_streak(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Streak not found".into()))?;

    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let (completed, target) = store::streaks::week_progress(&state.db, &streak, date).await?;
    let completed_today = store::streaks::is_completed_on(&state.db, id, date).await?;
    let (week_start, week_end) = week_interval(date);

    Ok(Json(WeekProgressResponse {
        streak_id: id,
        week_start,
        week_end,
        completed,
        target,
        is_complete: completed >= target,
        completed_today,
    }))
}

fn validate_kind(kind: StreakKind, has_focus: bool) -> AppResult<()> {
    match kind {
        StreakKind::SpecificFocus if !has_focus => Err(AppError::Validation(
            "focus_id is required for a specific-focus streak".into(),
        )),
        _ => Ok(()),
    }
}

fn broadcast_streaks_changed(state: &AppState) {
    if let Some(tx) = state.ws_tx.as_ref() {
        let msg = serde_json::json!({ "type": "streaks_changed" });
        let _ = tx.send(msg.to_string());
    }
}

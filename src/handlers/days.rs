use axum::{
    extract::{Query, State},
    Json,
};

use crate::dates::AppDay;
use crate::error::AppResult;
use crate::handlers::{resolve_day, DayQuery};
use crate::models::day::{DailyRecord, DayResponse, JournalResponse, SetFocusRequest, SetJournalRequest};
use crate::store;
use crate::AppState;

pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<DayResponse>> {
    let day = resolve_day(query.date);
    let record = store::days::get_record(&state.db, day).await?;
    Ok(Json(DayResponse {
        day: day.date(),
        record,
    }))
}

pub async fn set_focus(
    State(state): State<AppState>,
    Json(body): Json<SetFocusRequest>,
) -> AppResult<Json<DailyRecord>> {
    let day = resolve_day(body.date);
    let record = store::days::set_focus(&state.db, day, body.focus_id).await?;

    // The icon/widget signal only fires for the current app day; picking a
    // focus for a past day must not repaint the home screen.
    if day == AppDay::today() {
        if let Some(tx) = state.ws_tx.as_ref() {
            let msg = serde_json::json!({
                "type": "focus_changed",
                "day": day,
                "focus_id": body.focus_id,
                "color": body.focus_id.color(),
            });
            let _ = tx.send(msg.to_string());
        }
    }

    Ok(Json(record))
}

pub async fn set_journal(
    State(state): State<AppState>,
    Json(body): Json<SetJournalRequest>,
) -> AppResult<Json<JournalResponse>> {
    let day = resolve_day(body.date);
    let record = store::days::set_journal(&state.db, day, &body.text).await?;
    if record.is_none() {
        tracing::debug!(day = %day, "Journal write ignored; day has no focus");
    }
    Ok(Json(JournalResponse {
        updated: record.is_some(),
        record,
    }))
}

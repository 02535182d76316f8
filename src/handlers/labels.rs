use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::models::focus::{FocusCategory, FocusLabelEntry, SetFocusLabelRequest};
use crate::store;
use crate::AppState;

pub async fn list_labels(State(state): State<AppState>) -> AppResult<Json<Vec<FocusLabelEntry>>> {
    let labels = store::labels::list_labels(&state.db).await?;
    Ok(Json(labels))
}

pub async fn set_label(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<SetFocusLabelRequest>,
) -> AppResult<Json<FocusLabelEntry>> {
    let focus = parse_focus(id)?;
    let entry = store::labels::set_label(&state.db, focus, &body.label).await?;
    Ok(Json(entry))
}

pub async fn reset_label(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<FocusLabelEntry>> {
    let focus = parse_focus(id)?;
    store::labels::clear_label(&state.db, focus).await?;
    let entry = store::labels::get_label(&state.db, focus).await?;
    Ok(Json(entry))
}

fn parse_focus(id: i32) -> AppResult<FocusCategory> {
    FocusCategory::try_from(id).map_err(AppError::Validation)
}

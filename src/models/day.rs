use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::focus::FocusCategory;

/// One record per app day, created when the user picks a focus. The journal
/// only exists on top of a focus selection, so it lives in the same row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyRecord {
    pub day_date: NaiveDate,
    pub focus_id: FocusCategory,
    pub journal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SetFocusRequest {
    pub date: Option<NaiveDate>,
    pub focus_id: FocusCategory,
}

#[derive(Debug, Deserialize)]
pub struct SetJournalRequest {
    pub date: Option<NaiveDate>,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub day: NaiveDate,
    pub record: Option<DailyRecord>,
}

/// Journal writes against a day with no focus are discarded, and the response
/// says so instead of pretending the write happened.
#[derive(Debug, Serialize)]
pub struct JournalResponse {
    pub updated: bool,
    pub record: Option<DailyRecord>,
}

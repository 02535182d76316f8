use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::focus::FocusCategory;

#[derive(Debug, Clone, Serialize)]
pub struct Streak {
    pub id: Uuid,
    /// Emoji shown next to the name.
    pub icon: String,
    pub name: String,
    /// Weekly quota, 1-7.
    pub frequency_per_week: i64,
    pub kind: StreakKind,
    /// Set iff `kind` is `specific_focus`.
    pub focus_id: Option<FocusCategory>,
    /// Focus categories this streak is shown for; empty means all.
    pub associated_focus_ids: Vec<FocusCategory>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StreakKind {
    #[default]
    Simple,
    SpecificFocus,
    AllFocusTypes,
}

/// Raw row shape; `associated_focus_ids` is a JSON array column and is
/// decoded separately so a corrupt value degrades to empty instead of
/// failing the whole query.
#[derive(Debug, FromRow)]
pub struct StreakRow {
    pub id: Uuid,
    pub icon: String,
    pub name: String,
    pub frequency_per_week: i64,
    pub kind: StreakKind,
    pub focus_id: Option<FocusCategory>,
    pub associated_focus_ids: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StreakCompletion {
    pub id: Uuid,
    pub streak_id: Uuid,
    /// Plain calendar day, not app-day normalized. Completions logged at 1am
    /// land on the new calendar date even though todos would not.
    pub completed_date: NaiveDate,
    pub focus_id: Option<FocusCategory>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStreakRequest {
    pub icon: String,
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 7, message = "Weekly frequency must be 1-7"))]
    pub frequency_per_week: i64,
    #[serde(default)]
    pub kind: StreakKind,
    pub focus_id: Option<FocusCategory>,
    #[serde(default)]
    pub associated_focus_ids: Vec<FocusCategory>,
}

/// Full replacement, mirroring the create shape.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStreakRequest {
    pub icon: String,
    #[validate(length(min = 1, max = 80, message = "Name must be 1-80 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 7, message = "Weekly frequency must be 1-7"))]
    pub frequency_per_week: i64,
    #[serde(default)]
    pub kind: StreakKind,
    pub focus_id: Option<FocusCategory>,
    #[serde(default)]
    pub associated_focus_ids: Vec<FocusCategory>,
}

#[derive(Debug, Deserialize)]
pub struct MarkCompleteRequest {
    /// Calendar day of completion; defaults to today's calendar date.
    pub date: Option<NaiveDate>,
    pub focus_id: Option<FocusCategory>,
}

#[derive(Debug, Serialize)]
pub struct WeekProgressResponse {
    pub streak_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub completed: i64,
    pub target: i64,
    pub is_complete: bool,
    pub completed_today: bool,
}

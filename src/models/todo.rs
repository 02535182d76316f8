use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TodoItem {
    pub day_date: NaiveDate,
    /// Shared by every materialized instance of a recurring item; unique only
    /// within a single day's list.
    pub id: Uuid,
    pub text: String,
    pub is_completed: bool,
    pub recurrence: Recurrence,
    pub has_reminder: bool,
    /// Wall-clock time of day, date-independent.
    pub reminder_time: Option<NaiveTime>,
    /// Opaque handle into the external reminder scheduler; reassigned per
    /// materialized instance.
    pub notification_id: Option<String>,
    pub position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Whether an item from `source` day recurs onto `target`. Strictly
    /// forward-only: nothing recurs onto its own day or earlier.
    pub fn recurs_on(self, source: NaiveDate, target: NaiveDate) -> bool {
        if target <= source {
            return false;
        }
        match self {
            Recurrence::None => false,
            Recurrence::Weekly => target.weekday() == source.weekday(),
            Recurrence::Monthly => target.day() == source.day(),
        }
    }
}

/// Store-level input for a freshly created item.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub id: Uuid,
    pub text: String,
    pub recurrence: Recurrence,
    pub has_reminder: bool,
    pub reminder_time: Option<NaiveTime>,
    pub notification_id: Option<String>,
}

/// Store-level input for a full-item update.
#[derive(Debug, Clone)]
pub struct TodoChanges {
    pub text: String,
    pub is_completed: bool,
    pub recurrence: Recurrence,
    pub has_reminder: bool,
    pub reminder_time: Option<NaiveTime>,
    pub notification_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub date: Option<NaiveDate>,
    pub text: String,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub has_reminder: bool,
    pub reminder_time: Option<NaiveTime>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub date: Option<NaiveDate>,
    pub text: String,
    pub is_completed: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub has_reminder: bool,
    pub reminder_time: Option<NaiveTime>,
}

/// Wholesale list replacement; items keep the given order.
#[derive(Debug, Deserialize)]
pub struct SetTodosRequest {
    pub date: Option<NaiveDate>,
    pub todos: Vec<TodoPayload>,
}

#[derive(Debug, Deserialize)]
pub struct TodoPayload {
    /// Absent for brand-new items.
    pub id: Option<Uuid>,
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub has_reminder: bool,
    pub reminder_time: Option<NaiveTime>,
    pub notification_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_recurs_on_same_weekday_only() {
        let monday = day(2025, 11, 10);
        assert!(Recurrence::Weekly.recurs_on(monday, day(2025, 11, 17)));
        assert!(!Recurrence::Weekly.recurs_on(monday, day(2025, 11, 11)));
    }

    #[test]
    fn monthly_recurs_on_same_day_number_only() {
        let fifteenth = day(2025, 11, 15);
        assert!(Recurrence::Monthly.recurs_on(fifteenth, day(2025, 12, 15)));
        assert!(!Recurrence::Monthly.recurs_on(fifteenth, day(2025, 12, 16)));
    }

    #[test]
    fn monthly_on_the_31st_skips_short_months() {
        let jan31 = day(2025, 1, 31);
        // February has no 31st, so the next instance lands on Mar 31
        assert!(Recurrence::Monthly.recurs_on(jan31, day(2025, 3, 31)));
        assert!(!Recurrence::Monthly.recurs_on(jan31, day(2025, 2, 28)));
    }

    #[test]
    fn nothing_recurs_backwards_or_onto_itself() {
        let monday = day(2025, 11, 10);
        assert!(!Recurrence::Weekly.recurs_on(monday, monday));
        assert!(!Recurrence::Weekly.recurs_on(monday, day(2025, 11, 3)));
        assert!(!Recurrence::Monthly.recurs_on(monday, day(2025, 10, 10)));
        assert!(!Recurrence::None.recurs_on(monday, day(2025, 11, 17)));
    }
}

pub mod days;
pub mod health;
pub mod labels;
pub mod streaks;
pub mod todos;
pub mod ws;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::dates::AppDay;

/// Common `?date=yyyy-MM-dd` query; absent means the current app day.
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<NaiveDate>,
}

pub(crate) fn resolve_day(date: Option<NaiveDate>) -> AppDay {
    date.map(AppDay::from_date).unwrap_or_else(AppDay::today)
}

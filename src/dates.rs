//! App-day arithmetic. Days roll over at 04:00 local time, not midnight, so
//! a journal entry written at 1am still belongs to the evening before. Every
//! date-keyed table is keyed by [`AppDay`], never by the raw calendar day.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour (local wall clock) at which a new app day begins.
pub const DAY_BOUNDARY_HOUR: i64 = 4;

/// A calendar day under the 4am boundary convention.
///
/// Construct one from a timestamp with [`AppDay::of`] (which applies the
/// boundary shift) or from a date that is already a day key with
/// [`AppDay::from_date`]. Keeping the shift inside the constructor means
/// store code cannot accidentally key off an unnormalized timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppDay(NaiveDate);

impl AppDay {
    /// The app day containing `t`: shift back four hours, then take the
    /// calendar date. 03:59:59 on Nov 8 maps to Nov 7; 04:00:00 maps to Nov 8.
    pub fn of(t: NaiveDateTime) -> Self {
        AppDay((t - Duration::hours(DAY_BOUNDARY_HOUR)).date())
    }

    /// Treat a plain date as a day key. No boundary shift is applied; a date
    /// carries no time of day to shift.
    pub fn from_date(d: NaiveDate) -> Self {
        AppDay(d)
    }

    pub fn today() -> Self {
        Self::of(Local::now().naive_local())
    }

    pub fn yesterday() -> Self {
        Self::today().pred()
    }

    pub fn tomorrow() -> Self {
        Self::today().succ()
    }

    /// Previous calendar day, saturating at the calendar minimum.
    pub fn pred(self) -> Self {
        AppDay(self.0.pred_opt().unwrap_or(NaiveDate::MIN))
    }

    /// Next calendar day, saturating at the calendar maximum.
    pub fn succ(self) -> Self {
        AppDay(self.0.succ_opt().unwrap_or(NaiveDate::MAX))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }
}

impl fmt::Display for AppDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // yyyy-MM-dd, the stable storage key format
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

pub fn same_app_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    AppDay::of(a) == AppDay::of(b)
}

pub fn is_in_today(t: NaiveDateTime) -> bool {
    AppDay::of(t) == AppDay::today()
}

/// Sunday-through-Saturday week containing `date`, as a half-open interval
/// `[start, end)`. The first weekday is forced to Sunday regardless of locale.
pub fn week_interval(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.week(Weekday::Sun).first_day();
    (start, start + Duration::days(7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, s).unwrap())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn before_boundary_counts_as_previous_day() {
        assert_eq!(AppDay::of(at(2025, 11, 8, 3, 0, 0)).date(), day(2025, 11, 7));
    }

    #[test]
    fn at_boundary_counts_as_current_day() {
        assert_eq!(AppDay::of(at(2025, 11, 8, 4, 0, 0)).date(), day(2025, 11, 8));
    }

    #[test]
    fn after_boundary_counts_as_current_day() {
        assert_eq!(AppDay::of(at(2025, 11, 8, 17, 30, 0)).date(), day(2025, 11, 8));
    }

    #[test]
    fn midnight_counts_as_previous_day() {
        assert_eq!(AppDay::of(at(2025, 11, 8, 0, 0, 0)).date(), day(2025, 11, 7));
    }

    #[test]
    fn one_second_before_boundary_counts_as_previous_day() {
        assert_eq!(AppDay::of(at(2025, 11, 8, 3, 59, 59)).date(), day(2025, 11, 7));
    }

    #[test]
    fn month_boundary() {
        // 2am on Nov 1 belongs to Oct 31
        assert_eq!(AppDay::of(at(2025, 11, 1, 2, 0, 0)).date(), day(2025, 10, 31));
    }

    #[test]
    fn year_boundary() {
        // 2am on Jan 1 2026 belongs to Dec 31 2025
        assert_eq!(AppDay::of(at(2026, 1, 1, 2, 0, 0)).date(), day(2025, 12, 31));
    }

    #[test]
    fn leap_year_february() {
        // 2am on Mar 1 of a leap year belongs to Feb 29
        assert_eq!(AppDay::of(at(2024, 3, 1, 2, 0, 0)).date(), day(2024, 2, 29));
    }

    #[test]
    fn same_app_day_within_one_day() {
        assert!(same_app_day(at(2025, 11, 8, 10, 0, 0), at(2025, 11, 8, 22, 0, 0)));
    }

    #[test]
    fn same_app_day_across_midnight() {
        // 11pm and 2am the next calendar day share an app day
        assert!(same_app_day(at(2025, 11, 8, 23, 0, 0), at(2025, 11, 9, 2, 0, 0)));
    }

    #[test]
    fn different_days_are_not_same_app_day() {
        assert!(!same_app_day(at(2025, 11, 8, 17, 0, 0), at(2025, 11, 9, 17, 0, 0)));
    }

    #[test]
    fn is_in_today_now() {
        assert!(is_in_today(Local::now().naive_local()));
    }

    #[test]
    fn yesterday_and_tomorrow_are_adjacent() {
        let today = AppDay::today();
        assert_eq!(AppDay::yesterday().succ(), today);
        assert_eq!(AppDay::tomorrow().pred(), today);
    }

    #[test]
    fn today_is_stable_within_a_call() {
        assert_eq!(AppDay::today(), AppDay::today());
    }

    #[test]
    fn day_key_format() {
        assert_eq!(AppDay::from_date(day(2025, 1, 5)).to_string(), "2025-01-05");
    }

    #[test]
    fn week_interval_is_sunday_based() {
        // Nov 12 2025 is a Wednesday; its week runs Sun Nov 9 .. Sun Nov 16
        let (start, end) = week_interval(day(2025, 11, 12));
        assert_eq!(start, day(2025, 11, 9));
        assert_eq!(end, day(2025, 11, 16));
        assert_eq!(start.weekday(), Weekday::Sun);
    }

    #[test]
    fn week_interval_of_a_sunday_starts_on_it() {
        let (start, end) = week_interval(day(2025, 11, 9));
        assert_eq!(start, day(2025, 11, 9));
        assert_eq!(end, day(2025, 11, 16));
    }

    #[test]
    fn week_interval_across_year_boundary() {
        // Jan 1 2026 is a Thursday; its week starts Sun Dec 28 2025
        let (start, end) = week_interval(day(2026, 1, 1));
        assert_eq!(start, day(2025, 12, 28));
        assert_eq!(end, day(2026, 1, 4));
    }
}

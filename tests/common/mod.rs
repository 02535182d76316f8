#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use focusday_api::config::Config;
use focusday_api::dates::AppDay;
use focusday_api::reminders::ReminderGateway;
use focusday_api::AppState;

/// Fresh in-memory database with migrations applied. A single pinned
/// connection keeps the memory store alive for the test's duration.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Reminder gateway fake that records every call.
#[derive(Default)]
pub struct RecordingReminders {
    pub scheduled: Mutex<Vec<String>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl RecordingReminders {
    pub fn cancelled_ids(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn scheduled_ids(&self) -> Vec<String> {
        self.scheduled.lock().unwrap().clone()
    }
}

impl ReminderGateway for RecordingReminders {
    fn schedule(&self, day: AppDay, todo_id: Uuid, _text: &str, _at: NaiveTime) -> Option<String> {
        let id = format!("test-{day}-{todo_id}");
        self.scheduled.lock().unwrap().push(id.clone());
        Some(id)
    }

    fn cancel(&self, notification_id: &str) {
        self.cancelled
            .lock()
            .unwrap()
            .push(notification_id.to_string());
    }
}

pub async fn test_state() -> (AppState, Arc<RecordingReminders>) {
    let pool = test_pool().await;
    let reminders = Arc::new(RecordingReminders::default());
    let state = AppState {
        db: pool,
        config: Arc::new(Config {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
        }),
        ws_tx: None,
        reminders: reminders.clone(),
    };
    (state, reminders)
}

pub fn day(y: i32, m: u32, d: u32) -> AppDay {
    AppDay::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
}

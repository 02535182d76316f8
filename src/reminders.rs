//! Seam to the platform's notification scheduler. The real scheduler lives in
//! the client app; this side only hands out notification ids, emits change
//! events, and never depends on delivery succeeding.

use chrono::NaiveTime;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::dates::AppDay;

pub trait ReminderGateway: Send + Sync {
    /// Request a reminder for a to-do; returns the opaque notification id to
    /// store on the item, or `None` if scheduling is unavailable.
    fn schedule(&self, day: AppDay, todo_id: Uuid, text: &str, at: NaiveTime) -> Option<String>;

    /// One-way cancel. Unknown ids are ignored by the scheduler.
    fn cancel(&self, notification_id: &str);
}

/// Production gateway: logs and broadcasts reminder events over the change
/// channel for the client to act on.
pub struct BroadcastReminders {
    ws_tx: Option<broadcast::Sender<String>>,
}

impl BroadcastReminders {
    pub fn new(ws_tx: Option<broadcast::Sender<String>>) -> Self {
        Self { ws_tx }
    }

    fn emit(&self, msg: serde_json::Value) {
        if let Some(tx) = self.ws_tx.as_ref() {
            let _ = tx.send(msg.to_string());
        }
    }
}

impl ReminderGateway for BroadcastReminders {
    fn schedule(&self, day: AppDay, todo_id: Uuid, text: &str, at: NaiveTime) -> Option<String> {
        let notification_id = format!("todo-{}-{}", day, Uuid::new_v4());
        tracing::debug!(%day, %todo_id, %at, notification_id, "Scheduling reminder");
        self.emit(serde_json::json!({
            "type": "reminder_scheduled",
            "notification_id": notification_id.clone(),
            "day": day,
            "todo_id": todo_id,
            "text": text,
            "at": at.format("%H:%M:%S").to_string(),
        }));
        Some(notification_id)
    }

    fn cancel(&self, notification_id: &str) {
        tracing::debug!(notification_id, "Cancelling reminder");
        self.emit(serde_json::json!({
            "type": "reminder_cancelled",
            "notification_id": notification_id,
        }));
    }
}

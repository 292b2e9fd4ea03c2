//! In-memory notification log for user-visible integration errors

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A user-visible notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification id
    pub notification_id: String,
    /// Message body
    pub message: String,
    /// Optional title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Thread-safe in-memory notification storage
///
/// The dispatcher records API failures here so the host can surface them;
/// nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct NotificationLog {
    notifications: DashMap<String, Notification>,
}

impl NotificationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new notification and return it
    pub fn create(&self, message: impl Into<String>, title: Option<String>) -> Notification {
        let notification = Notification {
            notification_id: ulid::Ulid::new().to_string(),
            message: message.into(),
            title,
            created_at: Utc::now(),
        };
        info!(id = %notification.notification_id, "created notification");
        self.notifications
            .insert(notification.notification_id.clone(), notification.clone());
        notification
    }

    /// Remove a notification; returns whether it existed
    pub fn dismiss(&self, notification_id: &str) -> bool {
        self.notifications.remove(notification_id).is_some()
    }

    /// All notifications, oldest first
    pub fn list(&self) -> Vec<Notification> {
        let mut all: Vec<Notification> =
            self.notifications.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }

    /// Number of stored notifications
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_dismiss() {
        let log = NotificationLog::new();
        let notification = log.create("scan failed", Some("Speisekammer".to_string()));
        assert_eq!(log.len(), 1);

        assert!(log.dismiss(&notification.notification_id));
        assert!(!log.dismiss(&notification.notification_id));
        assert!(log.is_empty());
    }

    #[test]
    fn test_list_is_oldest_first() {
        let log = NotificationLog::new();
        let first = log.create("first", None);
        let second = log.create("second", None);

        let listed = log.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].notification_id, first.notification_id);
        assert_eq!(listed[1].notification_id, second.notification_id);
    }
}

//! Notification model

use serde::{Deserialize, Serialize};

use super::enums::NotificationCategory;

/// Console notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    /// Display string ("10m ago")
    pub time: String,
    pub urgent: bool,
    pub category: NotificationCategory,
    /// Console path of the related record
    pub link: String,
    pub read: bool,
}

/// Notification list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Urgent,
}

impl NotificationFilter {
    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Urgent => notification.urgent,
        }
    }
}

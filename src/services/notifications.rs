//! Notification center service

use super::state::FleetState;
use crate::{
    error::{AppError, AppResult},
    models::{Notification, NotificationFilter},
};

#[derive(Clone, Default)]
pub struct NotificationsService;

impl NotificationsService {
    pub fn new() -> Self {
        Self
    }

    pub fn mark_read(&self, state: &mut FleetState, id: i64) -> AppResult<()> {
        if !state.mark_notification_read(id) {
            return Err(AppError::NotFound(format!("Notification {} not found", id)));
        }
        Ok(())
    }

    /// Returns how many notifications changed
    pub fn mark_all_read(&self, state: &mut FleetState) -> usize {
        let changed = state.mark_all_notifications_read();
        tracing::debug!(changed, "Notifications marked read");
        changed
    }

    pub fn list<'a>(&self, state: &'a FleetState, filter: NotificationFilter) -> Vec<&'a Notification> {
        state
            .notifications()
            .iter()
            .filter(|n| filter.matches(n))
            .collect()
    }

    pub fn unread_count(&self, state: &FleetState) -> usize {
        state.notifications().iter().filter(|n| !n.read).count()
    }
}

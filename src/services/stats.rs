//! Fleet statistics service

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    lifecycle::{self, RentalMetrics},
    state::FleetState,
};
use crate::models::{AssetStatus, IncidentStatus, UserStatus};

/// Labelled count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

/// Dashboard summary of the whole fleet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_assets: usize,
    pub utilization_percent: u32,
    pub rentals: RentalMetrics,
    pub open_incidents: usize,
    pub pending_approvals: usize,
    pub unread_notifications: usize,
    pub active_users: usize,
    pub assets_by_status: Vec<StatEntry>,
}

#[derive(Clone, Default)]
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    pub fn fleet_summary(&self, state: &FleetState, today: NaiveDate) -> FleetStats {
        let rentals = state.rental_metrics(today);
        let incidents = state.incidents();

        FleetStats {
            total_assets: state.assets().len(),
            utilization_percent: lifecycle::utilization_percent(
                rentals.active_count,
                state.assets().len(),
            ),
            rentals,
            open_incidents: incidents
                .iter()
                .filter(|i| lifecycle::is_open_incident(i))
                .count(),
            pending_approvals: incidents
                .iter()
                .filter(|i| i.status == IncidentStatus::PendingApproval)
                .count(),
            unread_notifications: state.notifications().iter().filter(|n| !n.read).count(),
            active_users: state
                .users()
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            assets_by_status: Self::assets_by_status(state),
        }
    }

    /// Asset count per status, most frequent first; empty statuses are omitted
    fn assets_by_status(state: &FleetState) -> Vec<StatEntry> {
        let mut entries: Vec<StatEntry> = [
            AssetStatus::Available,
            AssetStatus::OnLease,
            AssetStatus::Maintenance,
            AssetStatus::NeedsReview,
            AssetStatus::Deactivated,
        ]
        .into_iter()
        .map(|status| StatEntry {
            label: status.as_str().to_string(),
            value: state.assets().iter().filter(|a| a.status == status).count() as i64,
        })
        .filter(|entry| entry.value > 0)
        .collect();
        entries.sort_by(|a, b| b.value.cmp(&a.value));
        entries
    }
}

//! Damage incident model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{IncidentStatus, Severity};

/// Damage incident record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[validate(length(min = 1, message = "Incident id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Asset reference is required"))]
    pub asset_id: String,
    /// Snapshot of the asset name at report time
    pub asset_name: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    /// Display string ("Oct 24, 2023")
    pub date_reported: String,
    pub description: String,
    #[validate(range(min = 0, message = "Estimate cannot be negative"))]
    pub initial_estimate: i64,
    #[validate(range(min = 0, message = "Parts cost cannot be negative"))]
    pub parts_cost: i64,
    #[validate(range(min = 0, message = "Labor cost cannot be negative"))]
    pub labor_cost: i64,
    #[validate(range(min = 0, message = "Admin fee cannot be negative"))]
    pub admin_fee: i64,
    pub total_cost: i64,
    pub client: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
}

/// Damage report request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportDamage {
    #[validate(length(min = 1, message = "An asset must be selected"))]
    pub asset_id: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "Estimate cannot be negative"))]
    pub initial_estimate: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Assessor's cost breakdown
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[validate(range(min = 0, message = "Parts cost cannot be negative"))]
    pub parts_cost: i64,
    #[validate(range(min = 0, message = "Labor cost cannot be negative"))]
    pub labor_cost: i64,
    #[validate(range(min = 0, message = "Admin fee cannot be negative"))]
    pub admin_fee: i64,
    #[serde(default)]
    pub findings: String,
}

/// Partial incident update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncident {
    pub severity: Option<Severity>,
    pub status: Option<IncidentStatus>,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "Parts cost cannot be negative"))]
    pub parts_cost: Option<i64>,
    #[validate(range(min = 0, message = "Labor cost cannot be negative"))]
    pub labor_cost: Option<i64>,
    #[validate(range(min = 0, message = "Admin fee cannot be negative"))]
    pub admin_fee: Option<i64>,
    pub total_cost: Option<i64>,
    pub client: Option<String>,
    pub images: Option<Vec<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub findings: Option<Option<String>>,
}

impl UpdateIncident {
    pub fn status(status: IncidentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Incident {
    pub fn apply(&mut self, update: UpdateIncident) {
        if let Some(severity) = update.severity {
            self.severity = severity;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(parts_cost) = update.parts_cost {
            self.parts_cost = parts_cost;
        }
        if let Some(labor_cost) = update.labor_cost {
            self.labor_cost = labor_cost;
        }
        if let Some(admin_fee) = update.admin_fee {
            self.admin_fee = admin_fee;
        }
        if let Some(total_cost) = update.total_cost {
            self.total_cost = total_cost;
        }
        if let Some(client) = update.client {
            self.client = client;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(findings) = update.findings {
            self.findings = findings;
        }
    }
}

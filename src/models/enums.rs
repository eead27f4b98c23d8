//! Shared domain enums
//!
//! Serialized forms are the human-readable labels used by the console
//! (`"On Lease"`, `"Pending Approval"`, ...), so stored blobs stay readable.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AssetType
// ---------------------------------------------------------------------------

/// Asset category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Vehicle,
    Property,
    Equipment,
    Tools,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Vehicle => "Vehicle",
            AssetType::Property => "Property",
            AssetType::Equipment => "Equipment",
            AssetType::Tools => "Tools",
        }
    }

    /// Equipment and tools are tracked by serial number
    pub fn requires_serial(&self) -> bool {
        matches!(self, AssetType::Equipment | AssetType::Tools)
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Operational status of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    Available,
    #[serde(rename = "On Lease")]
    OnLease,
    Maintenance,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    Deactivated,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "Available",
            AssetStatus::OnLease => "On Lease",
            AssetStatus::Maintenance => "Maintenance",
            AssetStatus::NeedsReview => "Needs Review",
            AssetStatus::Deactivated => "Deactivated",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole / UserStatus
// ---------------------------------------------------------------------------

/// Console account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Staff,
    Inspector,
    #[serde(rename = "Financial Controller")]
    FinancialController,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Staff => "Staff",
            UserRole::Inspector => "Inspector",
            UserRole::FinancialController => "Financial Controller",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}

// ---------------------------------------------------------------------------
// RentalStatus / PaymentPlan
// ---------------------------------------------------------------------------

/// Rental agreement status.
///
/// `Overdue` is normally a read-time overlay on `Active`
/// (see [`crate::services::lifecycle::effective_status`]); it is only stored
/// when an explicit update writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentalStatus {
    Draft,
    Active,
    Overdue,
    Completed,
    Terminated,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Draft => "Draft",
            RentalStatus::Active => "Active",
            RentalStatus::Overdue => "Overdue",
            RentalStatus::Completed => "Completed",
            RentalStatus::Terminated => "Terminated",
        }
    }

    /// Completed and Terminated agreements accept no further transitions
    pub fn is_closed(&self) -> bool {
        matches!(self, RentalStatus::Completed | RentalStatus::Terminated)
    }

    /// Agreement currently holds its asset
    pub fn is_open(&self) -> bool {
        matches!(self, RentalStatus::Active | RentalStatus::Overdue)
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentPlan {
    Full,
    Partial,
}

// ---------------------------------------------------------------------------
// Severity / IncidentStatus
// ---------------------------------------------------------------------------

/// Damage severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

/// Incident lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
    Fixed,
    #[serde(rename = "Sent to Insurance")]
    SentToInsurance,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::NeedsReview => "Needs Review",
            IncidentStatus::PendingApproval => "Pending Approval",
            IncidentStatus::Approved => "Approved",
            IncidentStatus::Fixed => "Fixed",
            IncidentStatus::SentToInsurance => "Sent to Insurance",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, IncidentStatus::Fixed | IncidentStatus::SentToInsurance)
    }

    /// Allowed moves of the incident state machine
    pub fn can_transition_to(&self, next: IncidentStatus) -> bool {
        use IncidentStatus::*;
        match (self, next) {
            (NeedsReview, PendingApproval) | (NeedsReview, Approved) => true,
            // re-assessment of an escalated case may settle below the threshold
            (PendingApproval, PendingApproval) | (PendingApproval, Approved) => true,
            (Approved, Fixed) => true,
            (from, SentToInsurance) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationCategory {
    Lease,
    Incident,
    Maintenance,
    System,
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_serde() {
        assert_eq!(
            serde_json::to_string(&AssetStatus::OnLease).unwrap(),
            "\"On Lease\""
        );
        assert_eq!(
            serde_json::from_str::<IncidentStatus>("\"Sent to Insurance\"").unwrap(),
            IncidentStatus::SentToInsurance
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"Financial Controller\"").unwrap(),
            UserRole::FinancialController
        );
    }

    #[test]
    fn test_display_matches_serialized_label() {
        for status in [
            IncidentStatus::NeedsReview,
            IncidentStatus::PendingApproval,
            IncidentStatus::Approved,
            IncidentStatus::Fixed,
            IncidentStatus::SentToInsurance,
        ] {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }
    }

    #[test]
    fn test_incident_transitions() {
        use IncidentStatus::*;
        assert!(NeedsReview.can_transition_to(Approved));
        assert!(NeedsReview.can_transition_to(PendingApproval));
        assert!(PendingApproval.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Fixed));
        assert!(Approved.can_transition_to(SentToInsurance));
        assert!(!NeedsReview.can_transition_to(Fixed));
        assert!(!Fixed.can_transition_to(SentToInsurance));
        assert!(!SentToInsurance.can_transition_to(Approved));
    }

    #[test]
    fn test_rental_status_groups() {
        assert!(RentalStatus::Completed.is_closed());
        assert!(RentalStatus::Terminated.is_closed());
        assert!(RentalStatus::Overdue.is_open());
        assert!(!RentalStatus::Draft.is_open());
    }
}

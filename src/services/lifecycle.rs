//! Lifecycle derivation rules
//!
//! Pure functions: rental status overlay, incident approval threshold, the
//! asset status changes that follow rental and incident actions, and the
//! read-side rental metrics. Nothing here touches stored state.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{AssetStatus, Incident, IncidentStatus, Rental, RentalStatus, UpdateAsset},
};

/// Assessed repair totals strictly above this need escalated approval
pub const ESCALATION_THRESHOLD: i64 = 250_000;

/// Sum of money amounts, rejecting totals that do not fit in an `i64`
pub fn checked_total(amounts: &[i64]) -> AppResult<i64> {
    amounts
        .iter()
        .try_fold(0i64, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| AppError::Validation("Amount total is out of range".to_string()))
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Rentals
// ---------------------------------------------------------------------------

/// Status shown for a rental on `today`.
///
/// An `Active` agreement whose end date is strictly before `today` reads as
/// `Overdue`; every other status is returned unchanged.
pub fn effective_status(rental: &Rental, today: NaiveDate) -> RentalStatus {
    if rental.status == RentalStatus::Active && rental.end_date < today {
        RentalStatus::Overdue
    } else {
        rental.status
    }
}

/// Rental dashboard figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalMetrics {
    /// Agreements whose effective status is Active or Overdue
    pub active_count: usize,
    pub overdue_count: usize,
    /// Sum of `total` over the active pipeline
    pub live_exposure: i64,
    /// Sum of `paid` over completed agreements
    pub realized_revenue: i64,
}

pub fn rental_metrics<'a, I>(rentals: I, today: NaiveDate) -> RentalMetrics
where
    I: IntoIterator<Item = &'a Rental>,
{
    rentals
        .into_iter()
        .fold(RentalMetrics::default(), |mut metrics, rental| {
            match effective_status(rental, today) {
                RentalStatus::Active => {
                    metrics.active_count += 1;
                    metrics.live_exposure = metrics.live_exposure.saturating_add(rental.total);
                }
                RentalStatus::Overdue => {
                    metrics.active_count += 1;
                    metrics.overdue_count += 1;
                    metrics.live_exposure = metrics.live_exposure.saturating_add(rental.total);
                }
                RentalStatus::Completed => {
                    metrics.realized_revenue = metrics.realized_revenue.saturating_add(rental.paid)
                }
                RentalStatus::Draft | RentalStatus::Terminated => {}
            }
            metrics
        })
}

/// Agreement total: daily rate over the billable days plus the admin fee
pub fn rental_total(base_rate: i64, days: i64, admin_fee: i64) -> AppResult<i64> {
    let rent = base_rate
        .checked_mul(days)
        .ok_or_else(|| AppError::Validation("Rental amount is out of range".to_string()))?;
    checked_total(&[rent, admin_fee])
}

/// Asset change when an agreement takes effect
pub fn asset_on_lease(renter_name: &str) -> UpdateAsset {
    UpdateAsset::handover(AssetStatus::OnLease, Some(renter_name.to_string()))
}

/// Asset change when an agreement is completed or terminated
pub fn asset_released() -> UpdateAsset {
    UpdateAsset::handover(AssetStatus::Available, None)
}

/// Share of the fleet out on an agreement, rounded to a whole percent
pub fn utilization_percent(active_rentals: usize, asset_count: usize) -> u32 {
    let assets = asset_count.max(1) as f64;
    ((active_rentals as f64 / assets) * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

/// Outcome of costing a damage assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDecision {
    pub total: i64,
    pub requires_escalation: bool,
    /// Status the incident moves to
    pub status: IncidentStatus,
    /// Status the linked asset moves to, `None` when it stays as is
    pub asset_status: Option<AssetStatus>,
}

impl AssessmentDecision {
    pub fn asset_update(&self) -> Option<UpdateAsset> {
        self.asset_status.map(UpdateAsset::status)
    }
}

pub fn requires_escalation(total: i64, threshold: i64) -> bool {
    total > threshold
}

/// Decide the approval path for an assessed repair.
///
/// Above `threshold` the case waits for escalated approval and the asset is
/// left untouched; otherwise repairs are approved and the asset goes to
/// maintenance. Fails when the costs do not add up to a representable total.
pub fn assess_costs(
    parts_cost: i64,
    labor_cost: i64,
    admin_fee: i64,
    threshold: i64,
) -> AppResult<AssessmentDecision> {
    let total = checked_total(&[parts_cost, labor_cost, admin_fee])?;
    let decision = if requires_escalation(total, threshold) {
        AssessmentDecision {
            total,
            requires_escalation: true,
            status: IncidentStatus::PendingApproval,
            asset_status: None,
        }
    } else {
        AssessmentDecision {
            total,
            requires_escalation: false,
            status: IncidentStatus::Approved,
            asset_status: Some(AssetStatus::Maintenance),
        }
    };
    Ok(decision)
}

/// Asset change when damage is reported against it
pub fn asset_on_damage_reported() -> UpdateAsset {
    UpdateAsset::status(AssetStatus::NeedsReview)
}

/// Incidents still needing work: neither approved nor fixed
pub fn is_open_incident(incident: &Incident) -> bool {
    !matches!(
        incident.status,
        IncidentStatus::Approved | IncidentStatus::Fixed
    )
}

/// Starting figures offered to the assessor: a 60/40 parts/labor split of
/// the initial estimate where no cost has been entered yet.
pub fn suggested_split(incident: &Incident) -> (i64, i64) {
    let parts = if incident.parts_cost > 0 {
        incident.parts_cost
    } else {
        (i128::from(incident.initial_estimate) * 6 / 10) as i64
    };
    let labor = if incident.labor_cost > 0 {
        incident.labor_cost
    } else {
        (i128::from(incident.initial_estimate) * 4 / 10) as i64
    };
    (parts, labor)
}

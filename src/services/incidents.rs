//! Damage incident service

use chrono::NaiveDate;
use validator::Validate;

use super::{
    generate_id,
    lifecycle::{self, AssessmentDecision},
    state::FleetState,
};
use crate::{
    config::IncidentsConfig,
    error::{AppError, AppResult},
    models::{
        Assessment, AssetStatus, Incident, IncidentStatus, ReportDamage, UpdateAsset,
        UpdateIncident,
    },
};

#[derive(Clone)]
pub struct IncidentsService {
    config: IncidentsConfig,
}

impl IncidentsService {
    pub fn new(config: IncidentsConfig) -> Self {
        Self { config }
    }

    /// Declare damage against an asset and flag the asset for review
    pub fn report_damage(
        &self,
        state: &mut FleetState,
        data: ReportDamage,
        today: NaiveDate,
    ) -> AppResult<Incident> {
        data.validate()?;
        let asset = state.find_asset(&data.asset_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "Asset {} is no longer in the fleet registry",
                data.asset_id
            ))
        })?;

        let admin_fee = self.config.report_admin_fee;
        let total_cost = lifecycle::checked_total(&[data.initial_estimate, admin_fee])?;
        let incident = Incident {
            id: generate_id("INC", 5, |id| state.find_incident(id).is_some()),
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            severity: data.severity,
            status: IncidentStatus::NeedsReview,
            date_reported: today.format("%b %d, %Y").to_string(),
            description: data.description,
            initial_estimate: data.initial_estimate,
            parts_cost: 0,
            labor_cost: 0,
            admin_fee,
            total_cost,
            client: asset
                .custodian
                .clone()
                .unwrap_or_else(|| self.config.default_client.clone()),
            images: data.images,
            findings: None,
        };

        state.add_incident(incident.clone())?;
        state.update_asset(&incident.asset_id, lifecycle::asset_on_damage_reported())?;
        tracing::info!(
            id = %incident.id,
            asset_id = %incident.asset_id,
            severity = ?incident.severity,
            "Damage reported"
        );
        Ok(incident)
    }

    /// Figures pre-filled for the assessor
    pub fn suggested_assessment(&self, incident: &Incident) -> Assessment {
        let (parts_cost, labor_cost) = lifecycle::suggested_split(incident);
        Assessment {
            parts_cost,
            labor_cost,
            admin_fee: if incident.admin_fee > 0 {
                incident.admin_fee
            } else {
                self.config.assessment_admin_fee
            },
            findings: incident.findings.clone().unwrap_or_default(),
        }
    }

    /// Record the assessor's costing and route it through the approval threshold
    pub fn assess(
        &self,
        state: &mut FleetState,
        id: &str,
        assessment: Assessment,
    ) -> AppResult<AssessmentDecision> {
        assessment.validate()?;
        let incident = self.get(state, id)?;
        let decision = lifecycle::assess_costs(
            assessment.parts_cost,
            assessment.labor_cost,
            assessment.admin_fee,
            self.config.escalation_threshold,
        )?;
        self.ensure_transition(&incident, decision.status)?;

        let findings = Some(assessment.findings).filter(|f| !f.trim().is_empty());
        state.update_incident(
            id,
            UpdateIncident {
                status: Some(decision.status),
                parts_cost: Some(assessment.parts_cost),
                labor_cost: Some(assessment.labor_cost),
                admin_fee: Some(assessment.admin_fee),
                total_cost: Some(decision.total),
                findings: Some(findings),
                ..Default::default()
            },
        )?;
        if let Some(update) = decision.asset_update() {
            self.update_linked_asset(state, &incident, update)?;
        }

        if decision.requires_escalation {
            tracing::info!(
                id,
                total = decision.total,
                threshold = self.config.escalation_threshold,
                "Assessment exceeds limit, escalated for approval"
            );
        } else {
            tracing::info!(id, total = decision.total, "Assessment approved, repairs authorized");
        }
        Ok(decision)
    }

    /// Secondary authorization of an escalated case
    pub fn approve_escalated(&self, state: &mut FleetState, id: &str) -> AppResult<Incident> {
        let incident = self.get(state, id)?;
        if incident.status != IncidentStatus::PendingApproval {
            return Err(AppError::BusinessRule(format!(
                "Incident {} is {}; only escalated cases await approval",
                id, incident.status
            )));
        }

        state.update_incident(id, UpdateIncident::status(IncidentStatus::Approved))?;
        self.update_linked_asset(state, &incident, UpdateAsset::status(AssetStatus::Maintenance))?;
        tracing::info!(id, total = incident.total_cost, "Escalated assessment approved");
        self.get(state, id)
    }

    /// Hand the case file over to the insurance carrier
    pub fn send_to_insurance(&self, state: &mut FleetState, id: &str) -> AppResult<Incident> {
        let incident = self.get(state, id)?;
        self.ensure_transition(&incident, IncidentStatus::SentToInsurance)?;
        state.update_incident(id, UpdateIncident::status(IncidentStatus::SentToInsurance))?;
        tracing::info!(id, "Incident sent to insurance");
        self.get(state, id)
    }

    /// Close an approved repair and return the asset to service
    pub fn mark_fixed(&self, state: &mut FleetState, id: &str) -> AppResult<Incident> {
        let incident = self.get(state, id)?;
        self.ensure_transition(&incident, IncidentStatus::Fixed)?;
        state.update_incident(id, UpdateIncident::status(IncidentStatus::Fixed))?;

        let in_maintenance = state
            .incident_asset(&incident)
            .is_some_and(|asset| asset.status == AssetStatus::Maintenance);
        if in_maintenance {
            state.update_asset(&incident.asset_id, UpdateAsset::status(AssetStatus::Available))?;
        }
        tracing::info!(id, "Repair completed");
        self.get(state, id)
    }

    /// Incidents, optionally restricted to one status
    pub fn dashboard<'a>(
        &self,
        state: &'a FleetState,
        status: Option<IncidentStatus>,
    ) -> Vec<&'a Incident> {
        state
            .incidents()
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .collect()
    }

    /// Incidents neither approved nor fixed
    pub fn open_count(&self, state: &FleetState) -> usize {
        state
            .incidents()
            .iter()
            .filter(|i| lifecycle::is_open_incident(i))
            .count()
    }

    fn get(&self, state: &FleetState, id: &str) -> AppResult<Incident> {
        state
            .find_incident(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Incident {} not found", id)))
    }

    fn ensure_transition(&self, incident: &Incident, next: IncidentStatus) -> AppResult<()> {
        if incident.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::BusinessRule(format!(
                "Incident {} cannot move from {} to {}",
                incident.id, incident.status, next
            )))
        }
    }

    fn update_linked_asset(
        &self,
        state: &mut FleetState,
        incident: &Incident,
        update: UpdateAsset,
    ) -> AppResult<()> {
        if !state.update_asset(&incident.asset_id, update)? {
            tracing::warn!(
                incident_id = %incident.id,
                asset_id = %incident.asset_id,
                "Damaged asset no longer exists"
            );
        }
        Ok(())
    }
}

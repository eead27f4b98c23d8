//! Rental agreement service

use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

use super::{
    generate_id,
    lifecycle::{self, RentalMetrics},
    state::FleetState,
};
use crate::{
    config::RentalsConfig,
    error::{AppError, AppResult},
    models::{
        rental::billable_days, AssetStatus, CreateRental, PaymentPlan, Rental, RentalStatus,
        RentalView, UpdateRental,
    },
};

/// Rentals list with dashboard figures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalOverview<'a> {
    pub rentals: Vec<RentalView<'a>>,
    pub metrics: RentalMetrics,
}

#[derive(Clone)]
pub struct RentalsService {
    config: RentalsConfig,
}

impl RentalsService {
    pub fn new(config: RentalsConfig) -> Self {
        Self { config }
    }

    /// Draw up an agreement for an available asset.
    ///
    /// Unless saved as a draft the agreement takes effect immediately and the
    /// asset goes on lease to the renter.
    pub fn create_agreement(&self, state: &mut FleetState, data: CreateRental) -> AppResult<Rental> {
        data.validate()?;
        if data.end_date < data.start_date {
            return Err(AppError::Validation(
                "Return date cannot be before the start date".to_string(),
            ));
        }

        let asset = state
            .find_asset(&data.asset_id)
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", data.asset_id)))?;
        if asset.status != AssetStatus::Available {
            return Err(AppError::BusinessRule(format!(
                "Asset {} is {}; only Available assets can be leased",
                asset.id, asset.status
            )));
        }
        let asset_name = asset.name.clone();

        let base_rate = data.base_rate.unwrap_or(self.config.default_daily_rate);
        let days = billable_days(data.start_date, data.end_date);
        let total = lifecycle::rental_total(base_rate, days, self.config.admin_fee)?;
        let paid = match data.payment_plan {
            PaymentPlan::Full => total,
            PaymentPlan::Partial => data.paid_now,
        };
        if paid > total {
            return Err(AppError::Validation(format!(
                "Upfront payment {} exceeds the agreement total {}",
                paid, total
            )));
        }

        let rental = Rental {
            id: generate_id("RA", 4, |id| state.find_rental(id).is_some()),
            renter_name: data.renter_name,
            renter_email: data.renter_email,
            renter_phone: data.renter_phone,
            asset_id: data.asset_id,
            asset_name,
            start_date: data.start_date,
            end_date: data.end_date,
            base_rate,
            admin_fee: self.config.admin_fee,
            total,
            paid,
            status: if data.draft {
                RentalStatus::Draft
            } else {
                RentalStatus::Active
            },
            payment_plan: data.payment_plan,
        };

        state.add_rental(rental.clone())?;
        if rental.status == RentalStatus::Active {
            state.update_asset(&rental.asset_id, lifecycle::asset_on_lease(&rental.renter_name))?;
        }

        tracing::info!(
            id = %rental.id,
            asset_id = %rental.asset_id,
            days,
            total,
            status = %rental.status,
            "Rental agreement created"
        );
        Ok(rental)
    }

    /// Put a draft agreement into effect
    pub fn activate(&self, state: &mut FleetState, id: &str) -> AppResult<Rental> {
        let rental = self.get(state, id)?;
        if rental.status != RentalStatus::Draft {
            return Err(AppError::BusinessRule(format!(
                "Rental {} is {}; only drafts can be activated",
                id, rental.status
            )));
        }
        match state.rental_asset(&rental) {
            Some(asset) if asset.status == AssetStatus::Available => {}
            Some(asset) => {
                return Err(AppError::BusinessRule(format!(
                    "Asset {} is {}; only Available assets can be leased",
                    asset.id, asset.status
                )))
            }
            None => {
                return Err(AppError::NotFound(format!(
                    "Asset {} referenced by rental {} not found",
                    rental.asset_id, id
                )))
            }
        }

        state.update_rental(id, UpdateRental::status(RentalStatus::Active))?;
        state.update_asset(&rental.asset_id, lifecycle::asset_on_lease(&rental.renter_name))?;
        tracing::info!(id, "Rental activated");
        self.get(state, id)
    }

    /// End an agreement early
    pub fn terminate(&self, state: &mut FleetState, id: &str) -> AppResult<Rental> {
        let rental = self.get(state, id)?;
        if rental.status.is_closed() {
            return Err(AppError::BusinessRule(format!(
                "Rental {} is already {}",
                id, rental.status
            )));
        }

        state.update_rental(id, UpdateRental::status(RentalStatus::Terminated))?;
        if rental.status.is_open() {
            self.release_asset(state, &rental)?;
        }
        tracing::info!(id, "Rental terminated");
        self.get(state, id)
    }

    /// Close an agreement as returned and fully paid
    pub fn complete(&self, state: &mut FleetState, id: &str) -> AppResult<Rental> {
        let rental = self.get(state, id)?;
        if !rental.status.is_open() {
            return Err(AppError::BusinessRule(format!(
                "Rental {} is {}; only running agreements can be completed",
                id, rental.status
            )));
        }

        state.update_rental(
            id,
            UpdateRental {
                status: Some(RentalStatus::Completed),
                paid: Some(rental.total),
                ..Default::default()
            },
        )?;
        self.release_asset(state, &rental)?;
        tracing::info!(id, total = rental.total, "Rental completed");
        self.get(state, id)
    }

    /// Rentals as of `today`, filtered by display status and a search term
    /// over renter, asset and agreement id
    pub fn overview<'a>(
        &self,
        state: &'a FleetState,
        today: NaiveDate,
        status: Option<RentalStatus>,
        term: &str,
    ) -> RentalOverview<'a> {
        let term = term.to_lowercase();
        let rentals = state
            .rental_views(today)
            .into_iter()
            .filter(|view| status.map_or(true, |s| view.display_status == s))
            .filter(|view| {
                term.is_empty()
                    || view.rental.renter_name.to_lowercase().contains(&term)
                    || view.rental.asset_name.to_lowercase().contains(&term)
                    || view.rental.id.to_lowercase().contains(&term)
            })
            .collect();

        RentalOverview {
            rentals,
            metrics: state.rental_metrics(today),
        }
    }

    fn get(&self, state: &FleetState, id: &str) -> AppResult<Rental> {
        state
            .find_rental(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Rental {} not found", id)))
    }

    fn release_asset(&self, state: &mut FleetState, rental: &Rental) -> AppResult<()> {
        if !state.update_asset(&rental.asset_id, lifecycle::asset_released())? {
            tracing::warn!(
                rental_id = %rental.id,
                asset_id = %rental.asset_id,
                "Leased asset no longer exists"
            );
        }
        Ok(())
    }
}

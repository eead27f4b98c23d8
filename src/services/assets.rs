//! Asset inventory service

use chrono::NaiveDate;
use validator::Validate;

use super::{generate_id, lifecycle, state::FleetState};
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::DEFAULT_ASSET_IMAGE, Asset, AssetStatus, CreateAsset, Rental, UpdateAsset,
    },
};

#[derive(Clone, Default)]
pub struct AssetsService;

impl AssetsService {
    pub fn new() -> Self {
        Self
    }

    /// Register a new asset
    pub fn register(&self, state: &mut FleetState, data: CreateAsset) -> AppResult<Asset> {
        data.validate()?;
        if data.asset_type.requires_serial() && data.serial.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "A serial number is required for {}",
                data.asset_type
            )));
        }

        let id = generate_id("ASSET", 5, |id| state.find_asset(id).is_some());
        let asset = Asset {
            id,
            name: data.name,
            asset_type: data.asset_type,
            status: data.status.unwrap_or(AssetStatus::Available),
            location: data.location,
            img: data
                .img
                .filter(|img| !img.is_empty())
                .unwrap_or_else(|| DEFAULT_ASSET_IMAGE.to_string()),
            serial: data.serial,
            vin: data.vin.filter(|vin| !vin.is_empty()),
            health: data.health.unwrap_or(100),
            custodian: None,
            description: data.description,
        };

        state.add_asset(asset.clone())?;
        tracing::info!(id = %asset.id, asset_type = %asset.asset_type, "Asset registered");
        Ok(asset)
    }

    /// Edit an existing asset
    pub fn edit(&self, state: &mut FleetState, id: &str, update: UpdateAsset) -> AppResult<Asset> {
        let mut preview = state
            .find_asset(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;
        preview.apply(update.clone());
        if preview.asset_type.requires_serial() && preview.serial.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "A serial number is required for {}",
                preview.asset_type
            )));
        }

        state.update_asset(id, update)?;
        Ok(preview)
    }

    /// Take an asset out of service
    pub fn deactivate(&self, state: &mut FleetState, id: &str) -> AppResult<()> {
        if !state.update_asset(id, UpdateAsset::status(AssetStatus::Deactivated))? {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        tracing::info!(id, "Asset deactivated");
        Ok(())
    }

    /// Delete an asset. Rentals and incidents keep their dangling reference.
    pub fn remove(&self, state: &mut FleetState, id: &str) -> AppResult<()> {
        if !state.delete_asset(id) {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        tracing::info!(id, "Asset removed");
        Ok(())
    }

    /// Case-insensitive search over name, id and serial, optionally by status
    pub fn search<'a>(
        &self,
        state: &'a FleetState,
        term: &str,
        status: Option<AssetStatus>,
    ) -> Vec<&'a Asset> {
        let term = term.to_lowercase();
        state
            .assets()
            .iter()
            .filter(|asset| {
                term.is_empty()
                    || asset.name.to_lowercase().contains(&term)
                    || asset.id.to_lowercase().contains(&term)
                    || asset.serial.to_lowercase().contains(&term)
            })
            .filter(|asset| status.map_or(true, |s| asset.status == s))
            .collect()
    }

    /// Agreements that reference the asset, newest first
    pub fn rental_history<'a>(&self, state: &'a FleetState, asset_id: &str) -> Vec<&'a Rental> {
        state
            .rentals()
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .collect()
    }

    /// Percentage of the fleet currently out on an agreement
    pub fn utilization_percent(&self, state: &FleetState, today: NaiveDate) -> u32 {
        let metrics = state.rental_metrics(today);
        lifecycle::utilization_percent(metrics.active_count, state.assets().len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        models::AssetType,
        repository::{memory::MemoryStore, Repository},
    };

    fn state() -> FleetState {
        FleetState::load(Repository::new(Arc::new(MemoryStore::new()), "assetum_"), true)
    }

    fn create(asset_type: AssetType, serial: &str) -> CreateAsset {
        CreateAsset {
            name: "Hilti TE 70 Hammer Drill".to_string(),
            asset_type,
            status: None,
            location: "Berlin Depot".to_string(),
            img: None,
            serial: serial.to_string(),
            vin: Some(String::new()),
            health: None,
            description: None,
        }
    }

    #[test]
    fn test_register_applies_defaults() {
        let mut state = state();
        let asset = AssetsService::new()
            .register(&mut state, create(AssetType::Tools, "HIL-TE70-01"))
            .unwrap();
        assert!(asset.id.starts_with("ASSET-"));
        assert_eq!(asset.status, AssetStatus::Available);
        assert_eq!(asset.health, 100);
        assert_eq!(asset.img, DEFAULT_ASSET_IMAGE);
        assert!(asset.vin.is_none());
        assert_eq!(state.assets()[0], asset);
    }

    #[test]
    fn test_register_requires_serial_for_tools() {
        let mut state = state();
        let service = AssetsService::new();
        assert!(matches!(
            service.register(&mut state, create(AssetType::Tools, " ")),
            Err(AppError::Validation(_))
        ));
        assert!(service
            .register(&mut state, create(AssetType::Property, ""))
            .is_ok());
    }

    #[test]
    fn test_edit_and_deactivate() {
        let mut state = state();
        let service = AssetsService::new();
        let edited = service
            .edit(
                &mut state,
                "V-10294",
                UpdateAsset {
                    location: Some("Leipzig Hub".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.location, "Leipzig Hub");
        assert_eq!(state.find_asset("V-10294").unwrap().location, "Leipzig Hub");

        service.deactivate(&mut state, "V-10294").unwrap();
        assert_eq!(
            state.find_asset("V-10294").unwrap().status,
            AssetStatus::Deactivated
        );
        assert!(matches!(
            service.deactivate(&mut state, "V-0"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_edit_cannot_blank_required_serial() {
        let mut state = state();
        let result = AssetsService::new().edit(
            &mut state,
            "E-7721",
            UpdateAsset {
                serial: Some(String::new()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.find_asset("E-7721").unwrap().serial, "CAT-320-X");
    }

    #[test]
    fn test_search() {
        let state = state();
        let service = AssetsService::new();
        let hits = service.search(&state, "cat-320", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "E-7721");
        assert_eq!(service.search(&state, "", Some(AssetStatus::Maintenance)).len(), 1);
        assert_eq!(service.search(&state, "", None).len(), 3);
    }

    #[test]
    fn test_rental_history_and_utilization() {
        let state = state();
        let service = AssetsService::new();
        assert_eq!(service.rental_history(&state, "E-7721").len(), 1);
        assert!(service.rental_history(&state, "F-4412").is_empty());
        let today = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(service.utilization_percent(&state, today), 33);
    }
}

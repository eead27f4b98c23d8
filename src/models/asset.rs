//! Asset model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::{AssetStatus, AssetType};

pub const DEFAULT_ASSET_IMAGE: &str =
    "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?auto=format&fit=crop&q=80&w=400&h=400";

/// Fleet asset record (vehicle, property, equipment or tool)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[validate(length(min = 1, message = "Asset id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub location: String,
    pub img: String,
    pub serial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    /// Condition score, 0-100
    #[validate(range(max = 100, message = "Health must be between 0 and 100"))]
    pub health: u8,
    /// Current holder of the asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custodian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Register asset request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAsset {
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub status: Option<AssetStatus>,
    #[serde(default)]
    pub location: String,
    pub img: Option<String>,
    #[serde(default)]
    pub serial: String,
    pub vin: Option<String>,
    #[validate(range(max = 100, message = "Health must be between 0 and 100"))]
    pub health: Option<u8>,
    pub description: Option<String>,
}

/// Partial asset update.
///
/// Clearable fields use a double option: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAsset {
    #[validate(length(min = 1, message = "Asset name cannot be empty"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub img: Option<String>,
    pub serial: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub vin: Option<Option<String>>,
    #[validate(range(max = 100, message = "Health must be between 0 and 100"))]
    pub health: Option<u8>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub custodian: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

impl UpdateAsset {
    /// Status change only
    pub fn status(status: AssetStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Status change that also sets or clears the custodian
    pub fn handover(status: AssetStatus, custodian: Option<String>) -> Self {
        Self {
            status: Some(status),
            custodian: Some(custodian),
            ..Default::default()
        }
    }
}

impl Asset {
    /// Merge a partial update into this record
    pub fn apply(&mut self, update: UpdateAsset) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(asset_type) = update.asset_type {
            self.asset_type = asset_type;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(img) = update.img {
            self.img = img;
        }
        if let Some(serial) = update.serial {
            self.serial = serial;
        }
        if let Some(vin) = update.vin {
            self.vin = vin;
        }
        if let Some(health) = update.health {
            self.health = health;
        }
        if let Some(custodian) = update.custodian {
            self.custodian = custodian;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}

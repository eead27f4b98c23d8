//! Data models for Assetum

pub mod asset;
pub mod enums;
pub mod incident;
pub mod notification;
pub mod rental;
pub mod seed;
pub mod user;

// Re-export commonly used types
pub use asset::{Asset, CreateAsset, UpdateAsset};
pub use enums::{
    AssetStatus, AssetType, IncidentStatus, NotificationCategory, PaymentPlan, RentalStatus,
    Severity, UserRole, UserStatus,
};
pub use incident::{Assessment, Incident, ReportDamage, UpdateIncident};
pub use notification::{Notification, NotificationFilter};
pub use rental::{CreateRental, Rental, RentalView, UpdateRental};
pub use user::{CreateUser, UpdateUser, User};

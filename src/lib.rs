//! Assetum fleet management core
//!
//! Owns the in-memory fleet state (assets, users, rentals, damage incidents
//! and notifications), persists each collection to a key-value store and
//! applies the rental and incident lifecycle rules on top of it.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::{FleetState, Services};

//! Integration tests for Assetum
//!
//! Exercise the public API end to end against a file-backed store in a
//! temporary directory.

mod persistence;
mod workflows;

use std::{path::Path, sync::Arc};

use assetum::{
    config::AppConfig,
    repository::{file::FileStore, Repository},
    FleetState, Services,
};

pub fn repository(dir: &Path) -> Repository {
    let store = FileStore::open(dir).expect("Failed to open file store");
    Repository::new(Arc::new(store), "assetum_")
}

pub fn open_state(dir: &Path) -> FleetState {
    FleetState::load(repository(dir), true)
}

pub fn open_services(dir: &Path) -> Services {
    Services::new(open_state(dir), &AppConfig::default())
}

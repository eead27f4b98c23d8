//! Store round-trips across sessions

use std::fs;

use assetum::models::{seed, AssetStatus, RentalStatus};
use serde_json::Value;

use crate::{open_state, repository};

#[test]
fn test_fresh_store_is_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let state = open_state(dir.path());
    assert_eq!(state.assets().len(), 3);
    assert_eq!(state.users().len(), 2);
    assert_eq!(state.rentals()[0].id, "RA-2201");
    assert_eq!(state.incidents()[0].id, "CON-7782");
    assert_eq!(state.notifications().len(), 2);
}

#[test]
fn test_mutation_survives_reload_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open_state(dir.path());
    let mut asset = seed::assets().remove(0);
    asset.id = "T-0001".to_string();
    asset.name = "Makita Cutoff Saw".to_string();
    state.add_asset(asset).unwrap();
    drop(state);

    let state = open_state(dir.path());
    assert_eq!(state.assets().len(), 4);
    assert_eq!(state.assets()[0].id, "T-0001");
    assert_eq!(state.assets()[1].id, "V-10294");
}

#[test]
fn test_only_changed_collection_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open_state(dir.path());
    assert!(state.mark_notification_read(1));

    assert!(dir.path().join("assetum_notifications.json").exists());
    assert!(!dir.path().join("assetum_assets.json").exists());
    assert!(!dir.path().join("assetum_rentals.json").exists());
}

#[test]
fn test_blob_uses_versioned_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open_state(dir.path());
    assert!(state.mark_notification_read(2));

    let raw = fs::read_to_string(dir.path().join("assetum_notifications.json")).unwrap();
    let blob: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(blob["version"], 1);
    assert_eq!(blob["records"][1]["read"], true);
    assert_eq!(blob["records"][0]["category"], "Lease");
}

#[test]
fn test_stored_empty_collection_is_not_reseeded() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open_state(dir.path());
    assert!(state.delete_user("1"));
    assert!(state.delete_user("2"));
    drop(state);

    let state = open_state(dir.path());
    assert!(state.users().is_empty());
    assert_eq!(state.assets().len(), 3);
}

#[test]
fn test_corrupt_blob_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("assetum_assets.json"), "{not json").unwrap();
    fs::write(
        dir.path().join("assetum_users.json"),
        r#"{"version":99,"records":[]}"#,
    )
    .unwrap();

    let state = open_state(dir.path());
    assert_eq!(state.assets().len(), 3);
    assert_eq!(state.users().len(), 2);
}

#[test]
fn test_legacy_bare_array_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let mut assets = seed::assets();
    assets.truncate(1);
    fs::write(
        dir.path().join("assetum_assets.json"),
        serde_json::to_string(&assets).unwrap(),
    )
    .unwrap();

    let state = open_state(dir.path());
    assert_eq!(state.assets().len(), 1);
    assert_eq!(state.assets()[0].status, AssetStatus::Available);
}

#[test]
fn test_overdue_is_never_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = open_state(dir.path());
    // seeded RA-2201 ended in 2023, so it reads overdue today
    let today = assetum::services::lifecycle::today();
    assert_eq!(state.rental_views(today)[0].display_status, RentalStatus::Overdue);

    state
        .update_rental(
            "RA-2201",
            assetum::models::UpdateRental {
                paid: Some(1000),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = repository(dir.path())
        .try_load::<assetum::models::Rental>(assetum::repository::Collection::Rentals)
        .unwrap()
        .unwrap();
    assert_eq!(stored[0].status, RentalStatus::Active);
    assert_eq!(stored[0].paid, 1000);
}

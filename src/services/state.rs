//! Application state container
//!
//! `FleetState` owns the five entity collections for the lifetime of a
//! session. Every mutation goes through it and writes back only the
//! collection it changed. Missing ids on update/delete are a silent no-op.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::lifecycle::{self, RentalMetrics};
use crate::{
    error::AppResult,
    models::{
        seed, Asset, Incident, Notification, Rental, RentalView, UpdateAsset, UpdateIncident,
        UpdateRental, UpdateUser, User,
    },
    repository::{Collection, Repository},
};

pub struct FleetState {
    repository: Repository,
    assets: Vec<Asset>,
    users: Vec<User>,
    rentals: Vec<Rental>,
    incidents: Vec<Incident>,
    notifications: Vec<Notification>,
    /// Collections whose last write failed
    dirty: HashSet<Collection>,
}

fn load_collection<T: DeserializeOwned>(
    repository: &Repository,
    collection: Collection,
    seed_on_missing: bool,
    seed: fn() -> Vec<T>,
) -> Vec<T> {
    repository.load(collection, || if seed_on_missing { seed() } else { Vec::new() })
}

impl FleetState {
    /// Load every collection from the store, falling back to the seed
    /// dataset (or empty collections) for absent or corrupt blobs.
    pub fn load(repository: Repository, seed_on_missing: bool) -> Self {
        let state = Self {
            assets: load_collection(&repository, Collection::Assets, seed_on_missing, seed::assets),
            users: load_collection(&repository, Collection::Users, seed_on_missing, seed::users),
            rentals: load_collection(&repository, Collection::Rentals, seed_on_missing, seed::rentals),
            incidents: load_collection(
                &repository,
                Collection::Incidents,
                seed_on_missing,
                seed::incidents,
            ),
            notifications: load_collection(
                &repository,
                Collection::Notifications,
                seed_on_missing,
                seed::notifications,
            ),
            repository,
            dirty: HashSet::new(),
        };

        let metrics = state.rental_metrics(lifecycle::today());
        tracing::info!(
            assets = state.assets.len(),
            users = state.users.len(),
            rentals = state.rentals.len(),
            incidents = state.incidents.len(),
            notifications = state.notifications.len(),
            overdue_rentals = metrics.overdue_count,
            "Fleet state loaded"
        );
        state
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Rentals as stored; see [`FleetState::rental_views`] for display status
    pub fn rentals(&self) -> &[Rental] {
        &self.rentals
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn find_asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_rental(&self, id: &str) -> Option<&Rental> {
        self.rentals.iter().find(|r| r.id == id)
    }

    pub fn find_incident(&self, id: &str) -> Option<&Incident> {
        self.incidents.iter().find(|i| i.id == id)
    }

    pub fn find_notification(&self, id: i64) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Asset a rental points at, `None` if it has been deleted
    pub fn rental_asset(&self, rental: &Rental) -> Option<&Asset> {
        self.find_asset(&rental.asset_id)
    }

    /// Asset an incident points at, `None` if it has been deleted
    pub fn incident_asset(&self, incident: &Incident) -> Option<&Asset> {
        self.find_asset(&incident.asset_id)
    }

    /// Rentals paired with their status as of `today`
    pub fn rental_views(&self, today: NaiveDate) -> Vec<RentalView<'_>> {
        self.rentals
            .iter()
            .map(|rental| RentalView {
                rental,
                display_status: lifecycle::effective_status(rental, today),
            })
            .collect()
    }

    pub fn rental_metrics(&self, today: NaiveDate) -> RentalMetrics {
        lifecycle::rental_metrics(&self.rentals, today)
    }

    // -----------------------------------------------------------------------
    // Assets
    // -----------------------------------------------------------------------

    /// Insert at the front of the collection. Id uniqueness is the caller's job.
    pub fn add_asset(&mut self, asset: Asset) -> AppResult<()> {
        asset.validate()?;
        tracing::debug!(id = %asset.id, "Adding asset");
        self.assets.insert(0, asset);
        self.persist(Collection::Assets);
        Ok(())
    }

    /// Merge `update` into the asset with `id`. Returns whether a record matched.
    pub fn update_asset(&mut self, id: &str, update: UpdateAsset) -> AppResult<bool> {
        update.validate()?;
        let Some(asset) = self.assets.iter_mut().find(|a| a.id == id) else {
            tracing::debug!(id, "Update of unknown asset ignored");
            return Ok(false);
        };
        asset.apply(update);
        self.persist(Collection::Assets);
        Ok(true)
    }

    /// Remove the asset. Rentals and incidents referencing it are left as is.
    pub fn delete_asset(&mut self, id: &str) -> bool {
        let Some(pos) = self.assets.iter().position(|a| a.id == id) else {
            tracing::debug!(id, "Delete of unknown asset ignored");
            return false;
        };
        self.assets.remove(pos);
        self.persist(Collection::Assets);
        true
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn add_user(&mut self, user: User) -> AppResult<()> {
        user.validate()?;
        tracing::debug!(id = %user.id, "Adding user");
        self.users.insert(0, user);
        self.persist(Collection::Users);
        Ok(())
    }

    pub fn update_user(&mut self, id: &str, update: UpdateUser) -> AppResult<bool> {
        update.validate()?;
        let Some(user) = self.users.iter_mut().find(|u| u.id == id) else {
            tracing::debug!(id, "Update of unknown user ignored");
            return Ok(false);
        };
        user.apply(update);
        self.persist(Collection::Users);
        Ok(true)
    }

    pub fn delete_user(&mut self, id: &str) -> bool {
        let Some(pos) = self.users.iter().position(|u| u.id == id) else {
            tracing::debug!(id, "Delete of unknown user ignored");
            return false;
        };
        self.users.remove(pos);
        self.persist(Collection::Users);
        true
    }

    // -----------------------------------------------------------------------
    // Rentals
    // -----------------------------------------------------------------------

    pub fn add_rental(&mut self, rental: Rental) -> AppResult<()> {
        rental.validate()?;
        tracing::debug!(id = %rental.id, "Adding rental");
        self.rentals.insert(0, rental);
        self.persist(Collection::Rentals);
        Ok(())
    }

    pub fn update_rental(&mut self, id: &str, update: UpdateRental) -> AppResult<bool> {
        update.validate()?;
        let Some(rental) = self.rentals.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(id, "Update of unknown rental ignored");
            return Ok(false);
        };
        rental.apply(update);
        self.persist(Collection::Rentals);
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Incidents
    // -----------------------------------------------------------------------

    pub fn add_incident(&mut self, incident: Incident) -> AppResult<()> {
        incident.validate()?;
        tracing::debug!(id = %incident.id, "Adding incident");
        self.incidents.insert(0, incident);
        self.persist(Collection::Incidents);
        Ok(())
    }

    pub fn update_incident(&mut self, id: &str, update: UpdateIncident) -> AppResult<bool> {
        update.validate()?;
        let Some(incident) = self.incidents.iter_mut().find(|i| i.id == id) else {
            tracing::debug!(id, "Update of unknown incident ignored");
            return Ok(false);
        };
        incident.apply(update);
        self.persist(Collection::Incidents);
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    pub fn mark_notification_read(&mut self, id: i64) -> bool {
        let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) else {
            tracing::debug!(id, "Unknown notification ignored");
            return false;
        };
        if !notification.read {
            notification.read = true;
            self.persist(Collection::Notifications);
        }
        true
    }

    /// Mark every notification read with a single write
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        if changed > 0 {
            self.persist(Collection::Notifications);
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Collections whose last write failed and are waiting for [`FleetState::flush`]
    pub fn pending_collections(&self) -> Vec<Collection> {
        Collection::ALL
            .into_iter()
            .filter(|c| self.dirty.contains(c))
            .collect()
    }

    /// Retry every pending write. Returns how many collections were written.
    pub fn flush(&mut self) -> usize {
        let mut written = 0;
        for collection in self.pending_collections() {
            if self.persist(collection) {
                written += 1;
            }
        }
        if !self.dirty.is_empty() {
            tracing::warn!(pending = self.dirty.len(), "Some collections could not be flushed");
        }
        written
    }

    fn persist(&mut self, collection: Collection) -> bool {
        let result = match collection {
            Collection::Assets => self.repository.save(collection, &self.assets),
            Collection::Users => self.repository.save(collection, &self.users),
            Collection::Rentals => self.repository.save(collection, &self.rentals),
            Collection::Incidents => self.repository.save(collection, &self.incidents),
            Collection::Notifications => self.repository.save(collection, &self.notifications),
        };
        match result {
            Ok(()) => {
                self.dirty.remove(&collection);
                true
            }
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "Failed to persist collection");
                self.dirty.insert(collection);
                false
            }
        }
    }
}

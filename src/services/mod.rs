//! Business logic services

pub mod assets;
pub mod incidents;
pub mod lifecycle;
pub mod notifications;
pub mod rentals;
pub mod state;
pub mod stats;
pub mod users;

use rand::Rng;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

pub use state::FleetState;

/// Container for the fleet state and the workflows acting on it
pub struct Services {
    pub state: FleetState,
    pub assets: assets::AssetsService,
    pub users: users::UsersService,
    pub rentals: rentals::RentalsService,
    pub incidents: incidents::IncidentsService,
    pub notifications: notifications::NotificationsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Wire the workflow services around an already loaded state
    pub fn new(state: FleetState, config: &AppConfig) -> Self {
        Self {
            state,
            assets: assets::AssetsService::new(),
            users: users::UsersService::new(),
            rentals: rentals::RentalsService::new(config.rentals.clone()),
            incidents: incidents::IncidentsService::new(config.incidents.clone()),
            notifications: notifications::NotificationsService::new(),
            stats: stats::StatsService::new(),
        }
    }

    /// Open the configured store and load the state from it
    pub fn open(config: &AppConfig) -> AppResult<Self> {
        let repository = Repository::from_config(&config.storage)?;
        let state = FleetState::load(repository, config.storage.seed_on_missing);
        Ok(Self::new(state, config))
    }
}

/// Random `PREFIX-NNNN` identifier not yet taken.
///
/// Widens the numeric part when the current width looks exhausted.
pub(crate) fn generate_id(prefix: &str, digits: u32, taken: impl Fn(&str) -> bool) -> String {
    let mut rng = rand::thread_rng();
    let mut digits = digits.max(1);
    loop {
        let low = 10u64.pow(digits - 1);
        for _ in 0..32 {
            let id = format!("{}-{}", prefix, rng.gen_range(low..low * 10));
            if !taken(&id) {
                return id;
            }
        }
        digits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("RA", 4, |_| false);
        let (prefix, number) = id.split_once('-').unwrap();
        assert_eq!(prefix, "RA");
        assert_eq!(number.len(), 4);
        assert!(number.parse::<u32>().unwrap() >= 1000);
    }

    #[test]
    fn test_generate_id_skips_taken() {
        // every 1-digit id is taken, so the generator must widen
        let id = generate_id("T", 1, |id| id.len() == 3);
        assert_eq!(id.len(), 4);
    }
}

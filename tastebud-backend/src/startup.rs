use crate::configuration::Settings;
use crate::services::{RatingService, SocialService, SongLogService, UserService};
use crate::store::{MemoryStore, StoreError, UserStore};
use std::path::PathBuf;
use std::sync::Arc;
use taste_rank::systems::get_rating_system_by_name;

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Failed to load the store snapshot")]
    Store(#[from] StoreError),
    #[error("{0}")]
    InvalidSettings(String),
}

/// Every service, wired to one shared store.
pub struct Application {
    store: Arc<MemoryStore>,
    snapshot_path: Option<PathBuf>,
    pub users: UserService,
    pub song_logs: SongLogService,
    pub ratings: RatingService,
    pub social: SocialService,
}

impl Application {
    /// Loads the snapshot named in `configuration`; a missing file starts an
    /// empty store.
    pub fn build(configuration: &Settings) -> Result<Self, StartupError> {
        let path = &configuration.storage.snapshot_path;
        let store = MemoryStore::load_or_default(path)?;
        tracing::info!(
            "Loaded {} users from {}",
            store.all_users()?.len(),
            path.display()
        );
        let mut application = Self::with_store(Arc::new(store), configuration)?;
        application.snapshot_path = Some(path.clone());
        Ok(application)
    }

    /// Wires the services without any snapshot file behind them.
    pub fn with_store(
        store: Arc<MemoryStore>,
        configuration: &Settings,
    ) -> Result<Self, StartupError> {
        let scoring = &configuration.scoring;
        let system = get_rating_system_by_name(&scoring.system, scoring.k_factor)
            .map_err(StartupError::InvalidSettings)?;
        if !(scoring.initial_rating > 0.) {
            return Err(StartupError::InvalidSettings(format!(
                "initial_rating must be positive, got {}",
                scoring.initial_rating
            )));
        }
        Ok(Self {
            users: UserService::new(store.clone()),
            song_logs: SongLogService::new(store.clone(), scoring.initial_rating),
            ratings: RatingService::new(store.clone(), system),
            social: SocialService::new(store.clone(), scoring.weights, scoring.feed_user_limit),
            store,
            snapshot_path: None,
        })
    }

    /// Persists the store to the snapshot it was loaded from, if any.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.snapshot_path {
            self.store.save(path)?;
            tracing::info!("Saved snapshot to {}", path.display());
        }
        Ok(())
    }
}

use super::{ServiceError, require_preferences, require_user};
use crate::domain::{NewSongLog, SongLog, SongLogId, SongLogUpdate, SongLogView, UserId};
use crate::store::Store;
use std::sync::Arc;

pub struct SongLogService {
    store: Arc<dyn Store>,
    initial_rating: f64,
}

impl SongLogService {
    pub fn new(store: Arc<dyn Store>, initial_rating: f64) -> Self {
        Self {
            store,
            initial_rating,
        }
    }

    #[tracing::instrument(
        name = "Logging a song",
        skip(self, new_log),
        fields(title = %new_log.song_title, artist = %new_log.artist, date = %new_log.date)
    )]
    pub fn create(&self, user_id: UserId, new_log: NewSongLog) -> Result<SongLogView, ServiceError> {
        let user = require_user(&*self.store, user_id)?;
        require_preferences(&user)?;
        let valid = new_log.validate().map_err(ServiceError::ValidationError)?;
        let log = self
            .store
            .insert_song_log(user_id, valid, self.initial_rating)?;
        tracing::info!(song_log_id = log.id, "Logged song");
        Ok(log.into())
    }

    /// Fetches one of the user's own song logs. Logs owned by someone else
    /// are reported as missing.
    pub fn get(&self, user_id: UserId, id: SongLogId) -> Result<SongLogView, ServiceError> {
        Ok(owned_song_log(&*self.store, user_id, id)?.into())
    }

    /// The user's logs, most recent date first.
    pub fn list(&self, user_id: UserId) -> Result<Vec<SongLogView>, ServiceError> {
        require_user(&*self.store, user_id)?;
        let mut logs = self.store.song_logs_by_user(user_id)?;
        logs.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(logs.into_iter().map(SongLogView::from).collect())
    }

    #[tracing::instrument(name = "Updating a song log", skip(self, update))]
    pub fn update(
        &self,
        user_id: UserId,
        id: SongLogId,
        update: SongLogUpdate,
    ) -> Result<SongLogView, ServiceError> {
        let current = owned_song_log(&*self.store, user_id, id)?;
        let updated = update
            .apply_to(&current)
            .map_err(ServiceError::ValidationError)?;
        Ok(self.store.update_song_log(updated)?.into())
    }

    #[tracing::instrument(name = "Deleting a song log", skip(self))]
    pub fn delete(&self, user_id: UserId, id: SongLogId) -> Result<SongLog, ServiceError> {
        owned_song_log(&*self.store, user_id, id)?;
        Ok(self.store.delete_song_log(id)?)
    }
}

pub(super) fn owned_song_log(
    store: &dyn Store,
    user_id: UserId,
    id: SongLogId,
) -> Result<SongLog, ServiceError> {
    store
        .get_song_log(id)?
        .filter(|log| log.user == user_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Song log {} does not exist", id)))
}

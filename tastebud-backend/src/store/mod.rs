//! Persistence interfaces. Services only see these traits, so the backing
//! storage is injected rather than ambient.

mod memory;
mod snapshot;

pub use memory::MemoryStore;

use crate::domain::{
    Comparison, Preferences, SongLog, SongLogId, SongPair, User, UserId, UserName, ValidSongLog,
};
use chrono::{DateTime, Utc};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: u64 },
    #[error("{0}")]
    Conflict(String),
    #[error("The store lock was poisoned by a panicking writer")]
    Poisoned,
    #[error("Failed to access the snapshot file")]
    Io(#[from] std::io::Error),
    #[error("Failed to (de)serialize the snapshot")]
    Json(#[from] serde_json::Error),
}

pub trait UserStore: Send + Sync {
    /// Creates a user with empty preferences.
    /// Fails with `Conflict` if the username is taken.
    fn create_user(&self, username: &UserName) -> Result<User, StoreError>;

    fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// All users, in id order.
    fn all_users(&self) -> Result<Vec<User>, StoreError>;

    /// Replaces the user's preferences and returns the updated user.
    fn update_preferences(&self, id: UserId, preferences: Preferences)
    -> Result<User, StoreError>;
}

pub trait SongLogStore: Send + Sync {
    /// Stores a new song log. Fails with `Conflict` if the user already
    /// logged a song on the same date.
    fn insert_song_log(
        &self,
        user: UserId,
        song_log: ValidSongLog,
        elo_rating: f64,
    ) -> Result<SongLog, StoreError>;

    fn get_song_log(&self, id: SongLogId) -> Result<Option<SongLog>, StoreError>;

    /// The user's song logs, in id order.
    fn song_logs_by_user(&self, user: UserId) -> Result<Vec<SongLog>, StoreError>;

    /// Every song log, in id order.
    fn all_song_logs(&self) -> Result<Vec<SongLog>, StoreError>;

    /// Overwrites the editable fields of an existing log. The stored Elo
    /// rating is kept, whatever `song_log.elo_rating` says.
    fn update_song_log(&self, song_log: SongLog) -> Result<SongLog, StoreError>;

    /// Deletes a song log together with every comparison that references it.
    fn delete_song_log(&self, id: SongLogId) -> Result<SongLog, StoreError>;
}

pub trait ComparisonStore: Send + Sync {
    /// The user's comparisons, newest first.
    fn comparisons_by_user(&self, user: UserId) -> Result<Vec<Comparison>, StoreError>;

    fn has_compared(&self, user: UserId, pair: SongPair) -> Result<bool, StoreError>;
}

pub struct NewComparison {
    pub user: UserId,
    pub song_log: SongLogId,
    pub compared_song_log: SongLogId,
    pub winner_song_log: SongLogId,
}

/// Writes made through a transaction become visible to others only on
/// `commit`. Dropping it without committing discards them.
pub trait RatingTransaction {
    /// Reads a song log, including ratings staged in this transaction.
    fn song_log(&self, id: SongLogId) -> Result<Option<SongLog>, StoreError>;

    fn set_elo_rating(&mut self, id: SongLogId, elo_rating: f64) -> Result<(), StoreError>;

    /// Stages a comparison. Fails with `Conflict` if the user already
    /// compared this pair, in either order.
    fn insert_comparison(
        &mut self,
        comparison: NewComparison,
        created_at: DateTime<Utc>,
    ) -> Result<Comparison, StoreError>;

    fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

pub trait Transactional: Send + Sync {
    /// Starts a transaction. Transactions are serialized: a second caller
    /// blocks until the first commits or is dropped.
    fn begin(&self) -> Result<Box<dyn RatingTransaction + '_>, StoreError>;
}

pub trait Store: UserStore + SongLogStore + ComparisonStore + Transactional {}

impl<T: UserStore + SongLogStore + ComparisonStore + Transactional> Store for T {}

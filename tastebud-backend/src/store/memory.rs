use super::{
    ComparisonStore, NewComparison, RatingTransaction, SongLogStore, StoreError, Transactional,
    UserStore,
};
use crate::domain::{
    Comparison, ComparisonId, Preferences, SongLog, SongLogId, SongPair, User, UserId, UserName,
    ValidSongLog,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Everything the store holds; this is also the snapshot format.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub(super) struct StoreState {
    pub(super) users: BTreeMap<UserId, User>,
    pub(super) song_logs: BTreeMap<SongLogId, SongLog>,
    pub(super) comparisons: BTreeMap<ComparisonId, Comparison>,
    pub(super) next_user_id: UserId,
    pub(super) next_song_log_id: SongLogId,
    pub(super) next_comparison_id: ComparisonId,
}

impl StoreState {
    fn allocate(counter: &mut u64) -> u64 {
        *counter += 1;
        *counter
    }

    fn date_taken(&self, user: UserId, date: chrono::NaiveDate, except: Option<SongLogId>) -> bool {
        self.song_logs
            .values()
            .any(|log| log.user == user && log.date == date && Some(log.id) != except)
    }

    fn has_compared(&self, user: UserId, pair: SongPair) -> bool {
        self.comparisons
            .values()
            .any(|comparison| comparison.user == user && comparison.pair() == pair)
    }
}

/// A store that keeps every record in memory behind a single lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn from_state(state: StoreState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub(super) fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, username: &UserName) -> Result<User, StoreError> {
        let mut state = self.lock()?;
        if state
            .users
            .values()
            .any(|user| user.username == username.as_ref())
        {
            return Err(StoreError::Conflict(format!(
                "Username {} is already taken.",
                username
            )));
        }
        let user = User {
            id: StoreState::allocate(&mut state.next_user_id),
            username: username.as_ref().to_string(),
            date_joined: Utc::now(),
            preferences: Preferences::default(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn all_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    fn update_preferences(
        &self,
        id: UserId,
        preferences: Preferences,
    ) -> Result<User, StoreError> {
        let mut state = self.lock()?;
        let user = state
            .users
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "User", id })?;
        user.preferences = preferences;
        Ok(user.clone())
    }
}

impl SongLogStore for MemoryStore {
    fn insert_song_log(
        &self,
        user: UserId,
        song_log: ValidSongLog,
        elo_rating: f64,
    ) -> Result<SongLog, StoreError> {
        let mut state = self.lock()?;
        if !state.users.contains_key(&user) {
            return Err(StoreError::NotFound {
                entity: "User",
                id: user,
            });
        }
        if state.date_taken(user, song_log.date(), None) {
            return Err(StoreError::Conflict(format!(
                "A song is already logged for {}.",
                song_log.date()
            )));
        }
        let id = StoreState::allocate(&mut state.next_song_log_id);
        let song_log = song_log.into_song_log(id, user, Utc::now(), elo_rating);
        state.song_logs.insert(id, song_log.clone());
        Ok(song_log)
    }

    fn get_song_log(&self, id: SongLogId) -> Result<Option<SongLog>, StoreError> {
        Ok(self.lock()?.song_logs.get(&id).cloned())
    }

    fn song_logs_by_user(&self, user: UserId) -> Result<Vec<SongLog>, StoreError> {
        Ok(self
            .lock()?
            .song_logs
            .values()
            .filter(|log| log.user == user)
            .cloned()
            .collect())
    }

    fn all_song_logs(&self) -> Result<Vec<SongLog>, StoreError> {
        Ok(self.lock()?.song_logs.values().cloned().collect())
    }

    fn update_song_log(&self, song_log: SongLog) -> Result<SongLog, StoreError> {
        let mut state = self.lock()?;
        let stored = state.song_logs.get(&song_log.id).ok_or(StoreError::NotFound {
            entity: "SongLog",
            id: song_log.id,
        })?;
        let (user, elo_rating, created_at) = (stored.user, stored.elo_rating, stored.created_at);
        if state.date_taken(user, song_log.date, Some(song_log.id)) {
            return Err(StoreError::Conflict(format!(
                "A song is already logged for {}.",
                song_log.date
            )));
        }
        let updated = SongLog {
            user,
            elo_rating,
            created_at,
            ..song_log
        };
        state.song_logs.insert(updated.id, updated.clone());
        Ok(updated)
    }

    fn delete_song_log(&self, id: SongLogId) -> Result<SongLog, StoreError> {
        let mut state = self.lock()?;
        let removed = state.song_logs.remove(&id).ok_or(StoreError::NotFound {
            entity: "SongLog",
            id,
        })?;
        state
            .comparisons
            .retain(|_, comparison| comparison.song_log != id && comparison.compared_song_log != id);
        Ok(removed)
    }
}

impl ComparisonStore for MemoryStore {
    fn comparisons_by_user(&self, user: UserId) -> Result<Vec<Comparison>, StoreError> {
        let mut comparisons: Vec<Comparison> = self
            .lock()?
            .comparisons
            .values()
            .filter(|comparison| comparison.user == user)
            .cloned()
            .collect();
        comparisons.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comparisons)
    }

    fn has_compared(&self, user: UserId, pair: SongPair) -> Result<bool, StoreError> {
        Ok(self.lock()?.has_compared(user, pair))
    }
}

/// Holds the store lock until it is committed or dropped.
struct MemoryTransaction<'a> {
    state: MutexGuard<'a, StoreState>,
    staged_ratings: HashMap<SongLogId, f64>,
    staged_comparisons: Vec<Comparison>,
    next_comparison_id: ComparisonId,
}

impl RatingTransaction for MemoryTransaction<'_> {
    fn song_log(&self, id: SongLogId) -> Result<Option<SongLog>, StoreError> {
        Ok(self.state.song_logs.get(&id).map(|log| {
            let mut log = log.clone();
            if let Some(&elo_rating) = self.staged_ratings.get(&id) {
                log.elo_rating = elo_rating;
            }
            log
        }))
    }

    fn set_elo_rating(&mut self, id: SongLogId, elo_rating: f64) -> Result<(), StoreError> {
        if !self.state.song_logs.contains_key(&id) {
            return Err(StoreError::NotFound {
                entity: "SongLog",
                id,
            });
        }
        self.staged_ratings.insert(id, elo_rating);
        Ok(())
    }

    fn insert_comparison(
        &mut self,
        comparison: NewComparison,
        created_at: DateTime<Utc>,
    ) -> Result<Comparison, StoreError> {
        let pair = SongPair::new(comparison.song_log, comparison.compared_song_log);
        let staged_duplicate = self
            .staged_comparisons
            .iter()
            .any(|staged| staged.user == comparison.user && staged.pair() == pair);
        if staged_duplicate || self.state.has_compared(comparison.user, pair) {
            return Err(StoreError::Conflict(format!(
                "Song logs {} and {} have already been compared.",
                comparison.song_log, comparison.compared_song_log
            )));
        }
        let comparison = Comparison {
            id: StoreState::allocate(&mut self.next_comparison_id),
            user: comparison.user,
            song_log: comparison.song_log,
            compared_song_log: comparison.compared_song_log,
            winner_song_log: comparison.winner_song_log,
            created_at,
        };
        self.staged_comparisons.push(comparison.clone());
        Ok(comparison)
    }

    fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryTransaction {
            mut state,
            staged_ratings,
            staged_comparisons,
            next_comparison_id,
        } = *self;
        for (id, elo_rating) in staged_ratings {
            if let Some(log) = state.song_logs.get_mut(&id) {
                log.elo_rating = elo_rating;
            }
        }
        for comparison in staged_comparisons {
            state.comparisons.insert(comparison.id, comparison);
        }
        state.next_comparison_id = next_comparison_id;
        Ok(())
    }
}

impl Transactional for MemoryStore {
    fn begin(&self) -> Result<Box<dyn RatingTransaction + '_>, StoreError> {
        let state = self.lock()?;
        let next_comparison_id = state.next_comparison_id;
        Ok(Box::new(MemoryTransaction {
            state,
            staged_ratings: HashMap::new(),
            staged_comparisons: vec![],
            next_comparison_id,
        }))
    }
}

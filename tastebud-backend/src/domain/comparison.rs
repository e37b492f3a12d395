use super::{SongLog, SongLogId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type ComparisonId = u64;

/// One recorded head-to-head outcome between two of a user's song logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub id: ComparisonId,
    pub user: UserId,
    pub song_log: SongLogId,
    pub compared_song_log: SongLogId,
    pub winner_song_log: SongLogId,
    pub created_at: DateTime<Utc>,
}

impl Comparison {
    pub fn pair(&self) -> SongPair {
        SongPair::new(self.song_log, self.compared_song_log)
    }
}

/// An unordered pair of song logs; `(a, b)` and `(b, a)` are the same pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SongPair(SongLogId, SongLogId);

impl SongPair {
    pub fn new(a: SongLogId, b: SongLogId) -> Self {
        Self(a.min(b), a.max(b))
    }
}

/// Request body for comparing two song logs.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CompareRequest {
    pub song_log_id: SongLogId,
    pub compared_song_log_id: SongLogId,
    pub winner_song_log_id: SongLogId,
}

impl CompareRequest {
    pub fn validate(self) -> Result<Self, String> {
        if self.song_log_id == self.compared_song_log_id {
            Err(format!(
                "A song log cannot be compared with itself (id {}).",
                self.song_log_id
            ))
        } else if self.winner_song_log_id != self.song_log_id
            && self.winner_song_log_id != self.compared_song_log_id
        {
            Err(format!(
                "Winner {} is neither {} nor {}.",
                self.winner_song_log_id, self.song_log_id, self.compared_song_log_id
            ))
        } else {
            Ok(self)
        }
    }

    pub fn loser_song_log_id(&self) -> SongLogId {
        if self.winner_song_log_id == self.song_log_id {
            self.compared_song_log_id
        } else {
            self.song_log_id
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RatingChange {
    pub song_log_id: SongLogId,
    pub old_elo_rating: f64,
    pub new_elo_rating: f64,
}

/// Everything a successful comparison changed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub comparison: Comparison,
    pub winner: RatingChange,
    pub loser: RatingChange,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PairSong {
    pub id: SongLogId,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: Option<String>,
    pub elo_rating: f64,
    pub date: NaiveDate,
}

impl From<&SongLog> for PairSong {
    fn from(log: &SongLog) -> Self {
        Self {
            id: log.id,
            title: log.song_title.clone(),
            artist: log.artist.clone(),
            album: log.album.clone(),
            album_art_url: log.spotify.album_art_url.clone(),
            elo_rating: log.elo_rating,
            date: log.date,
        }
    }
}

/// Two songs offered to the user for comparison.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComparisonPair {
    pub song1: PairSong,
    pub song2: PairSong,
}

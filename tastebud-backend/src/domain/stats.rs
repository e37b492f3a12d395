use super::SongLog;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatedSongSummary {
    pub title: String,
    pub artist: String,
    pub rating: f64,
}

impl From<&SongLog> for RatedSongSummary {
    fn from(log: &SongLog) -> Self {
        Self {
            title: log.song_title.clone(),
            artist: log.artist.clone(),
            rating: log.rating(),
        }
    }
}

/// Aggregate view of a user's comparisons, on the 1-10 display scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub total_ratings: usize,
    pub total_songs: usize,
    pub avg_rating: f64,
    pub highest_rated_song: Option<RatedSongSummary>,
    pub lowest_rated_song: Option<RatedSongSummary>,
}

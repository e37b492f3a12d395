use super::{SongLog, SongLogId, UserSummary};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use taste_rank::similarity::TasteMatch;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarUser {
    #[serde(flatten)]
    pub user: UserSummary,
    pub similarity_score: f64,
    pub taste_match: TasteMatch,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: Option<String>,
    pub date: NaiveDate,
    pub rating: f64,
}

impl From<&SongLog> for RecentSong {
    fn from(log: &SongLog) -> Self {
        Self {
            title: log.song_title.clone(),
            artist: log.artist.clone(),
            album: log.album.clone(),
            album_art_url: log.spotify.album_art_url.clone(),
            date: log.date,
            rating: log.rating(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscoveryUser {
    pub user: UserSummary,
    pub similarity_score: f64,
    pub taste_match: TasteMatch,
    pub recent_songs: Vec<RecentSong>,
    pub total_songs: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: SongLogId,
    pub song_title: String,
    pub artist: String,
    pub album: String,
    pub note: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub album_art_url: Option<String>,
    pub elo_rating: f64,
    pub rating: f64,
    pub user: UserSummary,
    pub similarity_score: f64,
    pub taste_match: TasteMatch,
}

impl FeedItem {
    pub fn new(log: SongLog, user: UserSummary, similarity_score: f64) -> Self {
        let rating = log.rating();
        Self {
            id: log.id,
            song_title: log.song_title,
            artist: log.artist,
            album: log.album,
            note: log.note,
            date: log.date,
            created_at: log.created_at,
            album_art_url: log.spotify.album_art_url,
            elo_rating: log.elo_rating,
            rating,
            user,
            similarity_score,
            taste_match: TasteMatch::from_score(similarity_score),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SocialFeed {
    pub feed_items: Vec<FeedItem>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<super::Page<FeedItem>> for SocialFeed {
    fn from(page: super::Page<FeedItem>) -> Self {
        Self {
            feed_items: page.items,
            total_count: page.total_count,
            page: page.page,
            page_size: page.page_size,
            has_next: page.has_next,
            has_previous: page.has_previous,
        }
    }
}

use super::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use taste_rank::scale::display_rating;
use unicode_segmentation::UnicodeSegmentation;

pub type SongLogId = u64;

const MAX_FIELD_GRAPHEMES: usize = 255;
const MAX_POPULARITY: u8 = 100;

/// Optional track metadata copied from Spotify when the song was picked there.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotifyMetadata {
    pub spotify_id: Option<String>,
    pub album_art_url: Option<String>,
    pub preview_url: Option<String>,
    pub duration_ms: Option<u32>,
    pub popularity: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SongLog {
    pub id: SongLogId,
    pub user: UserId,
    pub song_title: String,
    pub artist: String,
    pub album: String,
    pub note: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub elo_rating: f64,
    #[serde(flatten)]
    pub spotify: SpotifyMetadata,
}

impl SongLog {
    /// The 1-10 rating derived from `elo_rating`.
    pub fn rating(&self) -> f64 {
        display_rating(self.elo_rating)
    }
}

/// A song log as returned to callers, with its derived rating attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SongLogView {
    #[serde(flatten)]
    pub song_log: SongLog,
    pub rating: f64,
}

impl From<SongLog> for SongLogView {
    fn from(song_log: SongLog) -> Self {
        let rating = song_log.rating();
        Self { song_log, rating }
    }
}

fn required_text(field: &str, value: String) -> Result<String, String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(format!("{} may not be blank.", field));
    }
    bounded_text(field, value)
}

fn bounded_text(field: &str, value: String) -> Result<String, String> {
    if value.graphemes(true).count() > MAX_FIELD_GRAPHEMES {
        Err(format!(
            "{} is longer than {} characters.",
            field, MAX_FIELD_GRAPHEMES
        ))
    } else {
        Ok(value)
    }
}

fn check_spotify(spotify: &SpotifyMetadata) -> Result<(), String> {
    match spotify.popularity {
        Some(popularity) if popularity > MAX_POPULARITY => Err(format!(
            "popularity {} exceeds {}.",
            popularity, MAX_POPULARITY
        )),
        _ => Ok(()),
    }
}

/// Request to log a song.
#[derive(Clone, Debug, Deserialize)]
pub struct NewSongLog {
    pub song_title: String,
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub spotify: SpotifyMetadata,
}

/// A `NewSongLog` whose fields have passed validation.
#[derive(Clone, Debug)]
pub struct ValidSongLog(NewSongLog);

impl NewSongLog {
    pub fn validate(self) -> Result<ValidSongLog, String> {
        check_spotify(&self.spotify)?;
        Ok(ValidSongLog(Self {
            song_title: required_text("song_title", self.song_title)?,
            artist: required_text("artist", self.artist)?,
            album: bounded_text("album", self.album.trim().to_string())?,
            note: self.note,
            date: self.date,
            spotify: self.spotify,
        }))
    }
}

impl ValidSongLog {
    pub fn into_song_log(
        self,
        id: SongLogId,
        user: UserId,
        created_at: DateTime<Utc>,
        elo_rating: f64,
    ) -> SongLog {
        let log = self.0;
        SongLog {
            id,
            user,
            song_title: log.song_title,
            artist: log.artist,
            album: log.album,
            note: log.note,
            date: log.date,
            created_at,
            elo_rating,
            spotify: log.spotify,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date
    }
}

/// Partial update of a song log. The Elo rating cannot be edited.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SongLogUpdate {
    pub song_title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
    pub spotify: Option<SpotifyMetadata>,
}

impl SongLogUpdate {
    /// Applies the update to a copy of `log`, validating every changed field.
    pub fn apply_to(self, log: &SongLog) -> Result<SongLog, String> {
        let mut updated = log.clone();
        if let Some(title) = self.song_title {
            updated.song_title = required_text("song_title", title)?;
        }
        if let Some(artist) = self.artist {
            updated.artist = required_text("artist", artist)?;
        }
        if let Some(album) = self.album {
            updated.album = bounded_text("album", album.trim().to_string())?;
        }
        if let Some(note) = self.note {
            updated.note = note;
        }
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(spotify) = self.spotify {
            check_spotify(&spotify)?;
            updated.spotify = spotify;
        }
        Ok(updated)
    }
}

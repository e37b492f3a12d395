use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use taste_rank::similarity::{FavoriteArtist, normalize_tag};

pub type UserId = u64;

/// Free-form taste tags a listener chooses for themselves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub favorite_artists: Vec<FavoriteArtist>,
    #[serde(default)]
    pub mood_preferences: Vec<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.favorite_genres.is_empty()
            && self.favorite_artists.is_empty()
            && self.mood_preferences.is_empty()
    }

    /// Drops blank tags and case-insensitive duplicates, keeping the first spelling.
    pub fn deduplicated(self) -> Self {
        fn dedup_by_key<T>(items: Vec<T>, key: impl Fn(&T) -> Option<String>) -> Vec<T> {
            let mut seen = HashSet::new();
            items
                .into_iter()
                .filter(|item| key(item).is_some_and(|k| seen.insert(k)))
                .collect()
        }

        Self {
            favorite_genres: dedup_by_key(self.favorite_genres, |g| normalize_tag(g)),
            favorite_artists: dedup_by_key(self.favorite_artists, |artist| {
                match artist.id.as_deref().and_then(normalize_tag) {
                    Some(id) => Some(format!("id:{}", id)),
                    None => normalize_tag(&artist.name).map(|name| format!("name:{}", name)),
                }
            }),
            mood_preferences: dedup_by_key(self.mood_preferences, |m| normalize_tag(m)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub date_joined: DateTime<Utc>,
    #[serde(flatten)]
    pub preferences: Preferences,
}

/// The public part of a user shown next to their songs and in discovery.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub favorite_genres: Vec<String>,
    pub favorite_artists: Vec<FavoriteArtist>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            favorite_genres: user.preferences.favorite_genres.clone(),
            favorite_artists: user.preferences.favorite_artists.clone(),
        }
    }
}

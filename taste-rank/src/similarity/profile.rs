use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A favourite artist as stored on a user's profile. Older profiles only kept
/// the artist's name, so both a bare string and the full object deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArtistEntry")]
pub struct FavoriteArtist {
    pub id: Option<String>,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtistEntry {
    Name(String),
    Full {
        #[serde(default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        image: Option<String>,
    },
}

impl From<ArtistEntry> for FavoriteArtist {
    fn from(entry: ArtistEntry) -> Self {
        match entry {
            ArtistEntry::Name(name) => Self::named(name),
            ArtistEntry::Full { id, name, image } => Self { id, name, image },
        }
    }
}

impl FavoriteArtist {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: None,
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            image: None,
        }
    }
}

/// Tags are matched case-insensitively, ignoring surrounding whitespace.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

fn normalized_set<S: AsRef<str>>(tags: impl IntoIterator<Item = S>) -> HashSet<String> {
    tags.into_iter()
        .filter_map(|tag| normalize_tag(tag.as_ref()))
        .collect()
}

/// Everything the similarity scorer knows about one listener.
#[derive(Clone, Debug, Default)]
pub struct TasteProfile {
    pub genres: HashSet<String>,
    pub moods: HashSet<String>,
    // Present only when every favourite artist carries a non-blank identifier
    pub artist_ids: Option<HashSet<String>>,
    pub artist_names: HashSet<String>,
    pub logged_artists: HashSet<String>,
}

impl TasteProfile {
    pub fn new<G, M, L>(
        genres: impl IntoIterator<Item = G>,
        artists: &[FavoriteArtist],
        moods: impl IntoIterator<Item = M>,
        logged_artists: impl IntoIterator<Item = L>,
    ) -> Self
    where
        G: AsRef<str>,
        M: AsRef<str>,
        L: AsRef<str>,
    {
        let artist_ids: Option<HashSet<String>> = if artists.is_empty() {
            None
        } else {
            artists
                .iter()
                .map(|artist| artist.id.as_deref().and_then(normalize_tag))
                .collect()
        };
        Self {
            genres: normalized_set(genres),
            moods: normalized_set(moods),
            artist_ids,
            artist_names: normalized_set(artists.iter().map(|artist| artist.name.as_str())),
            logged_artists: normalized_set(logged_artists),
        }
    }
}

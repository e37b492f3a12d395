//! Weighted Jaccard similarity between two listeners' stated and observed taste.

mod profile;
mod taste_match;

pub use profile::{FavoriteArtist, TasteProfile, normalize_tag};
pub use taste_match::TasteMatch;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// |A ∩ B| / |A ∪ B|, or `None` when either side is empty and nothing can be compared.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    Some(intersection as f64 / union as f64)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub genres: f64,
    pub artists: f64,
    pub moods: f64,
    // artists both listeners have actually logged songs by
    pub history: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            genres: 0.4,
            artists: 0.3,
            moods: 0.2,
            history: 0.1,
        }
    }
}

impl SimilarityWeights {
    /// Similarity in `[0, 1]`. Categories lacking data on either side are left
    /// out of both the weighted sum and its normalizer.
    pub fn score(&self, a: &TasteProfile, b: &TasteProfile) -> f64 {
        let categories = [
            (self.genres, jaccard(&a.genres, &b.genres)),
            (self.artists, artist_similarity(a, b)),
            (self.moods, jaccard(&a.moods, &b.moods)),
            (self.history, jaccard(&a.logged_artists, &b.logged_artists)),
        ];

        let (weighted_sum, total_weight) = categories
            .iter()
            .filter_map(|&(weight, similarity)| similarity.map(|s| (weight, s)))
            .fold((0., 0.), |(sum, total), (weight, s)| {
                (sum + weight * s, total + weight)
            });

        if total_weight > 0. {
            weighted_sum / total_weight
        } else {
            0.
        }
    }

    pub fn taste_match(&self, a: &TasteProfile, b: &TasteProfile) -> (f64, TasteMatch) {
        let score = self.score(a, b);
        (score, TasteMatch::from_score(score))
    }
}

// Identifier matching is exact; names are only a fallback for profiles that
// predate artist ids. The two are never mixed within one comparison.
fn artist_similarity(a: &TasteProfile, b: &TasteProfile) -> Option<f64> {
    match (&a.artist_ids, &b.artist_ids) {
        (Some(ids_a), Some(ids_b)) => jaccard(ids_a, ids_b),
        _ => jaccard(&a.artist_names, &b.artist_names),
    }
}

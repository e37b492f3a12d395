//! Classic Elo update for one pairwise comparison: https://en.wikipedia.org/wiki/Elo_rating_system

use super::PairwiseRatingSystem;
use crate::numerical::base10_logistic_cdf;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Elo {
    // maximum rating change from a single comparison
    pub k_factor: f64,
    // a rating gap of `scale` makes the favourite 10 times as likely to win
    pub scale: f64,
}

impl Default for Elo {
    fn default() -> Self {
        Self {
            k_factor: 32.,
            scale: 400.,
        }
    }
}

impl Elo {
    pub fn with_k_factor(k_factor: f64) -> Self {
        Self {
            k_factor,
            ..Self::default()
        }
    }

    /// Expected score of `player` against `foe`, in the open interval (0, 1).
    pub fn expected_score(&self, player: f64, foe: f64) -> f64 {
        base10_logistic_cdf((player - foe) / self.scale)
    }

    fn adjust(&self, current: f64, expected: f64, actual: f64) -> f64 {
        current + self.k_factor * (actual - expected)
    }
}

impl PairwiseRatingSystem for Elo {
    fn update(&self, winner: f64, loser: f64) -> (f64, f64) {
        let winner_expected = self.expected_score(winner, loser);
        // The loser's expectation is the complement, so no rating mass is created or destroyed
        let loser_expected = 1. - winner_expected;
        (
            self.adjust(winner, winner_expected, 1.),
            self.adjust(loser, loser_expected, 0.),
        )
    }
}

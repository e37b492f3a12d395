use serde::{Deserialize, Serialize};
use std::fmt;

const NUM_BANDS: usize = 5;
const BAND_FLOOR: [f64; NUM_BANDS - 1] = [0.8, 0.6, 0.4, 0.2];
// Renormalized weighted sums can land a few ulps below an exact floor.
const BAND_TOLERANCE: f64 = 1e-9;

/// Human-readable band for a similarity score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TasteMatch {
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Great Match")]
    Great,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Some Similarity")]
    Partial,
    #[serde(rename = "Different Taste")]
    Different,
}

impl TasteMatch {
    const BANDS: [TasteMatch; NUM_BANDS] = [
        Self::Excellent,
        Self::Great,
        Self::Good,
        Self::Partial,
        Self::Different,
    ];

    pub fn from_score(score: f64) -> Self {
        BAND_FLOOR
            .iter()
            .position(|&floor| score >= floor - BAND_TOLERANCE)
            .map_or(Self::Different, |band| Self::BANDS[band])
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Match",
            Self::Great => "Great Match",
            Self::Good => "Good Match",
            Self::Partial => "Some Similarity",
            Self::Different => "Different Taste",
        }
    }
}

impl fmt::Display for TasteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

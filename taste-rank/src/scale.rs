//! Maps internal Elo ratings onto the 1-10 scale shown to listeners.

use crate::numerical::interpolate_clamped;

pub const MIN_DISPLAY_RATING: f64 = 1.;
pub const MAX_DISPLAY_RATING: f64 = 10.;

// 1500 (a fresh song) lands a little above the middle of the scale
const SCALE_KNOTS: [(f64, f64); 3] = [
    (800., MIN_DISPLAY_RATING),
    (1200., 5.),
    (2000., MAX_DISPLAY_RATING),
];

/// Converts an Elo rating into a display rating in `[1.0, 10.0]`.
pub fn display_rating(elo_rating: f64) -> f64 {
    interpolate_clamped(&SCALE_KNOTS, elo_rating)
}

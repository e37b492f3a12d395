mod elo;

pub use elo::Elo;

/// A rating system that learns from one head-to-head outcome at a time.
pub trait PairwiseRatingSystem: std::fmt::Debug + Send + Sync {
    /// Returns `(new_winner_rating, new_loser_rating)`. Must be pure.
    fn update(&self, winner: f64, loser: f64) -> (f64, f64);
}

pub fn get_rating_system_by_name(
    system_name: &str,
    k_factor: f64,
) -> Result<Box<dyn PairwiseRatingSystem>, String> {
    match system_name {
        "elo" => {
            let system = Elo::with_k_factor(k_factor);
            tracing::info!("Loading rating system:\n{:?}", system);
            Ok(Box::new(system))
        }
        name => Err(format!(
            "{} is not a valid rating system. Must be one of: elo",
            name
        )),
    }
}

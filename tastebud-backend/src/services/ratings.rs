use super::{ServiceError, require_preferences, require_user};
use crate::domain::{
    CompareRequest, Comparison, ComparisonOutcome, ComparisonPair, RatedSongSummary, RatingChange,
    RatingStats, SongLog, SongLogId, SongLogView, SongPair, UserId,
};
use crate::store::{NewComparison, RatingTransaction, Store};
use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use taste_rank::numerical::round_to_places;
use taste_rank::systems::PairwiseRatingSystem;

/// How many song logs are drawn when looking for an uncompared pair.
const PAIR_SAMPLE_SIZE: usize = 10;

pub struct RatingService {
    store: Arc<dyn Store>,
    system: Box<dyn PairwiseRatingSystem>,
}

impl RatingService {
    pub fn new(store: Arc<dyn Store>, system: Box<dyn PairwiseRatingSystem>) -> Self {
        Self { store, system }
    }

    /// Records that the user preferred one song log over another and moves
    /// both Elo ratings accordingly. Either both ratings and the comparison
    /// record are persisted, or nothing is.
    #[tracing::instrument(name = "Comparing two song logs", skip(self))]
    pub fn create_comparison(
        &self,
        user_id: UserId,
        request: CompareRequest,
    ) -> Result<ComparisonOutcome, ServiceError> {
        let user = require_user(&*self.store, user_id)?;
        require_preferences(&user)?;
        let request = request.validate().map_err(ServiceError::ValidationError)?;

        let mut tx = self.store.begin()?;
        let winner = owned_in(&*tx, user_id, request.winner_song_log_id)?;
        let loser = owned_in(&*tx, user_id, request.loser_song_log_id())?;

        let (new_winner, new_loser) = self.system.update(winner.elo_rating, loser.elo_rating);
        tx.set_elo_rating(winner.id, new_winner)?;
        tx.set_elo_rating(loser.id, new_loser)?;
        let comparison = tx.insert_comparison(
            NewComparison {
                user: user_id,
                song_log: request.song_log_id,
                compared_song_log: request.compared_song_log_id,
                winner_song_log: request.winner_song_log_id,
            },
            Utc::now(),
        )?;
        tx.commit()?;

        tracing::info!(
            comparison_id = comparison.id,
            winner = new_winner,
            loser = new_loser,
            "Recorded comparison"
        );
        Ok(ComparisonOutcome {
            comparison,
            winner: RatingChange {
                song_log_id: winner.id,
                old_elo_rating: winner.elo_rating,
                new_elo_rating: new_winner,
            },
            loser: RatingChange {
                song_log_id: loser.id,
                old_elo_rating: loser.elo_rating,
                new_elo_rating: new_loser,
            },
        })
    }

    /// Offers two of the user's song logs that have not been compared yet.
    /// Only a random sample of the logs is searched, so `None` does not prove
    /// that every pair has been compared.
    pub fn comparison_pair<R: Rng + ?Sized>(
        &self,
        user_id: UserId,
        rng: &mut R,
    ) -> Result<Option<ComparisonPair>, ServiceError> {
        let user = require_user(&*self.store, user_id)?;
        require_preferences(&user)?;
        let logs = self.store.song_logs_by_user(user_id)?;
        let sample: Vec<&SongLog> = logs.choose_multiple(rng, PAIR_SAMPLE_SIZE).collect();

        for (i, first) in sample.iter().enumerate() {
            for second in &sample[i + 1..] {
                if !self
                    .store
                    .has_compared(user_id, SongPair::new(first.id, second.id))?
                {
                    return Ok(Some(ComparisonPair {
                        song1: (*first).into(),
                        song2: (*second).into(),
                    }));
                }
            }
        }
        Ok(None)
    }

    /// The user's song logs, best first.
    pub fn rankings(&self, user_id: UserId) -> Result<Vec<SongLogView>, ServiceError> {
        require_user(&*self.store, user_id)?;
        let mut logs = self.store.song_logs_by_user(user_id)?;
        logs.sort_by(|a, b| b.elo_rating.total_cmp(&a.elo_rating).then(a.id.cmp(&b.id)));
        Ok(logs.into_iter().map(SongLogView::from).collect())
    }

    pub fn stats(&self, user_id: UserId) -> Result<RatingStats, ServiceError> {
        require_user(&*self.store, user_id)?;
        let logs = self.store.song_logs_by_user(user_id)?;
        let total_ratings = self.store.comparisons_by_user(user_id)?.len();

        let avg_rating = if logs.is_empty() {
            0.
        } else {
            let sum: f64 = logs.iter().map(SongLog::rating).sum();
            round_to_places(sum / logs.len() as f64, 2)
        };
        let highest = logs
            .iter()
            .max_by(|a, b| a.elo_rating.total_cmp(&b.elo_rating));
        let lowest = logs
            .iter()
            .min_by(|a, b| a.elo_rating.total_cmp(&b.elo_rating));

        Ok(RatingStats {
            total_ratings,
            total_songs: logs.len(),
            avg_rating,
            highest_rated_song: highest.map(RatedSongSummary::from),
            lowest_rated_song: lowest.map(RatedSongSummary::from),
        })
    }

    /// The user's comparisons, newest first.
    pub fn history(&self, user_id: UserId) -> Result<Vec<Comparison>, ServiceError> {
        require_user(&*self.store, user_id)?;
        Ok(self.store.comparisons_by_user(user_id)?)
    }
}

fn owned_in(
    tx: &dyn RatingTransaction,
    user_id: UserId,
    id: SongLogId,
) -> Result<SongLog, ServiceError> {
    tx.song_log(id)?
        .filter(|log| log.user == user_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Song log {} does not exist", id)))
}

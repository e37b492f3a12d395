use super::{ServiceError, require_user};
use crate::domain::{
    DiscoveryUser, FeedItem, Page, PageRequest, RecentSong, SimilarUser, SocialFeed, SongLog,
    TasteMatch, User, UserId, UserSummary,
};
use crate::store::Store;
use std::collections::HashMap;
use std::sync::Arc;
use taste_rank::similarity::{SimilarityWeights, TasteProfile};

/// Number of recent songs shown per discovered user.
const RECENT_SONGS: usize = 5;

struct RankedUser {
    user: User,
    score: f64,
    taste_match: TasteMatch,
}

pub struct SocialService {
    store: Arc<dyn Store>,
    weights: SimilarityWeights,
    feed_user_limit: usize,
}

impl SocialService {
    pub fn new(store: Arc<dyn Store>, weights: SimilarityWeights, feed_user_limit: usize) -> Self {
        Self {
            store,
            weights,
            feed_user_limit,
        }
    }

    /// Users whose taste overlaps the requester's at all, most similar first.
    pub fn similar_users(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<SimilarUser>, ServiceError> {
        let logs = self.logs_by_user()?;
        Ok(self
            .rank_similar_users(user_id, &logs)?
            .into_iter()
            .take(limit)
            .map(|ranked| SimilarUser {
                user: UserSummary::from(&ranked.user),
                similarity_score: ranked.score,
                taste_match: ranked.taste_match,
            })
            .collect())
    }

    pub fn user_discovery(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<DiscoveryUser>, ServiceError> {
        let mut logs = self.logs_by_user()?;
        let ranked = self.rank_similar_users(user_id, &logs)?;
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|ranked| {
                let mut their_logs = logs.remove(&ranked.user.id).unwrap_or_default();
                their_logs.sort_by(|a, b| {
                    b.date
                        .cmp(&a.date)
                        .then(b.created_at.cmp(&a.created_at))
                        .then(b.id.cmp(&a.id))
                });
                DiscoveryUser {
                    user: UserSummary::from(&ranked.user),
                    similarity_score: ranked.score,
                    taste_match: ranked.taste_match,
                    recent_songs: their_logs.iter().take(RECENT_SONGS).map(RecentSong::from).collect(),
                    total_songs: their_logs.len(),
                }
            })
            .collect())
    }

    /// Song logs from the most similar users, newest first. Without any
    /// similar user the feed falls back to everyone else's logs.
    #[tracing::instrument(name = "Assembling the social feed", skip(self))]
    pub fn social_feed(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> Result<SocialFeed, ServiceError> {
        let mut logs = self.logs_by_user()?;
        let ranked = self.rank_similar_users(user_id, &logs)?;

        let mut items: Vec<FeedItem> = if ranked.is_empty() {
            tracing::debug!("No similar users, falling back to recent logs from everyone");
            let authors: HashMap<UserId, UserSummary> = self
                .store
                .all_users()?
                .iter()
                .filter(|user| user.id != user_id)
                .map(|user| (user.id, UserSummary::from(user)))
                .collect();
            logs.into_iter()
                .filter_map(|(author, their_logs)| {
                    authors.get(&author).cloned().map(|summary| (summary, their_logs))
                })
                .flat_map(|(summary, their_logs)| {
                    their_logs
                        .into_iter()
                        .map(move |log| FeedItem::new(log, summary.clone(), 0.))
                })
                .collect()
        } else {
            ranked
                .into_iter()
                .take(self.feed_user_limit)
                .flat_map(|ranked| {
                    let summary = UserSummary::from(&ranked.user);
                    logs.remove(&ranked.user.id)
                        .unwrap_or_default()
                        .into_iter()
                        .map(move |log| FeedItem::new(log, summary.clone(), ranked.score))
                })
                .collect()
        };
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let page = Page::paginate(items, request);
        tracing::debug!(total_count = page.total_count, "Feed assembled");
        Ok(page.into())
    }

    fn logs_by_user(&self) -> Result<HashMap<UserId, Vec<SongLog>>, ServiceError> {
        let mut grouped: HashMap<UserId, Vec<SongLog>> = HashMap::new();
        for log in self.store.all_song_logs()? {
            grouped.entry(log.user).or_default().push(log);
        }
        Ok(grouped)
    }

    /// Every other user with a positive similarity score, best first. Equal
    /// scores keep the store's id order.
    fn rank_similar_users(
        &self,
        user_id: UserId,
        logs: &HashMap<UserId, Vec<SongLog>>,
    ) -> Result<Vec<RankedUser>, ServiceError> {
        let me = require_user(&*self.store, user_id)?;
        let my_profile = profile(&me, logs);

        let mut ranked: Vec<RankedUser> = self
            .store
            .all_users()?
            .into_iter()
            .filter(|other| other.id != user_id)
            .filter_map(|other| {
                let (score, taste_match) = self.weights.taste_match(&my_profile, &profile(&other, logs));
                (score > 0.).then_some(RankedUser {
                    user: other,
                    score,
                    taste_match,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranked)
    }
}

fn profile(user: &User, logs: &HashMap<UserId, Vec<SongLog>>) -> TasteProfile {
    let logged_artists = logs
        .get(&user.id)
        .into_iter()
        .flatten()
        .map(|log| log.artist.as_str());
    TasteProfile::new(
        &user.preferences.favorite_genres,
        &user.preferences.favorite_artists,
        &user.preferences.mood_preferences,
        logged_artists,
    )
}

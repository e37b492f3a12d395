mod comparison;
mod pagination;
mod social;
mod song_log;
mod stats;
mod user;
mod user_name;

pub use comparison::{
    CompareRequest, Comparison, ComparisonId, ComparisonOutcome, ComparisonPair, PairSong,
    RatingChange, SongPair,
};
pub use pagination::{MAX_PAGE_SIZE, Page, PageRequest};
pub use social::{DiscoveryUser, FeedItem, RecentSong, SimilarUser, SocialFeed};
pub use song_log::{
    NewSongLog, SongLog, SongLogId, SongLogUpdate, SongLogView, SpotifyMetadata, ValidSongLog,
};
pub use stats::{RatedSongSummary, RatingStats};
pub use taste_rank::similarity::{FavoriteArtist, TasteMatch};
pub use user::{Preferences, User, UserId, UserSummary};
pub use user_name::UserName;

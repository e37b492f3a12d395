use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tastebud_backend::configuration::{Settings, get_configuration};
use tastebud_backend::domain::{
    FavoriteArtist, NewSongLog, Preferences, SongLogView, SpotifyMetadata, User,
};
use tastebud_backend::startup::Application;
use tastebud_backend::telemetry::{get_subscriber, init_subscriber};
use tempfile::TempDir;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialise tracing");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialise tracing");
    };
});

pub struct TestApp {
    pub app: Application,
    pub configuration: Settings,
    // keeps the snapshot directory alive for the duration of the test
    _snapshot_dir: TempDir,
}

impl TestApp {
    pub fn spawn() -> Self {
        // `TRACING` is only executed the first time `initialize` is invoked.
        Lazy::force(&TRACING);

        let snapshot_dir = tempfile::tempdir().expect("Failed to create a temporary directory.");
        // Use a different snapshot file for each test case
        let configuration = {
            let mut c = get_configuration().expect("Failed to read configuration.");
            c.storage.snapshot_path = snapshot_dir.path().join("tastebud.json");
            c
        };
        let app = Application::build(&configuration).expect("Failed to build application.");

        Self {
            app,
            configuration,
            _snapshot_dir: snapshot_dir,
        }
    }

    /// Saves the current state and builds a fresh application from the snapshot.
    pub fn restart(self) -> Self {
        self.app.save().expect("Failed to save snapshot.");
        let app = Application::build(&self.configuration).expect("Failed to rebuild application.");
        Self { app, ..self }
    }

    pub fn register(&self, username: &str) -> User {
        self.app
            .users
            .register(username.into())
            .expect("Failed to register user.")
    }

    pub fn register_with_taste(&self, username: &str, genres: &[&str], artists: &[&str]) -> User {
        let user = self.register(username);
        let preferences = Preferences {
            favorite_genres: genres.iter().map(|g| g.to_string()).collect(),
            favorite_artists: artists.iter().map(|a| FavoriteArtist::named(*a)).collect(),
            mood_preferences: vec!["focused".into()],
        };
        self.app
            .users
            .update_preferences(user.id, preferences)
            .expect("Failed to set preferences.")
    }

    pub fn log_song(&self, user: &User, title: &str, artist: &str, date: NaiveDate) -> SongLogView {
        self.app
            .song_logs
            .create(user.id, new_song_log(title, artist, date))
            .expect("Failed to log song.")
    }
}

pub fn new_song_log(title: &str, artist: &str, date: NaiveDate) -> NewSongLog {
    NewSongLog {
        song_title: title.into(),
        artist: artist.into(),
        album: String::new(),
        note: String::new(),
        date,
        spotify: SpotifyMetadata::default(),
    }
}

pub fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, n).expect("Invalid day of June.")
}

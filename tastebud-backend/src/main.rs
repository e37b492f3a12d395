use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::PathBuf;
use tastebud_backend::configuration::get_configuration_from;
use tastebud_backend::domain::{
    CompareRequest, FavoriteArtist, NewSongLog, PageRequest, Preferences, SongLogId,
    SpotifyMetadata, UserId,
};
use tastebud_backend::export::{RankingRow, write_slice_to_file};
use tastebud_backend::services::ServiceError;
use tastebud_backend::startup::Application;
use tastebud_backend::telemetry::{get_subscriber, init_subscriber};

/// Log songs, rank them by head-to-head comparison and find listeners with
/// similar taste.
#[derive(Parser, Debug)]
#[command(name = "tastebud")]
#[command(version)]
struct Cli {
    /// Directory holding base.yaml and the per-environment files
    #[arg(long, default_value = "configuration", env = "TASTEBUD_CONFIG_DIR")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new user
    Register { username: String },
    /// Replace a user's favorite genres, artists and moods
    Preferences {
        #[arg(long)]
        user: String,
        #[arg(long = "genre")]
        genres: Vec<String>,
        /// Artist name, or `id=name` to include a Spotify artist id
        #[arg(long = "artist")]
        artists: Vec<String>,
        #[arg(long = "mood")]
        moods: Vec<String>,
    },
    /// Log the song of the day
    Log {
        #[arg(long)]
        user: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long, default_value = "")]
        album: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        spotify_id: Option<String>,
        #[arg(long)]
        album_art_url: Option<String>,
        #[arg(long)]
        preview_url: Option<String>,
        #[arg(long)]
        duration_ms: Option<u32>,
        #[arg(long)]
        popularity: Option<u8>,
    },
    /// List a user's song logs
    Logs {
        #[arg(long)]
        user: String,
    },
    /// Delete one of a user's song logs
    DeleteLog {
        #[arg(long)]
        user: String,
        id: SongLogId,
    },
    /// Record which of two song logs the user prefers
    Compare {
        #[arg(long)]
        user: String,
        first: SongLogId,
        second: SongLogId,
        #[arg(long)]
        winner: SongLogId,
    },
    /// Suggest two songs that have not been compared yet
    Pair {
        #[arg(long)]
        user: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show a user's songs from best to worst
    Rankings {
        #[arg(long)]
        user: String,
        /// Also write the rankings to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    Stats {
        #[arg(long)]
        user: String,
    },
    /// Show a user's comparisons, newest first
    History {
        #[arg(long)]
        user: String,
    },
    Similar {
        #[arg(long)]
        user: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    Discover {
        #[arg(long)]
        user: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    Feed {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Register { .. }
                | Command::Preferences { .. }
                | Command::Log { .. }
                | Command::DeleteLog { .. }
                | Command::Compare { .. }
        )
    }
}

fn parse_artist(entry: &str) -> FavoriteArtist {
    match entry.split_once('=') {
        Some((id, name)) if !id.trim().is_empty() => FavoriteArtist::with_id(id.trim(), name.trim()),
        _ => FavoriteArtist::named(entry.trim()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let configuration =
        get_configuration_from(&cli.config_dir).context("Failed to read configuration.")?;

    // stdout carries the JSON output, so logs go to stderr
    let subscriber = get_subscriber(
        configuration.application.name.clone(),
        configuration.application.log_level.clone(),
        std::io::stderr,
    );
    init_subscriber(subscriber)?;

    let app = Application::build(&configuration).context("Failed to build application.")?;
    let mutates = cli.command.mutates();
    if let Err(e) = run(&app, &configuration.scoring, cli.command) {
        return match client_error(&e) {
            Some(error) => {
                eprintln!("{}", error);
                std::process::exit(2)
            }
            None => Err(e),
        };
    }
    if mutates {
        app.save().context("Failed to save the snapshot")?;
    }
    Ok(())
}

/// The service error behind `e`, if the caller is the one at fault.
fn client_error(e: &anyhow::Error) -> Option<&ServiceError> {
    e.downcast_ref::<ServiceError>()
        .filter(|error| error.is_client_error())
}

fn run(
    app: &Application,
    scoring: &tastebud_backend::configuration::ScoringSettings,
    command: Command,
) -> Result<()> {
    let user_id = |username: &str| -> Result<UserId> {
        Ok(app.users.find_by_username(username)?.id)
    };

    match command {
        Command::Register { username } => print_json(&app.users.register(username)?),
        Command::Preferences {
            user,
            genres,
            artists,
            moods,
        } => {
            let preferences = Preferences {
                favorite_genres: genres,
                favorite_artists: artists.iter().map(|a| parse_artist(a)).collect(),
                mood_preferences: moods,
            };
            print_json(&app.users.update_preferences(user_id(&user)?, preferences)?)
        }
        Command::Log {
            user,
            title,
            artist,
            album,
            note,
            date,
            spotify_id,
            album_art_url,
            preview_url,
            duration_ms,
            popularity,
        } => {
            let new_log = NewSongLog {
                song_title: title,
                artist,
                album,
                note,
                date: date.unwrap_or_else(|| Utc::now().date_naive()),
                spotify: SpotifyMetadata {
                    spotify_id,
                    album_art_url,
                    preview_url,
                    duration_ms,
                    popularity,
                },
            };
            print_json(&app.song_logs.create(user_id(&user)?, new_log)?)
        }
        Command::Logs { user } => print_json(&app.song_logs.list(user_id(&user)?)?),
        Command::DeleteLog { user, id } => print_json(&app.song_logs.delete(user_id(&user)?, id)?),
        Command::Compare {
            user,
            first,
            second,
            winner,
        } => {
            let request = CompareRequest {
                song_log_id: first,
                compared_song_log_id: second,
                winner_song_log_id: winner,
            };
            print_json(&app.ratings.create_comparison(user_id(&user)?, request)?)
        }
        Command::Pair { user, seed } => {
            let user = user_id(&user)?;
            let pair = match seed {
                Some(seed) => app
                    .ratings
                    .comparison_pair(user, &mut StdRng::seed_from_u64(seed))?,
                None => app.ratings.comparison_pair(user, &mut rand::rng())?,
            };
            print_json(&pair)
        }
        Command::Rankings { user, csv } => {
            let rankings = app.ratings.rankings(user_id(&user)?)?;
            if let Some(path) = csv {
                write_slice_to_file(&RankingRow::from_rankings(&rankings), &path)
                    .with_context(|| format!("Failed to export rankings to {}", path.display()))?;
            }
            print_json(&rankings)
        }
        Command::Stats { user } => print_json(&app.ratings.stats(user_id(&user)?)?),
        Command::History { user } => print_json(&app.ratings.history(user_id(&user)?)?),
        Command::Similar { user, limit } => print_json(
            &app.social
                .similar_users(user_id(&user)?, limit.unwrap_or(scoring.similar_user_limit))?,
        ),
        Command::Discover { user, limit } => print_json(
            &app.social
                .user_discovery(user_id(&user)?, limit.unwrap_or(scoring.discovery_limit))?,
        ),
        Command::Feed {
            user,
            page,
            page_size,
        } => {
            let request = PageRequest::parse(page, page_size.unwrap_or(scoring.default_page_size))
                .map_err(ServiceError::ValidationError)?;
            print_json(&app.social.social_feed(user_id(&user)?, request)?)
        }
    }
}

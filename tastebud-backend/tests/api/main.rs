mod helpers;
mod ratings;
mod snapshot;
mod social;
mod song_logs;
mod users;

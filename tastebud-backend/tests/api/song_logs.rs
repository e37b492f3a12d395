use crate::helpers::{TestApp, day, new_song_log};
use claims::{assert_matches, assert_ok};
use tastebud_backend::domain::{SongLogUpdate, SpotifyMetadata};
use tastebud_backend::services::ServiceError;

#[test]
fn logging_a_song_requires_preferences() {
    let app = TestApp::spawn();
    let user = app.register("fresh");

    let result = app
        .app
        .song_logs
        .create(user.id, new_song_log("Teardrop", "Massive Attack", day(1)));

    assert_matches!(result, Err(ServiceError::PreconditionFailed(_)));
}

#[test]
fn logged_songs_start_at_the_configured_rating() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("trip_hop", &["trip hop"], &[]);

    let view = app.log_song(&user, "Glory Box", "Portishead", day(2));

    assert_eq!(
        view.song_log.elo_rating,
        app.configuration.scoring.initial_rating
    );
    assert!(view.rating >= 1. && view.rating <= 10.);
}

#[test]
fn logging_rejects_invalid_fields() {
    // Arrange
    let app = TestApp::spawn();
    let user = app.register_with_taste("validator", &["rock"], &[]);
    let mut too_popular = new_song_log("Creep", "Radiohead", day(3));
    too_popular.spotify = SpotifyMetadata {
        popularity: Some(101),
        ..SpotifyMetadata::default()
    };
    let test_cases = vec![
        (new_song_log("", "Radiohead", day(3)), "missing title"),
        (new_song_log("Creep", " ", day(3)), "blank artist"),
        (new_song_log(&"x".repeat(256), "Radiohead", day(3)), "title too long"),
        (too_popular, "popularity above 100"),
    ];

    for (log, description) in test_cases {
        // Act
        let result = app.app.song_logs.create(user.id, log);

        // Assert
        assert!(
            matches!(result, Err(ServiceError::ValidationError(_))),
            "Logging did not fail with a validation error for {}.",
            description
        );
    }
}

#[test]
fn one_song_per_day() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("daily", &["pop"], &[]);
    app.log_song(&user, "Running Up That Hill", "Kate Bush", day(4));

    let result = app
        .app
        .song_logs
        .create(user.id, new_song_log("Hounds of Love", "Kate Bush", day(4)));

    assert_matches!(result, Err(ServiceError::Conflict(_)));
}

#[test]
fn updates_never_touch_the_elo_rating() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("editor", &["pop"], &[]);
    let a = app.log_song(&user, "Cloudbusting", "Kate Bush", day(5));
    let b = app.log_song(&user, "Babooshka", "Kate Bush", day(6));
    app.app
        .ratings
        .create_comparison(
            user.id,
            tastebud_backend::domain::CompareRequest {
                song_log_id: a.song_log.id,
                compared_song_log_id: b.song_log.id,
                winner_song_log_id: a.song_log.id,
            },
        )
        .unwrap();

    let updated = assert_ok!(app.app.song_logs.update(
        user.id,
        a.song_log.id,
        SongLogUpdate {
            album: Some("Hounds of Love".into()),
            ..SongLogUpdate::default()
        }
    ));

    assert_eq!(updated.song_log.album, "Hounds of Love");
    assert!(updated.song_log.elo_rating > 1500.);
}

#[test]
fn deleting_a_log_removes_its_comparisons() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("cleaner", &["pop"], &[]);
    let a = app.log_song(&user, "Wuthering Heights", "Kate Bush", day(7));
    let b = app.log_song(&user, "This Woman's Work", "Kate Bush", day(8));
    app.app
        .ratings
        .create_comparison(
            user.id,
            tastebud_backend::domain::CompareRequest {
                song_log_id: a.song_log.id,
                compared_song_log_id: b.song_log.id,
                winner_song_log_id: b.song_log.id,
            },
        )
        .unwrap();

    assert_ok!(app.app.song_logs.delete(user.id, a.song_log.id));

    assert!(app.app.ratings.history(user.id).unwrap().is_empty());
    assert_eq!(app.app.song_logs.list(user.id).unwrap().len(), 1);
}

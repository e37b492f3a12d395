use crate::helpers::TestApp;
use claims::{assert_matches, assert_ok};
use tastebud_backend::domain::{FavoriteArtist, Preferences};
use tastebud_backend::services::ServiceError;

#[test]
fn register_returns_a_user_without_preferences() {
    // Arrange
    let app = TestApp::spawn();

    // Act
    let user = assert_ok!(app.app.users.register("night_owl".into()));

    // Assert
    assert_eq!(user.username, "night_owl");
    assert!(user.preferences.is_empty());
}

#[test]
fn register_rejects_invalid_usernames() {
    // Arrange
    let app = TestApp::spawn();
    let too_long = "a".repeat(151);
    let test_cases = vec![
        ("", "empty name"),
        ("   ", "blank name"),
        ("semi;colon", "forbidden character"),
        (too_long.as_str(), "name too long"),
    ];

    for (username, description) in test_cases {
        // Act
        let result = app.app.users.register(username.into());

        // Assert
        assert!(
            matches!(result, Err(ServiceError::ValidationError(_))),
            "Registration did not fail with a validation error when the username was {}.",
            description
        );
    }
}

#[test]
fn usernames_are_unique() {
    let app = TestApp::spawn();
    app.register("twice");
    assert_matches!(
        app.app.users.register("twice".into()),
        Err(ServiceError::Conflict(_))
    );
}

#[test]
fn preferences_replace_the_previous_profile() {
    // Arrange
    let app = TestApp::spawn();
    let user = app.register_with_taste("crate_digger", &["funk"], &["Parliament"]);

    // Act
    let updated = app
        .app
        .users
        .update_preferences(
            user.id,
            Preferences {
                favorite_genres: vec!["Jazz".into(), "jazz ".into()],
                favorite_artists: vec![FavoriteArtist::with_id("0kbYTNQb4Pb1rPbbaF0pT4", "Miles Davis")],
                mood_preferences: vec![],
            },
        )
        .unwrap();

    // Assert
    assert_eq!(updated.preferences.favorite_genres.len(), 1);
    assert_eq!(updated.preferences.favorite_artists[0].name, "Miles Davis");
    assert!(updated.preferences.mood_preferences.is_empty());
    let found = app.app.users.find_by_username("crate_digger").unwrap();
    assert_eq!(found, updated);
}

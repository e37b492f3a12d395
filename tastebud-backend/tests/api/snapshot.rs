use crate::helpers::{TestApp, day};
use tastebud_backend::domain::CompareRequest;

#[test]
fn state_survives_a_restart() {
    // Arrange
    let app = TestApp::spawn();
    let user = app.register_with_taste("persistent", &["soul"], &["Aretha Franklin"]);
    let a = app.log_song(&user, "Respect", "Aretha Franklin", day(1)).song_log.id;
    let b = app.log_song(&user, "Chain of Fools", "Aretha Franklin", day(2)).song_log.id;
    app.app
        .ratings
        .create_comparison(
            user.id,
            CompareRequest {
                song_log_id: a,
                compared_song_log_id: b,
                winner_song_log_id: a,
            },
        )
        .unwrap();
    let before = app.app.ratings.rankings(user.id).unwrap();

    // Act
    let app = app.restart();

    // Assert
    let after = app.app.ratings.rankings(user.id).unwrap();
    assert_eq!(after, before);
    assert_eq!(app.app.ratings.history(user.id).unwrap().len(), 1);
    let newcomer = app.register("newcomer");
    assert!(newcomer.id > user.id);
}

#[test]
fn a_fresh_application_starts_empty() {
    let app = TestApp::spawn();
    assert!(app.app.users.find_by_username("anyone").is_err());
}

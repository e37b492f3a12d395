use crate::helpers::{TestApp, day};
use claims::{assert_matches, assert_none, assert_ok, assert_some};
use std::collections::HashSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tastebud_backend::domain::{CompareRequest, SongLogId, SongPair};
use tastebud_backend::services::ServiceError;

fn compare(a: SongLogId, b: SongLogId, winner: SongLogId) -> CompareRequest {
    CompareRequest {
        song_log_id: a,
        compared_song_log_id: b,
        winner_song_log_id: winner,
    }
}

#[test]
fn comparing_moves_winner_up_and_loser_down() {
    // Arrange
    let app = TestApp::spawn();
    let user = app.register_with_taste("judge", &["electronic"], &[]);
    let a = app.log_song(&user, "Windowlicker", "Aphex Twin", day(1)).song_log.id;
    let b = app.log_song(&user, "Xtal", "Aphex Twin", day(2)).song_log.id;

    // Act
    let outcome = assert_ok!(app.app.ratings.create_comparison(user.id, compare(a, b, a)));

    // Assert
    assert_eq!(outcome.winner.song_log_id, a);
    assert!(outcome.winner.new_elo_rating > outcome.winner.old_elo_rating);
    assert!(outcome.loser.new_elo_rating < outcome.loser.old_elo_rating);
    let rankings = app.app.ratings.rankings(user.id).unwrap();
    assert_eq!(rankings[0].song_log.id, a);
    assert!(rankings[0].rating > rankings[1].rating);
}

#[test]
fn repeating_a_comparison_fails_in_either_order() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("stubborn", &["electronic"], &[]);
    let a = app.log_song(&user, "Avril 14th", "Aphex Twin", day(3)).song_log.id;
    let b = app.log_song(&user, "Flim", "Aphex Twin", day(4)).song_log.id;
    assert_ok!(app.app.ratings.create_comparison(user.id, compare(a, b, b)));

    assert_matches!(
        app.app.ratings.create_comparison(user.id, compare(a, b, a)),
        Err(ServiceError::Conflict(_))
    );
    assert_matches!(
        app.app.ratings.create_comparison(user.id, compare(b, a, a)),
        Err(ServiceError::Conflict(_))
    );
    assert_eq!(app.app.ratings.history(user.id).unwrap().len(), 1);
}

#[test]
fn comparisons_cannot_cross_users() {
    let app = TestApp::spawn();
    let alice = app.register_with_taste("alice", &["ambient"], &[]);
    let bob = app.register_with_taste("bob", &["ambient"], &[]);
    let mine = app.log_song(&alice, "1/1", "Brian Eno", day(5)).song_log.id;
    let theirs = app.log_song(&bob, "2/1", "Brian Eno", day(5)).song_log.id;

    let result = app.app.ratings.create_comparison(alice.id, compare(mine, theirs, mine));

    assert_matches!(result, Err(ServiceError::NotFound(_)));
    let stats = app.app.ratings.stats(bob.id).unwrap();
    assert_eq!(stats.total_ratings, 0);
}

#[test]
fn pairs_are_drawn_from_uncompared_songs() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("picker", &["electronic"], &[]);
    let ids: Vec<SongLogId> = (1..=4)
        .map(|n| app.log_song(&user, &format!("Track {}", n), "Boards of Canada", day(n)).song_log.id)
        .collect();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..6 {
        let pair = assert_some!(app.app.ratings.comparison_pair(user.id, &mut rng).unwrap());
        assert!(ids.contains(&pair.song1.id) && ids.contains(&pair.song2.id));
        assert_ne!(pair.song1.id, pair.song2.id);
        app.app
            .ratings
            .create_comparison(user.id, compare(pair.song1.id, pair.song2.id, pair.song1.id))
            .unwrap();
    }

    // all six pairs of four songs are now compared
    assert_none!(app.app.ratings.comparison_pair(user.id, &mut rng).unwrap());
    let history = app.app.ratings.history(user.id).unwrap();
    let pairs: HashSet<SongPair> = history.iter().map(|c| c.pair()).collect();
    assert_eq!(pairs.len(), 6);
}

#[test]
fn stats_summarize_the_library() {
    let app = TestApp::spawn();
    let user = app.register_with_taste("stats", &["electronic"], &[]);
    let a = app.log_song(&user, "Roygbiv", "Boards of Canada", day(10)).song_log.id;
    let b = app.log_song(&user, "Dayvan Cowboy", "Boards of Canada", day(11)).song_log.id;
    app.app.ratings.create_comparison(user.id, compare(a, b, b)).unwrap();

    let stats = app.app.ratings.stats(user.id).unwrap();

    assert_eq!(stats.total_ratings, 1);
    assert_eq!(stats.total_songs, 2);
    assert_eq!(assert_some!(stats.highest_rated_song).title, "Dayvan Cowboy");
    assert_eq!(assert_some!(stats.lowest_rated_song).title, "Roygbiv");
}

use crate::helpers::TestApp;
use chrono::{Days, NaiveDate};
use claims::assert_matches;
use fake::Fake;
use fake::faker::lorem::en::Words;
use tastebud_backend::domain::{PageRequest, TasteMatch, User};
use tastebud_backend::services::ServiceError;

fn log_many(app: &TestApp, user: &User, artist: &str, count: u64) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    for offset in 0..count {
        let words: Vec<String> = Words(1..5).fake();
        app.log_song(
            user,
            &words.join(" "),
            artist,
            start.checked_add_days(Days::new(offset)).unwrap(),
        );
    }
}

#[test]
fn similar_users_come_with_a_taste_match_label() {
    // Arrange
    let app = TestApp::spawn();
    let me = app.register_with_taste("me", &["hip hop", "jazz"], &["Madlib"]);
    let close = app.register_with_taste("close", &["Hip Hop", "Jazz"], &["madlib"]);
    let partial = app.register_with_taste("partial", &["hip hop", "metal"], &["Metallica"]);
    // shares only the mood every test user gets
    let far = app.register_with_taste("far", &["country"], &["Dolly Parton"]);

    // Act
    let similar = app.app.social.similar_users(me.id, 10).unwrap();

    // Assert
    let ids: Vec<_> = similar.iter().map(|s| s.user.id).collect();
    assert_eq!(ids, vec![close.id, partial.id, far.id]);
    assert_eq!(similar[0].taste_match, TasteMatch::Excellent);
    assert!(similar[1].similarity_score > similar[2].similarity_score);
    assert!(similar.iter().all(|s| s.similarity_score > 0. && s.similarity_score <= 1.));
}

#[test]
fn feed_pages_through_similar_users_logs() {
    // Arrange
    let app = TestApp::spawn();
    let me = app.register_with_taste("reader", &["folk"], &[]);
    let first = app.register_with_taste("first", &["folk"], &[]);
    let second = app.register_with_taste("second", &["folk", "blues"], &[]);
    log_many(&app, &first, "Nick Drake", 30);
    log_many(&app, &second, "Skip James", 15);

    // Act
    let page1 = app
        .app
        .social
        .social_feed(me.id, PageRequest::parse(1, 20).unwrap())
        .unwrap();
    let page3 = app
        .app
        .social
        .social_feed(me.id, PageRequest::parse(3, 20).unwrap())
        .unwrap();

    // Assert
    assert_eq!(page1.total_count, 45);
    assert_eq!(page1.feed_items.len(), 20);
    assert!(page1.has_next);
    assert!(!page1.has_previous);
    assert_eq!(page3.feed_items.len(), 5);
    assert!(!page3.has_next);
    assert!(page3.has_previous);
}

#[test]
fn invalid_pages_are_rejected() {
    assert!(PageRequest::parse(0, 20).is_err());
    assert!(PageRequest::parse(1, 0).is_err());
    assert_eq!(PageRequest::parse(1, 500).unwrap().page_size(), 100);
}

#[test]
fn discovery_lists_recent_songs_of_similar_users() {
    let app = TestApp::spawn();
    let me = app.register_with_taste("scout", &["disco"], &["Chic"]);
    let found = app.register_with_taste("found", &["disco"], &["chic"]);
    log_many(&app, &found, "Chic", 7);

    let discovered = app.app.social.user_discovery(me.id, 10).unwrap();

    assert_eq!(discovered.len(), 1);
    assert_eq!(discovered[0].user.username, "found");
    assert_eq!(discovered[0].total_songs, 7);
    assert_eq!(discovered[0].recent_songs.len(), 5);
}

#[test]
fn social_operations_need_an_existing_user() {
    let app = TestApp::spawn();
    assert_matches!(
        app.app.social.social_feed(77, PageRequest::parse(1, 10).unwrap()),
        Err(ServiceError::NotFound(_))
    );
}

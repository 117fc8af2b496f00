mod common;

use std::{sync::Arc, time::Duration};

use common::{FakeSpotify, OPEN_URL, songs};
use moodtune::Error;
use moodtune::spotify::PlaylistMaterializer;

fn materializer(fake: &Arc<FakeSpotify>) -> PlaylistMaterializer {
    PlaylistMaterializer::new(fake.clone(), OPEN_URL)
}

#[tokio::test]
async fn test_creates_private_playlist_named_after_mood() {
    let fake = Arc::new(FakeSpotify::with_tracks(&[(
        "Holocene Bon Iver",
        "spotify:track:holocene",
    )]));

    let result = materializer(&fake)
        .materialize("token-1", &songs(&[("Holocene", "Bon Iver")]), "rainy sunday")
        .await
        .unwrap();

    assert_eq!(result.id, "playlist-1");
    assert_eq!(result.url, "https://open.spotify.com/playlist/playlist-1");
    assert_eq!(result.tracks_resolved, 1);

    let calls = fake.calls.lock().unwrap();
    assert_eq!(calls.tokens_seen, vec!["token-1"]);
    let (user_id, request) = &calls.created[0];
    assert_eq!(user_id, "user-1");
    assert_eq!(request.name, "Rainy Sunday Playlist 🎧");
    assert_eq!(
        request.description,
        "AI-generated playlist for the mood: rainy sunday"
    );
    assert!(!request.public);
}

#[tokio::test]
async fn test_only_matching_songs_are_added_in_order() {
    let fake = Arc::new(FakeSpotify::with_tracks(&[
        ("Song A Artist A", "spotify:track:a"),
        ("Song C Artist C", "spotify:track:c"),
        ("Song E Artist E", "spotify:track:e"),
    ]));
    let input = songs(&[
        ("Song A", "Artist A"),
        ("Song B", "Artist B"),
        ("Song C", "Artist C"),
        ("Song D", "Artist D"),
        ("Song E", "Artist E"),
    ]);

    let result = materializer(&fake)
        .materialize("token", &input, "focus")
        .await
        .unwrap();

    assert_eq!(result.tracks_resolved, 3);

    let calls = fake.calls.lock().unwrap();
    assert_eq!(calls.searches.len(), 5);
    assert_eq!(
        calls.added,
        vec![(
            "playlist-1".to_string(),
            vec![
                "spotify:track:a".to_string(),
                "spotify:track:c".to_string(),
                "spotify:track:e".to_string(),
            ]
        )]
    );
}

#[tokio::test]
async fn test_order_survives_out_of_order_searches() {
    let mut fake = FakeSpotify::with_tracks(&[
        ("Song A Artist A", "spotify:track:a"),
        ("Song B Artist B", "spotify:track:b"),
        ("Song D Artist D", "spotify:track:d"),
        ("Song E Artist E", "spotify:track:e"),
        ("Song F Artist F", "spotify:track:f"),
    ]);
    let input = songs(&[
        ("Song A", "Artist A"),
        ("Song B", "Artist B"),
        ("Song C", "Artist C"),
        ("Song D", "Artist D"),
        ("Song E", "Artist E"),
        ("Song F", "Artist F"),
    ]);
    // earlier songs answer later
    for (i, song) in input.iter().enumerate() {
        let delay = Duration::from_millis(10 * (input.len() - i) as u64);
        fake.search_delays.insert(song.search_query(), delay);
    }
    let fake = Arc::new(fake);

    let result = materializer(&fake)
        .materialize("token", &input, "shuffle")
        .await
        .unwrap();

    assert_eq!(result.tracks_resolved, 5);
    let calls = fake.calls.lock().unwrap();
    assert_ne!(calls.completed_searches, calls.searches);
    assert_eq!(
        calls.added[0].1,
        vec![
            "spotify:track:a".to_string(),
            "spotify:track:b".to_string(),
            "spotify:track:d".to_string(),
            "spotify:track:e".to_string(),
            "spotify:track:f".to_string(),
        ]
    );
}

#[test]
fn test_materialize_future_is_send() {
    fn assert_send<T: Send>(_: T) {}

    let fake = Arc::new(FakeSpotify::default());
    let materializer = materializer(&fake);
    let input = songs(&[("Song", "Artist")]);
    assert_send(materializer.materialize("token", &input, "calm"));
}

#[tokio::test]
async fn test_no_matches_leaves_playlist_empty() {
    let fake = Arc::new(FakeSpotify::default());

    let result = materializer(&fake)
        .materialize("token", &songs(&[("Unknown", "Nobody"), ("Ghost", "Nobody")]), "void")
        .await
        .unwrap();

    assert_eq!(result.tracks_resolved, 0);
    assert_eq!(result.url, "https://open.spotify.com/playlist/playlist-1");

    let calls = fake.calls.lock().unwrap();
    assert_eq!(calls.created.len(), 1);
    assert!(calls.added.is_empty());
}

#[tokio::test]
async fn test_empty_song_list_creates_empty_playlist() {
    let fake = Arc::new(FakeSpotify::default());

    let result = materializer(&fake).materialize("token", &[], "nothing").await.unwrap();

    assert_eq!(result.tracks_resolved, 0);
    let calls = fake.calls.lock().unwrap();
    assert!(calls.searches.is_empty());
    assert!(calls.added.is_empty());
}

#[tokio::test]
async fn test_failed_search_counts_as_no_match() {
    let mut fake = FakeSpotify::with_tracks(&[
        ("First One", "spotify:track:1"),
        ("Third One", "spotify:track:3"),
    ]);
    fake.failing_searches.insert("Second One".to_string());
    let fake = Arc::new(fake);

    let result = materializer(&fake)
        .materialize(
            "token",
            &songs(&[("First", "One"), ("Second", "One"), ("Third", "One")]),
            "mixed",
        )
        .await
        .unwrap();

    assert_eq!(result.tracks_resolved, 2);
    let calls = fake.calls.lock().unwrap();
    assert_eq!(
        calls.added[0].1,
        vec!["spotify:track:1".to_string(), "spotify:track:3".to_string()]
    );
}

#[tokio::test]
async fn test_add_tracks_failure_is_not_surfaced() {
    let mut fake = FakeSpotify::with_tracks(&[("Song Artist", "spotify:track:x")]);
    fake.fail_add_tracks = true;
    let fake = Arc::new(fake);

    let result = materializer(&fake)
        .materialize("token", &songs(&[("Song", "Artist")]), "calm")
        .await;

    assert!(result.is_ok());
    assert_eq!(fake.calls.lock().unwrap().added.len(), 1);
}

#[tokio::test]
async fn test_user_lookup_failure_is_surfaced() {
    let fake = Arc::new(FakeSpotify {
        user_id: None,
        ..Default::default()
    });

    let result = materializer(&fake)
        .materialize("expired", &songs(&[("Song", "Artist")]), "calm")
        .await;

    assert!(matches!(result, Err(Error::UpstreamCallFailed { .. })));
    assert!(fake.calls.lock().unwrap().created.is_empty());
}

#[tokio::test]
async fn test_large_lists_are_added_in_batches() {
    let pairs: Vec<(String, String)> = (0..150)
        .map(|i| (format!("T{i}"), format!("A{i}")))
        .collect();
    let tracks: Vec<(String, String)> = pairs
        .iter()
        .map(|(t, a)| (format!("{t} {a}"), format!("spotify:track:{t}")))
        .collect();
    let track_refs: Vec<(&str, &str)> = tracks
        .iter()
        .map(|(q, u)| (q.as_str(), u.as_str()))
        .collect();
    let song_refs: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(t, a)| (t.as_str(), a.as_str()))
        .collect();
    let fake = Arc::new(FakeSpotify::with_tracks(&track_refs));

    let result = materializer(&fake)
        .materialize("token", &songs(&song_refs), "long")
        .await
        .unwrap();

    assert_eq!(result.tracks_resolved, 150);
    let calls = fake.calls.lock().unwrap();
    assert_eq!(calls.added.len(), 2);
    assert_eq!(calls.added[0].1.len(), 100);
    assert_eq!(calls.added[1].1.len(), 50);
    assert_eq!(calls.added[0].1[0], "spotify:track:T0");
    assert_eq!(calls.added[1].1[49], "spotify:track:T149");
}

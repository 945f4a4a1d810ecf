//! End-to-end behavior of the user-state stores, driven through the public
//! types the way a session mutates them.

use warbler_core::{AddOutcome, History, LikedSongs, PlaylistSet};
use warbler_core::warbler_state::{DEFAULT_PLAYLIST, Track, TrackId};

fn track(id: &str, name: &str) -> Track {
    Track {
        id: TrackId(id.to_string()),
        name: name.to_string(),
        primary_artists: "Test Artist".to_string(),
        image: vec![],
        duration: None,
    }
}

#[test]
fn listening_session_builds_bounded_history() {
    let mut history = History::new();
    for i in 0..150 {
        history.record(track(&format!("song{i}"), &format!("Song {i}")));
    }
    // Replay an old track that fell off the end, then a recent one.
    history.record(track("song10", "Song 10"));
    history.record(track("song149", "Song 149"));

    assert_eq!(history.len(), 100);
    assert_eq!(history.tracks()[0].id.as_str(), "song149");
    assert_eq!(history.tracks()[1].id.as_str(), "song10");
    let ids: Vec<&str> = history.tracks().iter().map(|t| t.id.as_str()).collect();
    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(ids, deduped);
}

#[test]
fn like_toggle_round_trips_membership() {
    let mut liked = LikedSongs::new();
    let t = track("abc", "Song");

    assert!(liked.toggle(t.clone()));
    assert!(liked.contains(&t.id));
    assert!(!liked.toggle(t.clone()));
    assert!(!liked.contains(&t.id));
    assert!(liked.is_empty());
}

#[test]
fn playlist_set_lifecycle() {
    let mut playlists = PlaylistSet::with_default();
    assert!(playlists.get(DEFAULT_PLAYLIST).is_some());

    let t = track("abc", "Song");
    assert_eq!(playlists.add("Gym", t.clone()), AddOutcome::Added);
    assert_eq!(playlists.add("Gym", t.clone()), AddOutcome::AlreadyPresent);
    assert_eq!(playlists.get("Gym").map(<[Track]>::len), Some(1));

    assert!(playlists.remove_track("Gym", &t.id));
    assert!(!playlists.remove_track("Gym", &t.id));
    assert_eq!(playlists.get("Gym").map(<[Track]>::len), Some(0));

    assert!(playlists.delete("Gym"));
    assert!(playlists.get("Gym").is_none());
    // The default playlist survives deletion of others.
    assert!(playlists.get(DEFAULT_PLAYLIST).is_some());
}

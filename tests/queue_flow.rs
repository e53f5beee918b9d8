use playdeck::queue::PlaybackQueue;
use std::fs;

#[test]
fn listening_session_flow_works() {
    let mut queue = PlaybackQueue::with_seed(1);
    queue.add("Song1");
    queue.add("Song2");
    queue.add("Song3");
    assert_eq!(queue.snapshot(), vec!["Song1", "Song2", "Song3"]);
    assert_eq!(queue.current(), Some("Song1"));

    queue.advance();
    assert_eq!(queue.current(), Some("Song2"));
    queue.advance();
    assert_eq!(queue.current(), Some("Song3"));

    // At the tail, sequential advance stays put.
    queue.advance();
    assert_eq!(queue.current(), Some("Song3"));

    queue.retreat();
    assert_eq!(queue.current(), Some("Song2"));

    assert!(queue.remove("Song2"));
    assert_eq!(queue.snapshot(), vec!["Song1", "Song3"]);
    assert_eq!(queue.current(), Some("Song3"));
}

#[test]
fn export_import_round_trip_through_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("playlist.txt");

    let mut queue = PlaybackQueue::with_seed(1);
    queue.add("Alpha");
    queue.add("Beta");
    queue.add("Gamma");
    queue.save_to(&path).expect("save");

    let mut restored = PlaybackQueue::with_seed(2);
    restored.load_from(&path).expect("load");
    assert_eq!(restored.snapshot(), queue.snapshot());
    assert_eq!(restored.current(), Some("Alpha"));
}

#[test]
fn import_skips_blank_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("playlist.txt");
    fs::write(&path, "Alpha\n\nBeta\n").expect("write");

    let mut queue = PlaybackQueue::with_seed(1);
    queue.load_from(&path).expect("load");
    assert_eq!(queue.snapshot(), vec!["Alpha", "Beta"]);
}

#[test]
fn load_replaces_previous_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("playlist.txt");
    fs::write(&path, "Fresh\n").expect("write");

    let mut queue = PlaybackQueue::with_seed(1);
    queue.add("Stale1");
    queue.add("Stale2");
    queue.load_from(&path).expect("load");
    assert_eq!(queue.snapshot(), vec!["Fresh"]);
    assert_eq!(queue.current(), Some("Fresh"));
}

#[test]
fn missing_file_surfaces_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");

    let mut queue = PlaybackQueue::with_seed(1);
    let err = queue.load_from(&path).expect_err("missing file");
    assert!(err.to_string().contains("failed to open"));
}

#[test]
fn shuffle_session_still_retreats_along_the_chain() {
    let mut queue = PlaybackQueue::with_seed(9);
    queue.add("A");
    queue.add("B");
    queue.add("C");
    queue.advance();
    queue.advance();
    assert_eq!(queue.current(), Some("C"));

    queue.toggle_shuffle();
    queue.advance();
    let landed = queue.current().expect("cursor").to_string();
    assert!(landed == "A" || landed == "B");

    queue.retreat();
    // Chain predecessor of B is A; A is the head and stays put.
    assert_eq!(queue.current(), Some("A"));
}

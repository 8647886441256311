//! Snapshot tests - read model contents and JSON encoding

use tui_2048::core::{GameSnapshot, GameState};
use tui_2048::types::Direction;

#[test]
fn test_snapshot_tracks_slides_of_latest_tilt() {
    // Bottom row: _ 2 _ 2
    let rows = [vec![0, 2, 0, 2], vec![0; 4], vec![0; 4], vec![0; 4]];
    let mut game = GameState::from_values(&rows, 0).unwrap();
    game.tilt(Direction::Right).unwrap();
    let snap = game.snapshot();

    assert_eq!(snap.score, 4);
    let merged = snap.cell(3, 0).unwrap();
    assert_eq!(merged.value, 4);
    assert!(merged.merged);

    // The tile at (3, 0) stays put and is absorbed by the one sliding in.
    let mut slides: Vec<_> = snap.slides.iter().map(|s| (s.from_x, s.distance, s.merged)).collect();
    slides.sort();
    assert_eq!(slides, vec![(1, 2, true), (3, 0, true)]);
}

#[test]
fn test_next_tilt_forgets_previous_slides() {
    let mut game = GameState::from_values(&[vec![2, 0], vec![0, 0]], 0).unwrap();
    game.tilt(Direction::Up).unwrap();
    assert_eq!(game.snapshot().slides.len(), 1);

    game.tilt(Direction::Up).unwrap();
    assert!(game.snapshot().slides.is_empty());
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut game = GameState::from_values(&[vec![4, 4], vec![2, 0]], 8).unwrap();
    game.tilt(Direction::Left).unwrap();
    let snap = game.snapshot();

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"score\":16"));
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

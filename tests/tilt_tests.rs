//! Tilt scenarios - end-to-end behaviour of GameState::tilt

use tui_2048::core::GameState;
use tui_2048::types::{Direction, GameAction};

/// Rows written top row first, as they appear on screen.
fn game(rows_top_down: &[&[u32]], score: u32) -> GameState {
    let values: Vec<Vec<u32>> = rows_top_down.iter().rev().map(|r| r.to_vec()).collect();
    GameState::from_values(&values, score).unwrap()
}

fn rows(state: &GameState) -> Vec<Vec<u32>> {
    state.board().values().into_iter().rev().collect()
}

#[test]
fn test_bottom_row_tilt_left() {
    let mut state = game(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[2, 2, 4, 0]], 0);
    let outcome = state.tilt(Direction::Left).unwrap();
    assert_eq!(outcome.score_delta, 4);
    assert_eq!(state.score(), 4);
    assert_eq!(rows(&state)[3], vec![4, 4, 0, 0]);
}

#[test]
fn test_column_of_four_twos_tilt_up() {
    let mut state = game(&[&[2, 0, 0, 0], &[2, 0, 0, 0], &[2, 0, 0, 0], &[2, 0, 0, 0]], 0);
    let outcome = state.tilt(Direction::Up).unwrap();
    assert_eq!(outcome.score_delta, 8);
    let column: Vec<u32> = rows(&state).iter().map(|r| r[0]).collect();
    assert_eq!(column, vec![4, 4, 0, 0]);
}

#[test]
fn test_three_equal_tiles_leave_two() {
    for dir in Direction::ALL {
        // Three 2s along the axis of `dir`, starting at the far edge.
        let mut state = GameState::new(4);
        for ly in 0..3 {
            let (x, y) = dir.physical(1, ly, 4);
            state.add_tile(2, x, y).unwrap();
        }
        state.tilt(dir).unwrap();
        assert_eq!(state.board().tile_count(), 2, "{:?}", dir);
        assert_eq!(state.score(), 4);

        let top = state.board().tile_at(1, 3, dir).unwrap().unwrap();
        let below = state.board().tile_at(1, 2, dir).unwrap().unwrap();
        assert_eq!(state.board().tile(top).unwrap().value(), 4);
        assert_eq!(state.board().tile(below).unwrap().value(), 2);
    }
}

#[test]
fn test_all_directions_agree_with_rotation() {
    // Tilting toward an edge must equal rotating so that edge is on top, tilting up
    // and rotating back.
    let base: &[&[u32]] = &[&[2, 0, 2, 4], &[4, 4, 0, 4], &[0, 2, 2, 2], &[8, 0, 8, 16]];
    for dir in Direction::ALL {
        let mut direct = game(base, 0);
        direct.tilt(dir).unwrap();

        let source = game(base, 0);
        let mut rotated = GameState::new(4);
        for ly in 0..4 {
            for lx in 0..4 {
                let (px, py) = dir.physical(lx, ly, 4);
                if let Some(tile) = source.tile(px, py).unwrap() {
                    rotated.add_tile(tile.value(), lx, ly).unwrap();
                }
            }
        }
        rotated.tilt(Direction::Up).unwrap();

        for ly in 0..4 {
            for lx in 0..4 {
                let (px, py) = dir.physical(lx, ly, 4);
                let a = direct.tile(px, py).unwrap().map(|t| t.value());
                let b = rotated.tile(lx, ly).unwrap().map(|t| t.value());
                assert_eq!(a, b, "{:?} at logical ({}, {})", dir, lx, ly);
            }
        }
        assert_eq!(direct.score(), rotated.score());
    }
}

#[test]
fn test_full_board_without_neighbours_is_game_over() {
    let state = game(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]], 100);
    assert!(!state.move_available());
    assert!(state.game_over());
}

#[test]
fn test_reaching_2048_ends_game() {
    let mut state = game(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[1024, 1024, 0, 0]], 0);
    assert!(!state.game_over());
    let outcome = state.tilt(Direction::Left).unwrap();
    assert_eq!(outcome.score_delta, 2048);
    assert!(state.move_available());
    assert!(state.game_over());
}

#[test]
fn test_restart_action_clears_board() {
    let mut state = game(&[&[2, 0], &[0, 2]], 12);
    state.apply_action(GameAction::Restart).unwrap();
    assert_eq!(state.score(), 0);
    assert_eq!(state.size(), 2);
    assert!(state.board().empty_cells().len() == 4);
}

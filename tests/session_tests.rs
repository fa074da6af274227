//! Game session tests - selection flow, staged cascades and restart

use gem_cascade::core::EngineConfig;
use gem_cascade::engine::{
    EngineError, GameSession, RejectReason, SelectOutcome, StepOutcome, SwapCheck, SwapOutcome,
};
use gem_cascade::types::{Coord, Direction};

fn session(seed: u64) -> GameSession {
    GameSession::new(EngineConfig::default(), seed).unwrap()
}

/// First adjacent pair whose swap makes a match, if the board has one
fn find_productive_swap(s: &GameSession) -> Option<(Coord, Coord)> {
    let engine = s.engine();
    let grid = s.grid();
    grid.coords().find_map(|a| {
        [Direction::Right, Direction::Up].into_iter().find_map(|dir| {
            let b = a.step(dir);
            let mut trial = grid.clone();
            match engine.try_swap(&mut trial, a, b) {
                Ok(SwapCheck::Matched) => Some((a, b)),
                _ => None,
            }
        })
    })
}

#[test]
fn test_same_seed_same_game() {
    let a = session(42);
    let b = session(42);
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.snapshot().board_hash, b.snapshot().board_hash);

    let c = session(43);
    assert_ne!(a.grid(), c.grid());
}

#[test]
fn test_session_respects_config() {
    let config = EngineConfig {
        width: 5,
        height: 7,
        palette_size: 4,
        ..EngineConfig::default()
    };
    let s = GameSession::new(config, 1).unwrap();
    assert_eq!(s.grid().width(), 5);
    assert_eq!(s.grid().height(), 7);
    assert!(s.grid().cells().iter().flatten().all(|t| t.0 < 4));
}

#[test]
fn test_session_rejects_invalid_config() {
    let config = EngineConfig {
        width: 0,
        ..EngineConfig::default()
    };
    assert!(matches!(
        GameSession::new(config, 1),
        Err(EngineError::Config(_))
    ));
}

#[test]
fn test_productive_swap_scores_and_counts_move() {
    for seed in 0..20 {
        let mut s = session(seed);
        let Some((a, b)) = find_productive_swap(&s) else {
            continue;
        };

        let out = s.swap(a, b).unwrap();
        assert!(out.is_committed());
        assert_eq!(s.moves(), 1);
        assert!(s.score() >= 30);
        assert_eq!(s.score() % 10, 0);
        assert!(!s.engine().has_any_match(s.grid()));
        return;
    }
    panic!("no seed produced a playable board");
}

#[test]
fn test_select_then_adjacent_swaps() {
    let mut s = session(7);

    assert_eq!(
        s.select(Coord::new(2, 2)).unwrap(),
        SelectOutcome::Selected(Coord::new(2, 2))
    );
    match s.select(Coord::new(2, 3)).unwrap() {
        SelectOutcome::Swapped(SwapOutcome::Committed { .. }) => assert_eq!(s.moves(), 1),
        SelectOutcome::Swapped(SwapOutcome::Reverted) => assert_eq!(s.moves(), 0),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(s.selected(), None);
}

#[test]
fn test_reselecting_same_tile_keeps_selection() {
    let mut s = session(8);
    s.select(Coord::new(1, 1)).unwrap();
    assert_eq!(
        s.select(Coord::new(1, 1)).unwrap(),
        SelectOutcome::Selected(Coord::new(1, 1))
    );
    s.clear_selection();
    assert_eq!(s.selected(), None);
}

#[test]
fn test_staged_swap_runs_to_stable() {
    for seed in 0..20 {
        let mut s = session(seed);
        let Some((a, b)) = find_productive_swap(&s) else {
            continue;
        };

        assert_eq!(s.begin_swap(a, b).unwrap(), SwapCheck::Matched);
        assert!(s.is_busy());
        assert_eq!(
            s.begin_swap(a, b).unwrap(),
            SwapCheck::Rejected(RejectReason::Busy)
        );

        let mut cleared = 0;
        loop {
            match s.step().unwrap() {
                StepOutcome::Cleared(n) => cleared += n,
                StepOutcome::Stable => break,
            }
        }
        assert!(cleared >= 3);
        assert_eq!(s.score() as usize, cleared * 10);
        assert!(!s.is_busy());
        return;
    }
    panic!("no seed produced a playable board");
}

#[test]
fn test_restart_keeps_config() {
    let config = EngineConfig {
        width: 6,
        height: 6,
        ..EngineConfig::default()
    };
    let mut s = GameSession::new(config, 3).unwrap();
    s.restart(11).unwrap();
    assert_eq!(s.seed(), 11);
    assert_eq!(s.config(), &config);
    assert_eq!(s.grid().width(), 6);
    assert_eq!(s.score(), 0);
}

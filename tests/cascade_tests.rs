//! Cascade tests - removal, gravity, refill and the resolution loop

use gem_cascade::core::{Grid, PaletteRng, ScoreTally, SequenceGenerator, TileGenerator};
use gem_cascade::engine::{collapse, refill, CascadeReport, EngineError, MatchEngine, StepOutcome};
use gem_cascade::types::TileType;

fn grid(rows: &[&str]) -> Grid {
    Grid::from_rows(rows).unwrap()
}

#[test]
fn test_clear_matches_removes_only_runs() {
    let engine = MatchEngine::default();
    let mut g = grid(&["BCD", "AAA"]);
    assert_eq!(engine.clear_matches(&mut g).unwrap(), 3);
    assert_eq!(g.to_rows(), vec!["BCD", "..."]);
}

#[test]
fn test_collapse_column_law() {
    let mut g = grid(&["A.B.", ".C..", "D..E", "..F."]);
    let columns_before: Vec<Vec<TileType>> = (0..g.width())
        .map(|c| g.column_cells(c).flatten().collect())
        .collect();

    collapse(&mut g).unwrap();

    for col in 0..g.width() {
        let cells: Vec<_> = g.column_cells(col).collect();
        // Occupied prefix, empty suffix.
        let filled = cells.iter().take_while(|c| c.is_some()).count();
        assert!(cells[filled..].iter().all(|c| c.is_none()), "col {}", col);
        // Same tiles in the same bottom-to-top order.
        let after: Vec<TileType> = cells.into_iter().flatten().collect();
        assert_eq!(after, columns_before[col], "col {}", col);
    }
}

#[test]
fn test_refill_leaves_no_empties() {
    let mut g = grid(&["...", "A.B"]);
    let mut rng = PaletteRng::new(3, 99);
    assert_eq!(refill(&mut g, &mut rng).unwrap(), 4);
    assert!(g.is_full());
    assert_eq!(g.get(0, 0), Ok(Some(TileType(0))));
    assert_eq!(g.get(2, 0), Ok(Some(TileType(1))));
}

#[test]
fn test_step_reports_once_per_iteration() {
    let engine = MatchEngine::default();
    // L shape: five distinct cells, one report.
    let mut g = grid(&["ABC", "ACB", "AAA"]);
    let mut counts: Vec<usize> = Vec::new();
    let mut gen = SequenceGenerator::from_letters("DEDEB");

    let out = engine.resolve_step(&mut g, &mut gen, &mut counts).unwrap();
    assert_eq!(out, StepOutcome::Cleared(5));
    assert_eq!(counts, vec![5]);
    assert!(g.is_full());
}

#[test]
fn test_resolve_all_count_conservation() {
    let engine = MatchEngine::default();

    for seed in 0..25u64 {
        // Start from an unsettled random board.
        let mut rng = PaletteRng::new(3, seed);
        let mut g = Grid::new(6, 6).unwrap();
        refill(&mut g, &mut rng).unwrap();

        // Replay step by step, checking each report against the set size.
        let mut replay = g.clone();
        let mut replay_rng = rng.clone();
        let mut expected = Vec::new();
        loop {
            let set_size = engine.collect_match_set(&replay).len();
            let mut step_counts: Vec<usize> = Vec::new();
            match engine
                .resolve_step(&mut replay, &mut replay_rng, &mut step_counts)
                .unwrap()
            {
                StepOutcome::Stable => break,
                StepOutcome::Cleared(n) => {
                    assert_eq!(n, set_size);
                    assert_eq!(step_counts, vec![set_size]);
                    expected.push(n);
                }
            }
        }

        let mut counts: Vec<usize> = Vec::new();
        let report = engine.resolve_all(&mut g, &mut rng, &mut counts).unwrap();
        assert_eq!(counts, expected, "seed {}", seed);
        assert_eq!(report.total_removed, counts.iter().sum::<usize>());
        assert_eq!(report.cascades, counts.len());
        assert_eq!(g, replay);
        assert!(!engine.has_any_match(&g));
    }
}

#[test]
fn test_resolve_all_terminates_after_forced_rounds() {
    let engine = MatchEngine::default();
    let mut g = grid(&["BCB", "AAA"]);
    let mut counts: Vec<usize> = Vec::new();

    // The first refill is forced to a matching row, then a mixed tail forever.
    let mut forced = 3;
    let mut tail = SequenceGenerator::from_letters("CDE");
    let mut gen = || {
        if forced > 0 {
            forced -= 1;
            return TileType(0);
        }
        tail.next_tile()
    };

    let report = engine.resolve_all(&mut g, &mut gen, &mut counts).unwrap();
    assert_eq!(counts, vec![3, 3]);
    assert_eq!(report.cascades, 2);
    assert_eq!(report.total_removed, 6);
    assert!(!engine.has_any_match(&g));
    assert_eq!(g.to_rows(), vec!["CDE", "BCB"]);
}

#[test]
fn test_resolve_all_on_stable_grid_is_noop() {
    let engine = MatchEngine::default();
    let mut g = grid(&["ABA", "BAB"]);
    let before = g.clone();
    let mut tally = ScoreTally::default();
    let mut gen = SequenceGenerator::from_letters("A");

    let report = engine.resolve_all(&mut g, &mut gen, &mut tally).unwrap();
    assert_eq!(report, CascadeReport::default());
    assert_eq!(g, before);
    assert_eq!(tally.score(), 0);
}

#[test]
fn test_resolve_all_scores_through_tally() {
    let engine = MatchEngine::default();
    let mut g = grid(&["BCD", "AAA"]);
    let mut tally = ScoreTally::new(10);
    let mut gen = SequenceGenerator::from_letters("CDB");

    engine.resolve_all(&mut g, &mut gen, &mut tally).unwrap();
    assert_eq!(tally.score(), 30);
    assert_eq!(tally.tiles_cleared(), 3);
    assert_eq!(tally.cascades(), 1);
}

#[test]
fn test_unsettled_is_reported_not_swallowed() {
    let engine = MatchEngine::default().with_max_cascades(3);
    let mut g = grid(&["AAA", "AAA"]);
    let mut counts: Vec<usize> = Vec::new();
    let mut always_a = || TileType(0);

    let err = engine
        .resolve_all(&mut g, &mut always_a, &mut counts)
        .unwrap_err();
    assert!(matches!(err, EngineError::Unsettled { cascades: 3 }));
    assert_eq!(counts, vec![6, 6, 6]);
}

//! Whole-session properties checked through the public API.

use std::collections::HashSet;

use tracegen::core::invariants::{move_directions, validate_lines};
use tracegen::core::line::{LineKind, Termination};
use tracegen::core::types::{Direction, Point};
use tracegen::io::config::GeneratorConfig;
use tracegen::session::{GenerationSession, Tick, generate};
use tracegen::test_support::small_config;

#[test]
fn claimed_points_are_globally_unique() {
    for seed in [0, 1, 2, 99, 4096] {
        let mut session = GenerationSession::new(small_config(), Some(seed)).expect("session");
        session.run(|_| {});

        let mut seen = HashSet::new();
        let mut total = 0usize;
        for line in session.lines() {
            total += line.claimed_points().len();
            seen.extend(line.claimed_points().iter().copied());
        }
        assert_eq!(seen.len(), total, "seed {seed}: a point was claimed twice");
        assert_eq!(session.occupied_points(), total, "seed {seed}");
    }
}

#[test]
fn lines_stay_in_bounds_and_budget() {
    let cfg = GeneratorConfig {
        seed: Some(2024),
        ..GeneratorConfig::default()
    };
    let bounds = cfg.bounds();
    let generation = generate(cfg, None).expect("generate");

    assert!(validate_lines(&generation.lines, bounds, 5).is_empty());
    for line in &generation.lines {
        assert!(line.steps_taken() <= line.max_steps());
        assert!(line.path().iter().all(|point| bounds.contains(*point)));
        assert!(line.termination().is_some());
    }
}

#[test]
fn unobstructed_lines_without_events_are_straight_diagonals() {
    let mut cfg = GeneratorConfig::default();
    cfg.growth.p_branch = 0.0;
    cfg.growth.p_orth = 0.0;
    let generation = generate(cfg, Some(1)).expect("generate");

    assert_eq!(generation.lines.len(), 16);
    for line in &generation.lines {
        assert!(
            move_directions(line.path(), 5)
                .iter()
                .all(|dir| *dir == Some(Direction::Diagonal)),
            "{:?} left the diagonal",
            line.kind()
        );
        if matches!(line.kind(), LineKind::Secondary { .. }) {
            assert_eq!(line.termination(), Some(Termination::Complete));
            assert_eq!(line.steps_taken(), 55);
        }
    }
}

#[test]
fn ticking_matches_one_shot_generation() {
    let one_shot = generate(small_config(), Some(31)).expect("generate");

    let mut session = GenerationSession::new(small_config(), Some(31)).expect("session");
    while session.tick() == Tick::Stepped {}

    assert!(session.is_finished());
    assert_eq!(session.snapshot(), one_shot.lines);
    assert_eq!(session.trunk_length(), Some(one_shot.trunk_length));
}

#[test]
fn different_seeds_diverge() {
    let a = generate(small_config(), Some(10)).expect("generate");
    let b = generate(small_config(), Some(11)).expect("generate");
    // The trunk never draws, so it is shared.
    assert_eq!(a.lines[0], b.lines[0]);
    assert_ne!(a.lines, b.lines);
}

#[test]
fn skipped_secondary_draws_nothing() {
    let mut cfg = small_config();
    cfg.canvas.width = 20;
    cfg.canvas.height = 20;
    cfg.trunk.stop_at = None;
    cfg.secondary.count = 6;
    let generation = generate(cfg, Some(3)).expect("generate");

    // Origins past the 20-unit edge are out of bounds: only (0,5), (10,0), (0,15), (20,0).
    let starts: Vec<Point> = generation
        .lines
        .iter()
        .filter(|line| matches!(line.kind(), LineKind::Secondary { .. }))
        .map(|line| line.path()[0])
        .collect();
    assert_eq!(
        starts,
        vec![
            Point::new(0, 5),
            Point::new(10, 0),
            Point::new(0, 15),
            Point::new(20, 0)
        ]
    );
}

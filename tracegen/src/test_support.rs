//! Test-only helpers for driving lines and sessions deterministically.

use std::collections::VecDeque;

use crate::core::draws::DrawSource;
use crate::core::grid::OccupancyGrid;
use crate::core::line::{Line, StepOutcome};
use crate::core::types::{Bounds, GrowthRules};
use crate::io::config::GeneratorConfig;

/// Value returned once a script runs dry; never triggers a special event.
const QUIET_DRAW: f64 = 0.999;

/// Draw source that replays fixed values, then returns a quiet constant.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    values: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            consumed: 0,
        }
    }

    /// A source that never selects a branch or orth event.
    pub fn never_special() -> Self {
        Self::new([])
    }

    /// Number of values drawn so far, scripted or not.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl DrawSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        self.consumed += 1;
        self.values.pop_front().unwrap_or(QUIET_DRAW)
    }
}

/// Default growth rules (step 5) on a custom canvas.
pub fn rules(bounds: Bounds) -> GrowthRules {
    GrowthRules {
        bounds,
        ..GeneratorConfig::default().growth_rules()
    }
}

/// Small config that still exercises trunk, secondaries, and branches.
pub fn small_config() -> GeneratorConfig {
    let mut cfg = GeneratorConfig::default();
    cfg.canvas.width = 200;
    cfg.canvas.height = 200;
    cfg.trunk.stop_at = Some(150);
    cfg.secondary.count = 6;
    cfg.growth.p_branch = 0.05;
    cfg.growth.p_orth = 0.05;
    cfg
}

/// Step `line` until it finishes, returning every outcome.
pub fn run_to_end<D: DrawSource>(
    line: &mut Line,
    grid: &mut OccupancyGrid,
    rules: &GrowthRules,
    draws: &mut D,
) -> Vec<StepOutcome> {
    let mut outcomes = Vec::new();
    while line.is_active() {
        outcomes.push(line.step(grid, rules, draws));
    }
    outcomes
}

//! Generation orchestration for a single drawing.
//!
//! A session grows the trunk from the origin, then each secondary line in
//! turn. When a secondary ends with a branch request, the child is grown to
//! completion before the next secondary starts. Each [`GenerationSession::tick`]
//! steps exactly one line once, so a live view can redraw between ticks.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::draws::{DrawSource, SeededDraws, fresh_seed};
use crate::core::grid::OccupancyGrid;
use crate::core::line::{Line, StepOutcome};
use crate::core::scheduler::spawn_branch;
use crate::core::types::{GrowthRules, Point};
use crate::io::config::GeneratorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Trunk,
    Secondaries,
    Done,
}

/// Result of a single [`GenerationSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One line advanced by one step.
    Stepped,
    /// Every line has reached a terminal state.
    Finished,
}

/// A finished drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub seed: u64,
    pub trunk_length: u32,
    /// Trunk first, then each secondary followed by its branch child.
    pub lines: Vec<Line>,
}

#[derive(Debug)]
pub struct GenerationSession {
    config: GeneratorConfig,
    rules: GrowthRules,
    seed: u64,
    grid: OccupancyGrid,
    draws: SeededDraws,
    finished: Vec<Line>,
    current: Option<Line>,
    phase: Phase,
    trunk_length: Option<u32>,
    next_secondary: u32,
}

impl GenerationSession {
    /// Validate `config` and start a session with the trunk in place.
    ///
    /// Seed precedence: `seed`, then `config.seed`, then a fresh draw.
    pub fn new(config: GeneratorConfig, seed: Option<u64>) -> Result<Self> {
        config.validate().context("invalid generator config")?;
        let seed = seed.or(config.seed).unwrap_or_else(fresh_seed);
        let rules = config.growth_rules();
        let mut session = Self {
            config,
            rules,
            seed,
            grid: OccupancyGrid::new(),
            draws: SeededDraws::new(seed),
            finished: Vec::new(),
            current: None,
            phase: Phase::Trunk,
            trunk_length: None,
            next_secondary: 0,
        };
        session.start();
        Ok(session)
    }

    /// Discard every line and all occupancy, then restart from the trunk.
    ///
    /// Without an explicit seed a fresh one is drawn.
    pub fn reset(&mut self, seed: Option<u64>) {
        self.seed = seed.unwrap_or_else(fresh_seed);
        self.start();
    }

    fn start(&mut self) {
        self.grid = OccupancyGrid::new();
        self.draws = SeededDraws::new(self.seed);
        self.finished.clear();
        self.trunk_length = None;
        self.next_secondary = 0;
        self.phase = Phase::Trunk;
        self.current = Some(Line::trunk(
            Point::ORIGIN,
            self.config.trunk.max_steps,
            &mut self.grid,
            &self.rules,
        ));
        info!(seed = self.seed, "generation started");
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Trunk length, once the trunk has finished.
    pub fn trunk_length(&self) -> Option<u32> {
        self.trunk_length
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn occupied_points(&self) -> usize {
        self.grid.len()
    }

    /// Finished lines, then the line currently growing.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.finished.iter().chain(self.current.iter())
    }

    /// Owned copy of every line for a live view.
    pub fn snapshot(&self) -> Vec<Line> {
        self.lines().cloned().collect()
    }

    /// Advance exactly one line by one step.
    pub fn tick(&mut self) -> Tick {
        loop {
            match self.phase {
                Phase::Done => return Tick::Finished,
                Phase::Trunk => {
                    let stop_at = self.config.trunk.stop_at;
                    let Some(trunk) = self.current.as_mut() else {
                        self.phase = Phase::Secondaries;
                        continue;
                    };
                    let position = trunk.position();
                    if stop_at.is_some_and(|limit| position.x >= limit || position.y >= limit) {
                        trunk.halt();
                    } else {
                        trunk.step(&mut self.grid, &self.rules, &mut self.draws);
                    }
                    if !trunk.is_active() {
                        let length = trunk.steps_taken();
                        self.trunk_length = Some(length);
                        self.retire_current();
                        self.phase = Phase::Secondaries;
                        info!(trunk_length = length, "trunk finished");
                    }
                    return Tick::Stepped;
                }
                Phase::Secondaries => {
                    if let Some(line) = self.current.as_mut() {
                        let outcome = line.step(&mut self.grid, &self.rules, &mut self.draws);
                        if !line.is_active() {
                            self.retire_current();
                            if let StepOutcome::Branched(request) = outcome {
                                debug!(
                                    x = request.origin.x,
                                    y = request.origin.y,
                                    budget = request.budget,
                                    "branch requested"
                                );
                                self.current = spawn_branch(&request);
                            }
                        }
                        return Tick::Stepped;
                    }
                    if self.next_secondary < self.config.secondary.count {
                        self.spawn_secondary();
                        continue;
                    }
                    self.phase = Phase::Done;
                    info!(
                        seed = self.seed,
                        lines = self.finished.len(),
                        occupied = self.grid.len(),
                        "generation finished"
                    );
                    return Tick::Finished;
                }
            }
        }
    }

    /// Tick until finished, calling `on_tick` after every step.
    ///
    /// Returns the number of ticks taken.
    pub fn run<F: FnMut(&Self)>(&mut self, mut on_tick: F) -> u64 {
        let mut ticks = 0u64;
        while self.tick() == Tick::Stepped {
            ticks += 1;
            on_tick(self);
        }
        ticks
    }

    /// Run to completion and hand over the drawing.
    pub fn finish(mut self) -> Generation {
        self.run(|_| {});
        Generation {
            seed: self.seed,
            trunk_length: self.trunk_length.unwrap_or_default(),
            lines: self.finished,
        }
    }

    fn retire_current(&mut self) {
        if let Some(line) = self.current.take() {
            debug!(
                index = self.finished.len(),
                kind = line.kind().label(),
                termination = ?line.termination(),
                steps = line.steps_taken(),
                "line finished"
            );
            self.finished.push(line);
        }
    }

    fn spawn_secondary(&mut self) {
        let index = self.next_secondary;
        self.next_secondary += 1;

        let origin = match secondary_origin(index, self.rules.step) {
            Some(origin) if self.rules.bounds.contains(origin) && !self.grid.contains(origin) => {
                origin
            }
            _ => {
                debug!(index, "secondary origin unavailable, skipped");
                return;
            }
        };

        let jitter = match self.config.secondary.margin_jitter {
            0 => 0,
            max => self.draws.next_up_to(max),
        };
        let margin = self.config.secondary.budget_margin.saturating_add(jitter);
        let budget = self
            .trunk_length
            .unwrap_or_default()
            .saturating_sub(margin)
            .max(1);
        debug!(index, x = origin.x, y = origin.y, budget, "secondary started");
        self.current = Some(Line::secondary(origin, budget, &mut self.grid, &self.rules));
    }
}

/// Start point of secondary `index`: alternating axes, one more step out each time.
pub fn secondary_origin(index: u32, step: i64) -> Option<Point> {
    let offset = step.checked_mul(i64::from(index) + 1)?;
    if index % 2 == 0 {
        Some(Point::new(0, offset))
    } else {
        Some(Point::new(offset, 0))
    }
}

/// Run a whole session in one call.
pub fn generate(config: GeneratorConfig, seed: Option<u64>) -> Result<Generation> {
    Ok(GenerationSession::new(config, seed)?.finish())
}

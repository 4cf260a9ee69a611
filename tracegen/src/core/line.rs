//! Per-line growth state machine.
//!
//! A line starts diagonal-only for `start_phase` steps, then enters the free
//! phase where a secondary line may spend its one special event: a branch
//! (which ends the line) or an orthogonal block (after which it is
//! diagonal-only for good). Every [`Line::step`] call commits at most one
//! point to the shared grid.

use serde::{Deserialize, Serialize};

use crate::core::draws::DrawSource;
use crate::core::grid::OccupancyGrid;
use crate::core::movement::systematic_move;
use crate::core::types::{Axis, BranchRequest, Direction, GrowthRules, Point};

/// What a line is, and which special moves it may still make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Grown from the origin first; diagonal-only, never draws.
    Trunk,
    /// Offset line with one special event (branch or orth block) until `spent`.
    Secondary { spent: bool },
    /// Child of a secondary; opens with one forced orth block, never branches.
    Branch,
}

impl LineKind {
    pub fn label(self) -> &'static str {
        match self {
            LineKind::Trunk => "trunk",
            LineKind::Secondary { .. } => "secondary",
            LineKind::Branch => "branch",
        }
    }

    fn has_special(self) -> bool {
        matches!(self, LineKind::Secondary { spent: false })
    }
}

/// How a line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Handed its remaining budget to a branch request.
    Branched,
    /// No legal move, or the orchestrator's stop condition fired.
    Stopped,
    /// Used its whole step budget.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineState {
    /// Diagonal-only window (`steps_taken < start_phase`).
    Starting,
    Free,
    /// Orth block chosen but its axis not drawn yet.
    PendingOrth,
    /// Inside an orth block, `done` sub-steps committed.
    Orth { axis: Axis, done: u32 },
    Finished(Termination),
}

/// Result of a single [`Line::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One point committed. The line may have completed with it.
    Moved(Point),
    /// The line ended and asks for a child line.
    Branched(BranchRequest),
    /// Every candidate move was blocked; nothing committed.
    Stopped,
    /// The line had already finished.
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    kind: LineKind,
    path: Vec<Point>,
    steps_taken: u32,
    max_steps: u32,
    state: LineState,
}

impl Line {
    /// Start the trunk at `origin`, claiming it.
    pub fn trunk(
        origin: Point,
        max_steps: u32,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
    ) -> Self {
        Self::start(LineKind::Trunk, origin, max_steps, grid, rules)
    }

    /// Start a secondary line at `origin`, claiming it.
    pub fn secondary(
        origin: Point,
        max_steps: u32,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
    ) -> Self {
        Self::start(LineKind::Secondary { spent: false }, origin, max_steps, grid, rules)
    }

    /// Start a branch line at the request's junction.
    ///
    /// The junction belongs to the parent and is already claimed.
    pub fn branch(request: &BranchRequest) -> Self {
        let state = if request.budget == 0 {
            LineState::Finished(Termination::Complete)
        } else {
            LineState::PendingOrth
        };
        Self {
            kind: LineKind::Branch,
            path: vec![request.origin],
            steps_taken: 0,
            max_steps: request.budget,
            state,
        }
    }

    fn start(
        kind: LineKind,
        origin: Point,
        max_steps: u32,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
    ) -> Self {
        grid.claim(origin);
        let mut line = Self {
            kind,
            path: vec![origin],
            steps_taken: 0,
            max_steps,
            state: LineState::Starting,
        };
        line.state = if max_steps == 0 {
            LineState::Finished(Termination::Complete)
        } else {
            line.resume_state(rules)
        };
        line
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Committed path, junction first for branch lines.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Points this line claimed itself (a branch line's junction is its parent's).
    pub fn claimed_points(&self) -> &[Point] {
        match self.kind {
            LineKind::Branch => &self.path[1..],
            _ => &self.path,
        }
    }

    pub fn position(&self) -> Point {
        // Every constructor seeds the path with the start point.
        self.path[self.path.len() - 1]
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn remaining(&self) -> u32 {
        self.max_steps - self.steps_taken
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, LineState::Finished(_))
    }

    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            LineState::Finished(termination) => Some(termination),
            _ => None,
        }
    }

    /// End the line without moving (orchestrator stop condition).
    pub fn halt(&mut self) {
        if self.is_active() {
            self.state = LineState::Finished(Termination::Stopped);
        }
    }

    /// Advance the state machine by one step.
    pub fn step<D: DrawSource>(
        &mut self,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
        draws: &mut D,
    ) -> StepOutcome {
        match self.state {
            LineState::Finished(_) => StepOutcome::Idle,
            LineState::Starting => self.step_diagonal(grid, rules),
            LineState::Free => self.step_free(grid, rules, draws),
            LineState::PendingOrth => self.enter_orth_block(grid, rules, draws),
            LineState::Orth { axis, done } => self.orth_sub_step(grid, rules, axis, done),
        }
    }

    fn step_free<D: DrawSource>(
        &mut self,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
        draws: &mut D,
    ) -> StepOutcome {
        if !self.kind.has_special() {
            return self.step_diagonal(grid, rules);
        }

        let r = draws.next_unit();
        if r < rules.p_branch {
            let remaining = self.remaining();
            if remaining < rules.min_branch_remaining {
                return self.step_diagonal(grid, rules);
            }
            self.kind = LineKind::Secondary { spent: true };
            self.state = LineState::Finished(Termination::Branched);
            return StepOutcome::Branched(BranchRequest {
                origin: self.position(),
                budget: remaining.saturating_add(rules.branch_bonus),
            });
        }
        if r < rules.p_branch + rules.p_orth {
            self.kind = LineKind::Secondary { spent: true };
            return self.enter_orth_block(grid, rules, draws);
        }
        self.step_diagonal(grid, rules)
    }

    fn step_diagonal(&mut self, grid: &mut OccupancyGrid, rules: &GrowthRules) -> StepOutcome {
        match systematic_move(
            grid,
            rules.bounds,
            rules.step,
            self.position(),
            Direction::Diagonal,
            &GrowthRules::DIAGONAL_FALLBACKS,
        ) {
            Ok((to, _)) => {
                self.commit(to);
                if self.is_active() {
                    self.state = self.resume_state(rules);
                }
                StepOutcome::Moved(to)
            }
            Err(_) => self.stop(),
        }
    }

    fn enter_orth_block<D: DrawSource>(
        &mut self,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
        draws: &mut D,
    ) -> StepOutcome {
        let axis = if draws.next_unit() < 0.5 {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        self.orth_sub_step(grid, rules, axis, 0)
    }

    /// One block sub-step along `axis`, falling back to the other axis.
    fn orth_sub_step(
        &mut self,
        grid: &mut OccupancyGrid,
        rules: &GrowthRules,
        axis: Axis,
        done: u32,
    ) -> StepOutcome {
        match systematic_move(
            grid,
            rules.bounds,
            rules.step,
            self.position(),
            axis.direction(),
            &[axis.other().direction()],
        ) {
            Ok((to, _)) => {
                self.commit(to);
                if self.is_active() {
                    let done = done + 1;
                    self.state = if done >= rules.orth_block_len {
                        self.resume_state(rules)
                    } else {
                        LineState::Orth { axis, done }
                    };
                }
                StepOutcome::Moved(to)
            }
            Err(_) => self.stop(),
        }
    }

    fn commit(&mut self, to: Point) {
        self.path.push(to);
        self.steps_taken += 1;
        if self.steps_taken >= self.max_steps {
            self.state = LineState::Finished(Termination::Complete);
        }
    }

    fn stop(&mut self) -> StepOutcome {
        self.state = LineState::Finished(Termination::Stopped);
        StepOutcome::Stopped
    }

    fn resume_state(&self, rules: &GrowthRules) -> LineState {
        if self.steps_taken < rules.start_phase {
            LineState::Starting
        } else {
            LineState::Free
        }
    }
}

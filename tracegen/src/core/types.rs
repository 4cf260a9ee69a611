//! Shared deterministic types for the growth core.
//!
//! These types define stable contracts between core components. They carry no
//! I/O and no randomness; every operation on them is a pure function.

use serde::{Deserialize, Serialize};

/// A lattice point in canvas coordinates.
///
/// Coordinates are always integer multiples of the lattice step for points
/// produced by the core, but the type itself does not enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`, or `None` on integer overflow.
    pub fn offset(self, (dx, dy): (i64, i64)) -> Option<Point> {
        Some(Point {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

/// Inclusive canvas bounds: `0..=width` by `0..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    pub const fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        (0..=self.width).contains(&point.x) && (0..=self.height).contains(&point.y)
    }
}

/// The three legal move directions. Lines only ever grow right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Diagonal,
    Horizontal,
    Vertical,
}

impl Direction {
    /// Delta for this direction at lattice step `step`.
    pub fn delta(self, step: i64) -> (i64, i64) {
        match self {
            Direction::Diagonal => (step, step),
            Direction::Horizontal => (step, 0),
            Direction::Vertical => (0, step),
        }
    }

    /// Classify a delta, if it is one of the three lattice moves.
    pub fn from_delta((dx, dy): (i64, i64), step: i64) -> Option<Direction> {
        match (dx == step, dy == step, dx == 0, dy == 0) {
            (true, true, _, _) => Some(Direction::Diagonal),
            (true, _, _, true) => Some(Direction::Horizontal),
            (_, true, true, _) => Some(Direction::Vertical),
            _ => None,
        }
    }
}

/// Axis of an orthogonal block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Horizontal,
            Axis::Vertical => Direction::Vertical,
        }
    }
}

/// Tunables for a single line's state machine and its movement.
///
/// Built from the validated generator config; the core never validates these
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRules {
    /// Lattice step `S`.
    pub step: i64,
    pub bounds: Bounds,
    /// Number of leading steps that are diagonal-only (`K`).
    pub start_phase: u32,
    /// Target length of an orthogonal block.
    pub orth_block_len: u32,
    /// Minimum remaining budget required to emit a branch request.
    pub min_branch_remaining: u32,
    /// Added to the parent's remaining budget to form the child's budget.
    pub branch_bonus: u32,
    pub p_branch: f64,
    pub p_orth: f64,
}

impl GrowthRules {
    /// Ordered fallback list for a diagonal step.
    pub const DIAGONAL_FALLBACKS: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];
}

/// Deferred instruction to spawn a child line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRequest {
    /// Parent position at request time; becomes the child's junction.
    pub origin: Point,
    /// Parent's remaining budget plus the branch bonus.
    pub budget: u32,
}

//! Append-only occupancy set shared by every line in a session.

use std::collections::HashSet;

use crate::core::types::Point;

/// Claimed lattice points. Points are never released.
#[derive(Debug, Clone, Default)]
pub struct OccupancyGrid {
    occupied: HashSet<Point>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.occupied.contains(&point)
    }

    /// Claim `point`. Returns `false` if it was already claimed.
    pub fn claim(&mut self, point: Point) -> bool {
        self.occupied.insert(point)
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}

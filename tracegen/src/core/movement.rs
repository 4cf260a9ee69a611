//! Movement policy: resolve a candidate step against bounds and occupancy.

use crate::core::grid::OccupancyGrid;
use crate::core::types::{Bounds, Direction, Point};

/// Why a move could not be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A single candidate is out of bounds or already claimed.
    Blocked,
    /// The primary direction and every fallback were blocked.
    Exhausted,
}

/// Check a single candidate move without committing it.
pub fn try_move(
    grid: &OccupancyGrid,
    bounds: Bounds,
    from: Point,
    delta: (i64, i64),
) -> Result<Point, MoveError> {
    let to = from.offset(delta).ok_or(MoveError::Blocked)?;
    if !bounds.contains(to) || grid.contains(to) {
        return Err(MoveError::Blocked);
    }
    Ok(to)
}

/// Try `primary`, then each of `fallbacks` in order, and claim the first
/// destination that is free.
///
/// `from` is assumed to be claimed already. On success the destination is
/// committed to `grid` and returned together with the direction taken.
pub fn systematic_move(
    grid: &mut OccupancyGrid,
    bounds: Bounds,
    step: i64,
    from: Point,
    primary: Direction,
    fallbacks: &[Direction],
) -> Result<(Point, Direction), MoveError> {
    for direction in std::iter::once(primary).chain(fallbacks.iter().copied()) {
        if let Ok(to) = try_move(grid, bounds, from, direction.delta(step)) {
            grid.claim(to);
            return Ok((to, direction));
        }
    }
    Err(MoveError::Exhausted)
}

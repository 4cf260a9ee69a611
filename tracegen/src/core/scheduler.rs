//! Branch scheduling.
//!
//! Policy is eager and depth-first: when a line ends with a branch request,
//! its child is built immediately and grown to a terminal state before the
//! orchestrator moves on to the next sibling. A line emits at most one request,
//! so there is never more than one pending child.

use crate::core::line::Line;
use crate::core::types::BranchRequest;

/// Build the child line for `request`, or `None` when it has no budget.
pub fn spawn_branch(request: &BranchRequest) -> Option<Line> {
    if request.budget == 0 {
        return None;
    }
    Some(Line::branch(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::line::{LineKind, LineState};
    use crate::core::types::Point;

    #[test]
    fn spawn_starts_at_junction_with_forced_orth() {
        let request = BranchRequest {
            origin: Point::new(40, 25),
            budget: 17,
        };
        let child = spawn_branch(&request).expect("child");
        assert_eq!(child.kind(), LineKind::Branch);
        assert_eq!(child.path(), &[Point::new(40, 25)]);
        assert_eq!(child.max_steps(), 17);
        assert_eq!(child.state(), LineState::PendingOrth);
        assert!(child.claimed_points().is_empty());
    }

    #[test]
    fn zero_budget_is_skipped() {
        let request = BranchRequest {
            origin: Point::ORIGIN,
            budget: 0,
        };
        assert!(spawn_branch(&request).is_none());
    }
}

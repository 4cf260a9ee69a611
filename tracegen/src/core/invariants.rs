//! Whole-session invariants over a finished set of lines.

use std::collections::HashSet;

use crate::core::line::{Line, LineKind};
use crate::core::types::{Bounds, Direction, Point};

/// Check invariants that must hold for any generated line set:
/// - No lattice point is claimed twice, by two lines or by one line
/// - Every point lies inside `bounds`
/// - `steps_taken <= max_steps` and the path has `steps_taken + 1` points
/// - Every move is one lattice step (diagonal, horizontal or vertical)
/// - A branch line starts on a point some earlier line claimed
pub fn validate_lines(lines: &[Line], bounds: Bounds, step: i64) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (index, line) in lines.iter().enumerate() {
        let label = format!("line {} ({})", index, line.kind().label());
        if line.kind() == LineKind::Branch
            && let Some(junction) = line.path().first()
            && !seen.contains(junction)
        {
            errors.push(format!(
                "{}: junction ({}, {}) not claimed by an earlier line",
                label, junction.x, junction.y
            ));
        }
        validate_line(line, &label, bounds, step, &mut seen, &mut errors);
    }
    errors
}

fn validate_line(
    line: &Line,
    label: &str,
    bounds: Bounds,
    step: i64,
    seen: &mut HashSet<Point>,
    errors: &mut Vec<String>,
) {
    if line.steps_taken() > line.max_steps() {
        errors.push(format!(
            "{}: steps_taken {} exceeds max_steps {}",
            label,
            line.steps_taken(),
            line.max_steps()
        ));
    }

    if line.path().len() != line.steps_taken() as usize + 1 {
        errors.push(format!(
            "{}: path has {} points for {} steps",
            label,
            line.path().len(),
            line.steps_taken()
        ));
    }

    for point in line.claimed_points() {
        if !seen.insert(*point) {
            errors.push(format!(
                "{}: point ({}, {}) claimed twice",
                label, point.x, point.y
            ));
        }
    }

    for point in line.path() {
        if !bounds.contains(*point) {
            errors.push(format!(
                "{}: point ({}, {}) out of bounds",
                label, point.x, point.y
            ));
        }
    }

    for (index, direction) in move_directions(line.path(), step).iter().enumerate() {
        if direction.is_none() {
            errors.push(format!("{}: move {} is not a lattice step", label, index));
        }
    }
}

/// Classify each consecutive move along `path`.
pub fn move_directions(path: &[Point], step: i64) -> Vec<Option<Direction>> {
    path.windows(2)
        .map(|pair| Direction::from_delta((pair[1].x - pair[0].x, pair[1].y - pair[0].y), step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::OccupancyGrid;
    use crate::core::types::BranchRequest;
    use crate::test_support::{ScriptedDraws, rules, run_to_end};

    #[test]
    fn accepts_disjoint_lines_with_junction() {
        let rules = rules(Bounds::new(200, 200));
        let mut grid = OccupancyGrid::new();
        let mut draws = ScriptedDraws::never_special();
        let mut parent = Line::secondary(Point::ORIGIN, 12, &mut grid, &rules);
        run_to_end(&mut parent, &mut grid, &rules, &mut draws);
        let mut child = Line::branch(&BranchRequest {
            origin: parent.position(),
            budget: 8,
        });
        run_to_end(&mut child, &mut grid, &rules, &mut draws);

        let errors = validate_lines(&[parent, child], rules.bounds, rules.step);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn reports_shared_points_and_bounds() {
        let rules = rules(Bounds::new(20, 20));
        let mut first_grid = OccupancyGrid::new();
        let mut second_grid = OccupancyGrid::new();
        let mut draws = ScriptedDraws::never_special();
        let mut first = Line::secondary(Point::ORIGIN, 2, &mut first_grid, &rules);
        let mut second = Line::secondary(Point::ORIGIN, 2, &mut second_grid, &rules);
        run_to_end(&mut first, &mut first_grid, &rules, &mut draws);
        run_to_end(&mut second, &mut second_grid, &rules, &mut draws);

        let errors = validate_lines(&[first, second], Bounds::new(5, 5), rules.step);
        assert!(errors.iter().any(|err| err.contains("claimed twice")));
        assert!(errors.iter().any(|err| err.contains("out of bounds")));
    }

    #[test]
    fn reports_orphan_junction() {
        let child = Line::branch(&BranchRequest {
            origin: Point::new(10, 10),
            budget: 5,
        });
        let errors = validate_lines(&[child], Bounds::new(100, 100), 5);
        assert!(errors.iter().any(|err| err.contains("junction")));
    }

    #[test]
    fn move_directions_flags_long_jumps() {
        let path = [Point::new(0, 0), Point::new(5, 5), Point::new(15, 5)];
        assert_eq!(
            move_directions(&path, 5),
            vec![Some(Direction::Diagonal), None]
        );
    }
}

use astar_core::{CellState, Grid, Point};

/// Walk the predecessor chain from `end` back to `start` and mark it on the
/// grid.
///
/// Every cell strictly between the endpoints becomes [`CellState::Path`] and
/// `end` is set back to [`CellState::End`]; `start` is left alone. Returns the
/// path ordered `start..=end`.
///
/// The chain is validated before anything is marked: a missing predecessor,
/// or a chain longer than the grid (a cycle), leaves the grid untouched and
/// returns an empty path.
pub fn reconstruct_path(
    grid: &mut Grid,
    start: Point,
    end: Point,
    parent: impl Fn(Point) -> Option<Point>,
) -> Vec<Point> {
    if start == end {
        return vec![start];
    }

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        if path.len() > grid.len() {
            log::warn!("predecessor chain from {end} does not terminate");
            return Vec::new();
        }
        let Some(prev) = parent(current) else {
            log::warn!("predecessor chain broken at {current}");
            return Vec::new();
        };
        path.push(prev);
        current = prev;
    }
    path.reverse();

    for &p in &path[1..path.len() - 1] {
        grid.set_state(p, CellState::Path);
    }
    grid.set_state(end, CellState::End);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn chain(points: &[(i32, i32)]) -> HashMap<Point, Point> {
        points
            .windows(2)
            .map(|w| (Point::new(w[1].0, w[1].1), Point::new(w[0].0, w[0].1)))
            .collect()
    }

    #[test]
    fn marks_intermediate_cells_only() {
        let mut grid = Grid::new(3, 3);
        let start = Point::new(0, 0);
        let end = Point::new(2, 1);
        grid.set_state(start, CellState::Start);
        grid.set_state(end, CellState::Open);
        let parents = chain(&[(0, 0), (1, 0), (2, 0), (2, 1)]);

        let path = reconstruct_path(&mut grid, start, end, |p| parents.get(&p).copied());

        assert_eq!(
            path,
            vec![start, Point::new(1, 0), Point::new(2, 0), end]
        );
        assert_eq!(grid.count(CellState::Path), 2);
        assert_eq!(grid.state(start), Some(CellState::Start));
        assert_eq!(grid.state(end), Some(CellState::End));
    }

    #[test]
    fn adjacent_endpoints_mark_nothing() {
        let mut grid = Grid::new(2, 2);
        let parents = chain(&[(0, 0), (0, 1)]);
        let path = reconstruct_path(&mut grid, Point::new(0, 0), Point::new(0, 1), |p| {
            parents.get(&p).copied()
        });
        assert_eq!(path.len(), 2);
        assert_eq!(grid.count(CellState::Path), 0);
    }

    #[test]
    fn broken_chain_leaves_grid_untouched() {
        let mut grid = Grid::new(3, 3);
        let before = grid.snapshot();
        let parents = chain(&[(1, 1), (2, 1), (2, 2)]);
        let path = reconstruct_path(&mut grid, Point::new(0, 0), Point::new(2, 2), |p| {
            parents.get(&p).copied()
        });
        assert!(path.is_empty());
        assert_eq!(grid.snapshot(), before);
    }

    #[test]
    fn cycle_is_detected() {
        let mut grid = Grid::new(2, 2);
        let a = Point::new(0, 1);
        let b = Point::new(1, 1);
        let path = reconstruct_path(&mut grid, Point::new(0, 0), a, |p| {
            Some(if p == a { b } else { a })
        });
        assert!(path.is_empty());
        assert_eq!(grid.count(CellState::Path), 0);
    }
}

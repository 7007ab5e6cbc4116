//! The [`Grid`] type — a square matrix of [`Cell`]s that owns every cell and
//! their cached adjacency.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::geom::{Point, Range};

/// Default number of rows (and columns).
pub const DEFAULT_ROWS: i32 = 25;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors produced when building a grid from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The text has no rows.
    Empty,
    /// A row's length differs from the number of rows.
    NotSquare { row: i32, len: usize, expected: usize },
    /// A character outside `.#SE` was found.
    InvalidChar { ch: char, pos: Point },
    /// More than one start or end marker.
    DuplicateMarker { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no rows"),
            Self::NotSquare { row, len, expected } => {
                write!(f, "grid: row {row} has {len} cells, expected {expected}")
            }
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "grid: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square grid of cells.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    cell_size: i32,
}

impl Grid {
    /// Create a `rows`×`rows` grid for a square surface `pixel_width` pixels
    /// wide. Every cell starts unchecked with no cached neighbours.
    pub fn new(rows: i32, pixel_width: i32) -> Self {
        let rows = rows.max(0);
        let bounds = Range::sized(rows, rows);
        let cell_size = if rows > 0 { pixel_width.max(0) / rows } else { 0 };
        let cells = bounds.iter().map(|p| Cell::new(p, cell_size)).collect();
        Self {
            cells,
            bounds,
            cell_size,
        }
    }

    /// Parse a grid from rows of `.` (unchecked), `#` (barrier), `S` (start)
    /// and `E` (end). Surrounding whitespace on each line is ignored and each
    /// cell is one pixel wide.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(GridError::Empty);
        }
        let n = lines.len();
        let mut grid = Grid::new(n as i32, n as i32);
        let mut seen_start = false;
        let mut seen_end = false;
        for (r, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len != n {
                return Err(GridError::NotSquare {
                    row: r as i32,
                    len,
                    expected: n,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Point::new(r as i32, c as i32);
                let state = match ch {
                    '.' => CellState::Unchecked,
                    '#' => CellState::Barrier,
                    'S' if seen_start => return Err(GridError::DuplicateMarker { ch, pos }),
                    'E' if seen_end => return Err(GridError::DuplicateMarker { ch, pos }),
                    'S' => {
                        seen_start = true;
                        CellState::Start
                    }
                    'E' => {
                        seen_end = true;
                        CellState::End
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                };
                grid.set_state(pos, state);
            }
        }
        Ok(grid)
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows (equal to the number of columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Side length of one cell in pixels.
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Row-major index of `p`.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds.index(p)
    }

    /// The cell at `p`, if in bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// State of the cell at `p`; `None` outside the grid.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.at(p).map(Cell::state)
    }

    /// Set the state at `p`. No-op outside the grid.
    pub fn set_state(&mut self, p: Point, state: CellState) {
        if let Some(cell) = self.at_mut(p) {
            cell.set_state(state);
        }
    }

    /// Set the cell at `p` back to unchecked. No-op outside the grid.
    pub fn reset(&mut self, p: Point) {
        if let Some(cell) = self.at_mut(p) {
            cell.reset();
        }
    }

    /// Passable orthogonal neighbours of `p`, computed now.
    ///
    /// Order is down, up, right, left. Barrier cells and out-of-range
    /// positions are skipped.
    pub fn neighbors_of(&self, p: Point) -> Vec<Point> {
        let mut out = Vec::with_capacity(4);
        for n in p.neighbors_4() {
            if let Some(cell) = self.at(n) {
                if !cell.is_barrier() {
                    out.push(n);
                }
            }
        }
        out
    }

    /// The cached neighbour list of `p` (empty outside the grid).
    #[inline]
    pub fn neighbors(&self, p: Point) -> &[Point] {
        self.at(p).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Recompute the cached neighbour list of `p`.
    pub fn update_neighbors(&mut self, p: Point) {
        let ns = self.neighbors_of(p);
        if let Some(cell) = self.at_mut(p) {
            cell.set_neighbors(ns);
        }
    }

    /// Recompute the cached neighbour list of `p` and of its four orthogonal
    /// neighbours. Call after `p` gains or loses barrier status.
    pub fn update_neighbors_around(&mut self, p: Point) {
        self.update_neighbors(p);
        for n in p.neighbors_4() {
            self.update_neighbors(n);
        }
    }

    /// Recompute every cached neighbour list.
    pub fn update_all_neighbors(&mut self) {
        for p in self.bounds.iter() {
            self.update_neighbors(p);
        }
    }

    /// Whether none of the in-bounds orthogonal neighbours of `p` have been
    /// touched by a search (open, closed or start).
    pub fn neighbors_untouched(&self, p: Point) -> bool {
        p.neighbors_4().into_iter().all(|n| {
            !matches!(
                self.state(n),
                Some(CellState::Open | CellState::Closed | CellState::Start)
            )
        })
    }

    /// Turn every open, closed or path cell back into unchecked.
    pub fn clear_search_marks(&mut self) {
        for cell in &mut self.cells {
            if cell.state().is_search_mark() {
                cell.reset();
            }
        }
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    /// First cell (row-major) in `state`.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells
            .iter()
            .find(|c| c.state() == state)
            .map(Cell::pos)
    }

    /// Row-major copy of every cell state.
    pub fn snapshot(&self) -> Vec<CellState> {
        self.cells.iter().map(Cell::state).collect()
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.bounds.cols().max(0) as usize;
        for (i, cell) in self.cells.iter().enumerate() {
            let ch = match cell.state() {
                CellState::Unchecked => '.',
                CellState::Open => 'o',
                CellState::Closed => 'x',
                CellState::Barrier => '#',
                CellState::Start => 'S',
                CellState::End => 'E',
                CellState::Path => '*',
            };
            write!(f, "{ch}")?;
            if cols > 0 && (i + 1) % cols == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell whose state changed between two frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub pos: Point,
    pub state: CellState,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub rows: i32,
    pub cell_size: i32,
}

/// Diff `curr` against a previous [`snapshot`](Grid::snapshot).
///
/// A snapshot of a different length (e.g. before the first draw or after the
/// grid was rebuilt) yields every cell.
pub fn compute_frame(prev: &[CellState], curr: &Grid) -> Frame {
    let full = prev.len() != curr.len();
    let cells = curr
        .iter()
        .enumerate()
        .filter(|(i, c)| full || prev[*i] != c.state())
        .map(|(_, c)| FrameCell {
            pos: c.pos(),
            state: c.state(),
        })
        .collect();
    Frame {
        cells,
        rows: curr.rows(),
        cell_size: curr.cell_size(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(25, 600);
        assert_eq!(g.rows(), 25);
        assert_eq!(g.len(), 625);
        assert_eq!(g.cell_size(), 24);
        assert_eq!(g.count(CellState::Unchecked), 625);
        assert_eq!(g.at(Point::new(24, 24)).map(Cell::pos), Some(Point::new(24, 24)));
        assert!(g.at(Point::new(25, 0)).is_none());
    }

    #[test]
    fn neighbors_of_corner_and_center() {
        let g = Grid::new(3, 3);
        assert_eq!(
            g.neighbors_of(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(g.neighbors_of(Point::new(1, 1)).len(), 4);
    }

    #[test]
    fn neighbors_exclude_new_barrier_and_include_it_after_removal() {
        let mut g = Grid::new(5, 5);
        g.update_all_neighbors();
        let wall = Point::new(2, 2);

        g.set_state(wall, CellState::Barrier);
        g.update_neighbors_around(wall);
        for n in wall.neighbors_4() {
            assert!(!g.neighbors(n).contains(&wall), "{n} still sees {wall}");
        }

        g.reset(wall);
        g.update_neighbors_around(wall);
        for n in wall.neighbors_4() {
            assert!(g.neighbors(n).contains(&wall), "{n} lost {wall}");
        }
    }

    #[test]
    fn neighbors_outside_grid_are_empty() {
        let g = Grid::new(2, 2);
        assert!(g.neighbors(Point::new(-1, 0)).is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut g = Grid::new(3, 3);
        let p = Point::new(1, 1);
        g.reset(p);
        assert_eq!(g.state(p), Some(CellState::Unchecked));
        g.reset(p);
        assert_eq!(g.state(p), Some(CellState::Unchecked));
    }

    #[test]
    fn neighbors_untouched_checks_search_states() {
        let mut g = Grid::new(3, 3);
        let p = Point::new(1, 1);
        assert!(g.neighbors_untouched(p));
        g.set_state(Point::new(0, 1), CellState::Barrier);
        assert!(g.neighbors_untouched(p));
        g.set_state(Point::new(1, 2), CellState::Closed);
        assert!(!g.neighbors_untouched(p));
    }

    #[test]
    fn clear_search_marks_keeps_user_edits() {
        let mut g = Grid::from_ascii(
            "S#.
             ...
             ..E",
        )
        .unwrap();
        g.set_state(Point::new(1, 0), CellState::Closed);
        g.set_state(Point::new(1, 1), CellState::Open);
        g.set_state(Point::new(2, 0), CellState::Path);
        g.clear_search_marks();
        assert_eq!(g.count(CellState::Unchecked), 6);
        assert_eq!(g.count(CellState::Barrier), 1);
        assert_eq!(g.find(CellState::Start), Some(Point::new(0, 0)));
        assert_eq!(g.find(CellState::End), Some(Point::new(2, 2)));
    }

    #[test]
    fn from_ascii_errors() {
        assert!(matches!(Grid::from_ascii("  \n "), Err(GridError::Empty)));
        assert!(matches!(
            Grid::from_ascii("..\n..."),
            Err(GridError::NotSquare { row: 1, len: 3, expected: 2 })
        ));
        assert!(matches!(
            Grid::from_ascii(".x\n.."),
            Err(GridError::InvalidChar { ch: 'x', .. })
        ));
        assert!(matches!(
            Grid::from_ascii("SS\n.."),
            Err(GridError::DuplicateMarker { ch: 'S', .. })
        ));
    }

    #[test]
    fn display_round_trips_ascii() {
        let text = "S#.\n...\n..E\n";
        let g = Grid::from_ascii(text).unwrap();
        assert_eq!(g.to_string(), text);
    }

    #[test]
    fn compute_frame_diff() {
        let mut g = Grid::new(3, 3);
        let prev = g.snapshot();
        g.set_state(Point::new(1, 0), CellState::Barrier);
        let frame = compute_frame(&prev, &g);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));
        assert_eq!(frame.cells[0].state, CellState::Barrier);
        assert_eq!(frame.rows, 3);

        let full = compute_frame(&[], &g);
        assert_eq!(full.cells.len(), 9);
    }
}

//! The [`Cell`] type — one grid position with its search state.

use crate::geom::Point;

/// Logical state of a cell. Mutually exclusive; renderers map it to a colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unchecked,
    /// In the search frontier.
    Open,
    /// Already expanded.
    Closed,
    Barrier,
    Start,
    End,
    /// On the reconstructed path.
    Path,
}

impl CellState {
    /// Whether the state was produced by a search run (as opposed to the
    /// user's editing).
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}

/// A single grid cell.
///
/// The position is fixed at creation. The neighbour list is a cache filled by
/// [`Grid::update_neighbors`](crate::Grid::update_neighbors); it holds
/// positions into the owning grid, never cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    size: i32,
    state: CellState,
    neighbors: Vec<Point>,
}

impl Cell {
    /// Create an unchecked cell at `pos` drawn `size` pixels wide.
    pub fn new(pos: Point, size: i32) -> Self {
        Self {
            pos,
            size,
            state: CellState::Unchecked,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.col
    }

    /// Side length in pixels.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Top-left pixel corner as `(x, y)`.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.pos.col * self.size, self.pos.row * self.size)
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Back to [`CellState::Unchecked`].
    #[inline]
    pub fn reset(&mut self) {
        self.state = CellState::Unchecked;
    }

    /// Cached passable neighbours.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<Point>) {
        self.neighbors = neighbors;
    }

    #[inline]
    pub fn is_unchecked(&self) -> bool {
        self.state == CellState::Unchecked
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == CellState::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    #[inline]
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }
}

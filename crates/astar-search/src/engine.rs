//! The incremental A* [`SearchEngine`].
//!
//! The engine is advanced one expansion at a time through
//! [`step`](SearchEngine::step) so that the caller can poll input and redraw
//! between steps, or pause simply by not calling it. The grid is passed into
//! every call rather than borrowed for the engine's lifetime; callers must
//! keep handing in the grid the engine was initialized with.

use std::fmt;

use astar_core::{CellState, Grid, Point, Range};

use crate::distance::manhattan;
use crate::frontier::Frontier;
use crate::reconstruct::reconstruct_path;
use crate::traits::StepObserver;

/// Score of a cell that has not been reached (+∞).
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// SearchStatus / SearchError
// ---------------------------------------------------------------------------

/// Lifecycle of one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Initialized, no step taken yet.
    Ready,
    Running,
    /// The end cell was expanded and the path marked.
    Succeeded,
    /// The frontier ran dry; no path exists.
    Exhausted,
}

impl SearchStatus {
    /// Whether the run has reached a terminal state.
    #[inline]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Exhausted)
    }
}

/// Errors returned by [`SearchEngine::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the grid.
    OutOfBounds(Point),
    /// Start and end are the same cell.
    SameEndpoints(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "search endpoint {p} is outside the grid"),
            Self::SameEndpoints(p) => write!(f, "search start and end are both {p}"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Per-cell bookkeeping: g/f scores, predecessor and frontier membership.
#[derive(Clone, Debug)]
struct Node {
    g: i32,
    f: i32,
    parent: Option<Point>,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: None,
            open: false,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// State of one A* run over a grid.
///
/// Scores, predecessors and the frontier live here and are dropped with the
/// engine. Queued cells are never re-prioritised: when a cheaper route to a
/// cell already in the frontier is found its scores and predecessor are
/// updated in place, but its queue entry keeps the old key and no duplicate
/// is pushed.
pub struct SearchEngine {
    bounds: Range,
    start: Point,
    end: Point,
    nodes: Vec<Node>,
    frontier: Frontier,
    status: SearchStatus,
    steps: usize,
    last_expanded: Option<Point>,
    path: Vec<Point>,
    nbuf: Vec<Point>,
}

impl SearchEngine {
    /// Prepare a search from `start` to `end`.
    ///
    /// Recomputes every neighbour list on `grid` and seeds the frontier with
    /// `start` at sequence 0. Cell states are not touched.
    pub fn initialize(grid: &mut Grid, start: Point, end: Point) -> Result<Self, SearchError> {
        let bounds = grid.bounds();
        let start_idx = bounds.index(start).ok_or(SearchError::OutOfBounds(start))?;
        if !bounds.contains(end) {
            return Err(SearchError::OutOfBounds(end));
        }
        if start == end {
            return Err(SearchError::SameEndpoints(start));
        }

        grid.update_all_neighbors();

        let mut nodes = vec![Node::default(); bounds.len()];
        let h = manhattan(start, end);
        {
            let node = &mut nodes[start_idx];
            node.g = 0;
            node.f = h;
            node.open = true;
        }
        let mut frontier = Frontier::new();
        frontier.push(start, h);

        log::info!("search {start} -> {end} on {}x{} grid", bounds.rows(), bounds.cols());

        Ok(Self {
            bounds,
            start,
            end,
            nodes,
            frontier,
            status: SearchStatus::Ready,
            steps: 0,
            last_expanded: None,
            path: Vec::new(),
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Expand the best frontier cell.
    ///
    /// Relaxed neighbours that enter the frontier are marked
    /// [`CellState::Open`]; the expanded cell becomes [`CellState::Closed`]
    /// unless it is the start. Expanding `end` reconstructs and marks the
    /// path. Once finished, further calls do nothing and return the terminal
    /// status.
    pub fn step(&mut self, grid: &mut Grid) -> SearchStatus {
        if self.status.is_finished() {
            return self.status;
        }
        self.status = SearchStatus::Running;

        let Some(entry) = self.frontier.pop() else {
            return self.exhaust();
        };
        let current = entry.pos;
        let Some(ci) = self.bounds.index(current) else {
            return self.exhaust();
        };
        self.nodes[ci].open = false;
        self.steps += 1;
        self.last_expanded = Some(current);

        if current == self.end {
            let nodes = &self.nodes;
            let bounds = self.bounds;
            self.path = reconstruct_path(grid, self.start, self.end, |p| {
                bounds.index(p).and_then(|i| nodes[i].parent)
            });
            self.status = SearchStatus::Succeeded;
            log::info!(
                "search reached {} after {} steps, path of {} edges",
                self.end,
                self.steps,
                self.path.len().saturating_sub(1)
            );
            return self.status;
        }

        let current_g = self.nodes[ci].g;
        log::debug!(
            "step {}: expand {current} g={current_g} f={} frontier={}",
            self.steps,
            entry.f,
            self.frontier.len()
        );

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(current));

        for &np in nbuf.iter() {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            // Unit edge cost.
            let tentative_g = current_g + 1;
            let n = &mut self.nodes[ni];
            if tentative_g >= n.g {
                continue;
            }
            n.parent = Some(current);
            n.g = tentative_g;
            n.f = tentative_g + manhattan(np, self.end);
            if !n.open {
                n.open = true;
                self.frontier.push(np, n.f);
                grid.set_state(np, CellState::Open);
            }
        }

        self.nbuf = nbuf;

        if current != self.start {
            grid.set_state(current, CellState::Closed);
        }

        if self.frontier.is_empty() {
            return self.exhaust();
        }
        self.status
    }

    fn exhaust(&mut self) -> SearchStatus {
        self.status = SearchStatus::Exhausted;
        log::info!(
            "search {} -> {} exhausted after {} steps, no path",
            self.start,
            self.end,
            self.steps
        );
        self.status
    }

    /// Step until the run finishes, handing the grid to `observer` after
    /// every step.
    pub fn run_to_completion<O: StepObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        observer: &mut O,
    ) -> SearchStatus {
        while !self.status.is_finished() {
            self.step(grid);
            observer.on_step(grid);
        }
        self.status
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The cell expanded by the most recent step.
    #[inline]
    pub fn last_expanded(&self) -> Option<Point> {
        self.last_expanded
    }

    /// Best known cost from start, or [`UNREACHABLE`].
    pub fn g_score(&self, p: Point) -> i32 {
        self.node(p).map_or(UNREACHABLE, |n| n.g)
    }

    /// `g + h`, or [`UNREACHABLE`].
    pub fn f_score(&self, p: Point) -> i32 {
        self.node(p).map_or(UNREACHABLE, |n| n.f)
    }

    /// Predecessor of `p` on its best known route.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        self.node(p).and_then(|n| n.parent)
    }

    /// Whether `p` is currently queued in the frontier.
    pub fn is_open(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| n.open)
    }

    /// Number of entries in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The found path `start..=end`, once the run succeeded.
    pub fn path(&self) -> Option<&[Point]> {
        (self.status == SearchStatus::Succeeded).then_some(self.path.as_slice())
    }

    /// Number of edges in the found path.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    #[inline]
    fn node(&self, p: Point) -> Option<&Node> {
        self.bounds.index(p).map(|i| &self.nodes[i])
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("status", &self.status)
            .field("steps", &self.steps)
            .field("frontier", &self.frontier.len())
            .finish()
    }
}

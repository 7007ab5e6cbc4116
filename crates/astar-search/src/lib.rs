//! Incremental A* search over an [`astar_core::Grid`].
//!
//! The search is driven from outside, one expansion per
//! [`SearchEngine::step`], so a caller can interleave input handling and
//! rendering between steps or stop calling it to pause:
//!
//! - [`SearchEngine::initialize`] refreshes adjacency and seeds the frontier
//! - [`SearchEngine::step`] expands one cell and recolours the grid
//! - [`SearchEngine::run_to_completion`] steps to the end, reporting to a
//!   [`StepObserver`]
//! - [`reconstruct_path`] marks the predecessor chain once the end is reached
//!
//! Movement is 4-way with unit cost and the heuristic is [`manhattan`].

mod distance;
mod engine;
mod frontier;
mod reconstruct;
mod traits;

pub use distance::manhattan;
pub use engine::{SearchEngine, SearchError, SearchStatus, UNREACHABLE};
pub use frontier::{Entry, Frontier};
pub use reconstruct::reconstruct_path;
pub use traits::{NoopObserver, StepObserver};

//! **astar-core** — grid and cell state for the A* visualizer.
//!
//! This crate provides the foundational types shared by the search engine,
//! the interaction controller and the drivers: geometry primitives, the
//! cell state machine, the owning grid with cached adjacency, input
//! messages, and the cooperative application loop.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use cell::{Cell, CellState};
pub use geom::{Point, Range};
pub use grid::{DEFAULT_ROWS, Frame, FrameCell, Grid, GridError};
pub use messages::*;

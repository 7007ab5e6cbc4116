//! Interactive, step-by-step A* path finding on a grid.
//!
//! The [`InteractionController`] owns the grid and, while a search is in
//! flight, the [`SearchEngine`](astar_search::SearchEngine). It implements
//! [`astar_core::Model`], so any [`astar_core::Driver`] can run it.
//!
//! Controls: left click places start, then end, then barriers; right click
//! clears a cell; space starts, pauses and resumes the search; `c` resets;
//! `q` or Escape quits.

pub mod config;
pub mod controller;

pub use config::{Config, ConfigError, from_args};
pub use controller::{Command, InteractionController, Mode};

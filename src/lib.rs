//! Invasion percolation on a square lattice.
//!
//! A region seeded at the centre of an odd-sized grid repeatedly annexes the
//! lowest-resistance cell on its border, breaking ties uniformly at random,
//! until it touches the edge of the grid.

pub mod error;
pub mod export;
pub mod frontier;
pub mod grid;
pub mod percolation;
pub mod render;
pub mod sweep;

pub use error::{Error, Result};
pub use frontier::{choose_next, Frontier, Strategy};
pub use grid::{calculate_density, make_grid, Grid, Location, FILLED};
pub use percolation::{percolation, Outcome, Percolation, Phase, SimulationConfig};
pub use sweep::{sweep, SweepRow};

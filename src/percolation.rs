use crate::error::Result;
use crate::frontier::{choose_next, Frontier, Strategy};
use crate::grid::{make_grid, Grid, Location};
use log::{debug, info};
use rand::Rng;

/// Parameters for a single percolation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Side length of the grid, must be odd
    pub size: usize,
    /// Largest resistance a cell can be given
    pub spread: i32,
    /// How candidate cells are found each step
    pub strategy: Strategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            size: 21,
            spread: 10,
            strategy: Strategy::Scan,
        }
    }
}

/// Where the driver is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Growing,
    Terminated,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct Outcome {
    pub grid: Grid,
    pub density: f64,
    /// Cells filled after the seed
    pub steps: usize,
    /// Every filled location in fill order, seed first
    pub history: Vec<Location>,
}

#[derive(Debug, Clone)]
enum Selector {
    Scan,
    Tracked(Frontier),
}

/// Drives the growth of the invaded region from the centre to the boundary.
///
/// The driver owns the grid and the random generator for the whole run. Both
/// the grid values and tie-breaks are drawn from that one generator, so a
/// seeded generator reproduces a run exactly.
#[derive(Debug)]
pub struct Percolation<R> {
    grid: Grid,
    rng: R,
    phase: Phase,
    selector: Selector,
    history: Vec<Location>,
}

impl<R: Rng> Percolation<R> {
    /// Build a random grid for `config` and seed its centre
    pub fn new(config: &SimulationConfig, mut rng: R) -> Result<Self> {
        let grid = make_grid(config.size, config.spread, &mut rng)?;
        Ok(Self::with_grid(grid, config.strategy, rng))
    }

    /// Seed the centre of an existing grid and get ready to grow
    pub fn with_grid(grid: Grid, strategy: Strategy, rng: R) -> Self {
        let mut simulation = Percolation {
            grid,
            rng,
            phase: Phase::Initializing,
            selector: Selector::Scan,
            history: Vec::new(),
        };
        simulation.seed(strategy);
        simulation
    }

    /// Initializing -> Growing, or straight to Terminated when the centre is
    /// already on the boundary (a 1x1 grid)
    fn seed(&mut self, strategy: Strategy) {
        let seed = self.grid.center();
        self.grid.fill(seed);
        self.history.push(seed);

        if let Strategy::Frontier = strategy {
            self.selector = Selector::Tracked(Frontier::from_grid(&self.grid));
        }

        self.phase = if self.grid.on_boundary(seed) {
            Phase::Terminated
        } else {
            Phase::Growing
        };

        debug!("seeded {} on a {}x{} grid", seed, self.grid.size(), self.grid.size());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Filled locations in fill order, seed first
    pub fn history(&self) -> &[Location] {
        &self.history
    }

    pub fn last_filled(&self) -> Option<Location> {
        self.history.last().copied()
    }

    /// Invade one more cell.
    ///
    /// Returns the filled location, or `None` once the region has reached the
    /// boundary.
    pub fn step(&mut self) -> Result<Option<Location>> {
        if self.phase != Phase::Growing {
            return Ok(None);
        }

        let next = match &mut self.selector {
            Selector::Scan => {
                let next = choose_next(&self.grid, &mut self.rng)?;
                self.grid.fill(next);
                next
            }
            Selector::Tracked(frontier) => {
                let next = frontier.choose(&mut self.rng)?;
                frontier.fill(&mut self.grid, next);
                next
            }
        };
        self.history.push(next);

        // The boundary check happens after filling, so the boundary cell is
        // part of the final region
        if self.grid.on_boundary(next) {
            self.phase = Phase::Terminated;
        }

        debug!("step {}: filled {}", self.history.len() - 1, next);
        Ok(Some(next))
    }

    /// Grow until the boundary is reached
    pub fn run(mut self) -> Result<Outcome> {
        while self.step()?.is_some() {}

        let density = self.grid.density();
        let steps = self.history.len() - 1;
        info!(
            "percolation on {}x{} grid reached the boundary after {} steps, density {:.4}",
            self.grid.size(),
            self.grid.size(),
            steps,
            density
        );

        Ok(Outcome {
            grid: self.grid,
            density,
            steps,
            history: self.history,
        })
    }
}

/// Run one simulation and return the final grid with its density.
///
/// `size` and `spread` are validated before any grid is allocated.
pub fn percolation<R: Rng>(size: usize, spread: i32, rng: R) -> Result<(Grid, f64)> {
    let config = SimulationConfig {
        size,
        spread,
        ..SimulationConfig::default()
    };
    let outcome = Percolation::new(&config, rng)?.run()?;
    Ok((outcome.grid, outcome.density))
}

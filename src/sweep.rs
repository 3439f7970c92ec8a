use crate::error::{Error, Result};
use crate::frontier::Strategy;
use crate::grid::{validate_size, validate_spread};
use crate::percolation::{Percolation, SimulationConfig};
use log::info;
use rand::Rng;
use std::fmt::{self, Display};

/// Density statistics for one `(size, spread)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub size: usize,
    pub spread: i32,
    pub trials: usize,
    pub mean_density: f64,
    pub min_density: f64,
    pub max_density: f64,
    pub mean_steps: f64,
}

impl SweepRow {
    pub const HEADER: &'static str = "size,spread,trials,mean_density,min_density,max_density,mean_steps";
}

impl Display for SweepRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{:.4},{:.4},{:.4},{:.1}",
            self.size,
            self.spread,
            self.trials,
            self.mean_density,
            self.min_density,
            self.max_density,
            self.mean_steps
        )
    }
}

/// Run `trials` simulations for every combination of `sizes` and `spreads`.
///
/// All parameters are checked up front, so a bad value late in either list
/// fails before any simulation has run. Every run draws from `rng`.
pub fn sweep<R: Rng + ?Sized>(
    sizes: &[usize],
    spreads: &[i32],
    trials: usize,
    strategy: Strategy,
    rng: &mut R,
) -> Result<Vec<SweepRow>> {
    if trials == 0 {
        return Err(Error::InvalidTrials);
    }
    for &size in sizes {
        validate_size(size)?;
    }
    for &spread in spreads {
        validate_spread(spread)?;
    }

    let mut rows = Vec::with_capacity(sizes.len() * spreads.len());
    for &size in sizes {
        for &spread in spreads {
            let config = SimulationConfig {
                size,
                spread,
                strategy,
            };
            rows.push(measure(&config, trials, rng)?);
            info!("finished {} trials for size {} spread {}", trials, size, spread);
        }
    }

    Ok(rows)
}

fn measure<R: Rng + ?Sized>(config: &SimulationConfig, trials: usize, rng: &mut R) -> Result<SweepRow> {
    let mut total_density = 0.0;
    let mut total_steps = 0;
    let mut min_density = f64::INFINITY;
    let mut max_density = 0.0f64;

    for _ in 0..trials {
        let outcome = Percolation::new(config, &mut *rng)?.run()?;
        total_density += outcome.density;
        total_steps += outcome.steps;
        min_density = min_density.min(outcome.density);
        max_density = max_density.max(outcome.density);
    }

    Ok(SweepRow {
        size: config.size,
        spread: config.spread,
        trials,
        mean_density: total_density / trials as f64,
        min_density,
        max_density,
        mean_steps: total_steps as f64 / trials as f64,
    })
}

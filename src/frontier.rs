//! Choosing the next cell to invade.
//!
//! Two strategies consider exactly the same candidates: unfilled cells with a
//! filled orthogonal neighbour. Among those holding the lowest resistance one
//! is picked uniformly at random. Tied candidates are always drawn from in
//! row-major order, so both strategies pick the same cell for the same
//! generator state.

use crate::error::{Error, Result};
use crate::grid::{Grid, Location, FILLED};
use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// How the driver finds candidate cells on every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Rescan the whole grid on every step
    #[default]
    Scan,
    /// Keep the candidate set up to date as cells are filled
    Frontier,
}

/// Pick the next cell to invade by scanning the whole grid.
///
/// Returns [`Error::ExhaustedFrontier`] if no unfilled cell touches the
/// filled region. The grid is left untouched.
pub fn choose_next<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<Location> {
    let mut lowest = i32::MAX;
    let mut tied = Vec::new();

    for location in grid.locations() {
        if !grid.is_adjacent(location) {
            continue;
        }

        let value = grid.value(location);
        if value < lowest {
            lowest = value;
            tied.clear();
        }
        if value == lowest {
            tied.push(location);
        }
    }

    tied.choose(rng).copied().ok_or(Error::ExhaustedFrontier {
        filled: grid.filled_count(),
    })
}

/// Candidate cells bucketed by resistance, maintained as the region grows.
///
/// Each fill can only expose the filled cell's own unfilled neighbours, so
/// updating costs at most four insertions and one removal.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    buckets: BTreeMap<i32, BTreeSet<Location>>,
    filled: usize,
}

impl Frontier {
    /// Collect the candidates of an already seeded grid
    pub fn from_grid(grid: &Grid) -> Self {
        let mut frontier = Frontier {
            buckets: BTreeMap::new(),
            filled: grid.filled_count(),
        };

        for location in grid.locations() {
            if grid.is_adjacent(location) {
                frontier.insert(location, grid.value(location));
            }
        }

        frontier
    }

    /// Number of candidate cells
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn contains(&self, location: Location) -> bool {
        self.buckets.values().any(|bucket| bucket.contains(&location))
    }

    /// Candidates holding the lowest resistance, in row-major order
    pub fn lowest(&self) -> Option<(i32, &BTreeSet<Location>)> {
        self.buckets.iter().next().map(|(&value, bucket)| (value, bucket))
    }

    /// Pick one of the lowest-resistance candidates uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Location> {
        let exhausted = Error::ExhaustedFrontier {
            filled: self.filled,
        };
        let (_, bucket) = self.lowest().ok_or(exhausted.clone())?;

        let tied: Vec<Location> = bucket.iter().copied().collect();
        tied.choose(rng).copied().ok_or(exhausted)
    }

    /// Fill `location` in `grid` and update the candidate set to match.
    ///
    /// # Panics
    ///
    /// If `location` lies outside the grid.
    pub fn fill(&mut self, grid: &mut Grid, location: Location) {
        let value = grid.value(location);
        if value == FILLED {
            return;
        }

        grid.fill(location);
        self.filled += 1;
        self.remove(location, value);

        for neighbour in grid.neighbours(location) {
            let value = grid.value(neighbour);
            if value != FILLED {
                self.insert(neighbour, value);
            }
        }
    }

    fn insert(&mut self, location: Location, value: i32) {
        self.buckets.entry(value).or_default().insert(location);
    }

    fn remove(&mut self, location: Location, value: i32) {
        if let Some(bucket) = self.buckets.get_mut(&value) {
            bucket.remove(&location);
            if bucket.is_empty() {
                self.buckets.remove(&value);
            }
        }
    }
}

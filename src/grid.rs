use crate::error::{Error, Result};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::fmt::{self, Display};

/// Value stored in a cell once it has been invaded
pub const FILLED: i32 = 0;

/// Offsets of the four orthogonal neighbours: up, down, left, right
const NEIGHBOUR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell position in the lattice, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub fn new(row: usize, col: usize) -> Self {
        Location { row, col }
    }
}

impl From<(usize, usize)> for Location {
    fn from((row, col): (usize, usize)) -> Self {
        Location::new(row, col)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square lattice of resistance values.
///
/// Unfilled cells hold a resistance in `[1, spread]`; invaded cells hold
/// [`FILLED`]. The side length is always odd so that a single centre cell
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Create a grid where every cell is drawn independently and uniformly
    /// from `[1, spread]`.
    ///
    /// Both parameters are checked before anything is allocated.
    pub fn random<R: Rng + ?Sized>(size: usize, spread: i32, rng: &mut R) -> Result<Self> {
        validate_size(size)?;
        validate_spread(spread)?;

        let resistance = Uniform::new_inclusive(1, spread);
        let cells = (0..size * size).map(|_| resistance.sample(rng)).collect();

        Ok(Grid { size, cells })
    }

    /// Build a grid from explicit row values. Zeros are taken as already filled.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let size = rows.len();
        validate_size(size)?;

        let mut cells = Vec::with_capacity(size * size);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    size
                )));
            }
            if let Some(value) = row.iter().find(|&&value| value < FILLED) {
                return Err(Error::InvalidGrid(format!(
                    "row {index} holds negative resistance {value}"
                )));
            }
            cells.extend(row);
        }

        Ok(Grid { size, cells })
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// The unique centre cell, `(N/2, N/2)`
    pub fn center(&self) -> Location {
        Location::new(self.size / 2, self.size / 2)
    }

    pub fn contains(&self, location: Location) -> bool {
        location.row < self.size && location.col < self.size
    }

    /// Returns the stored value, or `None` outside the grid.
    pub fn get(&self, location: Location) -> Option<i32> {
        if self.contains(location) {
            Some(self.cells[location.row * self.size + location.col])
        } else {
            None
        }
    }

    /// Returns the stored value of a cell known to be in bounds.
    ///
    /// # Panics
    ///
    /// If `location` lies outside the grid.
    pub fn value(&self, location: Location) -> i32 {
        self.cells[self.index(location)]
    }

    pub fn is_filled(&self, location: Location) -> bool {
        self.value(location) == FILLED
    }

    /// Mark a cell as invaded. Filling an already filled cell is a no-op.
    ///
    /// # Panics
    ///
    /// If `location` lies outside the grid.
    pub fn fill(&mut self, location: Location) {
        let index = self.index(location);
        self.cells[index] = FILLED;
    }

    /// Check whether a cell sits on the outermost ring of the grid
    pub fn on_boundary(&self, location: Location) -> bool {
        let last = self.size - 1;
        location.row == 0 || location.col == 0 || location.row == last || location.col == last
    }

    /// In-bounds orthogonal neighbours of `location` (two to four of them)
    pub fn neighbours(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        NEIGHBOUR_OFFSETS.iter().filter_map(move |(dr, dc)| {
            let row = location.row as isize + dr;
            let col = location.col as isize + dc;

            if row >= 0 && col >= 0 && row < self.size as isize && col < self.size as isize {
                Some(Location::new(row as usize, col as usize))
            } else {
                None
            }
        })
    }

    /// Check whether an unfilled cell touches the filled region.
    /// Filled cells are never adjacent.
    pub fn is_adjacent(&self, location: Location) -> bool {
        if self.is_filled(location) {
            return false;
        }

        self.neighbours(location).any(|n| self.is_filled(n))
    }

    /// Every location in row-major order
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Location::new(row, col)))
    }

    /// Rows of raw cell values, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == FILLED).count()
    }

    /// Fraction of cells that are filled
    pub fn density(&self) -> f64 {
        self.filled_count() as f64 / self.cells.len() as f64
    }

    fn index(&self, location: Location) -> usize {
        assert!(
            self.contains(location),
            "location {} is outside a {}x{} grid",
            location,
            self.size,
            self.size
        );
        location.row * self.size + location.col
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &value in row {
                if value == FILLED {
                    write!(f, "#")?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Create a `size`×`size` grid of resistances drawn from `[1, spread]`
pub fn make_grid<R: Rng + ?Sized>(size: usize, spread: i32, rng: &mut R) -> Result<Grid> {
    Grid::random(size, spread, rng)
}

/// Fraction of the grid's cells that have been invaded
pub fn calculate_density(grid: &Grid) -> f64 {
    grid.density()
}

pub(crate) fn validate_size(size: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        return Err(Error::InvalidSize(size));
    }
    Ok(())
}

pub(crate) fn validate_spread(spread: i32) -> Result<()> {
    if spread < 1 {
        return Err(Error::InvalidSpread(spread));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ordered() -> Grid {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap()
    }

    #[test]
    fn test_make_grid_values_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = make_grid(11, 5, &mut rng).unwrap();

        assert_eq!(grid.size(), 11);
        assert_eq!(grid.locations().count(), 121);
        assert!(grid.locations().all(|l| (1..=5).contains(&grid.value(l))));
        // 121 draws from five values should hit every one of them
        for v in 1..=5 {
            assert!(grid.locations().any(|l| grid.value(l) == v), "value {v} never drawn");
        }
    }

    #[test]
    fn test_make_grid_rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(make_grid(0, 5, &mut rng), Err(Error::InvalidSize(0)));
        assert_eq!(make_grid(4, 5, &mut rng), Err(Error::InvalidSize(4)));
        assert_eq!(make_grid(5, 0, &mut rng), Err(Error::InvalidSpread(0)));
        assert_eq!(make_grid(5, -3, &mut rng), Err(Error::InvalidSpread(-3)));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = make_grid(9, 100, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = make_grid(9, 100, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_rows_validation() {
        assert!(matches!(
            Grid::from_rows(vec![vec![1, 2], vec![3, 4]]),
            Err(Error::InvalidSize(2))
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5], vec![7, 8, 9]]),
            Err(Error::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![1, 2, 3], vec![4, -5, 6], vec![7, 8, 9]]),
            Err(Error::InvalidGrid(_))
        ));
        assert!(matches!(Grid::from_rows(vec![]), Err(Error::InvalidSize(0))));
    }

    #[test]
    fn test_on_boundary() {
        let grid = ordered();
        assert!(!grid.on_boundary(Location::new(1, 1)));
        assert!(grid.on_boundary(Location::new(0, 0)));

        let grid = make_grid(7, 3, &mut StdRng::seed_from_u64(1)).unwrap();
        for location in grid.locations() {
            let expected = location.row == 0
                || location.col == 0
                || location.row == 6
                || location.col == 6;
            assert_eq!(grid.on_boundary(location), expected, "at {location}");
        }
    }

    #[test]
    fn test_neighbours_at_edges() {
        let grid = ordered();
        assert_eq!(grid.neighbours(Location::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbours(Location::new(0, 1)).count(), 3);
        assert_eq!(grid.neighbours(Location::new(1, 1)).count(), 4);
        assert_eq!(
            grid.neighbours(Location::new(1, 1)).collect::<Vec<_>>(),
            vec![
                Location::new(0, 1),
                Location::new(2, 1),
                Location::new(1, 0),
                Location::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_is_adjacent() {
        let grid = Grid::from_rows(vec![
            vec![9, 9, 9, 9, 9],
            vec![9, 9, 3, 9, 9],
            vec![9, 4, 0, 0, 9],
            vec![9, 9, 9, 9, 9],
            vec![9, 9, 9, 9, 9],
        ])
        .unwrap();

        let adjacent: Vec<Location> = grid.locations().filter(|&l| grid.is_adjacent(l)).collect();
        assert_eq!(
            adjacent,
            vec![
                Location::new(1, 2),
                Location::new(1, 3),
                Location::new(2, 1),
                Location::new(2, 4),
                Location::new(3, 2),
                Location::new(3, 3),
            ]
        );
        // filled cells are never candidates
        assert!(!grid.is_adjacent(Location::new(2, 2)));
        // diagonal contact does not count
        assert!(!grid.is_adjacent(Location::new(1, 1)));
    }

    #[test]
    fn test_fill_and_density() {
        let mut grid = ordered();
        assert_eq!(grid.filled_count(), 0);

        grid.fill(grid.center());
        grid.fill(grid.center());
        assert_eq!(grid.filled_count(), 1);
        assert!(grid.is_filled(Location::new(1, 1)));
        assert_eq!(calculate_density(&grid), 1.0 / 9.0);

        grid.fill(Location::new(0, 2));
        assert_eq!(grid.density() * 9.0, 2.0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_fill_out_of_bounds_panics() {
        let mut grid = ordered();
        grid.fill(Location::new(3, 0));
    }

    #[test]
    fn test_get() {
        let grid = ordered();
        assert_eq!(grid.get(Location::new(2, 0)), Some(7));
        assert_eq!(grid.get(Location::new(0, 3)), None);
    }

    #[test]
    fn test_display() {
        let mut grid = ordered();
        grid.fill(Location::new(1, 1));
        grid.fill(Location::new(0, 1));
        assert_eq!(grid.to_string(), ".#.\n.#.\n...\n");
    }
}

//! Two-colour raster rendering of a grid: invaded cells dark, the rest light.

use crate::grid::{Grid, Location};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

const FILLED_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const EMPTY_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Paint every cell as a `cell_pixels`-wide square
///
/// # Returns
/// * `RgbaImage` - Image of side `grid.size() * cell_pixels`
pub fn render_grid(grid: &Grid, cell_pixels: u32) -> RgbaImage {
    let cell_pixels = cell_pixels.max(1);
    let side = grid.size() as u32 * cell_pixels;

    RgbaImage::from_fn(side, side, |x, y| {
        let location = Location::new((y / cell_pixels) as usize, (x / cell_pixels) as usize);
        if grid.is_filled(location) {
            FILLED_COLOR
        } else {
            EMPTY_COLOR
        }
    })
}

/// Render the grid and save it, format chosen by the file extension
pub fn save_grid_image(grid: &Grid, cell_pixels: u32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    render_grid(grid, cell_pixels)
        .save(path)
        .with_context(|| format!("writing image {}", path.display()))
}

use crate::grid::{Grid, Location};
use anyhow::{Context, Result};
use glam::Vec3;
use mesh_tools::GltfBuilder;
use mesh_tools::Triangle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the grid's raw values as CSV rows, preceded by a dimensions comment.
///
/// Filled cells are written as `0`, unfilled ones as their resistance.
pub fn export_grid_to_file(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Grid dimensions: {} x {}", grid.size(), grid.size())?;

    for row in grid.rows() {
        let line = row
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Exports the grid as a heightmap mesh in GLB format
///
/// Unfilled cells stand at their resistance and filled cells sit at zero, so
/// the invaded cluster shows up as a basin.
///
/// # Arguments
/// * `grid` - The finished grid
/// * `scale_x` - Column spacing
/// * `scale_y` - Row spacing
/// * `scale_z` - Height multiplier applied to resistance values
/// * `output_path` - Path where the GLB file will be saved
pub fn export_grid_to_glb(
    grid: &Grid,
    scale_x: f32,
    scale_y: f32,
    scale_z: f32,
    output_path: &str,
) -> Result<()> {
    let size = grid.size();
    if size < 2 {
        anyhow::bail!("a {0}x{0} grid has no faces to export", size);
    }

    let mut builder = GltfBuilder::new();

    let mut positions = Vec::with_capacity(size * size);
    let mut normals = Vec::with_capacity(size * size);
    let mut texcoords = Vec::with_capacity(size * size);
    let mut indices = Vec::with_capacity((size - 1) * (size - 1) * 2);

    for row in 0..size {
        for col in 0..size {
            let height = grid.value(Location::new(row, col)) as f32 * scale_z;

            // Centre the mesh around the origin
            let x_pos = (col as f32 - size as f32 / 2.0) * scale_x;
            let z_pos = (row as f32 - size as f32 / 2.0) * scale_y;
            positions.push(mesh_tools::compat::point3::new(x_pos, height, z_pos));

            let normal = calculate_normal(grid, row, col, scale_x, scale_y, scale_z);
            normals.push(mesh_tools::compat::vector3::new(normal.x, normal.y, normal.z));

            texcoords.push(mesh_tools::compat::vector2::new(
                col as f32 / (size as f32 - 1.0),
                row as f32 / (size as f32 - 1.0),
            ));
        }
    }

    for row in 0..(size - 1) {
        for col in 0..(size - 1) {
            let top_left = (row * size + col) as u32;
            let top_right = (row * size + col + 1) as u32;
            let bottom_left = ((row + 1) * size + col) as u32;
            let bottom_right = ((row + 1) * size + col + 1) as u32;

            indices.push(Triangle::new(top_left, bottom_left, top_right));
            indices.push(Triangle::new(top_right, bottom_left, bottom_right));
        }
    }

    let mesh_index = builder.create_simple_mesh(
        Some("PercolationMesh".to_string()),
        &positions,
        &indices,
        Some(normals),
        Some(texcoords),
        None,
    );

    let node = builder.add_node(
        Some("Percolation".to_string()),
        Some(mesh_index),
        None,
        None,
        None,
    );

    builder.add_scene(Some("Main Scene".to_string()), Some(vec![node]));
    builder.export_glb(output_path)?;

    Ok(())
}

/// Surface normal at a cell using central differences, in mesh space (y up)
fn calculate_normal(
    grid: &Grid,
    row: usize,
    col: usize,
    scale_x: f32,
    scale_y: f32,
    scale_z: f32,
) -> Vec3 {
    let height_at = |row: isize, col: isize| -> f32 {
        if row < 0 || col < 0 {
            return 0.0;
        }
        grid.get(Location::new(row as usize, col as usize))
            .map_or(0.0, |value| value as f32 * scale_z)
    };

    let r = row as isize;
    let c = col as isize;
    let dx = (height_at(r, c + 1) - height_at(r, c - 1)) / (2.0 * scale_x);
    let dz = (height_at(r + 1, c) - height_at(r - 1, c)) / (2.0 * scale_y);

    let normal = Vec3::new(-dx, 1.0, -dz).normalize_or_zero();
    if normal == Vec3::ZERO { Vec3::Y } else { normal }
}

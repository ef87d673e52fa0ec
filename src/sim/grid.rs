//! Brick grid layout and spawning

use glam::Vec2;

use super::state::Block;
use crate::config::{Color, GridSettings, MAX_GRID_BLOCKS};

/// World position of the block at (row, column).
///
/// Rows grow downward from `grid_position`, columns to the right. Gaps are
/// counted as `index - 1`, so the first row/column sits one gap before the
/// anchor.
pub fn block_position(grid: &GridSettings, row: u32, column: u32) -> Vec2 {
    let row = row as f32;
    let column = column as f32;
    let x = grid.grid_position.x + grid.block_size.x * column + grid.block_gap.x * (column - 1.0);
    let y = grid.grid_position.y - grid.block_size.y * row - grid.block_gap.y * (row - 1.0);
    Vec2::new(x, y)
}

/// Row color, white past the end of the palette
pub fn block_color(row_colors: &[Color], row: u32) -> Color {
    row_colors.get(row as usize).copied().unwrap_or(Color::WHITE)
}

/// Row points, zero past the end of the table
pub fn block_points(row_points: &[u32], row: u32) -> u32 {
    row_points.get(row as usize).copied().unwrap_or(0)
}

/// Build the full grid, rows outer and columns inner.
///
/// `next_id` hands out entity ids so blocks stay unique across respawns.
pub fn spawn_blocks(grid: &GridSettings, mut next_id: impl FnMut() -> u32) -> Vec<Block> {
    let (columns, rows) = grid.grid_size;
    let count = (columns as usize).saturating_mul(rows as usize);
    let mut blocks = Vec::with_capacity(count.min(MAX_GRID_BLOCKS));

    for row in 0..rows {
        for column in 0..columns {
            blocks.push(Block {
                id: next_id(),
                pos: block_position(grid, row, column),
                size: grid.block_size,
                color: block_color(&grid.row_colors, row),
                points: block_points(&grid.row_points, row),
            });
        }
    }

    blocks
}

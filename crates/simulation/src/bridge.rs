//! Bridges: straight runs of water cells carrying a bridge sprite marker.

use crate::grid::{TileCoord, TileGrid};
use crate::terrain::TerrainFlags;

pub fn is_bridge(grid: &TileGrid, offset: usize) -> bool {
    grid.terrain_is(offset, TerrainFlags::WATER) && grid.bridge_at(offset) != 0
}

fn is_bridge_at(grid: &TileGrid, tile: TileCoord) -> bool {
    grid.offset_of(tile).is_some_and(|o| is_bridge(grid, o))
}

/// Every cell of the bridge through `offset`, from one end to the other.
/// Empty when the cell is not part of a bridge.
pub fn bridge_run(grid: &TileGrid, offset: usize) -> Vec<usize> {
    if !is_bridge(grid, offset) {
        return Vec::new();
    }
    let at = grid.coord(offset);
    let (dx, dy) = if is_bridge_at(grid, at.shifted(-1, 0)) || is_bridge_at(grid, at.shifted(1, 0)) {
        (1, 0)
    } else if is_bridge_at(grid, at.shifted(0, -1)) || is_bridge_at(grid, at.shifted(0, 1)) {
        (0, 1)
    } else {
        return vec![offset];
    };

    let mut start = at;
    while is_bridge_at(grid, start.shifted(-dx, -dy)) {
        start = start.shifted(-dx, -dy);
    }
    let mut run = Vec::new();
    let mut tile = start;
    while let Some(cell) = grid.offset_of(tile).filter(|&o| is_bridge(grid, o)) {
        run.push(cell);
        tile = tile.shifted(dx, dy);
    }
    run
}

/// Figures standing anywhere on the bridge through `offset`.
pub fn count_figures(grid: &TileGrid, offset: usize) -> u32 {
    bridge_run(grid, offset)
        .into_iter()
        .map(|o| grid.figures_at(o) as u32)
        .sum()
}

/// Removes the whole bridge through `offset`. Returns the cells removed.
pub fn remove(grid: &mut TileGrid, offset: usize) -> usize {
    let run = bridge_run(grid, offset);
    for &cell in &run {
        grid.set_bridge(cell, 0);
        grid.remove_terrain(cell, TerrainFlags::ROAD);
    }
    run.len()
}

/// Lays a bridge over existing water from `start`, `length` cells along x or y.
/// Cells that are not water are skipped.
pub fn build(grid: &mut TileGrid, start: TileCoord, length: i32, along_x: bool) {
    for i in 0..length {
        let tile = if along_x { start.shifted(i, 0) } else { start.shifted(0, i) };
        let Some(offset) = grid.offset_of(tile) else {
            continue;
        };
        if grid.terrain_is(offset, TerrainFlags::WATER) {
            grid.set_bridge(offset, 1);
            grid.add_terrain(offset, TerrainFlags::ROAD);
        }
    }
}

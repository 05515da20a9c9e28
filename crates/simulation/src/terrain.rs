//! Terrain flags and the classifier predicates built on them.
//!
//! A cell can carry many flags at once (a road can sit on floodplain, a
//! plaza is a road with a property bit). The predicates here only read the
//! grid; none of them mutate it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::grid::{GridArea, TileCoord, TileGrid};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TerrainFlags: u32 {
        const TREE = 1 << 0;
        const ROCK = 1 << 1;
        const WATER = 1 << 2;
        const BUILDING = 1 << 3;
        const SHRUB = 1 << 4;
        const GARDEN = 1 << 5;
        const ROAD = 1 << 6;
        const GROUNDWATER = 1 << 7;
        const CANAL = 1 << 8;
        const ELEVATION = 1 << 9;
        const ACCESS_RAMP = 1 << 10;
        const MEADOW = 1 << 11;
        const RUBBLE = 1 << 12;
        const WALL = 1 << 13;
        const GATEHOUSE = 1 << 14;
        const FLOODPLAIN = 1 << 15;
        const MARSHLAND = 1 << 16;
        const ORE = 1 << 17;
        const DUNE = 1 << 18;
        const DEEPWATER = 1 << 19;

        /// Anything occupying the cell. Meadow, floodplain and groundwater
        /// are ground types and do not block.
        const NOT_CLEAR = Self::TREE.bits()
            | Self::ROCK.bits()
            | Self::WATER.bits()
            | Self::BUILDING.bits()
            | Self::SHRUB.bits()
            | Self::GARDEN.bits()
            | Self::ROAD.bits()
            | Self::CANAL.bits()
            | Self::ELEVATION.bits()
            | Self::ACCESS_RAMP.bits()
            | Self::RUBBLE.bits()
            | Self::WALL.bits()
            | Self::GATEHOUSE.bits()
            | Self::MARSHLAND.bits()
            | Self::ORE.bits()
            | Self::DUNE.bits()
            | Self::DEEPWATER.bits();

        /// What the player can demolish.
        const CLEARABLE = Self::TREE.bits()
            | Self::SHRUB.bits()
            | Self::ROAD.bits()
            | Self::BUILDING.bits()
            | Self::GARDEN.bits()
            | Self::CANAL.bits()
            | Self::RUBBLE.bits()
            | Self::WALL.bits()
            | Self::GATEHOUSE.bits();

        const ALL = u32::MAX >> 12;
    }
}

/// How figures standing in a footprint affect `is_clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FigurePolicy {
    /// Ignore figures.
    None,
    /// Figures only block when they stand off-road.
    OutsideRoad,
    /// Any figure blocks.
    #[default]
    Anywhere,
}

/// Whether the N×N block anchored at `tile` is free for placement.
///
/// A cell blocks when it carries a flag in `disallowed ∩ NOT_CLEAR`, when a
/// figure stands on it (per `figures`), or when `check_image` is set and it
/// already has an image. Figure and image checks are alternatives: a figure
/// tolerated on a road skips the image check for that cell. If `disallowed`
/// includes FLOODPLAIN, every cell within one step of a floodplain cell
/// blocks as well. A footprint that leaves the grid is never clear.
pub fn is_clear(
    grid: &TileGrid,
    tile: TileCoord,
    size: i32,
    disallowed: TerrainFlags,
    check_image: bool,
    figures: FigurePolicy,
) -> bool {
    if !grid.is_inside(tile, size) {
        return false;
    }
    let blocking = TerrainFlags::NOT_CLEAR & disallowed;
    for dy in 0..size {
        for dx in 0..size {
            let cell = tile.shifted(dx, dy);
            let Some(offset) = grid.offset_of(cell) else {
                return false;
            };
            if grid.terrain_is(offset, blocking) {
                return false;
            } else if figures != FigurePolicy::None && grid.has_figure_at(offset) {
                match figures {
                    FigurePolicy::Anywhere => return false,
                    FigurePolicy::OutsideRoad if !grid.terrain_is(offset, TerrainFlags::ROAD) => {
                        return false
                    }
                    _ => {}
                }
            } else if check_image && grid.image_at(offset) != 0 {
                return false;
            }

            if disallowed.contains(TerrainFlags::FLOODPLAIN)
                && exists_tile_in_radius_with_type(grid, cell, 1, 1, TerrainFlags::FLOODPLAIN)
            {
                return false;
            }
        }
    }
    true
}

/// `is_clear` without the image check.
pub fn tiles_are_clear(
    grid: &TileGrid,
    tile: TileCoord,
    size: i32,
    disallowed: TerrainFlags,
    figures: FigurePolicy,
) -> bool {
    is_clear(grid, tile, size, disallowed, false, figures)
}

/// True if every cell of the N×N block has at least one flag in `mask`.
pub fn all_tiles_in_area_are(grid: &TileGrid, tile: TileCoord, size: i32, mask: TerrainFlags) -> bool {
    if !grid.is_inside(tile, size) {
        return false;
    }
    GridArea::around(tile, size, 0)
        .tiles()
        .all(|cell| grid.offset_of(cell).is_some_and(|o| grid.terrain_is(o, mask)))
}

fn radius_cells(grid: &TileGrid, tile: TileCoord, size: i32, radius: i32) -> impl Iterator<Item = usize> + '_ {
    grid.bound_area(GridArea::around(tile, size, radius))
        .into_iter()
        .flat_map(|area| area.tiles())
        .filter_map(|cell| grid.offset_of(cell))
}

/// Chebyshev search around an N×N footprint for any cell sharing a flag with `mask`.
pub fn exists_tile_in_radius_with_type(
    grid: &TileGrid,
    tile: TileCoord,
    size: i32,
    radius: i32,
    mask: TerrainFlags,
) -> bool {
    radius_cells(grid, tile, size, radius).any(|o| grid.terrain_is(o, mask))
}

/// Like [`exists_tile_in_radius_with_type`], but the flag set must equal `exact`.
pub fn exists_tile_in_radius_with_exact(
    grid: &TileGrid,
    tile: TileCoord,
    size: i32,
    radius: i32,
    exact: TerrainFlags,
) -> bool {
    radius_cells(grid, tile, size, radius).any(|o| grid.terrain_at(o) == exact)
}

/// First cell (row-major) around the footprint with no not-clear flag,
/// skipping `except`.
pub fn exists_clear_tile_in_radius(
    grid: &TileGrid,
    tile: TileCoord,
    size: i32,
    radius: i32,
    except: Option<usize>,
) -> Option<TileCoord> {
    radius_cells(grid, tile, size, radius)
        .find(|&o| Some(o) != except && !grid.terrain_is(o, TerrainFlags::NOT_CLEAR))
        .map(|o| grid.coord(o))
}

/// True if any cell of the N×N block has a grass level below full.
pub fn has_nonfull_grass_in_radius(grid: &TileGrid, tile: TileCoord, size: i32, radius: i32) -> bool {
    radius_cells(grid, tile, size, radius).any(|o| grid.grass_at(o) < crate::config::GRASS_FULL)
}

//! Tile-image resolver.
//!
//! Every pass reads terrain flags, neighbor state and the persistent random
//! byte of a cell and writes back the image id plus multi-tile metadata.
//! Passes come in whole-map and region (inclusive rectangle) flavors and
//! visit cells row-major, y outer and x inner. Later cells may observe
//! images written by earlier ones in the same pass, so the order matters.

mod elevation;
mod empty_land;
mod flags;
mod meadow;
mod network;
mod plaza;
mod rock;
mod rubble;
mod vegetation;
mod water;

pub use flags::{add_entry_exit_flags, remove_entry_exit_flags, EntryExitPoints};

use bevy::prelude::*;

use crate::grid::{GridArea, TileCoord, TileGrid};
use crate::image_context::ImageContext;
use crate::image_groups::{ImageGroup, ImageGroups};
use crate::map_random::RandomGrid;
use crate::view::ViewOrientation;

/// Everything a resolver pass touches, borrowed for the duration of one
/// update.
pub struct TileUpdate<'a> {
    pub grid: &'a mut TileGrid,
    pub random: &'a RandomGrid,
    pub images: &'a ImageGroups,
    pub shapes: &'a dyn ImageContext,
    pub orientation: ViewOrientation,
}

impl<'a> TileUpdate<'a> {
    pub fn new(
        grid: &'a mut TileGrid,
        random: &'a RandomGrid,
        images: &'a ImageGroups,
        shapes: &'a dyn ImageContext,
        orientation: ViewOrientation,
    ) -> Self {
        Self {
            grid,
            random,
            images,
            shapes,
            orientation,
        }
    }

    #[inline]
    pub(crate) fn random(&self, offset: usize) -> u8 {
        self.random.get(offset)
    }

    #[inline]
    pub(crate) fn image(&self, group: ImageGroup, offset: i32) -> u32 {
        self.images.id(group, offset)
    }

    /// Calls `f` for every cell of the rectangle clipped to the grid.
    pub(crate) fn for_each_region(&mut self, min: TileCoord, max: TileCoord, mut f: impl FnMut(&mut Self, usize)) {
        let Some(area) = self.grid.bound_area(GridArea { min, max }) else {
            return;
        };
        for tile in area.tiles() {
            if let Some(offset) = self.grid.offset_of(tile) {
                f(self, offset);
            }
        }
    }

    pub(crate) fn for_each_map_tile(&mut self, mut f: impl FnMut(&mut Self, usize)) {
        for offset in 0..self.grid.cell_count() {
            f(self, offset);
        }
    }

    /// Full map refresh in load order. Runs after a map is created or loaded.
    pub fn refresh_entire_map(&mut self) {
        self.update_all_elevation();
        self.update_all_rocks();
        self.update_all_shrub();
        self.update_all_vegetation();
        self.update_all_meadow();
        self.update_all_rubble();
        self.river_refresh_entire();
        self.update_all_roads();
        self.update_all_canals();
        self.update_all_walls();
        self.update_all_gardens();
        self.update_all_plazas();
        self.update_all_empty_land();
        info!("Tile images refreshed for the entire {}x{} map", self.grid.length, self.grid.length);
    }
}

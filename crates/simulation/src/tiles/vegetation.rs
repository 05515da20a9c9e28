//! Shrubs, trees and marshland reeds.

use super::TileUpdate;
use crate::config::VEGETATION_FULL;
use crate::grid::TileCoord;
use crate::image_groups::ImageGroup;
use crate::terrain::TerrainFlags;

impl TileUpdate<'_> {
    fn set_shrub_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::SHRUB)
            && !self.grid.terrain_is(offset, TerrainFlags::ELEVATION | TerrainFlags::ACCESS_RAMP)
        {
            let image_id = self.image(ImageGroup::Shrub, (self.random(offset) & 7) as i32);
            self.grid.set_single_tile_image(offset, image_id);
        }
    }

    pub fn update_all_shrub(&mut self) {
        self.for_each_map_tile(|u, o| u.set_shrub_image(o));
    }

    pub fn update_region_shrub(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min, max, |u, o| u.set_shrub_image(o));
    }

    /// Grown trees use the first eight variants, saplings the next eight.
    fn set_tree_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::ELEVATION | TerrainFlags::ACCESS_RAMP) {
            return;
        }
        let variant = (self.random(offset) & 7) as i32;
        let image_id = if self.grid.vegetation_at(offset) == VEGETATION_FULL {
            self.image(ImageGroup::Tree, variant)
        } else {
            self.image(ImageGroup::Tree, 8 + variant)
        };
        self.grid.set_single_tile_image(offset, image_id);
    }

    fn set_marshland_image(&mut self, offset: usize) {
        if !self.grid.terrain_is(offset, TerrainFlags::MARSHLAND) {
            return;
        }
        let shape = self.shapes.reeds_transition(self.grid, self.random, offset);
        let image_id = if shape.is_valid {
            self.image(ImageGroup::Reeds, 8 + shape.group_offset + shape.item_offset)
        } else if self.grid.vegetation_at(offset) == VEGETATION_FULL {
            self.image(ImageGroup::ReedsGrown, (self.random(offset) & 7) as i32)
        } else {
            self.image(ImageGroup::Reeds, (self.random(offset) & 7) as i32)
        };
        self.grid.set_image(offset, image_id);
    }

    /// Re-resolves a single cell after its vegetation grew or was cut.
    pub fn update_vegetation(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::MARSHLAND) {
            self.set_marshland_image(offset);
        } else if self.grid.terrain_is(offset, TerrainFlags::TREE) {
            self.set_tree_image(offset);
        }
    }

    pub fn update_all_vegetation(&mut self) {
        self.for_each_map_tile(|u, o| u.update_vegetation(o));
    }

    pub fn update_all_marshland(&mut self) {
        self.for_each_map_tile(|u, o| u.set_marshland_image(o));
    }

    pub fn update_region_marshland(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min, max, |u, o| u.set_marshland_image(o));
    }
}

//! Empty land and grass.
//!
//! Pass 1 tiles bare land with the largest clear block that fits (4×4 down
//! to 1×1). Pass 2 paints grass growth over it. Floodplain edges are
//! refreshed last since they depend on both.

use super::TileUpdate;
use crate::config::{GRASS_EDGE_START, GRASS_FULL};
use crate::grid::{PropertyFlags, TileCoord};
use crate::image_groups::ImageGroup;
use crate::terrain::{
    exists_tile_in_radius_with_type, has_nonfull_grass_in_radius, is_clear, FigurePolicy, TerrainFlags,
};
use crate::view::ViewOrientation;

const GRASS_BLOCKERS: TerrainFlags = TerrainFlags::NOT_CLEAR.union(TerrainFlags::MEADOW);

/// Sprite offset of a grass edge/corner tile for the current view.
///
/// Levels 0-7 above the edge start are edges and outer corners (8 sprites,
/// rotated one step per view); levels 8-11 are inner corners (4 sprites,
/// rotated half as fast). Odd entries wrap into the next lap one step late.
pub(crate) fn grass_edge_offset(grass: u8, orientation: ViewOrientation) -> i32 {
    let view = orientation.value();
    let mut offset = grass as i32 - GRASS_EDGE_START as i32;
    if offset < 8 {
        let odd = offset % 2 == 1;
        offset -= view;
        if offset < i32::from(odd) {
            offset += 8;
        }
    } else {
        offset -= view / 2;
        if offset < 8 {
            offset += 4;
        }
    }
    offset
}

impl TileUpdate<'_> {
    fn clear_empty_land_image(&mut self, offset: usize) {
        if !self.grid.terrain_is(offset, TerrainFlags::NOT_CLEAR) {
            self.grid.set_single_tile_image(offset, 0);
        }
        let tile = self.grid.coord(offset);
        if self.grid.terrain_is(offset, TerrainFlags::FLOODPLAIN) && !self.grid.terrain_is(offset, TerrainFlags::WATER) {
            self.set_floodplain_land_tiles_image(offset, false);
        } else if exists_tile_in_radius_with_type(self.grid, tile, 1, 1, TerrainFlags::FLOODPLAIN) {
            self.set_floodplain_edges_image(offset);
        }
    }

    /// Writes `image_id + index` into each cell of the block and strips
    /// anything clearable, leaving plain 1×1 tiles.
    fn set_empty_land_image(&mut self, offset: usize, size: i32, image_id: u32) {
        let tile = self.grid.coord(offset);
        if !self.grid.is_inside(tile, size) {
            return;
        }
        let mut index = 0;
        for dy in 0..size {
            for dx in 0..size {
                let Some(o) = self.grid.offset(tile.x + dx, tile.y + dy) else {
                    continue;
                };
                self.grid.remove_terrain(o, TerrainFlags::CLEARABLE);
                self.grid.set_building(o, 0);
                self.grid.clear_property(o, PropertyFlags::CONSTRUCTING);
                self.grid.set_single_tile_image(o, image_id + index);
                index += 1;
            }
        }
    }

    fn set_empty_land_pass1(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::NOT_CLEAR) || self.grid.image_at(offset) != 0 {
            return;
        }
        let group = if self.grid.property_is(offset, PropertyFlags::ALTERNATE_TERRAIN) {
            ImageGroup::EmptyLandAlt
        } else {
            ImageGroup::EmptyLand
        };
        let base = self.images.base(group);
        let tile = self.grid.coord(offset);
        let r = self.random(offset) as u32;
        let fits = |size| is_clear(self.grid, tile, size, TerrainFlags::ALL, true, FigurePolicy::Anywhere);

        if fits(4) {
            self.set_empty_land_image(offset, 4, base + 42);
        } else if fits(3) {
            self.set_empty_land_image(offset, 3, base + 24 + 9 * (r & 1));
        } else if fits(2) {
            self.set_empty_land_image(offset, 2, base + 8 + 4 * (r & 3));
        } else {
            self.set_empty_land_image(offset, 1, base + (r & 7));
        }
    }

    fn set_empty_land_pass2(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, GRASS_BLOCKERS) {
            return;
        }
        let grass = self.grid.grass_at(offset);
        let r = self.random(offset) as i32;
        let tile = self.grid.coord(offset);

        if grass > 0 && grass < GRASS_FULL {
            let image_id = self.image(ImageGroup::GrassPh, grass as i32 - 1 + 12 * (r % 3));
            self.set_empty_land_image(offset, 1, image_id);
        } else if grass == GRASS_FULL {
            // Distance to the nearest cell that is not full grass.
            let distance = if exists_tile_in_radius_with_type(self.grid, tile, 1, 1, GRASS_BLOCKERS) {
                1
            } else if exists_tile_in_radius_with_type(self.grid, tile, 1, 2, GRASS_BLOCKERS)
                || has_nonfull_grass_in_radius(self.grid, tile, 1, 1)
            {
                2
            } else {
                3
            };
            let block = match distance {
                1 => 36,
                2 => 60,
                _ => 48,
            };
            let image_id = self.image(ImageGroup::GrassPh, block + r % 12);
            self.set_empty_land_image(offset, 1, image_id);
        } else if grass >= GRASS_EDGE_START {
            let image_id = self.image(ImageGroup::GrassPhEdges, grass_edge_offset(grass, self.orientation));
            self.set_empty_land_image(offset, 1, image_id);
        }
    }

    /// Resets the image of every unoccupied cell and redraws floodplain.
    pub fn update_all_cleared_land(&mut self) {
        self.for_each_map_tile(|u, o| u.clear_empty_land_image(o));
    }

    pub fn update_all_empty_land(&mut self) {
        self.for_each_map_tile(|u, o| u.set_empty_land_pass1(o));
        self.for_each_map_tile(|u, o| u.set_empty_land_pass2(o));
        self.for_each_map_tile(|u, o| u.set_floodplain_edge_3x3_tiles(o));
    }

    pub fn update_region_empty_land(&mut self, clear: bool, min: TileCoord, max: TileCoord) {
        if clear {
            self.for_each_region(min, max, |u, o| u.clear_empty_land_image(o));
        }
        self.for_each_region(min, max, |u, o| u.set_empty_land_pass1(o));
        self.for_each_region(min, max, |u, o| u.set_empty_land_pass2(o));
        self.for_each_region(min.shifted(-1, -1), max.shifted(1, 1), |u, o| {
            u.set_floodplain_edge_3x3_tiles(o)
        });
    }
}

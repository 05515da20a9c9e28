//! Water, river banks and the floodplain overlay.

use super::meadow::meadow_density;
use super::TileUpdate;
use crate::grid::TileCoord;
use crate::image_groups::ImageGroup;
use crate::terrain::{exists_tile_in_radius_with_exact, exists_tile_in_radius_with_type, TerrainFlags};

/// Cells that take part in the river refresh.
const RIVER_TERRAIN: TerrainFlags = TerrainFlags::WATER
    .union(TerrainFlags::DEEPWATER)
    .union(TerrainFlags::FLOODPLAIN);

impl TileUpdate<'_> {
    fn set_water_image(&mut self, offset: usize) {
        let tile = self.grid.coord(offset);
        let shape = self.shapes.shore(self.grid, self.random, offset);
        // The floodplain overlay draws groundwater seeps itself.
        if exists_tile_in_radius_with_type(self.grid, tile, 1, 1, TerrainFlags::FLOODPLAIN)
            && exists_tile_in_radius_with_exact(self.grid, tile, 1, 1, TerrainFlags::GROUNDWATER)
        {
            return;
        }
        let image_id = self.image(ImageGroup::Water, shape.group_offset + shape.item_offset);
        self.grid.set_single_tile_image(offset, image_id);
    }

    fn set_deepwater_image(&mut self, offset: usize) {
        let shape = self.shapes.river(self.grid, self.random, offset);
        let image_id = self.image(ImageGroup::DeepWater, shape.group_offset + shape.item_offset);
        self.grid.set_single_tile_image(offset, image_id);
    }

    fn set_river_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::WATER)
            && !self.grid.terrain_is(offset, TerrainFlags::BUILDING)
        {
            self.set_water_image(offset);
        }
        if self.grid.terrain_is(offset, TerrainFlags::DEEPWATER) {
            self.set_deepwater_image(offset);
        }
    }

    fn set_river_3x3_tiles(&mut self, offset: usize) {
        let at = self.grid.coord(offset);
        self.for_each_region(at.shifted(-1, -1), at.shifted(1, 1), |u, o| u.set_river_image(o));
    }

    /// Land next to floodplain gets a bank sprite. Cells with no floodplain
    /// neighbor keep their image.
    pub(crate) fn set_floodplain_edges_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::FLOODPLAIN | TerrainFlags::NOT_CLEAR) {
            return;
        }
        let shape = self.shapes.floodplain_edge(self.grid, self.random, offset);
        if !shape.is_valid {
            return;
        }
        let image_id = self.image(ImageGroup::FloodplainEdge, shape.group_offset + shape.item_offset);
        self.grid.set_single_tile_image(offset, image_id);
    }

    pub(crate) fn set_floodplain_edge_3x3_tiles(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::FLOODPLAIN) {
            let at = self.grid.coord(offset);
            self.for_each_region(at.shifted(-1, -1), at.shifted(1, 1), |u, o| u.set_floodplain_edges_image(o));
        }
    }

    /// Dry floodplain picks a fertility-tiered variant. Without `force`,
    /// cells that already have an image are left alone.
    pub(crate) fn set_floodplain_land_tiles_image(&mut self, offset: usize, force: bool) {
        if !self.grid.terrain_is(offset, TerrainFlags::FLOODPLAIN)
            || self.grid.terrain_is(offset, TerrainFlags::NOT_CLEAR)
        {
            return;
        }
        if !force && self.grid.image_at(offset) != 0 {
            return;
        }
        let tier = meadow_density(self.grid.fertility_with_malus(offset));
        let image_id = self.image(ImageGroup::Floodplain, 8 * tier + (self.random(offset) & 7) as i32);
        self.grid.set_single_tile_image(offset, image_id);
    }

    /// Re-resolves everything around one changed water cell.
    pub fn refresh_river_image_at(&mut self, offset: usize, force: bool) {
        self.set_river_3x3_tiles(offset);
        self.set_floodplain_edge_3x3_tiles(offset);
        self.set_floodplain_land_tiles_image(offset, force);
        self.set_road_image(offset);
        self.set_canal_image(offset);
    }

    pub fn set_water(&mut self, offset: usize) {
        self.grid.add_terrain(offset, TerrainFlags::WATER);
        self.refresh_river_image_at(offset, true);
    }

    pub fn river_refresh_entire(&mut self) {
        self.for_each_map_tile(|u, o| {
            if u.grid.terrain_is(o, RIVER_TERRAIN) {
                u.set_river_3x3_tiles(o);
            }
        });
        self.for_each_map_tile(|u, o| {
            if u.grid.terrain_is(o, RIVER_TERRAIN) {
                u.set_floodplain_edge_3x3_tiles(o);
            }
        });
        self.for_each_map_tile(|u, o| {
            if u.grid.terrain_is(o, RIVER_TERRAIN) {
                u.set_floodplain_land_tiles_image(o, false);
            }
        });
    }

    /// River refresh around a rectangle; each cell refreshes its 3×3
    /// neighborhood, so the touched area is one cell wider on every side.
    pub fn river_refresh_region(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min, max, |u, o| u.set_river_3x3_tiles(o));
        self.for_each_region(min, max, |u, o| u.set_floodplain_edge_3x3_tiles(o));
        self.for_each_region(min, max, |u, o| u.set_floodplain_land_tiles_image(o, false));
    }
}

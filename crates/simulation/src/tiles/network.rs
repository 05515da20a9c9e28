//! Connected networks: roads, canals and walls.
//!
//! Each network picks one of 16 sprites from the mask of its orthogonal
//! neighbors that belong to the same network (north 1, east 2, south 4,
//! west 8).

use super::TileUpdate;
use crate::grid::{PropertyFlags, TileCoord};
use crate::image_groups::ImageGroup;
use crate::terrain::TerrainFlags;

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

const WALL_NETWORK: TerrainFlags = TerrainFlags::WALL.union(TerrainFlags::GATEHOUSE);

const CANAL_NETWORK: TerrainFlags = TerrainFlags::CANAL.union(TerrainFlags::WATER);

impl TileUpdate<'_> {
    fn connection_mask(&self, offset: usize, network: TerrainFlags) -> i32 {
        let tile = self.grid.coord(offset);
        NEIGHBORS
            .iter()
            .enumerate()
            .filter(|&(_, &(dx, dy))| {
                self.grid
                    .offset_of(tile.shifted(dx, dy))
                    .is_some_and(|o| self.grid.terrain_is(o, network))
            })
            .fold(0, |mask, (bit, _)| mask | (1_i32 << bit))
    }

    pub(crate) fn set_road_image(&mut self, offset: usize) {
        if !self.grid.terrain_is(offset, TerrainFlags::ROAD)
            || self.grid.terrain_is(offset, TerrainFlags::BUILDING | TerrainFlags::WATER)
            || self.grid.property_is(offset, PropertyFlags::PLAZA_OR_EARTHQUAKE)
        {
            return;
        }
        let group = if self.grid.terrain_is(offset, TerrainFlags::FLOODPLAIN) {
            ImageGroup::FloodplainRoad
        } else {
            ImageGroup::Road
        };
        let image_id = self.image(group, self.connection_mask(offset, TerrainFlags::ROAD));
        self.grid.set_single_tile_image(offset, image_id);
    }

    pub fn update_all_roads(&mut self) {
        self.for_each_map_tile(|u, o| u.set_road_image(o));
    }

    /// Roads in the `size`-wide square anchored one cell up-left of (x, y).
    pub fn update_area_roads(&mut self, x: i32, y: i32, size: i32) {
        let min = TileCoord::new(x - 1, y - 1);
        let max = TileCoord::new(x + size - 2, y + size - 2);
        self.for_each_region(min, max, |u, o| u.set_road_image(o));
    }

    /// The canal layer keeps `mask + 1` so zero still means "no canal".
    pub(crate) fn set_canal_image(&mut self, offset: usize) {
        if !self.grid.terrain_is(offset, TerrainFlags::CANAL) || self.grid.terrain_is(offset, TerrainFlags::BUILDING) {
            return;
        }
        let mask = self.connection_mask(offset, CANAL_NETWORK);
        let image_id = self.image(ImageGroup::Canal, mask);
        self.grid.set_single_tile_image(offset, image_id);
        self.grid.set_canal(offset, mask as u8 + 1);
    }

    pub fn update_all_canals(&mut self) {
        self.for_each_map_tile(|u, o| u.set_canal_image(o));
    }

    pub fn update_region_canals(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min, max, |u, o| u.set_canal_image(o));
    }

    /// Lays a canal at `tile`. Returns true if the cell was not a canal yet.
    pub fn set_canal(&mut self, tile: TileCoord) -> bool {
        let Some(offset) = self.grid.offset_of(tile) else {
            return false;
        };
        let added = !self.grid.terrain_is(offset, TerrainFlags::CANAL);
        self.grid.add_terrain(offset, TerrainFlags::CANAL);
        self.grid.clear_property(offset, PropertyFlags::CONSTRUCTING);
        self.for_each_region(tile.shifted(-1, -1), tile.shifted(1, 1), |u, o| u.set_canal_image(o));
        added
    }

    fn set_wall_image(&mut self, offset: usize) {
        if !self.grid.terrain_is(offset, TerrainFlags::WALL) || self.grid.terrain_is(offset, TerrainFlags::BUILDING) {
            return;
        }
        let image_id = self.image(ImageGroup::Wall, self.connection_mask(offset, WALL_NETWORK));
        self.grid.set_single_tile_image(offset, image_id);
    }

    pub fn update_all_walls(&mut self) {
        self.for_each_map_tile(|u, o| u.set_wall_image(o));
    }

    /// Same footprint rule as [`Self::update_area_roads`].
    pub fn update_area_walls(&mut self, tile: TileCoord, size: i32) {
        let min = tile.shifted(-1, -1);
        let max = tile.shifted(size - 2, size - 2);
        self.for_each_region(min, max, |u, o| u.set_wall_image(o));
    }
}

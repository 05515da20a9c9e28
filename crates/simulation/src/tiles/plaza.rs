//! Gardens and plazas.

use super::TileUpdate;
use crate::grid::PropertyFlags;
use crate::image_groups::ImageGroup;
use crate::terrain::TerrainFlags;

impl TileUpdate<'_> {
    fn set_garden_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::GARDEN) && !self.grid.terrain_is(offset, TerrainFlags::BUILDING) {
            let image_id = self.image(ImageGroup::Garden, (self.random(offset) & 7) as i32);
            self.grid.set_single_tile_image(offset, image_id);
        }
    }

    pub fn update_all_gardens(&mut self) {
        self.for_each_map_tile(|u, o| u.set_garden_image(o));
    }

    fn is_plaza(&self, offset: usize) -> bool {
        self.grid.terrain_is(offset, TerrainFlags::ROAD) && self.grid.property_is(offset, PropertyFlags::PLAZA_OR_EARTHQUAKE)
    }

    fn remove_plaza_below_building(&mut self, offset: usize) {
        if self.is_plaza(offset) && self.grid.terrain_is(offset, TerrainFlags::BUILDING) {
            self.grid.clear_property(offset, PropertyFlags::PLAZA_OR_EARTHQUAKE);
        }
    }

    fn clear_plaza_image(&mut self, offset: usize) {
        if self.is_plaza(offset) {
            self.grid.set_single_tile_image(offset, 0);
        }
    }

    fn is_free_plaza(&self, offset: usize) -> bool {
        self.is_plaza(offset) && self.grid.image_at(offset) == 0
    }

    /// Four unresolved plaza cells meeting at `offset` become one 2×2 tile.
    fn set_plaza_image(&mut self, offset: usize) {
        if !self.is_free_plaza(offset) {
            return;
        }
        let tile = self.grid.coord(offset);
        let r = self.random(offset) as i32;
        let block = [(1, 0), (0, 1), (1, 1)].iter().all(|&(dx, dy)| {
            self.grid
                .offset_of(tile.shifted(dx, dy))
                .is_some_and(|o| self.is_free_plaza(o))
        });
        if block {
            let image_id = self.image(ImageGroup::Plaza, r & 3);
            self.grid
                .building_tiles_add(0, tile, 2, image_id, TerrainFlags::ROAD, self.orientation);
        } else {
            let image_id = self.image(ImageGroup::Plaza, 4 + (r & 7));
            self.grid.set_single_tile_image(offset, image_id);
        }
    }

    pub fn update_all_plazas(&mut self) {
        self.for_each_map_tile(|u, o| u.remove_plaza_below_building(o));
        self.for_each_map_tile(|u, o| u.clear_plaza_image(o));
        self.for_each_map_tile(|u, o| u.set_plaza_image(o));
    }
}

use super::meadow::FORBIDDEN_TERRAIN_MEADOW;
use super::TileUpdate;
use crate::grid::TileCoord;
use crate::image_groups::ImageGroup;
use crate::terrain::TerrainFlags;

/// Same as the meadow mask, minus rubble itself.
const FORBIDDEN_TERRAIN_RUBBLE: TerrainFlags = FORBIDDEN_TERRAIN_MEADOW.difference(TerrainFlags::RUBBLE);

impl TileUpdate<'_> {
    fn set_rubble_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::RUBBLE)
            && !self.grid.terrain_is(offset, FORBIDDEN_TERRAIN_RUBBLE)
        {
            let image_id = self.image(ImageGroup::Rubble, (self.random(offset) & 7) as i32);
            self.grid.set_single_tile_image(offset, image_id);
            self.grid.set_canal(offset, 0);
        }
    }

    pub fn update_all_rubble(&mut self) {
        self.for_each_map_tile(|u, o| u.set_rubble_image(o));
    }

    pub fn update_region_rubble(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min, max, |u, o| u.set_rubble_image(o));
    }
}

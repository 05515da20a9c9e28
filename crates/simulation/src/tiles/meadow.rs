use super::TileUpdate;
use crate::config::{GRASS_FULL, MEADOW_DENSE_FERTILITY, MEADOW_MEDIUM_FERTILITY};
use crate::grid::TileCoord;
use crate::image_groups::ImageGroup;
use crate::terrain::TerrainFlags;

/// Terrain that hides a meadow underneath it.
pub(crate) const FORBIDDEN_TERRAIN_MEADOW: TerrainFlags = TerrainFlags::CANAL
    .union(TerrainFlags::ELEVATION)
    .union(TerrainFlags::ACCESS_RAMP)
    .union(TerrainFlags::RUBBLE)
    .union(TerrainFlags::ROAD)
    .union(TerrainFlags::BUILDING)
    .union(TerrainFlags::GARDEN);

/// Fertility tier: 2 dense, 1 medium, 0 sparse.
pub(crate) fn meadow_density(fertility: i32) -> i32 {
    if fertility > MEADOW_DENSE_FERTILITY {
        2
    } else if fertility > MEADOW_MEDIUM_FERTILITY {
        1
    } else {
        0
    }
}

impl TileUpdate<'_> {
    fn set_meadow_image(&mut self, offset: usize) {
        if !self.grid.terrain_is(offset, TerrainFlags::MEADOW)
            || self.grid.terrain_is(offset, FORBIDDEN_TERRAIN_MEADOW)
        {
            return;
        }
        let grass = self.grid.grass_at(offset) as i32;
        let density = meadow_density(self.grid.fertility_with_malus(offset));
        let random = (self.random(offset) % 8) as i32;

        let image_id = if grass == 0 {
            match density {
                2 => self.image(ImageGroup::MeadowStaticInner, random),
                0 => self.image(ImageGroup::MeadowStaticOuter, random),
                _ => self.image(ImageGroup::MeadowWithGrass, 12),
            }
        } else if grass == GRASS_FULL as i32 && density == 2 {
            self.image(ImageGroup::MeadowStaticTallgrass, random)
        } else {
            self.image(ImageGroup::MeadowWithGrass, 12 * density + grass - 1)
        };

        self.grid.set_single_tile_image(offset, image_id);
        self.grid.set_canal(offset, 0);
    }

    pub fn update_all_meadow(&mut self) {
        self.for_each_map_tile(|u, o| u.set_meadow_image(o));
    }

    pub fn update_region_meadow(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min, max, |u, o| u.set_meadow_image(o));
    }
}

//! Rock and ore rock, placed as 3×3, 2×2 or single-cell clumps.

use super::TileUpdate;
use crate::grid::{GridArea, PropertyFlags, TileCoord};
use crate::image_groups::ImageGroup;
use crate::terrain::{all_tiles_in_area_are, exists_tile_in_radius_with_type, TerrainFlags};

/// Cells of a clump other than its origin, per clump size.
const CLUMP_2_CELLS: [(i32, i32); 3] = [(1, 0), (1, 1), (0, 1)];
const CLUMP_3_CELLS: [(i32, i32); 5] = [(2, 0), (2, 1), (2, 2), (1, 2), (0, 2)];

/// Elevation this close to a clump switches it to the elevated rock set.
const ELEVATION_ROCK_RADIUS: i32 = 4;

#[derive(Clone, Copy)]
enum RockKind {
    Plain,
    Ore,
}

impl TileUpdate<'_> {
    fn is_updatable_rock(&self, offset: usize) -> bool {
        self.grid.terrain_is(offset, TerrainFlags::ROCK)
            && !self.grid.property_is(offset, PropertyFlags::PLAZA_OR_EARTHQUAKE)
            && !self.grid.terrain_is(offset, TerrainFlags::ELEVATION | TerrainFlags::ACCESS_RAMP)
    }

    /// No image yet on the clump cells of a `radius`-sized clump at `tile`,
    /// not counting the origin itself.
    fn terrain_no_image_at(&self, tile: TileCoord, radius: i32) -> bool {
        let mut cells = Vec::new();
        if radius >= 2 {
            cells.extend_from_slice(&CLUMP_2_CELLS);
        }
        if radius >= 3 {
            cells.extend_from_slice(&CLUMP_3_CELLS);
        }
        cells.into_iter().all(|(dx, dy)| {
            self.grid
                .offset_of(tile.shifted(dx, dy))
                .map_or(true, |o| self.grid.image_at(o) == 0)
        })
    }

    fn clear_rock_image(&mut self, offset: usize) {
        if self.is_updatable_rock(offset) {
            self.grid.set_single_tile_image(offset, 0);
        }
    }

    fn rock_group(&self, kind: RockKind, tile: TileCoord, size: i32) -> ImageGroup {
        match kind {
            RockKind::Ore => ImageGroup::OreRock,
            RockKind::Plain => {
                if exists_tile_in_radius_with_type(self.grid, tile, size, ELEVATION_ROCK_RADIUS, TerrainFlags::ELEVATION) {
                    ImageGroup::ElevationRock
                } else {
                    ImageGroup::Rock
                }
            }
        }
    }

    fn set_rock_image(&mut self, offset: usize, kind: RockKind) {
        if !self.is_updatable_rock(offset) || self.grid.image_at(offset) != 0 {
            return;
        }
        let tile = self.grid.coord(offset);
        let flag = match kind {
            RockKind::Plain => TerrainFlags::ROCK,
            RockKind::Ore => TerrainFlags::ORE,
        };
        let r = self.random(offset) as i32;

        if all_tiles_in_area_are(self.grid, tile, 3, flag) && self.terrain_no_image_at(tile, 3) {
            let image_id = self.image(self.rock_group(kind, tile, 3), 12 + (r & 1));
            self.grid.building_tiles_add(0, tile, 3, image_id, flag, self.orientation);
        } else if all_tiles_in_area_are(self.grid, tile, 2, flag) && self.terrain_no_image_at(tile, 2) {
            let image_id = self.image(self.rock_group(kind, tile, 2), 8 + (r & 3));
            self.grid.building_tiles_add(0, tile, 2, image_id, flag, self.orientation);
        } else if self.grid.terrain_is(offset, flag) {
            let image_id = self.image(self.rock_group(kind, tile, 1), r & 7);
            self.grid.set_image(offset, image_id);
        }
    }

    /// Ore clumps go first so plain rock fills around them.
    pub fn update_all_rocks(&mut self) {
        self.for_each_map_tile(|u, o| u.clear_rock_image(o));
        self.for_each_map_tile(|u, o| u.set_rock_image(o, RockKind::Ore));
        self.for_each_map_tile(|u, o| u.set_rock_image(o, RockKind::Plain));
    }

    /// Re-places rock inside a rectangle. Clumps reaching into the rectangle
    /// are cleared whole so no cell keeps pointing at a dissolved clump.
    pub fn update_region_rocks(&mut self, min: TileCoord, max: TileCoord) {
        let mut footprints = Vec::new();
        self.for_each_region(min, max, |u, o| {
            if u.is_updatable_rock(o) {
                let cell = u.grid.multi_tile_at(o);
                let at = u.grid.coord(o);
                let origin = at.shifted(-(cell.dx as i32), -(cell.dy as i32));
                footprints.push(GridArea::around(origin, cell.size.max(1) as i32, 0));
            }
        });
        for area in footprints {
            self.for_each_region(area.min, area.max, |u, o| u.clear_rock_image(o));
        }
        let (lo, hi) = (min.shifted(-2, -2), max.shifted(2, 2));
        self.for_each_region(lo, hi, |u, o| u.set_rock_image(o, RockKind::Ore));
        self.for_each_region(lo, hi, |u, o| u.set_rock_image(o, RockKind::Plain));
    }
}

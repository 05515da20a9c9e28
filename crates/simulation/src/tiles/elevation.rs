//! Cliffs and the access ramps leading up them.

use super::TileUpdate;
use crate::grid::TileCoord;
use crate::image_context::ELEVATION_INVALID_GROUP;
use crate::image_groups::ImageGroup;
use crate::terrain::TerrainFlags;
use crate::view::ViewOrientation;

/// Ramp templates, one per direction. Cells 0-1 are the cliff edge the ramp
/// climbs to, 2-3 the ramp itself, 4-5 the plateau behind the edge.
const RAMP_TEMPLATES: [[(i32, i32); 6]; 4] = [
    [(0, 1), (1, 1), (0, 0), (1, 0), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 0), (1, 1), (-1, 0), (-1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1), (0, -1), (1, -1)],
    [(1, 0), (1, 1), (0, 0), (0, 1), (2, 0), (2, 1)],
];

fn ramp_rotation(orientation: ViewOrientation) -> i32 {
    match orientation {
        ViewOrientation::TopRight => 0,
        ViewOrientation::TopLeft => 1,
        ViewOrientation::BottomLeft => 2,
        ViewOrientation::BottomRight => 3,
    }
}

impl TileUpdate<'_> {
    /// Direction of a valid ramp at `tile`, rotated for the current view.
    /// `None` if no template fits.
    fn access_ramp_image_offset(&self, tile: TileCoord) -> Option<i32> {
        if !self.grid.is_inside(tile, 1) {
            return None;
        }
        let direction = RAMP_TEMPLATES.iter().position(|template| {
            let mut right_tiles = 0;
            let mut height = -1;
            for (i, &(dx, dy)) in template.iter().enumerate() {
                let Some(o) = self.grid.offset_of(tile.shifted(dx, dy)) else {
                    continue;
                };
                let elevation = self.grid.elevation_at(o) as i32;
                if i < 2 {
                    if self.grid.terrain_is(o, TerrainFlags::ELEVATION) {
                        right_tiles += 1;
                    }
                    height = elevation;
                } else if i < 4 {
                    if self.grid.terrain_is(o, TerrainFlags::ACCESS_RAMP) && elevation < height {
                        right_tiles += 1;
                    }
                } else if self.grid.terrain_is(o, TerrainFlags::ELEVATION) {
                    if elevation != height {
                        right_tiles += 1;
                    }
                } else if elevation >= height {
                    right_tiles += 1;
                }
            }
            right_tiles == 6
        })?;
        Some((direction as i32 + ramp_rotation(self.orientation)) % 4)
    }

    fn clear_access_ramp_image(&mut self, offset: usize) {
        if self.grid.terrain_is(offset, TerrainFlags::ACCESS_RAMP) {
            self.grid.set_image(offset, 0);
        }
    }

    fn set_elevation_image(&mut self, offset: usize) {
        let tile = self.grid.coord(offset);
        if self.grid.terrain_is(offset, TerrainFlags::ACCESS_RAMP) && self.grid.image_at(offset) == 0 {
            match self.access_ramp_image_offset(tile) {
                Some(ramp) => {
                    let image_id = self.image(ImageGroup::AccessRamp, ramp);
                    self.grid
                        .building_tiles_add(0, tile, 2, image_id, TerrainFlags::ACCESS_RAMP, self.orientation);
                }
                None => {
                    // A ramp with nothing to climb turns back into cliff or land.
                    self.grid.remove_terrain(offset, TerrainFlags::ACCESS_RAMP);
                    self.grid.set_multi_tile_size(offset, 1);
                    self.grid.mark_draw_tile(offset);
                    if self.grid.elevation_at(offset) > 0 {
                        self.grid.add_terrain(offset, TerrainFlags::ELEVATION);
                    } else {
                        self.grid.remove_terrain(offset, TerrainFlags::ELEVATION);
                        let image_id = self.image(ImageGroup::EmptyLand, (self.random(offset) & 7) as i32);
                        self.grid.set_image(offset, image_id);
                    }
                }
            }
        }

        let height = self.grid.elevation_at(offset);
        if height == 0 || self.grid.terrain_is(offset, TerrainFlags::ACCESS_RAMP) {
            return;
        }
        let shape = self.shapes.elevation(self.grid, self.random, offset, height);
        if shape.group_offset == ELEVATION_INVALID_GROUP {
            self.grid.remove_terrain(offset, TerrainFlags::ELEVATION);
            let terrain = self.grid.terrain_at(offset);
            if terrain.contains(TerrainFlags::BUILDING) {
                return;
            }
            self.grid.set_multi_tile_xy(offset, 0, 0, true);
            let r = self.random(offset) as i32;
            if terrain.contains(TerrainFlags::SHRUB) {
                let image_id = self.image(ImageGroup::Shrub, r & 7);
                self.grid.set_image(offset, image_id);
            } else if terrain.contains(TerrainFlags::TREE) {
                let image_id = self.image(ImageGroup::Tree, r & 7);
                self.grid.set_image(offset, image_id);
            } else if terrain.contains(TerrainFlags::ROAD) {
                self.set_road_image(offset);
            } else if terrain.contains(TerrainFlags::MEADOW) {
                let image_id = self.image(ImageGroup::MeadowStaticOuter, r & 3);
                self.grid.set_image(offset, image_id);
            } else {
                let image_id = self.image(ImageGroup::EmptyLand, r & 7);
                self.grid.set_image(offset, image_id);
            }
        } else {
            self.grid.set_multi_tile_xy(offset, 0, 0, true);
            self.grid.add_terrain(offset, TerrainFlags::ELEVATION);
            let image_id = self.image(ImageGroup::Elevation, shape.group_offset + shape.item_offset);
            self.grid.set_image(offset, image_id);
        }
    }

    /// Skips the last row and column, which can never anchor a ramp.
    pub fn update_all_elevation(&mut self) {
        let last = self.grid.length as i32 - 2;
        let (min, max) = (TileCoord::new(0, 0), TileCoord::new(last, last));
        self.for_each_region(min, max, |u, o| u.clear_access_ramp_image(o));
        self.for_each_region(min, max, |u, o| u.set_elevation_image(o));
    }

    pub fn update_region_elevation(&mut self, min: TileCoord, max: TileCoord) {
        self.for_each_region(min.shifted(-1, -1), max.shifted(1, 1), |u, o| u.clear_access_ramp_image(o));
        self.for_each_region(min.shifted(-1, -1), max.shifted(1, 1), |u, o| u.set_elevation_image(o));
    }
}

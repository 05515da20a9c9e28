//! Assertion helpers for `TestMap` integration tests.

use crate::buildings::{BuildingId, BuildingState};
use crate::terrain::TerrainFlags;

use super::TestMap;

impl TestMap {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_terrain(&self, x: i32, y: i32, flags: TerrainFlags) {
        let terrain = self.terrain(x, y);
        assert!(
            terrain.contains(flags),
            "Expected {flags:?} at ({x}, {y}), found {terrain:?}"
        );
    }

    pub fn assert_no_terrain(&self, x: i32, y: i32, flags: TerrainFlags) {
        let terrain = self.terrain(x, y);
        assert!(
            !terrain.intersects(flags),
            "Expected no {flags:?} at ({x}, {y}), found {terrain:?}"
        );
    }

    pub fn assert_building_state(&self, id: BuildingId, state: BuildingState) {
        let found = self.building(id).state;
        assert_eq!(found, state, "Building {id} is {found:?}, expected {state:?}");
    }

    /// Every cell without an occupying flag has a resolved image.
    pub fn assert_no_blank_land(&self) {
        let grid = self.grid();
        for offset in 0..grid.cell_count() {
            if grid.terrain_is(offset, TerrainFlags::NOT_CLEAR) {
                continue;
            }
            assert_ne!(
                grid.image_at(offset),
                0,
                "Cell {:?} was left without an image",
                grid.coord(offset)
            );
        }
    }
}

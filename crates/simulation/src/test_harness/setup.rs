//! Builder methods for terrain, buildings and settings.

use crate::buildings::{BuildingData, BuildingId, BuildingStore, BuildingType, HouseData};
use crate::features::GameFeatures;
use crate::grid::{TileCoord, TileGrid};
use crate::terrain::TerrainFlags;
use crate::tiles::EntryExitPoints;
use crate::view::ViewOrientation;

use super::TestMap;

impl TestMap {
    // -----------------------------------------------------------------------
    // Terrain
    // -----------------------------------------------------------------------

    /// Adds `flags` to the cell at (x, y).
    pub fn with_terrain(mut self, x: i32, y: i32, flags: TerrainFlags) -> Self {
        self.add_terrain(x, y, flags);
        self
    }

    /// Adds `flags` to every cell of the inclusive rectangle.
    pub fn with_terrain_rect(mut self, min: (i32, i32), max: (i32, i32), flags: TerrainFlags) -> Self {
        for y in min.1..=max.1 {
            for x in min.0..=max.0 {
                self.add_terrain(x, y, flags);
            }
        }
        self
    }

    pub fn add_terrain(&mut self, x: i32, y: i32, flags: TerrainFlags) {
        let mut grid = self.app.world_mut().resource_mut::<TileGrid>();
        if let Some(offset) = grid.offset(x, y) {
            grid.add_terrain(offset, flags);
        }
    }

    /// Lays a bridge of `length` cells along x from (x, y) over existing water.
    pub fn with_bridge(mut self, x: i32, y: i32, length: i32) -> Self {
        let mut grid = self.app.world_mut().resource_mut::<TileGrid>();
        crate::bridge::build(&mut grid, TileCoord::new(x, y), length, true);
        self
    }

    pub fn with_figures(mut self, x: i32, y: i32, count: u16) -> Self {
        let mut grid = self.app.world_mut().resource_mut::<TileGrid>();
        if let Some(offset) = grid.offset(x, y) {
            grid.add_figures(offset, count);
        }
        self
    }

    // -----------------------------------------------------------------------
    // Buildings
    // -----------------------------------------------------------------------

    /// Places a building and stamps its footprint. Returns the new id.
    pub fn place_building(&mut self, kind: BuildingType, x: i32, y: i32, size: i32) -> BuildingId {
        let orientation = *self.app.world().resource::<ViewOrientation>();
        self.app
            .world_mut()
            .resource_scope(|world, mut store: bevy::prelude::Mut<BuildingStore>| {
                let mut grid = world.resource_mut::<TileGrid>();
                store.place(&mut grid, kind, TileCoord::new(x, y), size, orientation)
            })
    }

    /// Places a house with `population` residents.
    pub fn place_house(&mut self, x: i32, y: i32, size: i32, population: u32) -> BuildingId {
        let id = self.place_building(BuildingType::House, x, y, size);
        if let Some(house) = self.app.world_mut().resource_mut::<BuildingStore>().get_mut(id) {
            house.data = BuildingData::House(HouseData { population });
        }
        id
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub fn with_features(mut self, features: GameFeatures) -> Self {
        self.app.insert_resource(features);
        self
    }

    pub fn with_entry_exit(mut self, entry: (i32, i32), exit: (i32, i32)) -> Self {
        self.app.insert_resource(EntryExitPoints {
            entry: TileCoord::new(entry.0, entry.1),
            exit: TileCoord::new(exit.0, exit.1),
            ..Default::default()
        });
        self
    }
}

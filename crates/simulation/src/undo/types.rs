//! Map layer snapshot kept by the undo recorder.

use crate::buildings::BuildingId;
use crate::grid::{MultiTile, PropertyFlags, TileGrid};
use crate::terrain::TerrainFlags;

/// Copy of the grid layers a construction action can change.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub terrain: Vec<TerrainFlags>,
    pub building: Vec<BuildingId>,
    pub image: Vec<u32>,
    pub multi_tile: Vec<MultiTile>,
    pub property: Vec<PropertyFlags>,
    pub canal: Vec<u8>,
    pub bridge: Vec<u8>,
}

impl MapSnapshot {
    pub fn capture(grid: &TileGrid) -> Self {
        Self {
            terrain: grid.terrain.clone(),
            building: grid.building.clone(),
            image: grid.image.clone(),
            multi_tile: grid.multi_tile.clone(),
            property: grid.property.clone(),
            canal: grid.canal.clone(),
            bridge: grid.bridge.clone(),
        }
    }

    /// Copies terrain and canal state back. Property bits and multi-tile
    /// metadata only come back with `include_properties`.
    pub fn restore_terrain(&self, grid: &mut TileGrid, include_properties: bool) {
        if self.terrain.len() != grid.cell_count() {
            return;
        }
        grid.terrain.clone_from(&self.terrain);
        grid.canal.clone_from(&self.canal);
        if include_properties {
            grid.property.clone_from(&self.property);
            grid.multi_tile.clone_from(&self.multi_tile);
        }
    }

    /// Copies every captured layer back.
    pub fn restore_all(&self, grid: &mut TileGrid) {
        if self.terrain.len() != grid.cell_count() {
            return;
        }
        self.restore_terrain(grid, true);
        grid.building.clone_from(&self.building);
        grid.image.clone_from(&self.image);
        grid.bridge.clone_from(&self.bridge);
    }
}

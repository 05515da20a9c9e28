//! Read-only side of land clearing: what is in a selection and how many
//! items a clear would remove.

use crate::bridge;
use crate::buildings::{Building, BuildingId, BuildingState, BuildingStore};
use crate::features::GameFeatures;
use crate::grid::{PropertyFlags, TileGrid};
use crate::terrain::{exists_tile_in_radius_with_type, TerrainFlags};

use super::types::{ClearPlan, ClearRequest};

/// Cells a clear never touches.
pub(crate) const UNCLEARABLE: TerrainFlags = TerrainFlags::ROCK
    .union(TerrainFlags::ELEVATION)
    .union(TerrainFlags::DUNE);

/// Root part of the building on a cell, if the player may delete it.
pub(crate) fn deletable_building<'s>(
    grid: &TileGrid,
    store: &'s BuildingStore,
    offset: usize,
) -> Option<&'s Building> {
    let id = grid.building_at(offset);
    if id == 0 {
        return None;
    }
    let building = store.get(store.main(id))?;
    if building.kind.is_protected() || building.state == BuildingState::DeletedByPlayer || building.is_deleted {
        return None;
    }
    Some(building)
}

/// Scans the selection for forts and bridges and counts what a clear would
/// remove.
pub fn plan(grid: &TileGrid, store: &BuildingStore, features: &GameFeatures, request: &ClearRequest) -> ClearPlan {
    let Some(area) = request.area(grid) else {
        return ClearPlan::default();
    };
    let mut plan = ClearPlan {
        items: measure(grid, store, features, request),
        ..Default::default()
    };
    for tile in area.tiles() {
        let Some(offset) = grid.offset_of(tile) else {
            continue;
        };
        let id = grid.building_at(offset);
        plan.needs_fort_confirm |= store.get(id).is_some_and(|b| b.kind.is_fort());
        plan.needs_bridge_confirm |= bridge::is_bridge(grid, offset);
    }
    plan
}

/// Counts the items a clear of the selection would remove without touching
/// anything.
///
/// With visual feedback on, every deletable building counts once and water
/// never counts, bridges and flooded canals included. Dry canals count, as
/// do clearable cells away from floodplain. With visual feedback off the
/// count follows the commit rules as if nothing had been confirmed, so a
/// canal is checked before water and forts still count.
pub fn measure(grid: &TileGrid, store: &BuildingStore, features: &GameFeatures, request: &ClearRequest) -> u32 {
    let Some(area) = request.area(grid) else {
        return 0;
    };
    let mut counted: Vec<BuildingId> = Vec::new();
    let mut items = 0;
    for tile in area.tiles() {
        let Some(offset) = grid.offset_of(tile) else {
            continue;
        };
        if grid.terrain_is(offset, UNCLEARABLE) {
            continue;
        }
        if grid.property_is(offset, PropertyFlags::DELETED) {
            continue;
        }
        let terrain = grid.terrain_at(offset);

        if terrain.contains(TerrainFlags::BUILDING) {
            if let Some(b) = deletable_building(grid, store, offset) {
                if !counted.contains(&b.id) {
                    counted.push(b.id);
                    items += 1;
                }
            }
        } else if features.gameui_visual_feedback_on_delete {
            // Water wins over canal here, so a flooded canal reads as free.
            if terrain.contains(TerrainFlags::WATER) {
                continue;
            }
            if terrain.contains(TerrainFlags::CANAL)
                || (terrain.intersects(TerrainFlags::NOT_CLEAR)
                    && terrain.intersects(TerrainFlags::CLEARABLE)
                    && !exists_tile_in_radius_with_type(grid, tile, 1, 1, TerrainFlags::FLOODPLAIN))
            {
                items += 1;
            }
        } else if terrain.contains(TerrainFlags::CANAL) {
            items += 1;
        } else if terrain.contains(TerrainFlags::WATER) {
            continue;
        } else if terrain.intersects(TerrainFlags::NOT_CLEAR)
            && terrain.difference(TerrainFlags::CLEARABLE).intersects(TerrainFlags::NOT_CLEAR)
        {
            items += 1;
        }
    }
    items
}

//! Mutating side of land clearing.

use bevy::prelude::*;

use crate::bridge;
use crate::buildings::{update_building_state, BuildingId, BuildingState};
use crate::config::CLEAR_INVALIDATION_MARGIN;
use crate::grid::{GridArea, PropertyFlags};
use crate::terrain::TerrainFlags;

use super::plan::{deletable_building, UNCLEARABLE};
use super::types::{ClearRequest, ClearWorld, CommitReport, WARNING_BRIDGE_WITH_PEOPLE};

/// Demolishes everything clearable in the selection and re-resolves the
/// tiles around it.
///
/// Starts from the state the undo record captured, so a request that is
/// committed again after a confirmation sees the original map. Forts are
/// only removed with `fort_confirmed`, which also makes the action
/// impossible to undo. Bridges are only removed with `bridge_confirmed`
/// and never while people stand on them.
pub fn commit(world: &mut ClearWorld, request: &ClearRequest) -> CommitReport {
    let mut report = CommitReport::default();
    world.undo.restore_building_state(world.buildings);
    world.undo.restore_map(world.grid, false);

    let Some(area) = request.area(world.grid) else {
        return report;
    };

    for tile in area.tiles() {
        let Some(offset) = world.grid.offset_of(tile) else {
            continue;
        };
        if world.grid.terrain_is(offset, UNCLEARABLE) {
            continue;
        }

        if world.grid.terrain_is(offset, TerrainFlags::BUILDING) {
            let Some(id) = deletable_building(world.grid, world.buildings, offset).map(|b| b.id) else {
                continue;
            };
            if delete_building(world, id, request, &mut report) {
                report.items += 1;
            }
        } else if world.grid.terrain_is(offset, TerrainFlags::CANAL) {
            world.grid.remove_terrain(offset, TerrainFlags::CLEARABLE);
            world.grid.set_canal(offset, 0);
            report.items += 1;
        } else if world.grid.terrain_is(offset, TerrainFlags::WATER) {
            if !bridge::is_bridge(world.grid, offset) {
                continue;
            }
            if bridge::count_figures(world.grid, offset) > 0 {
                report.warn(WARNING_BRIDGE_WITH_PEOPLE);
            } else if request.bridge_confirmed {
                bridge::remove(world.grid, offset);
                report.items += 1;
            }
        } else if world.grid.terrain_is(offset, TerrainFlags::NOT_CLEAR) {
            if world.grid.terrain_is(offset, TerrainFlags::ROAD) {
                world.grid.clear_property(offset, PropertyFlags::PLAZA_OR_EARTHQUAKE);
            }
            world.grid.remove_terrain(offset, TerrainFlags::CLEARABLE);
            // Only cells that stay occupied count.
            if world.grid.terrain_is(offset, TerrainFlags::NOT_CLEAR) {
                report.items += 1;
            }
        }
    }

    invalidate_tiles(world, area);

    world.routing.update_land(world.grid);
    world.routing.update_walls(world.grid);
    world.routing.update_water(world.grid);

    if world.features.gameplay_change_immediate_delete {
        let vacated = update_building_state(world.grid, world.buildings);
        let mut tiles = world.tiles();
        for footprint in vacated {
            tiles.update_region_empty_land(true, footprint.min, footprint.max);
        }
    }

    debug!(
        "Cleared ({}, {})..({}, {}): {} items",
        area.min.x, area.min.y, area.max.x, area.max.y, report.items
    );
    report
}

/// Marks a root building and the parts linked after it as deleted by the
/// player.
/// Returns whether the root counts as a removed item; forts without
/// confirmation are left standing.
fn delete_building(world: &mut ClearWorld, id: BuildingId, request: &ClearRequest, report: &mut CommitReport) -> bool {
    let Some(building) = world.buildings.get(id) else {
        return false;
    };
    if building.kind.is_fort() {
        if !request.fort_confirmed {
            return false;
        }
        world.undo.disable();
        report.undo_disabled = true;
    }

    let tile = building.tile;
    let population = building.as_house().map_or(0, |house| house.population);
    if population > 0 {
        world.figures.spawn_homeless(world.grid, tile, population);
    }
    if building.is_floodplain_farm() && world.features.gameplay_change_soil_depletion {
        building.deplete_soil(world.grid);
    }

    let Some(building) = world.buildings.get_mut(id) else {
        return false;
    };
    if let Some(house) = building.as_house_mut() {
        house.population = 0;
    }
    let counts = building.state != BuildingState::DeletedByPlayer;
    if counts {
        world.undo.add_building(building);
    }
    building.state = BuildingState::DeletedByPlayer;
    building.is_deleted = true;

    // `id` is already the root, so only the forward chain remains.
    for part in world.buildings.next_parts(id) {
        if let Some(b) = world.buildings.get_mut(part) {
            world.undo.add_building(b);
            b.state = BuildingState::DeletedByPlayer;
        }
    }
    counts
}

/// Re-resolves the cleared rectangle and the networks that reach into it.
fn invalidate_tiles(world: &mut ClearWorld, area: GridArea) {
    let radius = area.width().max(area.height()) + CLEAR_INVALIDATION_MARGIN;
    let margin = CLEAR_INVALIDATION_MARGIN;
    let mut tiles = world.tiles();
    tiles.update_region_empty_land(true, area.min, area.max);
    tiles.update_region_meadow(area.min, area.max);
    tiles.update_region_rubble(area.min, area.max);
    tiles.update_all_gardens();
    tiles.update_area_roads(area.min.x, area.min.y, radius);
    tiles.update_all_plazas();
    tiles.update_area_walls(area.min, radius);
    tiles.update_region_canals(area.min.shifted(-margin, -margin), area.max.shifted(margin, margin));
}

//! Undo recorder resource and its request event.

use bevy::prelude::*;

use super::types::MapSnapshot;
use crate::buildings::{Building, BuildingState, BuildingStore};
use crate::config::MAX_UNDO_BUILDINGS;
use crate::grid::TileGrid;

// ---------------------------------------------------------------------------
// UndoState resource
// ---------------------------------------------------------------------------

/// Record of the action in progress (or the last finished one).
///
/// `available` drops to false as soon as the action becomes impossible to
/// revert; `ready` is set once the action has finished and its record is
/// sealed. An undo needs both.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct UndoState {
    available: bool,
    ready: bool,
    map: Option<MapSnapshot>,
    buildings: Vec<Building>,
}

impl UndoState {
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn can_undo(&self) -> bool {
        self.available && self.ready
    }

    /// Buildings recorded for the current action, in recording order.
    pub fn recorded_buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Opens a new record: snapshots the map and forgets older buildings.
    pub fn start_build(&mut self, grid: &TileGrid) {
        self.available = true;
        self.ready = false;
        self.buildings.clear();
        self.map = Some(MapSnapshot::capture(grid));
    }

    /// Records a building before the action changes it. Each id is kept
    /// once; the first snapshot wins. Overflowing the record disables undo.
    pub fn add_building(&mut self, building: &Building) {
        if !self.available || building.id == 0 {
            return;
        }
        if self.buildings.iter().any(|b| b.id == building.id) {
            return;
        }
        if self.buildings.len() >= MAX_UNDO_BUILDINGS {
            debug!("Undo record full, disabling undo for this action");
            self.available = false;
            return;
        }
        self.buildings.push(building.clone());
    }

    pub fn disable(&mut self) {
        self.available = false;
    }

    /// Revives buildings this record marked as deleted by the player and
    /// empties the record, so a repeated pass over the same selection starts
    /// from the original building states.
    pub fn restore_building_state(&mut self, store: &mut BuildingStore) {
        for recorded in self.buildings.drain(..) {
            if let Some(b) = store.get_mut(recorded.id) {
                if b.state == BuildingState::DeletedByPlayer {
                    b.state = BuildingState::InUse;
                }
                b.is_deleted = false;
            }
        }
    }

    /// Puts the snapshot's terrain back without touching images.
    pub fn restore_map(&self, grid: &mut TileGrid, include_properties: bool) {
        if let Some(map) = &self.map {
            map.restore_terrain(grid, include_properties);
        }
    }

    /// Seals the record of the action that just finished.
    pub fn finish_build(&mut self) {
        self.ready = true;
    }

    /// Reverts the sealed action. Returns false when there is nothing to
    /// undo; a successful undo cannot be repeated.
    pub fn perform_undo(&mut self, grid: &mut TileGrid, store: &mut BuildingStore) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(map) = self.map.take() else {
            return false;
        };
        map.restore_all(grid);
        for snapshot in self.buildings.drain(..) {
            store.restore(snapshot);
        }
        self.available = false;
        self.ready = false;
        true
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Marker event: the player wants to undo the last action.
#[derive(Event)]
pub struct UndoRequested;

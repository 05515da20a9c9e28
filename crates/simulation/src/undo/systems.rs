//! Undo request handling.

use bevy::prelude::*;

use crate::buildings::BuildingStore;
use crate::grid::TileGrid;
use crate::routing::RoutingGrids;

use super::history::{UndoRequested, UndoState};

/// Reverts the last sealed action on request and rebuilds routing, since
/// the restored terrain invalidates it.
pub fn process_undo(
    mut events: EventReader<UndoRequested>,
    mut undo: ResMut<UndoState>,
    mut grid: ResMut<TileGrid>,
    mut store: ResMut<BuildingStore>,
    mut routing: ResMut<RoutingGrids>,
) {
    for _ in events.read() {
        if !undo.perform_undo(&mut grid, &mut store) {
            debug!("Undo requested with nothing to undo");
            continue;
        }
        routing.update_land(&grid);
        routing.update_walls(&grid);
        routing.update_water(&grid);
        info!("Last action undone");
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct UndoPlugin;

impl Plugin for UndoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UndoState>()
            .init_resource::<TileGrid>()
            .init_resource::<BuildingStore>()
            .init_resource::<RoutingGrids>()
            .add_event::<UndoRequested>()
            .add_systems(Update, process_undo);
    }
}

//! Frame driving, event helpers and read-back queries for `TestMap`.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingId, BuildingStore};
use crate::grid::{TileCoord, TileGrid};
use crate::land_clearing::{ClearConfirmationAnswered, ClearLandRequested, PendingClearConfirmation};
use crate::map_random::RandomGrid;
use crate::terrain::TerrainFlags;
use crate::terrain_systems::MapCreated;
use crate::undo::{UndoRequested, UndoState};
use crate::view::ViewOrientation;

use super::TestMap;

impl TestMap {
    // -----------------------------------------------------------------------
    // Frames and events
    // -----------------------------------------------------------------------

    /// Runs one frame of the `Update` schedule chain.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    /// Drains every `E` sent so far.
    pub fn take_events<E: Event>(&mut self) -> Vec<E> {
        self.app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    /// Generates a new map with `seed` and runs the frame that resolves it.
    pub fn create_map(&mut self, seed: u64) {
        self.send(MapCreated { seed });
        self.update();
    }

    /// Requests a clear over the rectangle and runs one frame.
    pub fn clear(&mut self, start: (i32, i32), end: (i32, i32)) {
        self.send(ClearLandRequested {
            start: TileCoord::new(start.0, start.1),
            end: TileCoord::new(end.0, end.1),
            measure_only: false,
        });
        self.update();
    }

    /// Requests a measuring pass over the rectangle and runs one frame.
    pub fn measure(&mut self, start: (i32, i32), end: (i32, i32)) {
        self.send(ClearLandRequested {
            start: TileCoord::new(start.0, start.1),
            end: TileCoord::new(end.0, end.1),
            measure_only: true,
        });
        self.update();
    }

    pub fn answer(&mut self, accepted: bool) {
        self.send(ClearConfirmationAnswered { accepted });
        self.update();
    }

    pub fn undo(&mut self) {
        self.send(UndoRequested);
        self.update();
    }

    /// Switches the view and runs the frame that re-resolves the map.
    pub fn rotate_to(&mut self, orientation: ViewOrientation) {
        *self.app.world_mut().resource_mut::<ViewOrientation>() = orientation;
        self.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn resource_mut<R: Resource>(&mut self) -> Mut<'_, R> {
        self.app.world_mut().resource_mut::<R>()
    }

    pub fn grid(&self) -> &TileGrid {
        self.resource::<TileGrid>()
    }

    pub fn random(&self) -> &RandomGrid {
        self.resource::<RandomGrid>()
    }

    pub fn undo_state(&self) -> &UndoState {
        self.resource::<UndoState>()
    }

    pub fn pending(&self) -> &PendingClearConfirmation {
        self.resource::<PendingClearConfirmation>()
    }

    pub fn building(&self, id: BuildingId) -> &Building {
        self.resource::<BuildingStore>()
            .get(id)
            .unwrap_or_else(|| panic!("no building with id {id}"))
    }

    pub fn offset(&self, x: i32, y: i32) -> usize {
        self.grid()
            .offset(x, y)
            .unwrap_or_else(|| panic!("({x}, {y}) is off the map"))
    }

    pub fn terrain(&self, x: i32, y: i32) -> TerrainFlags {
        self.grid().terrain_at(self.offset(x, y))
    }

    pub fn image(&self, x: i32, y: i32) -> u32 {
        self.grid().image_at(self.offset(x, y))
    }
}

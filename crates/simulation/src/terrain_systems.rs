//! Map lifecycle around the tile resolver: new maps, view rotation and the
//! removal of deleted buildings.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::buildings::{update_building_state, BuildingStore};
use crate::grid::TileGrid;
use crate::image_context::ImageContexts;
use crate::image_groups::ImageGroups;
use crate::map_random::RandomGrid;
use crate::routing::RoutingGrids;
use crate::sim_rng::SimRng;
use crate::tiles::{add_entry_exit_flags, remove_entry_exit_flags, EntryExitPoints, TileUpdate};
use crate::view::ViewOrientation;

/// A map was generated or loaded into [`TileGrid`]. `seed` restarts the
/// random sequence the per-cell random layer is drawn from.
#[derive(Event, Debug, Clone, Copy)]
pub struct MapCreated {
    pub seed: u64,
}

/// Resources a resolver pass needs, borrowed together.
#[derive(SystemParam)]
pub struct TileParams<'w> {
    grid: ResMut<'w, TileGrid>,
    random: Res<'w, RandomGrid>,
    images: Res<'w, ImageGroups>,
    shapes: Res<'w, ImageContexts>,
    orientation: Res<'w, ViewOrientation>,
}

impl TileParams<'_> {
    pub fn update(&mut self) -> TileUpdate<'_> {
        TileUpdate::new(&mut self.grid, &self.random, &self.images, &*self.shapes.0, *self.orientation)
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Draws the random layer for the new map, resolves every tile and plants
/// the entry and exit flags.
#[allow(clippy::too_many_arguments)]
pub fn init_new_map(
    mut events: EventReader<MapCreated>,
    mut rng: ResMut<SimRng>,
    mut random: ResMut<RandomGrid>,
    mut grid: ResMut<TileGrid>,
    images: Res<ImageGroups>,
    shapes: Res<ImageContexts>,
    orientation: Res<ViewOrientation>,
    mut points: ResMut<EntryExitPoints>,
    mut routing: ResMut<RoutingGrids>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    rng.reseed(event.seed);
    if random.length != grid.length {
        *random = RandomGrid::new(grid.length);
    }
    random.init(&mut rng);

    TileUpdate::new(&mut grid, &random, &images, &*shapes.0, *orientation).refresh_entire_map();
    add_entry_exit_flags(&mut grid, &images, *orientation, &mut points);

    routing.update_land(&grid);
    routing.update_walls(&grid);
    routing.update_water(&grid);
}

/// Rotating the view changes multi-tile draw corners and rotated sprites,
/// so the whole map is resolved again with the flags lifted off first.
pub fn refresh_on_rotation(mut tiles: TileParams, mut points: ResMut<EntryExitPoints>) {
    if !tiles.orientation.is_changed() || tiles.orientation.is_added() {
        return;
    }
    let orientation = *tiles.orientation;
    remove_entry_exit_flags(&mut tiles.grid, &points);
    tiles.update().refresh_entire_map();
    add_entry_exit_flags(&mut tiles.grid, &tiles.images, orientation, &mut points);
}

/// Takes buildings deleted by the player off the map and re-resolves the
/// ground they stood on.
pub fn process_building_state(mut tiles: TileParams, mut store: ResMut<BuildingStore>) {
    let vacated = update_building_state(&mut tiles.grid, &mut store);
    if vacated.is_empty() {
        return;
    }
    let mut update = tiles.update();
    for footprint in vacated {
        update.update_region_empty_land(true, footprint.min, footprint.max);
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileGrid>()
            .init_resource::<RandomGrid>()
            .init_resource::<SimRng>()
            .init_resource::<ImageGroups>()
            .init_resource::<ImageContexts>()
            .init_resource::<ViewOrientation>()
            .init_resource::<BuildingStore>()
            .init_resource::<EntryExitPoints>()
            .init_resource::<RoutingGrids>()
            .add_event::<MapCreated>()
            .add_systems(
                Update,
                (
                    init_new_map,
                    refresh_on_rotation.after(init_new_map),
                    process_building_state.after(refresh_on_rotation),
                ),
            );
    }
}

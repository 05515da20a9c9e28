//! # TestMap: headless integration test harness
//!
//! Wraps a `bevy::app::App` running `SimulationPlugin` on a small blank map,
//! so tests can drive the terrain and clearing systems through their events
//! and inspect the resulting resources.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::grid::TileGrid;
use crate::map_random::RandomGrid;
use crate::SimulationPlugin;

/// Side length of the default test map.
pub const TEST_MAP_LENGTH: usize = 24;

/// A headless App wrapping `SimulationPlugin` for integration testing.
///
/// Builder methods set up the map, `update()` runs one frame and the query
/// methods read back ECS state.
pub struct TestMap {
    app: App,
}

impl Default for TestMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMap {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A blank map of [`TEST_MAP_LENGTH`] cells with every resource at its
    /// default and a zeroed random layer.
    pub fn new() -> Self {
        Self::with_length(TEST_MAP_LENGTH)
    }

    pub fn with_length(length: usize) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);

        // Replace the full-size defaults before the first frame.
        app.insert_resource(TileGrid::new(length));
        app.insert_resource(RandomGrid::new(length));

        app.update();
        Self { app }
    }
}

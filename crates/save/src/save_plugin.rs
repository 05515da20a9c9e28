use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::atomic_write::atomic_write;
use crate::save_codec::{load_from_bytes, save_to_bytes};
use crate::save_error::SaveError;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event, Debug, Clone)]
pub struct SaveMapRequested {
    pub path: PathBuf,
}

#[derive(Event, Debug, Clone)]
pub struct LoadMapRequested {
    pub path: PathBuf,
}

/// Sent after a map file was written or restored.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum MapFileDone {
    Saved(PathBuf),
    Loaded(PathBuf),
}

/// Sent when a save or load failed; the world is left as it was.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct MapFileFailed {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveMapRequested>()
            .add_event::<LoadMapRequested>()
            .add_event::<MapFileDone>()
            .add_event::<MapFileFailed>()
            .add_systems(Update, (exclusive_save, exclusive_load).chain());
    }
}

// ---------------------------------------------------------------------------
// Exclusive systems
// ---------------------------------------------------------------------------

fn report(world: &mut World, result: Result<MapFileDone, SaveError>) {
    match result {
        Ok(done) => {
            info!("Map file done: {done:?}");
            world.send_event(done);
        }
        Err(e) => {
            let message = format!("{e}");
            error!("Map file failed: {message}");
            world.send_event(MapFileFailed { message });
        }
    }
}

fn write_map(world: &World, path: &Path) -> Result<(), SaveError> {
    let bytes = save_to_bytes(world)?;
    atomic_write(path, &bytes)?;
    Ok(())
}

fn read_map(world: &mut World, path: &Path) -> Result<(), SaveError> {
    let bytes = std::fs::read(path)?;
    load_from_bytes(world, &bytes)
}

/// Handles the latest save request of the frame with full world access.
pub(crate) fn exclusive_save(world: &mut World) {
    let Some(request) = world
        .resource_mut::<Events<SaveMapRequested>>()
        .drain()
        .last()
    else {
        return;
    };
    let result = write_map(world, &request.path).map(|()| MapFileDone::Saved(request.path));
    report(world, result);
}

/// Handles the latest load request of the frame. A failed load leaves the
/// current map untouched.
pub(crate) fn exclusive_load(world: &mut World) {
    let Some(request) = world
        .resource_mut::<Events<LoadMapRequested>>()
        .drain()
        .last()
    else {
        return;
    };
    let result = read_map(world, &request.path).map(|()| MapFileDone::Loaded(request.path));
    report(world, result);
}

//! Scenario entry and exit flags.
//!
//! Each flag stands on the nearest clear cell around its map point, faces
//! into the map and is marked as rock so nothing gets built over it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FLAG_SEARCH_RADIUS;
use crate::grid::{TileCoord, TileGrid};
use crate::image_groups::{ImageGroup, ImageGroups};
use crate::terrain::{exists_clear_tile_in_radius, TerrainFlags};
use crate::view::ViewOrientation;

/// Points within this distance of the west or north edge count as that edge.
const EDGE_DISTANCE: i32 = 5;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryExitPoints {
    pub entry: TileCoord,
    pub exit: TileCoord,
    pub entry_flag: Option<TileCoord>,
    pub exit_flag: Option<TileCoord>,
}

fn entry_facing(point: TileCoord) -> ViewOrientation {
    if point.x <= EDGE_DISTANCE {
        ViewOrientation::BottomRight
    } else if point.y <= EDGE_DISTANCE {
        ViewOrientation::BottomLeft
    } else if point.x > point.y {
        ViewOrientation::TopLeft
    } else {
        ViewOrientation::TopRight
    }
}

fn exit_facing(point: TileCoord) -> ViewOrientation {
    if point.x <= EDGE_DISTANCE {
        ViewOrientation::TopLeft
    } else if point.y <= EDGE_DISTANCE {
        ViewOrientation::TopRight
    } else if point.x > point.y {
        ViewOrientation::BottomRight
    } else {
        ViewOrientation::BottomLeft
    }
}

/// Sprite offset inside one flag's four-sprite block.
fn flag_sprite(facing: ViewOrientation, view: ViewOrientation) -> i32 {
    ((8 - view.value() + facing.value()) % 8) / 2
}

fn place_flag(
    grid: &mut TileGrid,
    point: TileCoord,
    image_id: impl Fn(i32) -> u32,
    facing: ViewOrientation,
    view: ViewOrientation,
) -> Option<TileCoord> {
    let except = grid.offset_of(point);
    let tile = (1..FLAG_SEARCH_RADIUS).find_map(|radius| exists_clear_tile_in_radius(grid, point, 1, radius, except))?;
    let offset = grid.offset_of(tile)?;
    grid.add_terrain(offset, TerrainFlags::ROCK);
    grid.set_image(offset, image_id(flag_sprite(facing, view)));
    Some(tile)
}

/// Places both flags. A point with no clear cell within reach gets no flag.
pub fn add_entry_exit_flags(
    grid: &mut TileGrid,
    images: &ImageGroups,
    view: ViewOrientation,
    points: &mut EntryExitPoints,
) {
    points.entry_flag = place_flag(
        grid,
        points.entry,
        |sprite| images.id(ImageGroup::EntryExitFlags, sprite),
        entry_facing(points.entry),
        view,
    );
    points.exit_flag = place_flag(
        grid,
        points.exit,
        |sprite| images.id(ImageGroup::EntryExitFlags, 4 + sprite),
        exit_facing(points.exit),
        view,
    );
}

/// Strips the rock marker from both flag cells. The flag positions are kept
/// so a view rotation can re-place them.
pub fn remove_entry_exit_flags(grid: &mut TileGrid, points: &EntryExitPoints) {
    for tile in [points.entry_flag, points.exit_flag].into_iter().flatten() {
        if let Some(offset) = grid.offset_of(tile) {
            grid.remove_terrain(offset, TerrainFlags::ROCK);
        }
    }
}

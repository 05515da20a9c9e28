//! Building records the terrain core needs: kind, footprint, lifecycle
//! state and the links between multi-part buildings.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_FARM_PROGRESS, MAX_NEXT_PART_HOPS, MAX_PREV_PART_HOPS};
use crate::grid::{GridArea, PropertyFlags, TileCoord, TileGrid};
use crate::terrain::TerrainFlags;
use crate::view::ViewOrientation;

/// Index into [`BuildingStore`]. Id 0 is the null building.
pub type BuildingId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    House,
    Farm,
    Granary,
    Warehouse,
    Temple,
    Monument,
    Fort,
    FortGround,
    BurningRuin,
    UnusedNativeHut,
    UnusedNativeMeeting,
    UnusedNativeCrops,
}

impl BuildingType {
    pub fn is_fort(self) -> bool {
        matches!(self, BuildingType::Fort | BuildingType::FortGround)
    }

    /// Ruins and leftover native structures cannot be demolished by the player.
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            BuildingType::BurningRuin
                | BuildingType::UnusedNativeHut
                | BuildingType::UnusedNativeMeeting
                | BuildingType::UnusedNativeCrops
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildingState {
    #[default]
    Unused,
    InUse,
    DeletedByPlayer,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HouseData {
    pub population: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FarmData {
    pub on_floodplain: bool,
    /// Growth toward the next harvest, 0..=MAX_FARM_PROGRESS.
    pub progress: u32,
}

/// Kind-specific payload. Code that needs house or farm fields goes through
/// the `as_*` views instead of trusting the kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildingData {
    #[default]
    None,
    House(HouseData),
    Farm(FarmData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub kind: BuildingType,
    pub state: BuildingState,
    pub is_deleted: bool,
    pub tile: TileCoord,
    pub size: i32,
    pub prev_part: BuildingId,
    pub next_part: BuildingId,
    pub data: BuildingData,
}

impl Building {
    pub fn as_house(&self) -> Option<&HouseData> {
        match &self.data {
            BuildingData::House(house) => Some(house),
            _ => None,
        }
    }

    pub fn as_house_mut(&mut self) -> Option<&mut HouseData> {
        match &mut self.data {
            BuildingData::House(house) => Some(house),
            _ => None,
        }
    }

    pub fn as_farm(&self) -> Option<&FarmData> {
        match &self.data {
            BuildingData::Farm(farm) => Some(farm),
            _ => None,
        }
    }

    pub fn is_floodplain_farm(&self) -> bool {
        self.as_farm().is_some_and(|farm| farm.on_floodplain)
    }

    pub fn footprint(&self) -> GridArea {
        GridArea::around(self.tile, self.size, 0)
    }

    /// Leaves a fertility malus on a farm's footprint, up to -100 for a
    /// crop that was ready to harvest. No-op for other kinds.
    pub fn deplete_soil(&self, grid: &mut TileGrid) {
        let Some(farm) = self.as_farm() else {
            return;
        };
        let used = farm.progress.min(MAX_FARM_PROGRESS) * 100 / MAX_FARM_PROGRESS;
        let malus = -(used as i32) as i8;
        for tile in self.footprint().tiles() {
            if let Some(offset) = grid.offset_of(tile) {
                grid.set_soil_malus(offset, malus);
            }
        }
    }
}

fn default_data(kind: BuildingType) -> BuildingData {
    match kind {
        BuildingType::House => BuildingData::House(HouseData::default()),
        BuildingType::Farm => BuildingData::Farm(FarmData::default()),
        _ => BuildingData::None,
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BuildingStore {
    buildings: Vec<Building>,
}

impl Default for BuildingStore {
    fn default() -> Self {
        Self {
            buildings: vec![Building {
                id: 0,
                kind: BuildingType::House,
                state: BuildingState::Unused,
                is_deleted: false,
                tile: TileCoord::default(),
                size: 0,
                prev_part: 0,
                next_part: 0,
                data: BuildingData::None,
            }],
        }
    }
}

impl BuildingStore {
    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        if id == 0 {
            return None;
        }
        self.buildings.get(id as usize)
    }

    pub fn get_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        if id == 0 {
            return None;
        }
        self.buildings.get_mut(id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter().skip(1)
    }

    /// Adds a building record without touching the grid.
    pub fn create(&mut self, kind: BuildingType, tile: TileCoord, size: i32) -> BuildingId {
        let id = self.buildings.len() as BuildingId;
        self.buildings.push(Building {
            id,
            kind,
            state: BuildingState::InUse,
            is_deleted: false,
            tile,
            size,
            prev_part: 0,
            next_part: 0,
            data: default_data(kind),
        });
        id
    }

    /// Creates a building and stamps its footprint onto the grid.
    pub fn place(
        &mut self,
        grid: &mut TileGrid,
        kind: BuildingType,
        tile: TileCoord,
        size: i32,
        orientation: ViewOrientation,
    ) -> BuildingId {
        let id = self.create(kind, tile, size);
        grid.building_tiles_add(id, tile, size, 0, TerrainFlags::BUILDING, orientation);
        id
    }

    /// Chains `next` after `first` in a multi-part building.
    pub fn link_parts(&mut self, first: BuildingId, next: BuildingId) {
        if let Some(b) = self.get_mut(first) {
            b.next_part = next;
        }
        if let Some(b) = self.get_mut(next) {
            b.prev_part = first;
        }
    }

    /// The root part: follows `prev_part` links, at most 99 hops.
    pub fn main(&self, id: BuildingId) -> BuildingId {
        let mut current = id;
        for _ in 0..MAX_PREV_PART_HOPS {
            match self.get(current) {
                Some(b) if b.prev_part != 0 => current = b.prev_part,
                _ => break,
            }
        }
        current
    }

    /// Parts after `id`, nearest first, at most 9 hops.
    pub fn next_parts(&self, id: BuildingId) -> Vec<BuildingId> {
        let mut parts = Vec::new();
        let mut current = id;
        for _ in 0..MAX_NEXT_PART_HOPS {
            match self.get(current) {
                Some(b) if b.next_part != 0 => {
                    current = b.next_part;
                    parts.push(current);
                }
                _ => break,
            }
        }
        parts
    }

    /// Replaces a record wholesale; used when undo restores a snapshot.
    pub fn restore(&mut self, snapshot: Building) {
        if let Some(slot) = self.get_mut(snapshot.id) {
            *slot = snapshot;
        }
    }
}

/// Takes buildings the player deleted off the map.
///
/// Each footprint cell still owned by the building loses its building flag,
/// id and image and becomes a plain 1×1 tile. Returns the vacated footprints
/// so the caller can re-resolve them as empty land.
pub fn update_building_state(grid: &mut TileGrid, store: &mut BuildingStore) -> Vec<GridArea> {
    let mut vacated = Vec::new();
    for building in store.buildings.iter_mut().skip(1) {
        if building.state != BuildingState::DeletedByPlayer {
            continue;
        }
        let area = building.footprint();
        for tile in area.tiles() {
            let Some(offset) = grid.offset_of(tile) else {
                continue;
            };
            if grid.building_at(offset) != building.id {
                continue;
            }
            grid.remove_terrain(offset, TerrainFlags::BUILDING);
            grid.set_building(offset, 0);
            grid.clear_property(offset, PropertyFlags::CONSTRUCTING);
            grid.set_single_tile_image(offset, 0);
        }
        building.state = BuildingState::Deleted;
        vacated.push(area);
    }
    vacated
}

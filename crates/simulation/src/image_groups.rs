//! Base image ids of the terrain sprite groups.
//!
//! Sprite assets live outside the simulation; the tile passes only need the
//! first id of every group and add their variant offsets to it.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageGroup {
    EmptyLand,
    EmptyLandAlt,
    GrassPh,
    GrassPhEdges,
    Rock,
    ElevationRock,
    OreRock,
    Shrub,
    Tree,
    MeadowStaticInner,
    MeadowStaticOuter,
    MeadowStaticTallgrass,
    MeadowWithGrass,
    Reeds,
    ReedsGrown,
    Water,
    DeepWater,
    Floodplain,
    FloodplainEdge,
    Rubble,
    Elevation,
    AccessRamp,
    Road,
    FloodplainRoad,
    Plaza,
    Garden,
    Canal,
    Wall,
    EntryExitFlags,
}

impl ImageGroup {
    pub const COUNT: usize = 29;

    pub const ALL: [ImageGroup; Self::COUNT] = [
        ImageGroup::EmptyLand,
        ImageGroup::EmptyLandAlt,
        ImageGroup::GrassPh,
        ImageGroup::GrassPhEdges,
        ImageGroup::Rock,
        ImageGroup::ElevationRock,
        ImageGroup::OreRock,
        ImageGroup::Shrub,
        ImageGroup::Tree,
        ImageGroup::MeadowStaticInner,
        ImageGroup::MeadowStaticOuter,
        ImageGroup::MeadowStaticTallgrass,
        ImageGroup::MeadowWithGrass,
        ImageGroup::Reeds,
        ImageGroup::ReedsGrown,
        ImageGroup::Water,
        ImageGroup::DeepWater,
        ImageGroup::Floodplain,
        ImageGroup::FloodplainEdge,
        ImageGroup::Rubble,
        ImageGroup::Elevation,
        ImageGroup::AccessRamp,
        ImageGroup::Road,
        ImageGroup::FloodplainRoad,
        ImageGroup::Plaza,
        ImageGroup::Garden,
        ImageGroup::Canal,
        ImageGroup::Wall,
        ImageGroup::EntryExitFlags,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Room reserved for each group in the default table.
const DEFAULT_GROUP_STRIDE: u32 = 200;
const DEFAULT_FIRST_ID: u32 = 100;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ImageGroups {
    bases: [u32; ImageGroup::COUNT],
}

impl Default for ImageGroups {
    fn default() -> Self {
        let mut bases = [0; ImageGroup::COUNT];
        for group in ImageGroup::ALL {
            bases[group.index()] = DEFAULT_FIRST_ID + group.index() as u32 * DEFAULT_GROUP_STRIDE;
        }
        Self { bases }
    }
}

impl ImageGroups {
    #[inline]
    pub fn base(&self, group: ImageGroup) -> u32 {
        self.bases[group.index()]
    }

    /// `base(group) + offset`.
    #[inline]
    pub fn id(&self, group: ImageGroup, offset: i32) -> u32 {
        (self.base(group) as i32 + offset).max(0) as u32
    }

    pub fn set_base(&mut self, group: ImageGroup, base: u32) {
        self.bases[group.index()] = base;
    }

    /// Default table with the groups named in a JSON object replaced, e.g.
    /// `{"rock": 5000, "water": 7000}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: BTreeMap<ImageGroup, u32> = serde_json::from_str(json)?;
        let mut groups = Self::default();
        for (group, base) in overrides {
            groups.set_base(group, base);
        }
        Ok(groups)
    }

    /// The group an image id falls into, if any. Ids below the first base map
    /// to `None`.
    pub fn group_of(&self, image_id: u32) -> Option<(ImageGroup, u32)> {
        ImageGroup::ALL
            .iter()
            .filter(|g| self.base(**g) <= image_id)
            .max_by_key(|g| self.base(**g))
            .map(|g| (*g, image_id - self.base(*g)))
    }
}

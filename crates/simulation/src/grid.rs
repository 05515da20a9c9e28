use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingId;
use crate::config::GRID_LENGTH;
use crate::terrain::TerrainFlags;
use crate::view::ViewOrientation;

/// A cell position on the map. Signed so that neighbor arithmetic near the
/// edges can step outside the grid and be rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridArea {
    pub min: TileCoord,
    pub max: TileCoord,
}

impl GridArea {
    /// Normalizes two arbitrary corners into min/max order.
    pub fn from_corners(a: TileCoord, b: TileCoord) -> Self {
        Self {
            min: TileCoord::new(a.x.min(b.x), a.y.min(b.y)),
            max: TileCoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Area of an N×N footprint anchored at `tile`, grown by `radius` on all sides.
    pub fn around(tile: TileCoord, size: i32, radius: i32) -> Self {
        Self {
            min: tile.shifted(-radius, -radius),
            max: tile.shifted(size - 1 + radius, size - 1 + radius),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn expanded(&self, by: i32) -> Self {
        Self {
            min: self.min.shifted(-by, -by),
            max: self.max.shifted(by, by),
        }
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.x >= self.min.x && tile.x <= self.max.x && tile.y >= self.min.y && tile.y <= self.max.y
    }

    /// Row-major walk: y outer, x inner.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| TileCoord::new(x, y)))
    }
}

bitflags! {
    /// Per-cell property bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PropertyFlags: u8 {
        /// This cell is where the multi-tile sprite is drawn from.
        const DRAW_TILE = 1 << 0;
        const CONSTRUCTING = 1 << 1;
        const PLAZA_OR_EARTHQUAKE = 1 << 2;
        const DELETED = 1 << 3;
        const ALTERNATE_TERRAIN = 1 << 4;
    }
}

/// Multi-tile footprint data of a cell: the footprint size and this cell's
/// position inside it. The origin of a footprint sits at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiTile {
    pub size: u8,
    pub dx: u8,
    pub dy: u8,
}

impl Default for MultiTile {
    fn default() -> Self {
        Self {
            size: 1,
            dx: 0,
            dy: 0,
        }
    }
}

impl MultiTile {
    pub fn is_origin(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// The map arena: parallel per-cell layers sharing one row-major addressing.
///
/// Every accessor fails closed: reads outside the grid return the empty value
/// of the layer and writes outside the grid are ignored.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct TileGrid {
    pub length: usize,
    pub terrain: Vec<TerrainFlags>,
    pub elevation: Vec<u8>,
    pub building: Vec<BuildingId>,
    pub image: Vec<u32>,
    pub multi_tile: Vec<MultiTile>,
    pub property: Vec<PropertyFlags>,
    /// Canal state value (0 = no canal image state).
    pub canal: Vec<u8>,
    /// Bridge sprite marker on water cells (0 = no bridge).
    pub bridge: Vec<u8>,
    pub grass: Vec<u8>,
    pub fertility: Vec<u8>,
    /// Negative fertility adjustment left behind by depleted farms.
    pub soil_malus: Vec<i8>,
    pub vegetation: Vec<u8>,
    pub figures: Vec<u16>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(GRID_LENGTH)
    }
}

impl TileGrid {
    pub fn new(length: usize) -> Self {
        let cells = length * length;
        Self {
            length,
            terrain: vec![TerrainFlags::empty(); cells],
            elevation: vec![0; cells],
            building: vec![0; cells],
            image: vec![0; cells],
            multi_tile: vec![MultiTile::default(); cells],
            property: vec![PropertyFlags::DRAW_TILE; cells],
            canal: vec![0; cells],
            bridge: vec![0; cells],
            grass: vec![0; cells],
            fertility: vec![0; cells],
            soil_malus: vec![0; cells],
            vegetation: vec![0; cells],
            figures: vec![0; cells],
        }
    }

    pub fn cell_count(&self) -> usize {
        self.length * self.length
    }

    // -----------------------------------------------------------------------
    // Addressing
    // -----------------------------------------------------------------------

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.length && (y as usize) < self.length
    }

    #[inline]
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.length + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn offset_of(&self, tile: TileCoord) -> Option<usize> {
        self.offset(tile.x, tile.y)
    }

    #[inline]
    pub fn coord(&self, offset: usize) -> TileCoord {
        TileCoord::new((offset % self.length) as i32, (offset / self.length) as i32)
    }

    /// Whether an N×N footprint anchored at `tile` lies entirely on the grid.
    pub fn is_inside(&self, tile: TileCoord, size: i32) -> bool {
        self.in_bounds(tile.x, tile.y) && self.in_bounds(tile.x + size - 1, tile.y + size - 1)
    }

    /// Clips an area to the grid. Returns `None` if nothing remains.
    pub fn bound_area(&self, area: GridArea) -> Option<GridArea> {
        let last = self.length as i32 - 1;
        let clipped = GridArea {
            min: TileCoord::new(area.min.x.max(0), area.min.y.max(0)),
            max: TileCoord::new(area.max.x.min(last), area.max.y.min(last)),
        };
        if clipped.min.x > clipped.max.x || clipped.min.y > clipped.max.y {
            None
        } else {
            Some(clipped)
        }
    }

    // -----------------------------------------------------------------------
    // Terrain
    // -----------------------------------------------------------------------

    #[inline]
    pub fn terrain_at(&self, offset: usize) -> TerrainFlags {
        self.terrain
            .get(offset)
            .copied()
            .unwrap_or(TerrainFlags::empty())
    }

    /// True if the cell has any of the flags in `mask`.
    #[inline]
    pub fn terrain_is(&self, offset: usize, mask: TerrainFlags) -> bool {
        self.terrain_at(offset).intersects(mask)
    }

    pub fn set_terrain(&mut self, offset: usize, flags: TerrainFlags) {
        if let Some(t) = self.terrain.get_mut(offset) {
            *t = flags;
        }
    }

    pub fn add_terrain(&mut self, offset: usize, flags: TerrainFlags) {
        if let Some(t) = self.terrain.get_mut(offset) {
            t.insert(flags);
        }
    }

    pub fn remove_terrain(&mut self, offset: usize, flags: TerrainFlags) {
        if let Some(t) = self.terrain.get_mut(offset) {
            t.remove(flags);
        }
    }

    // -----------------------------------------------------------------------
    // Scalar layers
    // -----------------------------------------------------------------------

    #[inline]
    pub fn elevation_at(&self, offset: usize) -> u8 {
        self.elevation.get(offset).copied().unwrap_or(0)
    }

    pub fn set_elevation(&mut self, offset: usize, height: u8) {
        if let Some(e) = self.elevation.get_mut(offset) {
            *e = height;
        }
    }

    #[inline]
    pub fn building_at(&self, offset: usize) -> BuildingId {
        self.building.get(offset).copied().unwrap_or(0)
    }

    pub fn set_building(&mut self, offset: usize, id: BuildingId) {
        if let Some(b) = self.building.get_mut(offset) {
            *b = id;
        }
    }

    #[inline]
    pub fn image_at(&self, offset: usize) -> u32 {
        self.image.get(offset).copied().unwrap_or(0)
    }

    pub fn set_image(&mut self, offset: usize, image_id: u32) {
        if let Some(i) = self.image.get_mut(offset) {
            *i = image_id;
        }
    }

    #[inline]
    pub fn canal_at(&self, offset: usize) -> u8 {
        self.canal.get(offset).copied().unwrap_or(0)
    }

    pub fn set_canal(&mut self, offset: usize, value: u8) {
        if let Some(c) = self.canal.get_mut(offset) {
            *c = value;
        }
    }

    #[inline]
    pub fn bridge_at(&self, offset: usize) -> u8 {
        self.bridge.get(offset).copied().unwrap_or(0)
    }

    pub fn set_bridge(&mut self, offset: usize, sprite: u8) {
        if let Some(b) = self.bridge.get_mut(offset) {
            *b = sprite;
        }
    }

    #[inline]
    pub fn grass_at(&self, offset: usize) -> u8 {
        self.grass.get(offset).copied().unwrap_or(0)
    }

    pub fn set_grass(&mut self, offset: usize, level: u8) {
        if let Some(g) = self.grass.get_mut(offset) {
            *g = level;
        }
    }

    pub fn set_fertility(&mut self, offset: usize, value: u8) {
        if let Some(f) = self.fertility.get_mut(offset) {
            *f = value;
        }
    }

    pub fn set_soil_malus(&mut self, offset: usize, malus: i8) {
        if let Some(m) = self.soil_malus.get_mut(offset) {
            *m = malus;
        }
    }

    /// Fertility after subtracting soil depletion, clamped to 0..=100.
    pub fn fertility_with_malus(&self, offset: usize) -> i32 {
        let base = self.fertility.get(offset).copied().unwrap_or(0) as i32;
        let malus = self.soil_malus.get(offset).copied().unwrap_or(0) as i32;
        (base + malus).clamp(0, 100)
    }

    #[inline]
    pub fn vegetation_at(&self, offset: usize) -> u8 {
        self.vegetation.get(offset).copied().unwrap_or(0)
    }

    pub fn set_vegetation(&mut self, offset: usize, growth: u8) {
        if let Some(v) = self.vegetation.get_mut(offset) {
            *v = growth;
        }
    }

    #[inline]
    pub fn figures_at(&self, offset: usize) -> u16 {
        self.figures.get(offset).copied().unwrap_or(0)
    }

    #[inline]
    pub fn has_figure_at(&self, offset: usize) -> bool {
        self.figures_at(offset) > 0
    }

    pub fn add_figures(&mut self, offset: usize, count: u16) {
        if let Some(f) = self.figures.get_mut(offset) {
            *f = f.saturating_add(count);
        }
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[inline]
    pub fn property_is(&self, offset: usize, flag: PropertyFlags) -> bool {
        self.property
            .get(offset)
            .is_some_and(|p| p.intersects(flag))
    }

    pub fn set_property(&mut self, offset: usize, flag: PropertyFlags) {
        if let Some(p) = self.property.get_mut(offset) {
            p.insert(flag);
        }
    }

    pub fn clear_property(&mut self, offset: usize, flag: PropertyFlags) {
        if let Some(p) = self.property.get_mut(offset) {
            p.remove(flag);
        }
    }

    #[inline]
    pub fn multi_tile_at(&self, offset: usize) -> MultiTile {
        self.multi_tile.get(offset).copied().unwrap_or_default()
    }

    pub fn set_multi_tile_size(&mut self, offset: usize, size: u8) {
        if let Some(m) = self.multi_tile.get_mut(offset) {
            m.size = size;
        }
    }

    pub fn set_multi_tile_xy(&mut self, offset: usize, dx: u8, dy: u8, draw_tile: bool) {
        if let Some(m) = self.multi_tile.get_mut(offset) {
            m.dx = dx;
            m.dy = dy;
        }
        if draw_tile {
            self.set_property(offset, PropertyFlags::DRAW_TILE);
        } else {
            self.clear_property(offset, PropertyFlags::DRAW_TILE);
        }
    }

    /// Marks the cell as a standalone 1×1 draw tile.
    pub fn mark_draw_tile(&mut self, offset: usize) {
        self.set_multi_tile_xy(offset, 0, 0, true);
    }

    /// Resets the cell to a standalone 1×1 tile with the given image.
    pub fn set_single_tile_image(&mut self, offset: usize, image_id: u32) {
        self.set_image(offset, image_id);
        self.set_multi_tile_size(offset, 1);
        self.mark_draw_tile(offset);
    }

    /// Stamps an N×N footprint: every cell gets the building id, the terrain
    /// flag, the footprint size and its position in the footprint, and the
    /// shared image id. Only the cell drawn first for the current view
    /// orientation carries the draw-tile marker.
    pub fn building_tiles_add(
        &mut self,
        building_id: BuildingId,
        tile: TileCoord,
        size: i32,
        image_id: u32,
        terrain: TerrainFlags,
        orientation: ViewOrientation,
    ) {
        if !self.is_inside(tile, size) {
            return;
        }
        let (draw_x, draw_y) = orientation.draw_corner(size);
        for dy in 0..size {
            for dx in 0..size {
                let Some(offset) = self.offset(tile.x + dx, tile.y + dy) else {
                    continue;
                };
                self.remove_terrain(offset, TerrainFlags::CLEARABLE);
                self.add_terrain(offset, terrain);
                self.set_building(offset, building_id);
                self.clear_property(offset, PropertyFlags::CONSTRUCTING);
                self.set_multi_tile_size(offset, size as u8);
                self.set_image(offset, image_id);
                self.set_multi_tile_xy(offset, dx as u8, dy as u8, dx == draw_x && dy == draw_y);
            }
        }
    }
}

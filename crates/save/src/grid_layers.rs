//! Per-cell grid layers as stored in a map file.
//!
//! Every layer holds one value per cell in row-major order. The random layer
//! is the raw byte sequence of `RandomGrid`, untouched.

use bitcode::{Decode, Encode};
use simulation::grid::{MultiTile, PropertyFlags, TileGrid};
use simulation::map_random::RandomGrid;
use simulation::terrain::TerrainFlags;

use crate::save_error::SaveError;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct GridLayers {
    pub length: u32,
    pub terrain: Vec<u32>,
    pub elevation: Vec<u8>,
    pub image: Vec<u32>,
    /// (size, dx, dy) per cell.
    pub multi_tile: Vec<(u8, u8, u8)>,
    pub property: Vec<u8>,
    pub grass: Vec<u8>,
    pub fertility: Vec<u8>,
    pub random: Vec<u8>,
}

impl GridLayers {
    pub fn capture(grid: &TileGrid, random: &RandomGrid) -> Self {
        Self {
            length: grid.length as u32,
            terrain: grid.terrain.iter().map(|t| t.bits()).collect(),
            elevation: grid.elevation.clone(),
            image: grid.image.clone(),
            multi_tile: grid
                .multi_tile
                .iter()
                .map(|m| (m.size, m.dx, m.dy))
                .collect(),
            property: grid.property.iter().map(|p| p.bits()).collect(),
            grass: grid.grass.clone(),
            fertility: grid.fertility.clone(),
            random: random.values.clone(),
        }
    }

    pub fn cell_count(&self) -> usize {
        let length = self.length as usize;
        length * length
    }

    /// Checks every layer against the cell count before anything is written.
    pub fn validate(&self) -> Result<(), SaveError> {
        let expected = self.cell_count();
        let sizes = [
            ("terrain", self.terrain.len()),
            ("elevation", self.elevation.len()),
            ("image", self.image.len()),
            ("multi_tile", self.multi_tile.len()),
            ("property", self.property.len()),
            ("grass", self.grass.len()),
            ("fertility", self.fertility.len()),
            ("random", self.random.len()),
        ];
        for (layer, found) in sizes {
            if found != expected {
                return Err(SaveError::LayerSizeMismatch {
                    layer,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Replaces the grid and random layer with the stored ones. Layers not
    /// stored here (building ids, canal and bridge state, figures) start
    /// empty. Nothing is touched when validation fails.
    pub fn apply(self, grid: &mut TileGrid, random: &mut RandomGrid) -> Result<(), SaveError> {
        self.validate()?;
        let length = self.length as usize;

        let mut restored = TileGrid::new(length);
        restored.terrain = self
            .terrain
            .into_iter()
            .map(TerrainFlags::from_bits_retain)
            .collect();
        restored.elevation = self.elevation;
        restored.image = self.image;
        restored.multi_tile = self
            .multi_tile
            .into_iter()
            .map(|(size, dx, dy)| MultiTile { size, dx, dy })
            .collect();
        restored.property = self
            .property
            .into_iter()
            .map(PropertyFlags::from_bits_retain)
            .collect();
        restored.grass = self.grass;
        restored.fertility = self.fertility;

        *random = RandomGrid::from_raw(length, &self.random).ok_or(SaveError::LayerSizeMismatch {
            layer: "random",
            expected: length * length,
            found: self.random.len(),
        })?;
        *grid = restored;
        Ok(())
    }
}

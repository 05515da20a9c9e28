//! Persistent per-cell random bytes.
//!
//! Filled once when a map is created and saved with the city. Tile passes
//! use the byte as a stable seed for picking sprite variants, so the same
//! terrain always renders the same way, including after a reload.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GRID_LENGTH;
use crate::sim_rng::SimRng;

#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct RandomGrid {
    pub values: Vec<u8>,
    pub length: usize,
}

impl Default for RandomGrid {
    fn default() -> Self {
        Self::new(GRID_LENGTH)
    }
}

impl RandomGrid {
    pub fn new(length: usize) -> Self {
        Self {
            values: vec![0; length * length],
            length,
        }
    }

    /// Draws one value per cell, y outer and x inner, truncated to 8 bits.
    pub fn init(&mut self, rng: &mut SimRng) {
        let mut offset = 0;
        for _y in 0..self.length {
            for _x in 0..self.length {
                self.values[offset] = rng.0.gen::<u16>() as u8;
                offset += 1;
            }
        }
        info!("Random layer initialised for a {}x{} map", self.length, self.length);
    }

    /// Stored byte of a cell; 0 outside the grid.
    #[inline]
    pub fn get(&self, offset: usize) -> u8 {
        self.values.get(offset).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.values.fill(0);
    }

    /// Restores a layer from raw bytes. Returns `None` when the byte count
    /// does not describe a square grid of `length`.
    pub fn from_raw(length: usize, bytes: &[u8]) -> Option<Self> {
        (bytes.len() == length * length).then(|| Self {
            values: bytes.to_vec(),
            length,
        })
    }

    /// Restores a layer whose side length is implied by the byte count.
    /// Returns `None` for an empty or non-square layer.
    pub fn from_square(bytes: &[u8]) -> Option<Self> {
        let length = (bytes.len() as f64).sqrt().round() as usize;
        if length == 0 {
            return None;
        }
        Self::from_raw(length, bytes)
    }
}

impl crate::Saveable for RandomGrid {
    const SAVE_KEY: &'static str = "map_random";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(self.values.clone())
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        match Self::from_square(bytes) {
            Some(grid) => grid,
            None => {
                warn!(
                    "Saveable {}: {} bytes is not a square layer, falling back to an empty layer",
                    Self::SAVE_KEY,
                    bytes.len()
                );
                Self::default()
            }
        }
    }
}

use bevy::prelude::*;

use crate::grid::{TileCoord, TileGrid};

/// A group of evicted residents looking for a new home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomelessGroup {
    pub tile: TileCoord,
    pub population: u32,
}

/// Walkers spawned by the terrain core. Only homeless groups come from here;
/// other walkers are owned elsewhere and show up as counts on the grid.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FigureStore {
    pub homeless: Vec<HomelessGroup>,
}

impl FigureStore {
    /// Spawns one homeless figure carrying `population` residents at `tile`.
    pub fn spawn_homeless(&mut self, grid: &mut TileGrid, tile: TileCoord, population: u32) {
        if let Some(offset) = grid.offset_of(tile) {
            grid.add_figures(offset, 1);
        }
        self.homeless.push(HomelessGroup { tile, population });
    }

    pub fn homeless_population(&self) -> u32 {
        self.homeless.iter().map(|g| g.population).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_homeless_marks_grid() {
        let mut grid = TileGrid::new(8);
        let mut figures = FigureStore::default();
        figures.spawn_homeless(&mut grid, TileCoord::new(2, 3), 12);
        figures.spawn_homeless(&mut grid, TileCoord::new(2, 3), 4);
        assert_eq!(grid.figures_at(grid.offset(2, 3).unwrap()), 2);
        assert_eq!(figures.homeless_population(), 16);
    }
}

//! Neighbor-shape lookups for transition sprites (shores, river banks,
//! cliffs, floodplain edges, reed borders).
//!
//! Each lookup classifies the 8-neighborhood of a cell and returns which
//! sprite block of the group to use (`group_offset`) plus a variant inside
//! the block (`item_offset`). The tile passes treat these as opaque.

use bevy::prelude::*;

use crate::grid::TileGrid;
use crate::map_random::RandomGrid;
use crate::terrain::TerrainFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerrainImage {
    pub is_valid: bool,
    pub group_offset: i32,
    pub item_offset: i32,
}

/// Shape lookups consumed by the tile passes.
pub trait ImageContext: Send + Sync + 'static {
    fn shore(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage;
    fn river(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage;
    fn elevation(&self, grid: &TileGrid, random: &RandomGrid, offset: usize, height: u8) -> TerrainImage;
    fn floodplain_edge(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage;
    fn reeds_transition(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage;
}

/// The lookup implementation in use.
#[derive(Resource)]
pub struct ImageContexts(pub Box<dyn ImageContext>);

impl Default for ImageContexts {
    fn default() -> Self {
        Self(Box::new(NeighborShapes))
    }
}

/// Elevation shape meaning "this cell cannot be a cliff".
pub const ELEVATION_INVALID_GROUP: i32 = 44;
/// Water shape of a lone water cell.
pub const WATER_ISOLATED_GROUP: i32 = 40;

// N, E, S, W
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
// NE, SE, SW, NW
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Interior,
    Edge(usize),
    OuterCorner(usize),
    InnerCorner(usize),
    Isolated,
}

impl Shape {
    fn classify(same: impl Fn(i32, i32) -> bool) -> Self {
        let open = ORTHOGONAL.map(|(dx, dy)| !same(dx, dy));
        match open.iter().filter(|o| **o).count() {
            0 => DIAGONAL
                .iter()
                .position(|&(dx, dy)| !same(dx, dy))
                .map_or(Shape::Interior, Shape::InnerCorner),
            1 => open
                .iter()
                .position(|o| *o)
                .map_or(Shape::Isolated, Shape::Edge),
            2 => (0..4)
                .find(|&d| open[d] && open[(d + 1) % 4])
                .map_or(Shape::Isolated, Shape::OuterCorner),
            _ => Shape::Isolated,
        }
    }

    fn group_offset(self, isolated: i32) -> i32 {
        match self {
            Shape::Interior => 0,
            Shape::Edge(d) => 4 + 4 * d as i32,
            Shape::OuterCorner(d) => 20 + 4 * d as i32,
            Shape::InnerCorner(d) => 48 + 4 * d as i32,
            Shape::Isolated => isolated,
        }
    }
}

/// Default lookups derived from the flag layer alone. Off-map neighbors
/// count as continuing the shape, so map borders never draw a bank.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborShapes;

impl NeighborShapes {
    fn shape_of(grid: &TileGrid, offset: usize, same: impl Fn(usize) -> bool) -> Shape {
        let at = grid.coord(offset);
        Shape::classify(|dx, dy| {
            let n = at.shifted(dx, dy);
            grid.offset_of(n).map_or(true, &same)
        })
    }

    fn variant(random: &RandomGrid, offset: usize) -> i32 {
        (random.get(offset) & 3) as i32
    }
}

impl ImageContext for NeighborShapes {
    fn shore(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage {
        let shape = Self::shape_of(grid, offset, |n| grid.terrain_is(n, TerrainFlags::WATER));
        TerrainImage {
            is_valid: true,
            group_offset: shape.group_offset(WATER_ISOLATED_GROUP),
            item_offset: Self::variant(random, offset),
        }
    }

    fn river(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage {
        let shape = Self::shape_of(grid, offset, |n| grid.terrain_is(n, TerrainFlags::DEEPWATER));
        TerrainImage {
            is_valid: true,
            group_offset: shape.group_offset(WATER_ISOLATED_GROUP),
            item_offset: Self::variant(random, offset),
        }
    }

    fn elevation(&self, grid: &TileGrid, random: &RandomGrid, offset: usize, height: u8) -> TerrainImage {
        let shape = Self::shape_of(grid, offset, |n| grid.elevation_at(n) >= height);
        TerrainImage {
            is_valid: shape != Shape::Isolated,
            group_offset: shape.group_offset(ELEVATION_INVALID_GROUP),
            item_offset: Self::variant(random, offset),
        }
    }

    fn floodplain_edge(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage {
        let at = grid.coord(offset);
        let is_floodplain = |(dx, dy): &(i32, i32)| {
            grid.offset_of(at.shifted(*dx, *dy))
                .is_some_and(|n| grid.terrain_is(n, TerrainFlags::FLOODPLAIN))
        };
        let group_offset = if let Some(d) = ORTHOGONAL.iter().position(is_floodplain) {
            4 * d as i32
        } else if let Some(d) = DIAGONAL.iter().position(is_floodplain) {
            16 + 4 * d as i32
        } else {
            return TerrainImage::default();
        };
        TerrainImage {
            is_valid: true,
            group_offset,
            item_offset: Self::variant(random, offset),
        }
    }

    fn reeds_transition(&self, grid: &TileGrid, random: &RandomGrid, offset: usize) -> TerrainImage {
        let shape = Self::shape_of(grid, offset, |n| grid.terrain_is(n, TerrainFlags::MARSHLAND));
        TerrainImage {
            // A reed cell fully surrounded by reeds is a plain reed tile.
            is_valid: shape != Shape::Interior,
            group_offset: shape.group_offset(WATER_ISOLATED_GROUP),
            item_offset: Self::variant(random, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flood(grid: &mut TileGrid, x0: i32, y0: i32, x1: i32, y1: i32, flags: TerrainFlags) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                let offset = grid.offset(x, y).unwrap();
                grid.add_terrain(offset, flags);
            }
        }
    }

    #[test]
    fn test_shape_classification() {
        assert_eq!(Shape::classify(|_, _| true), Shape::Interior);
        assert_eq!(Shape::classify(|dx, dy| (dx, dy) != (0, -1)), Shape::Edge(0));
        assert_eq!(Shape::classify(|dx, dy| (dx, dy) != (-1, 0)), Shape::Edge(3));
        assert_eq!(Shape::classify(|dx, dy| dy != -1 && dx != 1), Shape::OuterCorner(0));
        assert_eq!(Shape::classify(|dx, dy| (dx, dy) != (-1, 1)), Shape::InnerCorner(2));
        // Opposite sides open: a one-cell-wide strip.
        assert_eq!(Shape::classify(|_, dy| dy == 0), Shape::Isolated);
    }

    #[test]
    fn test_lake_shore_offsets() {
        let mut grid = TileGrid::new(12);
        flood(&mut grid, 3, 3, 7, 7, TerrainFlags::WATER);
        let random = RandomGrid::new(12);
        let shapes = NeighborShapes;
        let center = shapes.shore(&grid, &random, grid.offset(5, 5).unwrap());
        assert_eq!(center.group_offset, 0);
        let north = shapes.shore(&grid, &random, grid.offset(5, 3).unwrap());
        assert_eq!(north.group_offset, 4);
        let north_east = shapes.shore(&grid, &random, grid.offset(7, 3).unwrap());
        assert_eq!(north_east.group_offset, 20);
    }

    #[test]
    fn test_single_cell_ridge_is_invalid_elevation() {
        let mut grid = TileGrid::new(10);
        let offset = grid.offset(4, 4).unwrap();
        grid.set_elevation(offset, 2);
        let image = NeighborShapes.elevation(&grid, &RandomGrid::new(10), offset, 2);
        assert!(!image.is_valid);
        assert_eq!(image.group_offset, ELEVATION_INVALID_GROUP);
    }

    #[test]
    fn test_reeds_interior_is_not_a_transition() {
        let mut grid = TileGrid::new(10);
        flood(&mut grid, 2, 2, 6, 6, TerrainFlags::MARSHLAND);
        let random = RandomGrid::new(10);
        assert!(!NeighborShapes.reeds_transition(&grid, &random, grid.offset(4, 4).unwrap()).is_valid);
        assert!(NeighborShapes.reeds_transition(&grid, &random, grid.offset(2, 4).unwrap()).is_valid);
    }

    #[test]
    fn test_floodplain_edge_needs_floodplain_neighbor() {
        let mut grid = TileGrid::new(10);
        flood(&mut grid, 5, 0, 9, 9, TerrainFlags::FLOODPLAIN);
        let random = RandomGrid::new(10);
        let west_of_plain = NeighborShapes.floodplain_edge(&grid, &random, grid.offset(4, 4).unwrap());
        assert!(west_of_plain.is_valid);
        assert_eq!(west_of_plain.group_offset, 4);
        assert!(!NeighborShapes.floodplain_edge(&grid, &random, grid.offset(1, 1).unwrap()).is_valid);
    }
}

//! Routing layers derived from terrain, rebuilt after the map changes.

use bevy::prelude::*;
use pathfinding::prelude::{astar, bfs_reach};

use crate::grid::{TileCoord, TileGrid};
use crate::terrain::TerrainFlags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LandRoute {
    Road,
    #[default]
    Open,
    Building,
    Blocked,
}

impl LandRoute {
    fn is_walkable(self) -> bool {
        matches!(self, LandRoute::Road | LandRoute::Open)
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct RoutingGrids {
    pub length: usize,
    pub land: Vec<LandRoute>,
    pub walls: Vec<bool>,
    pub water: Vec<bool>,
}

const LAND_BLOCKERS: TerrainFlags = TerrainFlags::TREE
    .union(TerrainFlags::ROCK)
    .union(TerrainFlags::WATER)
    .union(TerrainFlags::SHRUB)
    .union(TerrainFlags::CANAL)
    .union(TerrainFlags::ELEVATION)
    .union(TerrainFlags::WALL)
    .union(TerrainFlags::GATEHOUSE)
    .union(TerrainFlags::MARSHLAND)
    .union(TerrainFlags::ORE)
    .union(TerrainFlags::DUNE)
    .union(TerrainFlags::DEEPWATER);

impl RoutingGrids {
    fn resize(&mut self, grid: &TileGrid) {
        if self.length != grid.length {
            let cells = grid.cell_count();
            self.length = grid.length;
            self.land = vec![LandRoute::default(); cells];
            self.walls = vec![false; cells];
            self.water = vec![false; cells];
        }
    }

    pub fn update_land(&mut self, grid: &TileGrid) {
        self.resize(grid);
        for (offset, route) in self.land.iter_mut().enumerate() {
            let terrain = grid.terrain_at(offset);
            *route = if terrain.contains(TerrainFlags::ROAD) {
                LandRoute::Road
            } else if terrain.contains(TerrainFlags::BUILDING) {
                LandRoute::Building
            } else if terrain.intersects(LAND_BLOCKERS) {
                LandRoute::Blocked
            } else {
                LandRoute::Open
            };
        }
    }

    pub fn update_walls(&mut self, grid: &TileGrid) {
        self.resize(grid);
        for (offset, wall) in self.walls.iter_mut().enumerate() {
            *wall = grid.terrain_is(offset, TerrainFlags::WALL | TerrainFlags::GATEHOUSE);
        }
    }

    /// Navigable water: water without a low bridge over it.
    pub fn update_water(&mut self, grid: &TileGrid) {
        self.resize(grid);
        for (offset, water) in self.water.iter_mut().enumerate() {
            *water = grid.terrain_is(offset, TerrainFlags::WATER) && grid.bridge_at(offset) == 0;
        }
    }

    fn neighbors(&self, tile: TileCoord, passable: impl Fn(usize) -> bool) -> Vec<TileCoord> {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(|(dx, dy)| tile.shifted(dx, dy))
            .filter(|n| {
                n.x >= 0
                    && n.y >= 0
                    && (n.x as usize) < self.length
                    && (n.y as usize) < self.length
                    && passable(n.y as usize * self.length + n.x as usize)
            })
            .collect()
    }

    /// Shortest walkable path between two cells, or `None`.
    pub fn land_path(&self, start: TileCoord, goal: TileCoord) -> Option<Vec<TileCoord>> {
        let result = astar(
            &start,
            |tile| {
                self.neighbors(*tile, |o| self.land[o].is_walkable())
                    .into_iter()
                    .map(|n| (n, 1u32))
            },
            |tile| (tile.x - goal.x).unsigned_abs() + (tile.y - goal.y).unsigned_abs(),
            |tile| *tile == goal,
        );
        result.map(|(path, _cost)| path)
    }

    /// Number of water cells reachable by boat from `start`.
    pub fn water_reach(&self, start: TileCoord) -> usize {
        bfs_reach(start, |tile| self.neighbors(*tile, |o| self.water[o])).count()
    }
}

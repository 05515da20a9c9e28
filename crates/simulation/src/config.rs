pub const GRID_LENGTH: usize = 228;
pub const GRID_CELLS: usize = GRID_LENGTH * GRID_LENGTH;

/// Grass level of a tile where grass is fully grown.
pub const GRASS_FULL: u8 = 12;
/// Grass levels from here up encode edge/corner transition tiles.
pub const GRASS_EDGE_START: u8 = 16;

/// Fertility (with malus) above which meadow uses the dense tier.
pub const MEADOW_DENSE_FERTILITY: i32 = 70;
/// Fertility (with malus) above which meadow uses the medium tier.
pub const MEADOW_MEDIUM_FERTILITY: i32 = 40;

/// Vegetation growth value of a fully grown reed/tree tile.
pub const VEGETATION_FULL: u8 = 255;

/// Cells added around a cleared rectangle when invalidating roads and walls.
pub const CLEAR_INVALIDATION_MARGIN: i32 = 3;

/// Hop limits when walking linked building parts.
pub const MAX_PREV_PART_HOPS: usize = 99;
pub const MAX_NEXT_PART_HOPS: usize = 9;

/// Farm progress at harvest time; soil malus scales against this.
pub const MAX_FARM_PROGRESS: u32 = 2000;

/// Exclusive upper bound of the ring radius searched for entry/exit flags.
pub const FLAG_SEARCH_RADIUS: i32 = 10;

/// Buildings one undoable action may record before undo is disabled.
pub const MAX_UNDO_BUILDINGS: usize = 50;

//! Encoding a whole map to bytes and restoring it into a `World`.
//!
//! Layout: file header, then an lz4-compressed bitcode `SaveData` holding the
//! grid layers and the `SaveableRegistry` extension map.

use std::collections::BTreeMap;

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use simulation::grid::TileGrid;
use simulation::map_random::RandomGrid;
use simulation::routing::RoutingGrids;
use simulation::{Saveable, SaveableRegistry};

use crate::file_header::{unwrap_header, wrap_with_header, FLAG_COMPRESSED};
use crate::grid_layers::GridLayers;
use crate::save_error::SaveError;

/// Schema version of `SaveData`.
pub const CURRENT_SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct SaveData {
    pub version: u32,
    pub layers: GridLayers,
    pub extensions: BTreeMap<String, Vec<u8>>,
}

impl SaveData {
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SaveError> {
        let data: Self = bitcode::decode(bytes)?;
        if data.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected_max: CURRENT_SAVE_VERSION,
                found: data.version,
            });
        }
        Ok(data)
    }
}

// ---------------------------------------------------------------------------
// World capture / restore
// ---------------------------------------------------------------------------

/// Collects the grid layers and every registered saveable from the world.
pub fn capture_world(world: &World) -> Result<SaveData, SaveError> {
    let grid = world
        .get_resource::<TileGrid>()
        .ok_or(SaveError::MissingResource("TileGrid"))?;
    let random = world
        .get_resource::<RandomGrid>()
        .ok_or(SaveError::MissingResource("RandomGrid"))?;
    let registry = world
        .get_resource::<SaveableRegistry>()
        .ok_or(SaveError::MissingResource("SaveableRegistry"))?;

    let mut extensions = registry.save_all(world);
    // The random layer travels with the grid layers.
    extensions.remove(RandomGrid::SAVE_KEY);

    Ok(SaveData {
        version: CURRENT_SAVE_VERSION,
        layers: GridLayers::capture(grid, random),
        extensions,
    })
}

/// Writes the save into the world. The grid is validated before any
/// resource changes; the routing layers are rebuilt from the restored terrain.
pub fn restore_world(world: &mut World, save: SaveData) -> Result<(), SaveError> {
    if !world.contains_resource::<TileGrid>() {
        return Err(SaveError::MissingResource("TileGrid"));
    }
    if !world.contains_resource::<RandomGrid>() {
        return Err(SaveError::MissingResource("RandomGrid"));
    }
    save.layers.validate()?;

    let registry = world
        .remove_resource::<SaveableRegistry>()
        .ok_or(SaveError::MissingResource("SaveableRegistry"))?;
    registry.load_all(world, &save.extensions);
    world.insert_resource(registry);

    world.resource_scope(|world, mut grid: Mut<TileGrid>| {
        let mut random = world.resource_mut::<RandomGrid>();
        save.layers.apply(&mut grid, &mut random)
    })?;

    if world.contains_resource::<RoutingGrids>() {
        world.resource_scope(|world, mut routing: Mut<RoutingGrids>| {
            let grid = world.resource::<TileGrid>();
            routing.update_land(grid);
            routing.update_walls(grid);
            routing.update_water(grid);
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Byte framing
// ---------------------------------------------------------------------------

/// Encodes, compresses and frames the world's map state.
pub fn save_to_bytes(world: &World) -> Result<Vec<u8>, SaveError> {
    let encoded = capture_world(world)?.encode();
    let compressed = lz4_flex::compress_prepend_size(&encoded);
    Ok(wrap_with_header(&compressed, encoded.len(), FLAG_COMPRESSED))
}

/// Parses a framed map file without touching the world.
pub fn decode_bytes(bytes: &[u8]) -> Result<SaveData, SaveError> {
    if bytes.is_empty() {
        return Err(SaveError::NoData);
    }
    let (header, payload) = unwrap_header(bytes)?;
    debug!(
        "Map file header: format v{}, flags {:#X}, timestamp {}, data size {}",
        header.format_version, header.flags, header.timestamp, header.uncompressed_size
    );

    if header.is_compressed() {
        let decompressed = lz4_flex::decompress_size_prepended(payload)
            .map_err(|e| SaveError::Corrupted(format!("lz4 payload: {e}")))?;
        SaveData::decode(&decompressed)
    } else {
        SaveData::decode(payload)
    }
}

pub fn load_from_bytes(world: &mut World, bytes: &[u8]) -> Result<(), SaveError> {
    let save = decode_bytes(bytes)?;
    restore_world(world, save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_header::HEADER_SIZE;
    use simulation::features::GameFeatures;
    use simulation::sim_rng::SimRng;
    use simulation::terrain::TerrainFlags;

    const LEN: usize = 8;

    fn world() -> World {
        let mut world = World::new();
        let mut grid = TileGrid::new(LEN);
        grid.terrain[9] = TerrainFlags::ROCK;
        grid.image[9] = 903;
        grid.terrain[20] = TerrainFlags::ROAD;
        grid.image[20] = 4505;
        let mut random = RandomGrid::new(LEN);
        random.init(&mut SimRng::from_seed_u64(99));

        let mut registry = SaveableRegistry::default();
        registry.register::<RandomGrid>();
        registry.register::<GameFeatures>();

        world.insert_resource(grid);
        world.insert_resource(random);
        world.insert_resource(registry);
        world.insert_resource(GameFeatures {
            gameplay_change_soil_depletion: true,
            ..Default::default()
        });
        world
    }

    fn blank_world() -> World {
        let mut world = World::new();
        world.insert_resource(TileGrid::new(2));
        world.insert_resource(RandomGrid::new(2));
        let mut registry = SaveableRegistry::default();
        registry.register::<RandomGrid>();
        registry.register::<GameFeatures>();
        world.insert_resource(registry);
        world.insert_resource(GameFeatures::default());
        world.insert_resource(RoutingGrids::default());
        world
    }

    #[test]
    fn test_save_and_load_restore_the_map() {
        let source = world();
        let bytes = save_to_bytes(&source).expect("saves");
        assert!(bytes.len() > HEADER_SIZE);

        let mut target = blank_world();
        load_from_bytes(&mut target, &bytes).expect("loads");

        let grid = target.resource::<TileGrid>();
        assert_eq!(grid.length, LEN);
        assert_eq!(grid.terrain, source.resource::<TileGrid>().terrain);
        assert_eq!(grid.image, source.resource::<TileGrid>().image);
        assert_eq!(
            target.resource::<RandomGrid>(),
            source.resource::<RandomGrid>()
        );
        assert!(target.resource::<GameFeatures>().gameplay_change_soil_depletion);
    }

    #[test]
    fn test_random_layer_is_not_stored_twice() {
        let save = capture_world(&world()).expect("captures");
        assert!(!save.extensions.contains_key(RandomGrid::SAVE_KEY));
        assert!(save.extensions.contains_key(GameFeatures::SAVE_KEY));
        assert_eq!(save.layers.random.len(), LEN * LEN);
    }

    #[test]
    fn test_mismatched_random_layer_is_rejected() {
        let mut save = capture_world(&world()).expect("captures");
        save.layers.random.pop();
        let compressed = lz4_flex::compress_prepend_size(&save.encode());
        let bytes = wrap_with_header(&compressed, 0, FLAG_COMPRESSED);

        let mut target = blank_world();
        let err = load_from_bytes(&mut target, &bytes).unwrap_err();
        assert!(matches!(
            err,
            SaveError::LayerSizeMismatch { layer: "random", .. }
        ));
        assert_eq!(target.resource::<TileGrid>().length, 2);
        assert!(!target.resource::<GameFeatures>().gameplay_change_soil_depletion);
    }

    #[test]
    fn test_uncompressed_payload_is_accepted() {
        let save = capture_world(&world()).expect("captures");
        let encoded = save.encode();
        let bytes = wrap_with_header(&encoded, encoded.len(), 0);
        assert_eq!(decode_bytes(&bytes).expect("decodes"), save);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let mut save = capture_world(&world()).expect("captures");
        save.version = CURRENT_SAVE_VERSION + 1;
        let encoded = save.encode();
        let bytes = wrap_with_header(&encoded, encoded.len(), 0);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(SaveError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_damaged_compressed_payload_is_corrupted() {
        let bytes = wrap_with_header(&[10, 0, 0, 0, 0xF0], 10, FLAG_COMPRESSED);
        assert!(matches!(
            decode_bytes(&bytes),
            Err(SaveError::Corrupted(_))
        ));
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert!(matches!(decode_bytes(&[]), Err(SaveError::NoData)));
    }

    #[test]
    fn test_missing_grid_is_reported() {
        let world = World::new();
        assert!(matches!(
            save_to_bytes(&world),
            Err(SaveError::MissingResource("TileGrid"))
        ));
    }
}

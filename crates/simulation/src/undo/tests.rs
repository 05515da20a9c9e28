//! Unit tests for the undo recorder.

#[cfg(test)]
mod tests {
    use crate::buildings::{BuildingState, BuildingStore, BuildingType};
    use crate::config::MAX_UNDO_BUILDINGS;
    use crate::grid::{TileCoord, TileGrid};
    use crate::terrain::TerrainFlags;
    use crate::undo::history::UndoState;
    use crate::view::ViewOrientation;

    fn store_with_houses(grid: &mut TileGrid, count: usize) -> BuildingStore {
        let mut store = BuildingStore::default();
        for i in 0..count {
            store.place(
                grid,
                BuildingType::House,
                TileCoord::new((i % 10) as i32 * 2, (i / 10) as i32 * 2),
                1,
                ViewOrientation::TopRight,
            );
        }
        store
    }

    #[test]
    fn test_nothing_to_undo_by_default() {
        let mut undo = UndoState::default();
        let mut grid = TileGrid::new(8);
        let mut store = BuildingStore::default();
        assert!(!undo.can_undo());
        assert!(!undo.perform_undo(&mut grid, &mut store));
    }

    #[test]
    fn test_add_building_dedupes_by_id() {
        let mut grid = TileGrid::new(16);
        let store = store_with_houses(&mut grid, 2);
        let mut undo = UndoState::default();
        undo.start_build(&grid);

        let first = store.get(1).unwrap();
        undo.add_building(first);
        undo.add_building(first);
        undo.add_building(store.get(2).unwrap());
        assert_eq!(undo.recorded_buildings().len(), 2);
    }

    #[test]
    fn test_add_building_ignored_until_started() {
        let mut grid = TileGrid::new(16);
        let store = store_with_houses(&mut grid, 1);
        let mut undo = UndoState::default();
        undo.add_building(store.get(1).unwrap());
        assert!(undo.recorded_buildings().is_empty());
    }

    #[test]
    fn test_overflow_disables_undo() {
        let mut grid = TileGrid::new(32);
        let store = store_with_houses(&mut grid, MAX_UNDO_BUILDINGS + 1);
        let mut undo = UndoState::default();
        undo.start_build(&grid);
        for b in store.iter() {
            undo.add_building(b);
        }
        assert_eq!(undo.recorded_buildings().len(), MAX_UNDO_BUILDINGS);
        assert!(!undo.is_available());
        undo.finish_build();
        assert!(!undo.can_undo());
    }

    #[test]
    fn test_restore_building_state_revives_marked_buildings() {
        let mut grid = TileGrid::new(16);
        let mut store = store_with_houses(&mut grid, 1);
        let mut undo = UndoState::default();
        undo.start_build(&grid);

        undo.add_building(store.get(1).unwrap());
        let b = store.get_mut(1).unwrap();
        b.state = BuildingState::DeletedByPlayer;
        b.is_deleted = true;

        undo.restore_building_state(&mut store);
        let b = store.get(1).unwrap();
        assert_eq!(b.state, BuildingState::InUse);
        assert!(!b.is_deleted);
        assert!(undo.recorded_buildings().is_empty());
    }

    #[test]
    fn test_restore_map_keeps_images() {
        let mut grid = TileGrid::new(8);
        let o = grid.offset(3, 3).unwrap();
        grid.add_terrain(o, TerrainFlags::TREE);
        let mut undo = UndoState::default();
        undo.start_build(&grid);

        grid.remove_terrain(o, TerrainFlags::TREE);
        grid.set_image(o, 42);
        undo.restore_map(&mut grid, false);
        assert!(grid.terrain_is(o, TerrainFlags::TREE));
        assert_eq!(grid.image_at(o), 42);
    }

    #[test]
    fn test_perform_undo_restores_map_and_buildings() {
        let mut grid = TileGrid::new(16);
        let mut store = store_with_houses(&mut grid, 1);
        let before = grid.clone();
        let mut undo = UndoState::default();
        undo.start_build(&grid);

        undo.add_building(store.get(1).unwrap());
        store.get_mut(1).unwrap().state = BuildingState::Deleted;
        let o = grid.offset(0, 0).unwrap();
        grid.remove_terrain(o, TerrainFlags::BUILDING);
        grid.set_building(o, 0);
        grid.set_image(o, 7);
        undo.finish_build();

        assert!(undo.can_undo());
        assert!(undo.perform_undo(&mut grid, &mut store));
        assert_eq!(grid.terrain, before.terrain);
        assert_eq!(grid.building, before.building);
        assert_eq!(grid.image, before.image);
        assert_eq!(store.get(1).unwrap().state, BuildingState::InUse);

        // One undo per action.
        assert!(!undo.can_undo());
        assert!(!undo.perform_undo(&mut grid, &mut store));
    }

    #[test]
    fn test_disable_blocks_undo() {
        let grid = TileGrid::new(8);
        let mut undo = UndoState::default();
        undo.start_build(&grid);
        undo.disable();
        undo.finish_build();
        assert!(!undo.can_undo());
    }

    #[test]
    fn test_unfinished_action_cannot_be_undone() {
        let grid = TileGrid::new(8);
        let mut undo = UndoState::default();
        undo.start_build(&grid);
        assert!(undo.is_available());
        assert!(!undo.can_undo());
    }
}

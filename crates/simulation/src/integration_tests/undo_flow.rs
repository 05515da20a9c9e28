use crate::buildings::{BuildingState, BuildingType};
use crate::terrain::TerrainFlags;
use crate::test_harness::TestMap;

#[test]
fn test_undo_restores_a_cleared_house() {
    let mut map = TestMap::new().with_terrain_rect((1, 6), (8, 6), TerrainFlags::ROAD);
    let house = map.place_house(2, 2, 2, 0);
    map.create_map(5);
    let terrain = map.grid().terrain.clone();
    let images = map.grid().image.clone();

    map.clear((1, 1), (4, 6));
    map.update();
    map.assert_no_terrain(2, 2, TerrainFlags::BUILDING);
    map.assert_no_terrain(3, 6, TerrainFlags::ROAD);
    assert!(map.undo_state().can_undo());

    map.undo();
    assert_eq!(map.grid().terrain, terrain);
    assert_eq!(map.grid().image, images);
    map.assert_building_state(house, BuildingState::InUse);
    assert_eq!(map.grid().building_at(map.offset(3, 3)), house);
    assert!(!map.undo_state().can_undo(), "an undo cannot be repeated");
}

#[test]
fn test_fort_demolition_cannot_be_undone() {
    let mut map = TestMap::new();
    let fort = map.place_building(BuildingType::Fort, 3, 3, 3);

    map.clear((3, 3), (5, 5));
    map.answer(true);
    map.update();
    map.assert_building_state(fort, BuildingState::Deleted);

    map.undo();
    map.assert_building_state(fort, BuildingState::Deleted);
    map.assert_no_terrain(3, 3, TerrainFlags::BUILDING);
}

#[test]
fn test_unanswered_clear_is_not_undoable() {
    let mut map = TestMap::new().with_terrain(9, 9, TerrainFlags::TREE);
    map.place_building(BuildingType::Fort, 3, 3, 3);

    map.clear((3, 3), (9, 9));
    assert!(map.undo_state().is_available());
    assert!(!map.undo_state().can_undo());
    map.undo();
    map.assert_terrain(9, 9, TerrainFlags::TREE);
}

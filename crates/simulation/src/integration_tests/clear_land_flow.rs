use crate::buildings::{BuildingState, BuildingType};
use crate::features::GameFeatures;
use crate::figures::FigureStore;
use crate::land_clearing::{CityWarning, ConfirmationPrompt, LandCleared, WARNING_BRIDGE_WITH_PEOPLE};
use crate::terrain::TerrainFlags;
use crate::test_harness::TestMap;

fn cleared(map: &mut TestMap) -> Vec<LandCleared> {
    map.take_events::<LandCleared>()
}

#[test]
fn test_clear_removes_house_and_vegetation() {
    let mut map = TestMap::new()
        .with_terrain(6, 2, TerrainFlags::TREE)
        .with_terrain(7, 2, TerrainFlags::SHRUB);
    let house = map.place_house(2, 2, 2, 8);

    map.clear((1, 1), (8, 4));
    let events = cleared(&mut map);
    assert_eq!(events.len(), 1);
    assert!(!events[0].measured);
    assert_eq!(events[0].items, 1);
    map.assert_no_terrain(6, 2, TerrainFlags::TREE);
    map.assert_no_terrain(7, 2, TerrainFlags::SHRUB);
    assert_eq!(map.resource::<FigureStore>().homeless_population(), 8);

    // The footprint leaves the grid on the next building-state pass.
    map.update();
    map.assert_building_state(house, BuildingState::Deleted);
    for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
        map.assert_no_terrain(x, y, TerrainFlags::BUILDING);
        assert_eq!(map.grid().building_at(map.offset(x, y)), 0);
        assert_ne!(map.image(x, y), 0);
    }
}

#[test]
fn test_measure_reports_count_without_clearing() {
    let mut map = TestMap::new().with_terrain(5, 5, TerrainFlags::CANAL);
    let granary = map.place_building(BuildingType::Granary, 1, 1, 3);

    map.measure((0, 0), (6, 6));
    let events = cleared(&mut map);
    assert_eq!(events.len(), 1);
    assert!(events[0].measured);
    assert_eq!(events[0].items, 2);
    map.assert_terrain(5, 5, TerrainFlags::CANAL);
    map.assert_building_state(granary, BuildingState::InUse);
    assert!(!map.undo_state().is_available());
}

#[test]
fn test_fort_waits_for_the_player() {
    let mut map = TestMap::new();
    let fort = map.place_building(BuildingType::Fort, 4, 4, 3);

    map.clear((3, 3), (7, 7));
    assert_eq!(map.take_events::<ConfirmationPrompt>(), vec![ConfirmationPrompt::Fort]);
    assert!(cleared(&mut map).is_empty());
    assert!(map.pending().request.is_some());
    map.assert_building_state(fort, BuildingState::InUse);

    map.answer(true);
    assert!(map.pending().request.is_none());
    let events = cleared(&mut map);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].items, 1);
    assert!(!map.undo_state().can_undo(), "demolishing a fort cannot be undone");
}

#[test]
fn test_declined_prompt_leaves_map_alone() {
    let mut map = TestMap::new();
    let fort = map.place_building(BuildingType::FortGround, 4, 4, 2);

    map.clear((4, 4), (5, 5));
    map.answer(false);
    assert!(map.pending().request.is_none());
    assert!(cleared(&mut map).is_empty());
    map.assert_building_state(fort, BuildingState::InUse);
    map.assert_terrain(4, 4, TerrainFlags::BUILDING);
}

#[test]
fn test_answer_without_pending_clear_is_ignored() {
    let mut map = TestMap::new().with_terrain(2, 2, TerrainFlags::TREE);
    map.answer(true);
    assert!(cleared(&mut map).is_empty());
    map.assert_terrain(2, 2, TerrainFlags::TREE);
}

#[test]
fn test_new_request_replaces_pending_one() {
    let mut map = TestMap::new().with_terrain(12, 12, TerrainFlags::SHRUB);
    let fort = map.place_building(BuildingType::Fort, 2, 2, 3);

    map.clear((2, 2), (4, 4));
    assert!(map.pending().request.is_some());
    map.clear((12, 12), (12, 12));
    assert!(map.pending().request.is_none());
    map.assert_no_terrain(12, 12, TerrainFlags::SHRUB);

    map.answer(true);
    map.assert_building_state(fort, BuildingState::InUse);
}

#[test]
fn test_bridge_with_people_raises_warning() {
    let mut map = TestMap::new()
        .with_terrain_rect((8, 0), (11, 23), TerrainFlags::WATER)
        .with_bridge(8, 6, 4)
        .with_figures(9, 6, 2);

    map.clear((7, 6), (12, 6));
    assert_eq!(map.take_events::<ConfirmationPrompt>(), vec![ConfirmationPrompt::Bridge]);
    map.answer(true);

    let warnings = map.take_events::<CityWarning>();
    assert_eq!(warnings, vec![CityWarning { key: WARNING_BRIDGE_WITH_PEOPLE }]);
    for x in 8..12 {
        assert_ne!(map.grid().bridge_at(map.offset(x, 6)), 0);
    }
}

#[test]
fn test_immediate_delete_clears_footprint_in_the_same_frame() {
    let mut map = TestMap::new().with_features(GameFeatures {
        gameplay_change_immediate_delete: true,
        ..Default::default()
    });
    let temple = map.place_building(BuildingType::Temple, 5, 5, 2);

    map.clear((5, 5), (6, 6));
    map.assert_building_state(temple, BuildingState::Deleted);
    map.assert_no_terrain(5, 5, TerrainFlags::BUILDING);
}

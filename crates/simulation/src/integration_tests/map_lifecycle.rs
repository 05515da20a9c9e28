use crate::grid::PropertyFlags;
use crate::terrain::TerrainFlags;
use crate::test_harness::TestMap;
use crate::tiles::EntryExitPoints;
use crate::view::ViewOrientation;

fn varied_map() -> TestMap {
    TestMap::new()
        .with_terrain_rect((4, 4), (5, 5), TerrainFlags::ROCK)
        .with_terrain_rect((0, 16), (23, 17), TerrainFlags::WATER)
        .with_terrain_rect((2, 10), (12, 10), TerrainFlags::ROAD)
        .with_terrain(15, 3, TerrainFlags::TREE)
        .with_terrain(16, 3, TerrainFlags::SHRUB)
        .with_terrain(18, 8, TerrainFlags::MEADOW)
}

#[test]
fn test_new_map_resolves_every_tile() {
    let mut map = varied_map();
    map.create_map(7);

    assert!(map.random().values.iter().any(|&v| v != 0));
    map.assert_no_blank_land();
    assert_ne!(map.image(15, 3), 0);
    assert_ne!(map.image(6, 10), 0);
}

#[test]
fn test_same_seed_renders_the_same_map() {
    let mut a = varied_map();
    let mut b = varied_map();
    a.create_map(42);
    b.create_map(42);
    assert_eq!(a.random(), b.random());
    assert_eq!(a.grid().image, b.grid().image);

    let mut c = varied_map();
    c.create_map(43);
    assert_ne!(a.random(), c.random());
}

#[test]
fn test_entry_and_exit_flags_are_planted() {
    let mut map = TestMap::new().with_entry_exit((0, 8), (23, 12));
    map.create_map(3);

    let points = map.resource::<EntryExitPoints>().clone();
    let entry = points.entry_flag.expect("entry flag placed");
    let exit = points.exit_flag.expect("exit flag placed");
    map.assert_terrain(entry.x, entry.y, TerrainFlags::ROCK);
    map.assert_terrain(exit.x, exit.y, TerrainFlags::ROCK);
    assert_eq!(map.image(entry.x, entry.y), 5701);
    assert_eq!(map.image(exit.x, exit.y), 5705);
}

#[test]
fn test_rotation_re_resolves_flags_and_clumps() {
    let mut map = varied_map().with_entry_exit((0, 8), (23, 12));
    map.create_map(9);
    let draw = |map: &TestMap, x, y| map.grid().property_is(map.offset(x, y), PropertyFlags::DRAW_TILE);
    assert!(draw(&map, 4, 5));
    assert!(!draw(&map, 4, 4));

    map.rotate_to(ViewOrientation::BottomRight);
    assert!(draw(&map, 4, 4));
    assert!(!draw(&map, 4, 5));

    let points = map.resource::<EntryExitPoints>().clone();
    let entry = points.entry_flag.expect("entry flag re-placed");
    let exit = points.exit_flag.expect("exit flag re-placed");
    assert_eq!(map.image(entry.x, entry.y), 5700);
    assert_eq!(map.image(exit.x, exit.y), 5704);
    map.assert_terrain(entry.x, entry.y, TerrainFlags::ROCK);
}

#[test]
fn test_second_map_resizes_nothing_and_rerolls_randomness() {
    let mut map = TestMap::new();
    map.create_map(1);
    let first = map.random().clone();
    map.create_map(2);
    assert_eq!(map.random().length, first.length);
    assert_ne!(*map.random(), first);
}

//! Copies of the shipped assets compiled into the binary
//!
//! Used when a file is missing from the asset directory, and by tests.

pub const MOVES_JSON: &str = include_str!("../../assets/moves/moves.json");
pub const BOSS_MOVES_JSON: &str = include_str!("../../assets/moves/boss_moves.json");
pub const ITEMS_JSON: &str = include_str!("../../assets/items/items.json");
pub const TEST_MAP: &str = include_str!("../../assets/maps/test_map.txt");

/// World maps by `(world, level)`
pub const MAPS: [((usize, usize), &str); 5] = [
    ((0, 0), include_str!("../../assets/maps/w0_m0.txt")),
    ((0, 1), include_str!("../../assets/maps/w0_m1.txt")),
    ((0, 2), include_str!("../../assets/maps/w0_m2.txt")),
    ((0, 3), include_str!("../../assets/maps/w0_m3.txt")),
    ((0, 4), include_str!("../../assets/maps/w0_m4.txt")),
];

/// Built-in text of a world map, if one ships with the game
pub fn map(world: usize, level: usize) -> Option<&'static str> {
    MAPS.iter().find(|(id, _)| *id == (world, level)).map(|(_, text)| *text)
}

// Map module
//
// Tile maps loaded from text files, the special movement tiles, and the
// weather that plays over a level.

pub mod direction;
pub mod game_map;
pub mod tile;
pub mod tile_map;
pub mod weather;

pub use direction::{Direction, Position};
pub use game_map::{GameMap, MoveEvent, MoveOutcome, TileEventResult};
pub use tile::{Tile, TileKind};
pub use tile_map::{MapError, TileMap};
pub use weather::{ParticleField, Weather};

// Entity module
//
// The player, the enemies on a map, and the stats both fight with.

pub mod enemy;
pub mod player;
pub mod stats;

pub use enemy::{Enemy, EnemyKind};
pub use player::{LevelUpSummary, Player};
pub use stats::{DamageResult, Stats};

// Battle module
//
// Randomized movesets, unlockable special moves, and the turn-based
// battle state machine.

pub mod battle;
pub mod error;
pub mod moves;
pub mod moveset;
pub mod special;

pub use battle::{Battle, BattleOutcome, BattleResult, BattleState, BattleTally};
pub use error::BattleError;
pub use moves::{Move, MoveKind, MovePool};
pub use moveset::Moveset;
pub use special::{SpecialMove, SpecialMoveset, SMOVES_ORDER_BY_LVL};

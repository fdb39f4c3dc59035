use thiserror::Error;

/// Errors raised while setting up or playing a battle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("Move pool has {available} moves, need at least {needed}")]
    PoolTooSmall { needed: usize, available: usize },

    #[error("No boss move pool named '{0}'")]
    UnknownBossPool(String),

    #[error("Invalid move index: {0}")]
    InvalidMove(usize),

    #[error("Invalid special move index: {0}")]
    InvalidSpecialMove(usize),

    #[error("Special move on cooldown for {0} more turns")]
    SpecialMoveOnCooldown(u32),

    #[error("It is not the player's turn")]
    NotPlayerTurn,

    #[error("It is not the enemy's turn")]
    NotEnemyTurn,
}

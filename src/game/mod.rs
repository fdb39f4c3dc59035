// Game module - The playable state behind every screen
//
// This module contains:
// - constructors.rs: Game initialization (new/from save) and level entry
// - events.rs: Map movement, tile events and dialog flow
// - combat.rs: Driving a Battle from start to rewards
// - commands.rs: Debug console command execution
// - update.rs: Per-frame timers

pub mod combat;
pub mod commands;
pub mod constructors;
pub mod events;
pub mod update;

use crate::battle::{Battle, BattleResult};
use crate::dialog::Dialog;
use crate::entity::{LevelUpSummary, Player};
use crate::event::{EventState, Transition};
use crate::map::{GameMap, Position};
use crate::progress::Progress;
use crate::resource::ResourceManager;
use crate::rng::GameRng;
use crate::statistics::Statistics;

/// Seconds the player needs to walk one tile
pub const STEP_TIME: f32 = 0.12;

/// Everything the game screen works on
///
/// The front-end calls into `Game` for every action and reads its public
/// fields to draw; nothing here touches rendering.
pub struct Game {
    pub resources: ResourceManager,
    pub rng: GameRng,
    pub player: Player,
    pub progress: Progress,
    pub statistics: Statistics,

    /// The level being played, `None` while in the menus
    pub map: Option<GameMap>,
    pub state: EventState,
    pub dialog: Dialog,
    pub transition: Transition,

    pub battle: Option<Battle>,
    /// Pending level-up summary for the level-up screen
    pub level_up: Option<LevelUpSummary>,
    /// Set by `/exit`
    pub exit_requested: bool,
    /// Seconds played in this session plus any loaded save
    pub playtime: f64,

    battle_result: Option<BattleResult>,
    // tile of the enemy being fought, cleared on victory
    battle_tile: Option<Position>,
    // consumed interaction tile, cleared when its dialog closes
    interaction_tile: Option<Position>,
    move_timer: f32,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Game;
    use crate::event::EventState;
    use crate::map::{GameMap, TileMap};
    use crate::resource::ResourceManager;
    use crate::rng::GameRng;

    /// A game already walking around the given map text
    pub(crate) fn game_on(text: &str) -> Game {
        let mut game = Game::new(ResourceManager::builtin().unwrap(), GameRng::new(4), 0.0);
        let map = GameMap::new(0, 0, TileMap::parse(text).unwrap());
        game.player.place(map.tile_map.spawn);
        game.map = Some(map);
        game.state = EventState::Moving;
        game
    }
}

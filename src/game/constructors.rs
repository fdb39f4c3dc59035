// Game initialization and level entry

use log::info;

use super::Game;
use crate::dialog::Dialog;
use crate::entity::Player;
use crate::event::{EventState, Transition};
use crate::map::GameMap;
use crate::progress::Progress;
use crate::resource::{ResourceError, ResourceManager};
use crate::rng::GameRng;
use crate::save::{SaveFile, SaveType};
use crate::statistics::Statistics;

impl Game {
    /// Starts a fresh game with a new level 1 player
    pub fn new(resources: ResourceManager, mut rng: GameRng, text_speed: f32) -> Self {
        let player = Player::new(&mut rng);
        let mut statistics = Statistics::new();
        statistics.record_level(player.level);
        Self::assemble(resources, rng, player, Progress::new(), statistics, text_speed, 0.0)
    }

    /// Resumes from a save file
    pub fn from_save(resources: ResourceManager, rng: GameRng, save: SaveFile, text_speed: f32) -> Self {
        info!(
            "Loaded save: LV.{} player, world {} level {}",
            save.player.level, save.progress.highest_world, save.progress.highest_level
        );
        let playtime = save.metadata.playtime_seconds as f64;
        let mut player = save.player;
        player.place((0, 0));
        Self::assemble(resources, rng, player, save.progress, save.statistics, text_speed, playtime)
    }

    fn assemble(
        resources: ResourceManager,
        rng: GameRng,
        player: Player,
        progress: Progress,
        statistics: Statistics,
        text_speed: f32,
        playtime: f64,
    ) -> Self {
        Game {
            resources,
            rng,
            player,
            progress,
            statistics,
            map: None,
            state: EventState::None,
            dialog: Dialog::with_speed(text_speed),
            transition: Transition::new(),
            battle: None,
            level_up: None,
            exit_requested: false,
            playtime,
            battle_result: None,
            battle_tile: None,
            interaction_tile: None,
            move_timer: 0.0,
        }
    }

    /// Snapshot of the persistent state
    pub fn to_save(&self, save_type: SaveType, slot: u8) -> SaveFile {
        SaveFile::new(&self.player, self.progress, &self.statistics, save_type, slot, self.playtime as u64)
    }

    /// Loads a level and drops the player on its spawn tile
    pub fn enter_level(&mut self, world: usize, level: usize) -> Result<(), ResourceError> {
        let tile_map = self.resources.load_map(world, level)?;
        let map = GameMap::new(world, level, tile_map);
        self.player.place(map.tile_map.spawn);
        info!(
            "Entered world {} level {} ({} enemies)",
            world,
            level,
            map.tile_map.num_entities()
        );
        self.map = Some(map);
        self.battle = None;
        self.battle_result = None;
        self.battle_tile = None;
        self.interaction_tile = None;
        self.level_up = None;
        self.exit_requested = false;
        self.dialog.end();
        self.start_transition(EventState::None, EventState::Moving);
        Ok(())
    }

    /// Back to the menus
    pub fn leave_level(&mut self) {
        if let Some(map) = self.map.take() {
            info!("Left world {} level {}", map.world, map.level);
        }
        self.player.place((0, 0));
        self.battle = None;
        self.dialog.end();
        self.state = EventState::None;
        self.exit_requested = false;
    }

    pub(crate) fn start_transition(&mut self, prev: EventState, next: EventState) {
        self.transition.start(prev, next);
        self.state = EventState::Transition;
    }
}

use log::debug;

use super::direction::{Direction, Position};
use super::tile::{EMPTY_TILE_ID, TileKind};
use super::tile_map::TileMap;
use super::weather::{Lightning, ParticleField, Weather};
use crate::entity::{EnemyKind, Player};
use crate::item::ItemRegistry;
use crate::rng::GameRng;

/// Longest chain of forced moves a single step can trigger
pub const MAX_FORCED_STEPS: usize = 64;

/// Logical viewport the weather particles live in
pub const VIEWPORT_WIDTH: f32 = 400.0;
pub const VIEWPORT_HEIGHT: f32 = 240.0;

/// What ended a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveEvent {
    /// Landed on a plain tile
    None,
    /// Could not leave the starting tile
    Blocked,
    /// Movement was halted (stop tile, or a forced move hit a wall)
    Stop,
    /// Walked onto an enemy
    Battle { enemy: EnemyKind, at: Position, from: Position },
    /// Question or exclamation mark
    Interaction(TileKind),
    Teleport { from: Position, to: Position },
}

/// The tiles walked during one step and how it ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub path: Vec<Position>,
    pub event: MoveEvent,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Effects of a question or exclamation mark, with the dialog to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileEventResult {
    pub lines: Vec<String>,
    /// Gold gained (negative when lost)
    pub gold: i32,
    pub healed: i32,
    pub damage: i32,
    pub item_found: bool,
}

/// A playable level: tile map plus weather and lighting
///
/// Maps are identified by world and level index; files are named
/// `w{world}_m{level}.txt`.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub world: usize,
    pub level: usize,
    pub tile_map: TileMap,
    pub weather: Weather,
    pub particles: ParticleField,
    pub lightning: Lightning,
    /// Night lighting
    pub dark: bool,
}

impl GameMap {
    pub fn new(world: usize, level: usize, tile_map: TileMap) -> Self {
        GameMap {
            world,
            level,
            tile_map,
            weather: Weather::Normal,
            particles: ParticleField::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            lightning: Lightning::default(),
            dark: false,
        }
    }

    /// Asset path of a map file
    pub fn file_name(world: usize, level: usize) -> String {
        format!("maps/w{world}_m{level}.txt")
    }

    /// Enemy levels found on a map
    pub fn level_range(world: usize, level: usize) -> (i32, i32) {
        let base = (world * 10 + level * 2) as i32 + 1;
        (base, base + 2)
    }

    pub fn enemy_level(&self, rng: &mut GameRng) -> i32 {
        let (min, max) = Self::level_range(self.world, self.level);
        rng.range_inclusive(min, max)
    }

    /// Changes the weather and resets the particle field to match
    pub fn set_weather(&mut self, weather: Weather, rng: &mut GameRng) {
        self.weather = weather;
        self.particles.set(weather, rng);
        self.lightning.reset();
    }

    pub fn update(&mut self, dt: f32) {
        if self.weather != Weather::Normal {
            self.particles.update(dt);
        }
        if self.weather == Weather::Thunderstorm {
            self.lightning.update(dt);
        }
    }

    // ======================================================================
    // Movement
    // ======================================================================

    /// Steps the player one tile, then resolves any special tiles
    ///
    /// Moving tiles chain into further steps (at most `MAX_FORCED_STEPS`).
    /// The player's position, facing and movement flags are updated;
    /// starting a battle is left to the caller.
    pub fn try_move(&self, player: &mut Player, dir: Direction, rng: &mut GameRng) -> MoveOutcome {
        player.facing = dir;
        player.tile_interaction = false;
        player.teleporting = false;

        let mut pos = player.position;
        let mut dir = dir;
        let mut path = Vec::new();
        let mut event = MoveEvent::Stop;

        for _ in 0..MAX_FORCED_STEPS {
            let next = dir.step(pos);
            let Some(tile) = self.tile_map.tile(next).filter(|t| !t.is_blocked()) else {
                event = if path.is_empty() { MoveEvent::Blocked } else { MoveEvent::Stop };
                break;
            };

            let from = pos;
            pos = next;
            path.push(pos);

            if let Some(enemy) = tile.entity() {
                event = MoveEvent::Battle { enemy, at: pos, from };
                break;
            }

            match tile.kind {
                TileKind::Change => {
                    if !rng.coin() {
                        dir = dir.opposite();
                    }
                }
                TileKind::InAndOut => {
                    let back = dir.opposite();
                    let options: Vec<Direction> = Direction::ALL.into_iter().filter(|d| *d != back).collect();
                    dir = options[rng.below(options.len())];
                }
                TileKind::Down | TileKind::Up | TileKind::Right | TileKind::Left => {
                    dir = tile.kind.push_direction().unwrap_or(dir);
                }
                TileKind::Stop => {
                    event = MoveEvent::Stop;
                    break;
                }
                TileKind::QuestionMark | TileKind::ExclamationMark => {
                    event = MoveEvent::Interaction(tile.kind);
                    break;
                }
                TileKind::Teleport => {
                    let destinations = self.tile_map.teleport_destinations(pos);
                    if destinations.is_empty() {
                        event = MoveEvent::None;
                    } else {
                        let to = destinations[rng.below(destinations.len())];
                        event = MoveEvent::Teleport { from: pos, to };
                        pos = to;
                        path.push(to);
                    }
                    break;
                }
                TileKind::Normal | TileKind::Blocked => {
                    event = MoveEvent::None;
                    break;
                }
            }
        }

        player.position = pos;
        player.continue_moving = event == MoveEvent::None;
        match &event {
            MoveEvent::Interaction(_) => player.tile_interaction = true,
            MoveEvent::Teleport { .. } => player.teleporting = true,
            _ => {}
        }
        if path.len() > 1 {
            debug!("Forced movement: {} tiles, ended with {:?}", path.len(), event);
        }

        MoveOutcome { path, event }
    }

    /// Replaces a consumed interaction tile with an empty one
    pub fn clear_tile(&mut self, pos: Position) {
        self.tile_map.set_tile(pos, EMPTY_TILE_ID);
    }

    // ======================================================================
    // Tile interactions
    // ======================================================================

    /// Question mark: gold, healing or an item
    pub fn question_mark(&self, player: &mut Player, items: &ItemRegistry, rng: &mut GameRng) -> TileEventResult {
        let level = player.level.max(1);
        let mut result = TileEventResult::default();
        let roll = rng.below(100);

        if roll < 40 {
            let gold = rng.range_inclusive(level, level * 5) + 5;
            player.gold += gold;
            result.gold = gold;
            result.lines.push("The question mark tile gives you gold!".to_string());
            result.lines.push(format!("You obtained {gold} gold!"));
        } else if roll < 70 {
            let max_hp = player.stats.max_hp;
            let amount = rng.range_inclusive(max_hp / 4, max_hp / 2);
            let healed = player.stats.heal(amount);
            result.healed = healed;
            result.lines.push("The question mark tile heals you!".to_string());
            result.lines.push(format!("You recovered {healed} hp!"));
        } else {
            result.lines.push("The question mark tile has an item!".to_string());
            match items.get_random_item(rng) {
                Some(mut item) => {
                    item.adjust(level, rng);
                    let name = item.name.clone();
                    match player.inventory.add_item(item) {
                        Ok(_) => {
                            result.item_found = true;
                            result.lines.push(format!("You obtained {}!", name.to_uppercase()));
                        }
                        Err(_) => {
                            result.lines.push("But your inventory is full...".to_string());
                        }
                    }
                }
                None => result.lines.push("But it was empty...".to_string()),
            }
        }
        result
    }

    /// Exclamation mark: lose gold, take damage, or nothing
    ///
    /// The damage is never fatal.
    pub fn exclamation_mark(&self, player: &mut Player, rng: &mut GameRng) -> TileEventResult {
        let level = player.level.max(1);
        let mut result = TileEventResult::default();
        let roll = rng.below(100);

        if roll < 50 {
            let loss = rng.range_inclusive(1, level * 3).min(player.gold);
            player.gold -= loss;
            result.gold = -loss;
            result.lines.push("The exclamation mark tile was a trap!".to_string());
            result.lines.push(format!("You lost {loss} gold..."));
        } else if roll < 80 {
            let max_hp = player.stats.max_hp;
            let amount = rng.range_inclusive(max_hp / 10, max_hp / 5).max(1);
            let amount = amount.min(player.stats.hp - 1).max(0);
            player.stats.damage(amount);
            result.damage = amount;
            result.lines.push("The exclamation mark tile was a trap!".to_string());
            result.lines.push(format!("You took {amount} damage..."));
        } else {
            result.lines.push("The exclamation mark tile did nothing.".to_string());
            result.lines.push("Lucky!".to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, Rarity};

    fn map(text: &str) -> GameMap {
        GameMap::new(0, 0, TileMap::parse(text).unwrap())
    }

    fn player_at(pos: Position) -> (Player, GameRng) {
        let mut rng = GameRng::new(99);
        let mut player = Player::new(&mut rng);
        player.place(pos);
        (player, rng)
    }

    #[test]
    fn test_plain_step_and_walls() {
        let m = map("3 1\n0,0,1\n1,0,0");
        let (mut player, mut rng) = player_at((0, 0));

        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.path, vec![(1, 0)]);
        assert_eq!(out.event, MoveEvent::None);
        assert!(player.continue_moving);

        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::Blocked);
        assert!(!out.moved());
        assert_eq!(player.position, (1, 0));

        let out = m.try_move(&mut player, Direction::Up, &mut rng);
        assert_eq!(out.event, MoveEvent::Blocked);
        assert_eq!(player.facing, Direction::Up);
    }

    #[test]
    fn test_push_tiles_chain() {
        // right arrow, then down arrow, landing below
        let m = map("3 2\n0,104,102\n0,0,0\n1,0,0\n0,0,0");
        let (mut player, mut rng) = player_at((0, 0));

        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.path, vec![(1, 0), (2, 0), (2, 1)]);
        assert_eq!(out.event, MoveEvent::None);
        assert_eq!(player.position, (2, 1));
    }

    #[test]
    fn test_forced_move_into_wall_stops() {
        let m = map("3 1\n0,104,1\n1,0,0");
        let (mut player, mut rng) = player_at((0, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::Stop);
        assert_eq!(player.position, (1, 0));
        assert!(!player.continue_moving);
    }

    #[test]
    fn test_stop_tile() {
        let m = map("3 1\n0,101,0\n1,0,0");
        let (mut player, mut rng) = player_at((0, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::Stop);
        assert_eq!(player.position, (1, 0));
    }

    #[test]
    fn test_forced_loop_is_capped() {
        // two arrows pointing at each other
        let m = map("3 1\n0,104,105\n1,0,0");
        let (mut player, mut rng) = player_at((0, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.path.len(), MAX_FORCED_STEPS);
        assert_eq!(out.event, MoveEvent::Stop);
    }

    #[test]
    fn test_change_tile_goes_forward_or_back() {
        let m = map("3 1\n0,99,0\n1,0,0");
        for seed in 0..20 {
            let (mut player, _) = player_at((0, 0));
            let mut rng = GameRng::new(seed);
            let out = m.try_move(&mut player, Direction::Right, &mut rng);
            assert!(player.position == (0, 0) || player.position == (2, 0));
            assert_eq!(out.path[0], (1, 0));
            assert_eq!(out.event, MoveEvent::None);
        }
    }

    #[test]
    fn test_in_and_out_never_goes_back() {
        let m = map("3 3\n0,0,0\n0,100,0\n0,0,0\n0,0,0\n1,0,0\n0,0,0");
        for seed in 0..30 {
            let (mut player, _) = player_at((0, 1));
            let mut rng = GameRng::new(seed);
            m.try_move(&mut player, Direction::Right, &mut rng);
            assert_ne!(player.position, (0, 1));
            assert!([(2, 1), (1, 0), (1, 2)].contains(&player.position));
        }
    }

    #[test]
    fn test_battle_and_interaction() {
        let m = map("3 1\n0,0,106\n1,2,0");
        let (mut player, mut rng) = player_at((0, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::Battle { enemy: EnemyKind::Slime, at: (1, 0), from: (0, 0) });

        player.place((1, 0));
        let mut m = m;
        m.tile_map.remove_entity((1, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::Interaction(TileKind::QuestionMark));
        assert!(player.tile_interaction);

        m.clear_tile((2, 0));
        assert_eq!(m.tile_map.tile((2, 0)).unwrap().kind, TileKind::Normal);
    }

    #[test]
    fn test_teleport() {
        let m = map("4 1\n0,108,0,108\n1,0,0,0");
        let (mut player, mut rng) = player_at((0, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::Teleport { from: (1, 0), to: (3, 0) });
        assert_eq!(player.position, (3, 0));
        assert!(player.teleporting);

        // lone teleport tile does nothing
        let m = map("2 1\n0,108\n1,0");
        let (mut player, mut rng) = player_at((0, 0));
        let out = m.try_move(&mut player, Direction::Right, &mut rng);
        assert_eq!(out.event, MoveEvent::None);
        assert_eq!(player.position, (1, 0));
    }

    #[test]
    fn test_question_mark_rewards() {
        let m = map("1 1\n0\n1");
        let mut items = ItemRegistry::new();
        for rarity in Rarity::ALL {
            items.register(ItemDefinition::misc("pebble", "", rarity, 0, 1));
        }
        for seed in 0..40 {
            let (mut player, _) = player_at((0, 0));
            player.stats.damage(40);
            let mut rng = GameRng::new(seed);
            let result = m.question_mark(&mut player, &items, &mut rng);
            assert_eq!(result.lines.len(), 2);
            if result.gold > 0 {
                assert!((6..=10).contains(&result.gold));
                assert_eq!(player.gold, result.gold);
            } else if result.healed > 0 {
                assert!((16..=32).contains(&result.healed));
            } else {
                assert!(result.item_found);
                assert_eq!(player.inventory.num_items(), 1);
            }
        }
    }

    #[test]
    fn test_exclamation_mark_never_kills() {
        let m = map("1 1\n0\n1");
        for seed in 0..40 {
            let (mut player, _) = player_at((0, 0));
            player.stats.hp = 1;
            player.gold = 2;
            let mut rng = GameRng::new(seed);
            let result = m.exclamation_mark(&mut player, &mut rng);
            assert_eq!(player.stats.hp, 1);
            assert!(player.gold >= 0);
            assert_eq!(player.gold, 2 + result.gold);
        }
    }

    #[test]
    fn test_level_range_and_file_name() {
        assert_eq!(GameMap::level_range(0, 0), (1, 3));
        assert_eq!(GameMap::level_range(1, 2), (15, 17));
        assert_eq!(GameMap::file_name(0, 3), "maps/w0_m3.txt");
    }
}

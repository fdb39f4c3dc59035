// Debug console command execution

use log::{info, warn};

use super::Game;
use crate::command::{Command, CommandError};
use crate::entity::Enemy;
use crate::event::EventState;
use crate::inventory::inventory::NUM_SLOTS;
use crate::item::{Item, Rarity};
use crate::map::{GameMap, Position};

impl Game {
    /// Parses and runs one console line
    pub fn execute_line(&mut self, line: &str) -> Result<Command, CommandError> {
        let cmd = Command::parse(line).inspect_err(|e| warn!("Bad command {:?}: {}", line.trim(), e))?;
        match self.execute(cmd.clone()) {
            Ok(()) => {
                info!("Ran command {}", cmd);
                Ok(cmd)
            }
            Err(e) => {
                warn!("Command {} failed: {}", cmd, e);
                Err(e)
            }
        }
    }

    /// Applies a parsed command to the running game
    pub fn execute(&mut self, cmd: Command) -> Result<(), CommandError> {
        match cmd {
            Command::Heal => {
                let max_hp = self.player.stats.max_hp;
                self.player.stats.set_hp(max_hp);
            }
            Command::Teleport { x, y } => {
                let pos = self.checked_position(x, y)?;
                self.player.position = pos;
            }
            Command::SetHp(hp) => self.player.stats.set_hp(hp),
            Command::SetMaxHp(hp) => self.player.stats.set_max_hp(hp),
            Command::RandomItem => {
                let item = self.resources.items.get_random_item(&mut self.rng);
                self.give_item(item)?;
            }
            Command::Item(rarity) => {
                let item = self.resources.items.get_item(rarity, &mut self.rng);
                self.give_item(item)?;
            }
            Command::SetWeather(weather) => {
                let map = self.map.as_mut().ok_or(CommandError::Unavailable)?;
                map.set_weather(weather, &mut self.rng);
            }
            Command::AddEntity { kind, x, y } => {
                let pos = self.checked_position(x, y)?;
                let map = self.map_mut()?;
                if !map.tile_map.add_entity(pos, kind) {
                    warn!("Tile {:?} can't hold a {}", pos, kind.name());
                }
            }
            Command::RemoveEntity { x, y } => {
                let pos = self.checked_position(x, y)?;
                self.map_mut()?.tile_map.remove_entity(pos);
            }
            Command::ToggleNight(on) => self.map_mut()?.dark = on,
            Command::FillInventory => self.fill_inventory(None),
            Command::ClearInventory => self.player.inventory.clear(),
            Command::FillRarity(rarity) => self.fill_inventory(Some(rarity)),
            Command::LevelUp(exp) => {
                let previous_level = self.player.level;
                self.player.level_up(exp, &mut self.rng);
                self.player.apply_level_up(previous_level);
                self.statistics.record_level(self.player.level);
            }
            Command::Battle(kind) => {
                if self.state != EventState::Moving {
                    return Err(CommandError::Unavailable);
                }
                let map = self.map.as_ref().ok_or(CommandError::Unavailable)?;
                let level = map.enemy_level(&mut self.rng);
                self.start_battle(Enemy::new(kind, level), None)
                    .map_err(|_| CommandError::Unavailable)?;
            }
            Command::SetAccuracy(acc) => self.player.stats.accuracy = acc,
            Command::SetSmoveCd(cd) => self.player.smove_cd = cd,
            Command::AddSmove(smove) => {
                if !self.player.smoveset.add(smove) {
                    warn!("Special moveset is full");
                }
            }
            Command::SetSmoveset(smoves) => {
                self.player.smoveset.clear();
                for smove in smoves {
                    self.player.smoveset.add(smove);
                }
            }
            Command::ClearSmoveset => self.player.smoveset.clear(),
            Command::Exit => self.exit_requested = true,
        }
        Ok(())
    }

    // ======================================================================
    // Helpers
    // ======================================================================

    fn map_mut(&mut self) -> Result<&mut GameMap, CommandError> {
        self.map.as_mut().ok_or(CommandError::Unavailable)
    }

    fn checked_position(&self, x: i32, y: i32) -> Result<Position, CommandError> {
        let map = self.map.as_ref().ok_or(CommandError::Unavailable)?;
        if map.tile_map.in_bounds((x, y)) {
            Ok((x, y))
        } else {
            Err(CommandError::OutOfBounds(x, y))
        }
    }

    fn give_item(&mut self, item: Option<Item>) -> Result<(), CommandError> {
        let mut item = item.ok_or(CommandError::NoItem)?;
        item.adjust(self.player.level, &mut self.rng);
        self.player.inventory.add_item(item)?;
        Ok(())
    }

    /// Replaces the whole bag with random items, of one rarity if given
    fn fill_inventory(&mut self, rarity: Option<Rarity>) {
        self.player.inventory.clear();
        for _ in 0..NUM_SLOTS {
            let item = match rarity {
                Some(r) => self.resources.items.get_item(r, &mut self.rng),
                None => self.resources.items.get_random_item(&mut self.rng),
            };
            let Some(mut item) = item else {
                break;
            };
            item.adjust(self.player.level, &mut self.rng);
            if self.player.inventory.add_item(item).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::battle::SpecialMove;
    use crate::command::{Command, CommandError};
    use crate::entity::EnemyKind;
    use crate::event::EventState;
    use crate::game::test_support::game_on;
    use crate::inventory::inventory::NUM_SLOTS;
    use crate::item::Rarity;
    use crate::map::Weather;

    #[test]
    fn test_heal_and_hp() {
        let mut game = game_on("2 1\n0,0\n1,0");
        game.execute_line("/sethp 3").unwrap();
        assert_eq!(game.player.stats.hp, 3);
        game.execute_line("/HEAL").unwrap();
        assert_eq!(game.player.stats.hp, game.player.stats.max_hp);
        game.execute_line("/setmaxhp 500").unwrap();
        assert_eq!(game.player.stats.max_hp, 500);
    }

    #[test]
    fn test_teleport_checks_bounds() {
        let mut game = game_on("3 2\n0,0,0\n0,0,0\n1,0,0\n0,0,0");
        game.execute_line("/tp 2 1").unwrap();
        assert_eq!(game.player.position, (2, 1));
        assert!(matches!(game.execute_line("/tp 3 0"), Err(CommandError::OutOfBounds(3, 0))));
        assert!(matches!(game.execute_line("/tp -1 0"), Err(CommandError::OutOfBounds(-1, 0))));
        assert_eq!(game.player.position, (2, 1));
    }

    #[test]
    fn test_map_commands() {
        let mut game = game_on("3 1\n0,0,0\n1,0,0");
        game.execute(Command::AddEntity { kind: EnemyKind::Ghost, x: 2, y: 0 }).unwrap();
        assert_eq!(game.map.as_ref().unwrap().tile_map.entity_at((2, 0)), Some(EnemyKind::Ghost));
        game.execute_line("/removeentity 2 0").unwrap();
        assert_eq!(game.map.as_ref().unwrap().tile_map.num_entities(), 0);

        game.execute_line("/togglenight true").unwrap();
        assert!(game.map.as_ref().unwrap().dark);
        game.execute(Command::SetWeather(Weather::Snow)).unwrap();
        assert_eq!(game.map.as_ref().unwrap().weather, Weather::Snow);
    }

    #[test]
    fn test_map_commands_need_a_level() {
        let mut game = game_on("2 1\n0,0\n1,0");
        game.leave_level();
        assert!(matches!(game.execute_line("/togglenight false"), Err(CommandError::Unavailable)));
        assert!(matches!(game.execute_line("/tp 0 0"), Err(CommandError::Unavailable)));
        // player commands still work
        game.execute_line("/setacc 50").unwrap();
        assert_eq!(game.player.stats.accuracy, 50);
    }

    #[test]
    fn test_inventory_commands() {
        let mut game = game_on("2 1\n0,0\n1,0");
        game.execute_line("/randitem").unwrap();
        assert_eq!(game.player.inventory.num_items(), 1);

        game.execute(Command::FillRarity(Rarity::Epic)).unwrap();
        assert_eq!(game.player.inventory.num_items(), NUM_SLOTS);
        assert!(game.player.inventory.iter_items().all(|i| i.rarity == Rarity::Epic));
        assert!(matches!(game.execute_line("/item 0"), Err(CommandError::Inventory(_))));

        game.execute_line("/clearinv").unwrap();
        assert!(game.player.inventory.is_empty());
        game.execute_line("/fillinv").unwrap();
        assert!(game.player.inventory.is_full());
    }

    #[test]
    fn test_levelup_command() {
        let mut game = game_on("2 1\n0,0\n1,0");
        let max_hp = game.player.stats.max_hp;
        game.execute_line("/levelup 0").unwrap();
        assert_eq!(game.player.level, 2);
        assert!(game.player.stats.max_hp > max_hp);
        assert_eq!(game.player.stats.hp, game.player.stats.max_hp);
        assert_eq!(game.statistics.highest_level, 2);
    }

    #[test]
    fn test_smoveset_commands() {
        let mut game = game_on("2 1\n0,0\n1,0");
        game.execute_line("/setsmoveset 0 1 7").unwrap();
        let smoves: Vec<_> = game.player.smoveset.iter().collect();
        assert_eq!(smoves, vec![SpecialMove::Distract, SpecialMove::Focus, SpecialMove::Shield]);

        game.execute_line("/addsmove 4").unwrap();
        assert_eq!(game.player.smoveset.len(), 4);
        game.execute_line("/clearsmoveset").unwrap();
        assert!(game.player.smoveset.is_empty());

        game.execute_line("/setsmovecd 0").unwrap();
        assert_eq!(game.player.smove_cd, 0);
    }

    #[test]
    fn test_battle_and_exit() {
        let mut game = game_on("2 1\n0,0\n1,0");
        game.execute_line("/battle 4").unwrap();
        assert!(game.battle.as_ref().unwrap().enemy.is_boss());
        assert_eq!(game.state, EventState::Transition);
        // already fighting
        assert!(matches!(game.execute_line("/battle 2"), Err(CommandError::Unavailable)));

        assert!(!game.exit_requested);
        game.execute_line("/exit").unwrap();
        assert!(game.exit_requested);
    }
}

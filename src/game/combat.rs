// Driving a Battle from start to rewards
//
// Every battle action fills `Battle::messages`, which are played through
// the dialog box. Closing the dialog moves the battle on to the next step.

use log::info;

use super::Game;
use crate::battle::{Battle, BattleError, BattleOutcome, BattleState, SpecialMove};
use crate::entity::Enemy;
use crate::event::EventState;
use crate::map::Position;

impl Game {
    /// Starts a battle against `enemy`
    ///
    /// `tile` is where the enemy stands on the map, if anywhere; it is
    /// cleared when the enemy is defeated.
    pub fn start_battle(&mut self, enemy: Enemy, tile: Option<Position>) -> Result<(), BattleError> {
        let battle = Battle::new(
            &mut self.player,
            enemy.clone(),
            &self.resources.moves,
            &self.resources.boss_moves,
            &mut self.rng,
        )?;
        self.player.battling = Some(enemy);
        self.dialog.start(battle.messages.clone(), EventState::Battling, EventState::Battling);
        self.battle = Some(battle);
        self.battle_tile = tile;
        self.battle_result = None;
        let prev = if self.state == EventState::Transition { EventState::Moving } else { self.state };
        self.start_transition(prev, EventState::Battling);
        Ok(())
    }

    /// Whether the battle menu should take input
    pub fn awaiting_battle_input(&self) -> bool {
        self.state == EventState::Battling
            && !self.dialog.is_active()
            && self.battle.as_ref().is_some_and(|b| b.state == BattleState::PlayerTurn)
    }

    fn check_battle_input(&self) -> Result<(), BattleError> {
        if self.awaiting_battle_input() {
            Ok(())
        } else {
            Err(BattleError::NotPlayerTurn)
        }
    }

    fn show_battle_messages(&mut self) {
        let lines = self.battle.as_ref().map(|b| b.messages.clone()).unwrap_or_default();
        if lines.is_empty() {
            self.advance_battle();
        } else {
            self.dialog.start(lines, EventState::Battling, EventState::Battling);
        }
    }

    // ======================================================================
    // Player choices
    // ======================================================================

    pub fn battle_move(&mut self, index: usize) -> Result<(), BattleError> {
        self.check_battle_input()?;
        let Some(battle) = self.battle.as_mut() else {
            return Err(BattleError::NotPlayerTurn);
        };
        battle.player_move(index, &mut self.player, &mut self.rng)?;
        self.show_battle_messages();
        Ok(())
    }

    pub fn battle_special_move(&mut self, index: usize) -> Result<SpecialMove, BattleError> {
        self.check_battle_input()?;
        let Some(battle) = self.battle.as_mut() else {
            return Err(BattleError::NotPlayerTurn);
        };
        let smove = battle.player_special_move(index, &mut self.player)?;
        self.show_battle_messages();
        Ok(smove)
    }

    pub fn battle_run(&mut self) -> Result<bool, BattleError> {
        self.check_battle_input()?;
        let Some(battle) = self.battle.as_mut() else {
            return Err(BattleError::NotPlayerTurn);
        };
        let fled = battle.run(&self.player, &mut self.rng)?;
        self.show_battle_messages();
        Ok(fled)
    }

    // ======================================================================
    // Battle progression
    // ======================================================================

    /// Moves the battle along after its messages were read
    pub(crate) fn advance_battle(&mut self) {
        let Some(battle) = self.battle.as_mut() else {
            self.state = EventState::Moving;
            return;
        };
        match battle.state {
            BattleState::Intro => battle.begin(),
            BattleState::PlayerTurn => {}
            BattleState::EnemyTurn => {
                if battle.enemy_turn(&mut self.player, &mut self.rng).is_ok() {
                    self.show_battle_messages();
                }
            }
            BattleState::Victory | BattleState::Defeat | BattleState::Fled => {
                let Some(result) = battle.finish(&mut self.player, &self.resources.items, &mut self.rng) else {
                    return;
                };
                self.statistics.record_battle(&result, &battle.tally);

                let cleared = match result.outcome {
                    BattleOutcome::Victory => self.clear_enemy_tile(),
                    _ => None,
                };
                if let (Some(line), Some(battle)) = (cleared, self.battle.as_mut()) {
                    battle.messages.push(line);
                }
                self.battle_result = Some(result);
                self.show_battle_messages();
            }
            BattleState::Finished => self.end_battle(),
        }
    }

    /// Removes a defeated map enemy; returns a line if that cleared the level
    fn clear_enemy_tile(&mut self) -> Option<String> {
        let pos = self.battle_tile.take()?;
        let map = self.map.as_mut()?;
        map.tile_map.remove_entity(pos);
        if map.tile_map.num_entities() > 0 {
            return None;
        }
        let (world, level) = (map.world, map.level);
        info!("World {} level {} cleared", world, level);
        if self.progress.complete(world, level) {
            Some("You cleared the level! A new level is unlocked.".to_string())
        } else {
            Some("You cleared the level!".to_string())
        }
    }

    fn end_battle(&mut self) {
        self.battle = None;
        self.battle_tile = None;
        self.player.finish_battling();

        let next = match self.battle_result.take() {
            Some(result) if result.outcome == BattleOutcome::Defeat => EventState::Death,
            Some(result) if result.level_up.is_some() => {
                self.level_up = result.level_up;
                EventState::LevelUp
            }
            _ => EventState::Moving,
        };
        self.start_transition(EventState::Battling, next);
    }
}

#[cfg(test)]
mod tests {
    use crate::battle::{BattleError, BattleState};
    use crate::entity::{Enemy, EnemyKind};
    use crate::event::EventState;
    use crate::game::test_support::game_on;
    use crate::game::Game;

    /// Runs transitions and reads every dialog line until input is needed
    fn settle(game: &mut Game) {
        for _ in 0..200 {
            if game.state == EventState::Transition {
                game.update(0.5);
            } else if game.dialog.is_active() {
                game.skip_dialog();
                game.advance_dialog();
            } else {
                return;
            }
        }
    }

    #[test]
    fn test_battle_needs_player_turn() {
        let mut game = game_on("3 1\n0,0,0\n1,0,0");
        game.start_battle(Enemy::new(EnemyKind::Slime, 1), None).unwrap();
        // intro still showing
        assert_eq!(game.battle_move(0), Err(BattleError::NotPlayerTurn));
        settle(&mut game);
        assert!(game.awaiting_battle_input());
        assert_eq!(game.battle.as_ref().unwrap().state, BattleState::PlayerTurn);
    }

    #[test]
    fn test_victory_clears_tile_and_unlocks_next_level() {
        let mut game = game_on("3 1\n0,0,0\n1,2,0");
        game.start_battle(Enemy::new(EnemyKind::Slime, 1), Some((1, 0))).unwrap();
        settle(&mut game);

        game.battle.as_mut().unwrap().enemy.stats.hp = 1;
        game.player.stats.accuracy = 100;
        let attack = game.player.moveset.moves.iter().position(|m| !m.is_heal()).unwrap();
        game.battle_move(attack).unwrap();
        settle(&mut game);

        assert!(game.battle.is_none());
        assert!(!game.player.is_battling());
        assert!(matches!(game.state, EventState::Moving | EventState::LevelUp));
        assert_eq!(game.map.as_ref().unwrap().tile_map.num_entities(), 0);
        assert_eq!(game.statistics.enemies_defeated, 1);
        assert!(game.progress.is_level_unlocked(0, 1));
    }

    #[test]
    fn test_defeat_goes_to_death_then_respawn() {
        let mut game = game_on("3 1\n0,0,0\n1,0,0");
        game.player.gold = 100;
        game.player.place((2, 0));
        game.start_battle(Enemy::new(EnemyKind::Ghost, 5), None).unwrap();
        settle(&mut game);

        game.player.stats.hp = 1;
        game.battle.as_mut().unwrap().enemy.stats.accuracy = 1000;
        game.battle.as_mut().unwrap().enemy.stats.hp = 10_000;
        game.player.stats.accuracy = 0;
        while game.state != EventState::Death {
            game.battle_move(0).ok();
            settle(&mut game);
        }
        assert_eq!(game.player.gold, 90);
        assert_eq!(game.statistics.deaths, 1);
        assert_eq!(game.player.stats.hp, game.player.stats.max_hp);

        game.respawn();
        settle(&mut game);
        assert_eq!(game.state, EventState::Moving);
        assert_eq!(game.player.position, (0, 0));
    }
}

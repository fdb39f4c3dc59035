//! One encounter between the player and an enemy
//!
//! The battle is a small state machine driven by the front-end: each call
//! (`player_move`, `enemy_turn`, ...) fills `messages` with the lines to show
//! in the dialog box and moves `state` forward. Nothing here owns the
//! player; it is passed in for every action.

use std::collections::BTreeMap;
use log::{debug, info};

use super::error::BattleError;
use super::moves::{Move, MoveKind, MovePool};
use super::special::{
    SpecialMove, DISTRACT_ACCURACY, INTIMIDATE_BONUS, SACRIFICE_COST, SHIELD_PERCENT, STUN_CHANCE,
};
use crate::entity::{Enemy, LevelUpSummary, Player};
use crate::item::ItemRegistry;
use crate::rng::GameRng;

/// Crit moves multiply their damage by this on a crit
pub const CRIT_MULTIPLIER: i32 = 3;
/// Base percent chance to run away
pub const RUN_BASE_CHANCE: i32 = 7;
pub const RUN_MAX_CHANCE: i32 = 30;
/// Percent chance an enemy drops an item
pub const ITEM_DROP_CHANCE: i32 = 30;
/// Percent of gold lost on defeat
pub const DEATH_GOLD_PENALTY: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    /// Enemy introduction is showing
    Intro,
    PlayerTurn,
    EnemyTurn,
    /// Enemy died; rewards not yet handed out
    Victory,
    /// Player died; penalty not yet applied
    Defeat,
    /// Player ran away
    Fled,
    /// Outcome resolved, battle can be dropped
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

/// What the end of a battle did to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub exp: i32,
    /// Gold gained (negative on defeat)
    pub gold: i32,
    /// Name of the dropped item, if it made it into the inventory
    pub item: Option<String>,
    pub level_up: Option<LevelUpSummary>,
    pub boss: bool,
}

/// Special move effects waiting to trigger
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Effects {
    distract: bool,
    focus: bool,
    intimidate: bool,
    reflect: bool,
    stun: bool,
    invert: bool,
    sacrifice: Option<f32>,
    shield: i32,
}

/// Running totals for the statistics screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleTally {
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub hp_healed: i32,
}

#[derive(Debug, Clone)]
pub struct Battle {
    pub enemy: Enemy,
    pub state: BattleState,
    /// Lines produced by the last action
    pub messages: Vec<String>,
    pub turn: u32,
    pub turns_since_smove: u32,
    pub tally: BattleTally,
    effects: Effects,
}

impl Battle {
    /// Sets up a battle, rolling fresh movesets for both sides
    pub fn new(
        player: &mut Player,
        mut enemy: Enemy,
        pool: &MovePool,
        boss_pools: &BTreeMap<String, Vec<Move>>,
        rng: &mut GameRng,
    ) -> Result<Self, BattleError> {
        let ps = &player.stats;
        player.moveset.reset(ps.min_damage, ps.max_damage, ps.max_hp, pool, rng)?;

        let es = &enemy.stats;
        let (min, max, hp) = (es.min_damage, es.max_damage, es.max_hp);
        match enemy.kind.boss_pool() {
            Some(name) => {
                let boss = boss_pools.get(name).ok_or_else(|| BattleError::UnknownBossPool(name.to_string()))?;
                enemy.moveset.reset_from(min, max, hp, boss, rng)?;
            }
            None => enemy.moveset.reset(min, max, hp, pool, rng)?,
        }

        info!("Battle started against {} LV.{}", enemy.name(), enemy.level);
        let intro = if enemy.is_boss() {
            format!("The boss {} LV.{} blocks your path!", enemy.name(), enemy.level)
        } else {
            format!("A wild {} LV.{} appeared!", enemy.name(), enemy.level)
        };

        Ok(Battle {
            enemy,
            state: BattleState::Intro,
            messages: vec![intro],
            turn: 0,
            turns_since_smove: player.smove_cd,
            tally: BattleTally::default(),
            effects: Effects::default(),
        })
    }

    /// Leaves the intro and hands the first turn to the player
    pub fn begin(&mut self) {
        if self.state == BattleState::Intro {
            self.state = BattleState::PlayerTurn;
            self.messages.clear();
        }
    }

    /// Whether a special move can be used this turn
    pub fn smove_ready(&self, player: &Player) -> bool {
        self.turns_since_smove >= player.smove_cd
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.state,
            BattleState::Victory | BattleState::Defeat | BattleState::Fled | BattleState::Finished
        )
    }

    fn expect_player_turn(&self) -> Result<(), BattleError> {
        if self.state == BattleState::PlayerTurn {
            Ok(())
        } else {
            Err(BattleError::NotPlayerTurn)
        }
    }

    // ======================================================================
    // Player actions
    // ======================================================================

    /// Uses one of the player's four moves
    pub fn player_move(&mut self, index: usize, player: &mut Player, rng: &mut GameRng) -> Result<(), BattleError> {
        self.expect_player_turn()?;
        let m = player.moveset.get(index).cloned().ok_or(BattleError::InvalidMove(index))?;

        self.messages.clear();
        self.turn += 1;
        self.turns_since_smove += 1;

        if m.is_heal() {
            let healed = player.stats.heal(rng.range_inclusive(m.min_heal, m.max_heal));
            self.tally.hp_healed += healed;
            self.messages.push(format!("You used {} and healed {} hp!", m.name.to_uppercase(), healed));
        } else {
            let effects = std::mem::take(&mut self.effects);
            // enemy-side effects stay armed
            self.effects = Effects {
                focus: false,
                intimidate: false,
                sacrifice: None,
                ..effects
            };

            if !effects.focus && !rng.percent(player.stats.accuracy) {
                self.messages.push(format!("You used {} but it missed!", m.name.to_uppercase()));
            } else {
                let mut damage = rng.range_inclusive(m.min_damage, m.max_damage);
                let crit = m.kind == MoveKind::Crit && (effects.focus || rng.percent(m.crit_chance));
                if crit {
                    damage *= CRIT_MULTIPLIER;
                }
                if effects.intimidate {
                    damage = damage * (100 + INTIMIDATE_BONUS) / 100;
                }
                if let Some(multiplier) = effects.sacrifice {
                    damage = (damage as f32 * multiplier).round() as i32;
                }

                let dealt = self.enemy.stats.damage(damage).damage_dealt;
                self.tally.damage_dealt += dealt;
                if crit {
                    self.messages.push("A critical strike!".to_string());
                }
                self.messages.push(format!("You used {} and dealt {} damage!", m.name.to_uppercase(), dealt));
            }
        }

        if self.enemy.is_dead() {
            self.messages.push(format!("You defeated {}!", self.enemy.name()));
            self.state = BattleState::Victory;
        } else {
            self.state = BattleState::EnemyTurn;
        }
        Ok(())
    }

    /// Uses a special move from the player's special moveset
    ///
    /// Doesn't use up the turn; the player still picks a move after.
    pub fn player_special_move(&mut self, index: usize, player: &mut Player) -> Result<SpecialMove, BattleError> {
        self.expect_player_turn()?;
        let smove = player.smoveset.get(index).ok_or(BattleError::InvalidSpecialMove(index))?;
        if !self.smove_ready(player) {
            return Err(BattleError::SpecialMoveOnCooldown(player.smove_cd - self.turns_since_smove));
        }

        self.turns_since_smove = 0;
        self.messages.clear();
        self.messages.push(format!("You used {}!", smove.name()));

        match smove {
            SpecialMove::Distract => self.effects.distract = true,
            SpecialMove::Focus => self.effects.focus = true,
            SpecialMove::Intimidate => self.effects.intimidate = true,
            SpecialMove::Reflect => self.effects.reflect = true,
            SpecialMove::Stun => self.effects.stun = true,
            SpecialMove::Invert => self.effects.invert = true,
            SpecialMove::Sacrifice => {
                let hp = player.stats.hp;
                let lost = (hp * SACRIFICE_COST / 100).min(hp - 1).max(0);
                player.stats.damage(lost);
                self.tally.damage_taken += lost;
                let multiplier = 1.0 + lost as f32 / player.stats.max_hp.max(1) as f32 * 2.0;
                self.effects.sacrifice = Some(multiplier);
                self.messages.push(format!("You sacrificed {lost} hp."));
            }
            SpecialMove::Shield => {
                self.effects.shield = player.stats.max_hp * SHIELD_PERCENT / 100;
                self.messages.push(format!("A shield absorbs up to {} damage.", self.effects.shield));
            }
        }
        debug!("Special move {} used on turn {}", smove.name(), self.turn);
        Ok(smove)
    }

    /// Tries to run away
    ///
    /// Higher level players run more easily, capped at `RUN_MAX_CHANCE`.
    pub fn run(&mut self, player: &Player, rng: &mut GameRng) -> Result<bool, BattleError> {
        self.expect_player_turn()?;
        self.messages.clear();
        self.turn += 1;
        self.turns_since_smove += 1;

        if rng.percent(Self::run_chance(player.level, self.enemy.level)) {
            self.messages.push("You successfully ran away!".to_string());
            self.state = BattleState::Fled;
            Ok(true)
        } else {
            self.messages.push("You couldn't get away!".to_string());
            self.state = BattleState::EnemyTurn;
            Ok(false)
        }
    }

    pub fn run_chance(player_level: i32, enemy_level: i32) -> i32 {
        let bonus = (player_level - enemy_level).max(0) * 2;
        (RUN_BASE_CHANCE + bonus).min(RUN_MAX_CHANCE)
    }

    // ======================================================================
    // Enemy turn
    // ======================================================================

    /// The enemy picks a random move from its moveset
    pub fn enemy_turn(&mut self, player: &mut Player, rng: &mut GameRng) -> Result<(), BattleError> {
        if self.state != BattleState::EnemyTurn {
            return Err(BattleError::NotEnemyTurn);
        }
        self.messages.clear();
        let name = self.enemy.name();

        if self.effects.stun {
            self.effects.stun = false;
            if rng.percent(STUN_CHANCE) {
                self.messages.push(format!("{name} is stunned and can't move!"));
                self.end_round(player);
                return Ok(());
            }
        }

        let moves = &self.enemy.moveset.moves;
        if moves.is_empty() {
            self.messages.push(format!("{name} does nothing."));
            self.end_round(player);
            return Ok(());
        }
        let m = moves[rng.below(moves.len())].clone();

        if m.is_heal() {
            let healed = self.enemy.stats.heal(rng.range_inclusive(m.min_heal, m.max_heal));
            self.messages.push(format!("{name} used {} and healed {} hp!", m.name.to_uppercase(), healed));
        } else {
            let mut accuracy = self.enemy.stats.accuracy;
            if self.effects.distract {
                self.effects.distract = false;
                accuracy -= DISTRACT_ACCURACY;
            }

            if !rng.percent(accuracy) {
                self.messages.push(format!("{name} used {} but it missed!", m.name.to_uppercase()));
            } else {
                let mut damage = rng.range_inclusive(m.min_damage, m.max_damage);
                if m.kind == MoveKind::Crit && rng.percent(m.crit_chance) {
                    damage *= CRIT_MULTIPLIER;
                    self.messages.push("A critical strike!".to_string());
                }
                self.enemy_hits(&m, damage, player);
            }
        }

        self.end_round(player);
        Ok(())
    }

    fn enemy_hits(&mut self, m: &Move, damage: i32, player: &mut Player) {
        let name = self.enemy.name();
        let move_name = m.name.to_uppercase();

        if self.effects.reflect {
            self.effects.reflect = false;
            let dealt = self.enemy.stats.damage(damage).damage_dealt;
            self.tally.damage_dealt += dealt;
            self.messages.push(format!("{name} used {move_name} but {dealt} damage was reflected back!"));
        } else if self.effects.invert {
            self.effects.invert = false;
            let healed = player.stats.heal(damage);
            self.tally.hp_healed += healed;
            self.messages.push(format!("{name} used {move_name} but it healed you for {healed} hp!"));
        } else {
            let absorbed = self.effects.shield.min(damage);
            self.effects.shield -= absorbed;
            let dealt = player.stats.damage(damage - absorbed).damage_dealt;
            self.tally.damage_taken += dealt;
            if absorbed > 0 {
                self.messages.push(format!("Your shield absorbed {absorbed} damage."));
            }
            self.messages.push(format!("{name} used {move_name} and dealt {dealt} damage!"));
        }
    }

    fn end_round(&mut self, player: &Player) {
        self.effects.shield = 0;
        if player.is_dead() {
            self.messages.push("You were defeated...".to_string());
            self.state = BattleState::Defeat;
        } else if self.enemy.is_dead() {
            self.messages.push(format!("You defeated {}!", self.enemy.name()));
            self.state = BattleState::Victory;
        } else {
            self.state = BattleState::PlayerTurn;
        }
    }

    // ======================================================================
    // Outcome
    // ======================================================================

    /// Hands out rewards or penalties once the battle has ended
    ///
    /// Returns `None` while the battle is still going (or already finished).
    pub fn finish(&mut self, player: &mut Player, items: &ItemRegistry, rng: &mut GameRng) -> Option<BattleResult> {
        let boss = self.enemy.is_boss();
        let result = match self.state {
            BattleState::Victory => {
                let exp = self.enemy.exp_reward(rng);
                let gold = self.enemy.gold_reward(rng);
                player.gold += gold;
                self.messages = vec![format!("You gained {exp} exp and {gold} gold!")];

                let mut item = None;
                if rng.percent(ITEM_DROP_CHANCE) {
                    if let Some(mut drop) = items.get_random_item(rng) {
                        drop.adjust(self.enemy.level, rng);
                        let name = drop.name.clone();
                        match player.inventory.add_item(drop) {
                            Ok(_) => {
                                self.messages.push(format!("{} dropped {}!", self.enemy.name(), name.to_uppercase()));
                                item = Some(name);
                            }
                            Err(_) => info!("Dropped {name} lost, inventory full"),
                        }
                    }
                }

                let level_up = player.add_exp(exp, rng);
                if let Some(summary) = &level_up {
                    self.messages.extend(summary.lines());
                }
                BattleResult { outcome: BattleOutcome::Victory, exp, gold, item, level_up, boss }
            }
            BattleState::Defeat => {
                let lost = player.gold * DEATH_GOLD_PENALTY / 100;
                player.gold -= lost;
                player.exp = 0;
                player.revive();
                self.messages = vec![
                    "You have died...".to_string(),
                    format!("You lost {lost} gold and all your exp progress."),
                ];
                BattleResult { outcome: BattleOutcome::Defeat, exp: 0, gold: -lost, item: None, level_up: None, boss }
            }
            BattleState::Fled => {
                self.messages.clear();
                BattleResult { outcome: BattleOutcome::Fled, exp: 0, gold: 0, item: None, level_up: None, boss }
            }
            _ => return None,
        };

        info!("Battle against {} ended: {:?}", self.enemy.name(), result.outcome);
        self.state = BattleState::Finished;
        Some(result)
    }
}

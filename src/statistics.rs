use serde::{Deserialize, Serialize};

use crate::battle::{BattleOutcome, BattleResult, BattleTally};
use crate::map::TileEventResult;

/// Lifetime counters shown on the statistics screen and kept in the save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub enemies_defeated: u32,
    pub bosses_defeated: u32,
    pub battles_fled: u32,
    pub deaths: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub hp_healed: u64,
    pub gold_earned: u64,
    pub items_found: u32,
    pub tiles_walked: u64,
    pub highest_level: i32,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the outcome and running totals of a finished battle
    pub fn record_battle(&mut self, result: &BattleResult, tally: &BattleTally) {
        match result.outcome {
            BattleOutcome::Victory => {
                self.enemies_defeated += 1;
                if result.boss {
                    self.bosses_defeated += 1;
                }
            }
            BattleOutcome::Defeat => self.deaths += 1,
            BattleOutcome::Fled => self.battles_fled += 1,
        }
        self.damage_dealt += tally.damage_dealt.max(0) as u64;
        self.damage_taken += tally.damage_taken.max(0) as u64;
        self.hp_healed += tally.hp_healed.max(0) as u64;
        self.gold_earned += result.gold.max(0) as u64;
        if result.item.is_some() {
            self.items_found += 1;
        }
        if let Some(summary) = &result.level_up {
            self.record_level(summary.new_level);
        }
    }

    pub fn record_tile_event(&mut self, result: &TileEventResult) {
        self.gold_earned += result.gold.max(0) as u64;
        self.hp_healed += result.healed.max(0) as u64;
        self.damage_taken += result.damage.max(0) as u64;
        if result.item_found {
            self.items_found += 1;
        }
    }

    pub fn record_steps(&mut self, tiles: usize) {
        self.tiles_walked += tiles as u64;
    }

    pub fn record_level(&mut self, level: i32) {
        self.highest_level = self.highest_level.max(level);
    }

    /// Label and value rows for the statistics screen
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ENEMIES DEFEATED", self.enemies_defeated.to_string()),
            ("BOSSES DEFEATED", self.bosses_defeated.to_string()),
            ("BATTLES FLED", self.battles_fled.to_string()),
            ("DEATHS", self.deaths.to_string()),
            ("DAMAGE DEALT", self.damage_dealt.to_string()),
            ("DAMAGE TAKEN", self.damage_taken.to_string()),
            ("HP HEALED", self.hp_healed.to_string()),
            ("GOLD EARNED", self.gold_earned.to_string()),
            ("ITEMS FOUND", self.items_found.to_string()),
            ("TILES WALKED", self.tiles_walked.to_string()),
            ("HIGHEST LEVEL", self.highest_level.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: BattleOutcome, gold: i32, boss: bool) -> BattleResult {
        BattleResult { outcome, exp: 0, gold, item: None, level_up: None, boss }
    }

    #[test]
    fn test_record_battles() {
        let mut stats = Statistics::new();
        let tally = BattleTally { damage_dealt: 40, damage_taken: 12, hp_healed: 5 };

        stats.record_battle(&result(BattleOutcome::Victory, 7, true), &tally);
        stats.record_battle(&result(BattleOutcome::Fled, 0, false), &BattleTally::default());
        stats.record_battle(&result(BattleOutcome::Defeat, -3, false), &tally);

        assert_eq!(stats.enemies_defeated, 1);
        assert_eq!(stats.bosses_defeated, 1);
        assert_eq!(stats.battles_fled, 1);
        assert_eq!(stats.deaths, 1);
        assert_eq!(stats.damage_dealt, 80);
        assert_eq!(stats.damage_taken, 24);
        // gold lost on death doesn't count against earnings
        assert_eq!(stats.gold_earned, 7);
    }

    #[test]
    fn test_record_tile_event_and_steps() {
        let mut stats = Statistics::new();
        stats.record_tile_event(&TileEventResult { gold: 10, healed: 4, item_found: true, ..Default::default() });
        stats.record_tile_event(&TileEventResult { gold: -5, damage: 3, ..Default::default() });
        stats.record_steps(3);
        stats.record_level(4);
        stats.record_level(2);

        assert_eq!(stats.gold_earned, 10);
        assert_eq!(stats.hp_healed, 4);
        assert_eq!(stats.damage_taken, 3);
        assert_eq!(stats.items_found, 1);
        assert_eq!(stats.tiles_walked, 3);
        assert_eq!(stats.highest_level, 4);
        assert_eq!(stats.rows().len(), 11);
    }
}

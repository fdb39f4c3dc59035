//! Combat stats shared by the player and enemies
//!
//! Everything is integer based: hp, a damage range that seeds movesets,
//! and a hit chance in percent.

use serde::{Deserialize, Serialize};

/// Result of a damage operation
///
/// Provides detailed information about damage dealt, useful for:
/// - Battle log lines
/// - Game logic (death handling)
/// - Statistics tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    /// Actual damage dealt (may be less than requested if target had less hp)
    pub damage_dealt: i32,
    /// Whether this damage killed the target
    pub is_fatal: bool,
    /// Excess damage beyond what was needed to kill (0 if not fatal)
    pub overkill: i32,
}

impl DamageResult {
    /// Creates a result representing no damage dealt
    pub fn no_damage() -> Self {
        DamageResult {
            damage_dealt: 0,
            is_fatal: false,
            overkill: 0,
        }
    }
}

/// Container for combat stats
///
/// # Example
///
/// ```rust
/// use unlucky::entity::Stats;
///
/// let mut stats = Stats::new(100, 5, 8, 80);
/// let result = stats.damage(150);
/// assert_eq!(result.damage_dealt, 100);
/// assert!(result.is_fatal);
/// assert_eq!(result.overkill, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    /// Hit chance in percent
    pub accuracy: i32,
}

impl Stats {
    /// Creates stats at full health
    pub fn new(max_hp: i32, min_damage: i32, max_damage: i32, accuracy: i32) -> Self {
        Stats {
            hp: max_hp,
            max_hp,
            min_damage,
            max_damage,
            accuracy,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Applies damage, never dropping hp below 0
    pub fn damage(&mut self, amount: i32) -> DamageResult {
        if amount <= 0 {
            return DamageResult::no_damage();
        }
        let old_hp = self.hp;
        self.hp = (self.hp - amount).max(0);

        DamageResult {
            damage_dealt: old_hp - self.hp,
            is_fatal: self.hp <= 0,
            overkill: if self.hp <= 0 { amount - old_hp } else { 0 },
        }
    }

    /// Heals hp, capped at max hp
    ///
    /// Returns the actual amount healed (which may be less than requested
    /// if already near max hp)
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let old_hp = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - old_hp
    }

    /// Sets the maximum hp and caps current hp if needed
    pub fn set_max_hp(&mut self, max_hp: i32) {
        self.max_hp = max_hp.max(1);
        if self.hp > self.max_hp {
            self.hp = self.max_hp;
        }
    }

    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Returns hp as a fraction (0.0 to 1.0)
    pub fn hp_percentage(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

use serde::{Deserialize, Serialize};

use super::stats::Stats;
use crate::battle::Moveset;
use crate::rng::GameRng;

/// The kinds of enemies that can stand on a map tile
///
/// Map entity ids: 2 slime, 3 ghost, 4 king slime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Ghost,
    /// Boss; fights with the "slime" boss move pool
    KingSlime,
}

/// Base stats of an enemy kind before level scaling
struct Template {
    name: &'static str,
    base_hp: i32,
    hp_per_level: i32,
    min_damage: i32,
    max_damage: i32,
    damage_per_level: i32,
    accuracy: i32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Slime, EnemyKind::Ghost, EnemyKind::KingSlime];

    pub fn from_id(id: i32) -> Option<EnemyKind> {
        match id {
            2 => Some(EnemyKind::Slime),
            3 => Some(EnemyKind::Ghost),
            4 => Some(EnemyKind::KingSlime),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            EnemyKind::Slime => 2,
            EnemyKind::Ghost => 3,
            EnemyKind::KingSlime => 4,
        }
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::KingSlime
    }

    /// Name of the boss move pool in `boss_moves.json`
    pub fn boss_pool(self) -> Option<&'static str> {
        match self {
            EnemyKind::KingSlime => Some("slime"),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.template().name
    }

    fn template(self) -> Template {
        match self {
            EnemyKind::Slime => Template {
                name: "SLIME",
                base_hp: 30,
                hp_per_level: 6,
                min_damage: 3,
                max_damage: 5,
                damage_per_level: 2,
                accuracy: 70,
            },
            EnemyKind::Ghost => Template {
                name: "GHOST",
                base_hp: 24,
                hp_per_level: 5,
                min_damage: 4,
                max_damage: 7,
                damage_per_level: 2,
                accuracy: 75,
            },
            EnemyKind::KingSlime => Template {
                name: "KING SLIME",
                base_hp: 80,
                hp_per_level: 14,
                min_damage: 5,
                max_damage: 8,
                damage_per_level: 3,
                accuracy: 75,
            },
        }
    }
}

/// An opponent in battle
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub level: i32,
    pub stats: Stats,
    pub moveset: Moveset,
}

impl Enemy {
    /// Creates an enemy with stats scaled to `level` (at least 1)
    pub fn new(kind: EnemyKind, level: i32) -> Self {
        let level = level.max(1);
        let t = kind.template();
        Enemy {
            kind,
            level,
            stats: Stats::new(
                t.base_hp + level * t.hp_per_level,
                t.min_damage + level * t.damage_per_level,
                t.max_damage + level * t.damage_per_level,
                t.accuracy,
            ),
            moveset: Moveset::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    pub fn is_dead(&self) -> bool {
        self.stats.is_dead()
    }

    /// Exp granted on defeat: `rand(2L..=4L) + 5`, tripled for bosses
    pub fn exp_reward(&self, rng: &mut GameRng) -> i32 {
        let exp = rng.range_inclusive(self.level * 2, self.level * 4) + 5;
        if self.is_boss() { exp * 3 } else { exp }
    }

    /// Gold granted on defeat: `rand(L..=3L)`, tripled for bosses
    pub fn gold_reward(&self, rng: &mut GameRng) -> i32 {
        let gold = rng.range_inclusive(self.level, self.level * 3);
        if self.is_boss() { gold * 3 } else { gold }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids() {
        for kind in EnemyKind::ALL {
            assert_eq!(EnemyKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(EnemyKind::from_id(1), None);
        assert_eq!(EnemyKind::KingSlime.boss_pool(), Some("slime"));
        assert_eq!(EnemyKind::Ghost.boss_pool(), None);
    }

    #[test]
    fn test_stats_scale_with_level() {
        let low = Enemy::new(EnemyKind::Slime, 1);
        let high = Enemy::new(EnemyKind::Slime, 10);
        assert_eq!(low.stats.max_hp, 36);
        assert_eq!(high.stats.max_hp, 90);
        assert_eq!(high.stats.min_damage - low.stats.min_damage, 18);
        assert_eq!(high.stats.accuracy, low.stats.accuracy);
        assert_eq!(Enemy::new(EnemyKind::Ghost, -2).level, 1);
    }

    #[test]
    fn test_rewards() {
        let mut rng = GameRng::new(6);
        let slime = Enemy::new(EnemyKind::Slime, 3);
        let boss = Enemy::new(EnemyKind::KingSlime, 3);
        for _ in 0..100 {
            assert!((11..=17).contains(&slime.exp_reward(&mut rng)));
            assert!((3..=9).contains(&slime.gold_reward(&mut rng)));
            assert!((33..=51).contains(&boss.exp_reward(&mut rng)));
            let gold = boss.gold_reward(&mut rng);
            assert!((9..=27).contains(&gold) && gold % 3 == 0);
        }
    }
}

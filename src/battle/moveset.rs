use serde::{Deserialize, Serialize};

use super::error::BattleError;
use super::moves::{Move, MovePool};
use crate::rng::GameRng;

/// Number of moves in a moveset
pub const MOVESET_SIZE: usize = 4;

/// The four random moves a combatant gets for one battle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Moveset {
    pub moves: Vec<Move>,
}

impl Moveset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolls four distinct moves from the regular pool
    ///
    /// Each pick is removed from the candidates, so no move repeats. Damage
    /// moves get their own seed in `min_dmg..=max_dmg`; heals scale off
    /// `max_hp`.
    pub fn reset(
        &mut self,
        min_dmg: i32,
        max_dmg: i32,
        max_hp: i32,
        pool: &MovePool,
        rng: &mut GameRng,
    ) -> Result<(), BattleError> {
        let mut all = pool.all();
        if all.len() < MOVESET_SIZE {
            return Err(BattleError::PoolTooSmall { needed: MOVESET_SIZE, available: all.len() });
        }

        let mut picked = Vec::with_capacity(MOVESET_SIZE);
        for _ in 0..MOVESET_SIZE {
            let index = rng.below(all.len());
            picked.push(all.remove(index));
        }

        self.moves = picked;
        self.resolve(min_dmg, max_dmg, max_hp, rng);
        Ok(())
    }

    /// Rolls four moves from a boss pool
    ///
    /// Boss pools may be small, so picks are drawn with replacement when
    /// there are fewer than four moves.
    pub fn reset_from(
        &mut self,
        min_dmg: i32,
        max_dmg: i32,
        max_hp: i32,
        pool: &[Move],
        rng: &mut GameRng,
    ) -> Result<(), BattleError> {
        if pool.is_empty() {
            return Err(BattleError::PoolTooSmall { needed: 1, available: 0 });
        }

        let mut candidates = pool.to_vec();
        let with_replacement = candidates.len() < MOVESET_SIZE;
        let mut picked = Vec::with_capacity(MOVESET_SIZE);
        for _ in 0..MOVESET_SIZE {
            let index = rng.below(candidates.len());
            if with_replacement {
                picked.push(candidates[index].clone());
            } else {
                picked.push(candidates.remove(index));
            }
        }

        self.moves = picked;
        self.resolve(min_dmg, max_dmg, max_hp, rng);
        Ok(())
    }

    fn resolve(&mut self, min_dmg: i32, max_dmg: i32, max_hp: i32, rng: &mut GameRng) {
        for m in &mut self.moves {
            if m.is_heal() {
                m.set_heal(max_hp);
            } else {
                m.set_damage(rng.range_inclusive(min_dmg, max_dmg));
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Move> {
        self.moves.get(index)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::moves::MoveKind;

    fn pool() -> MovePool {
        MovePool {
            accurate: vec![
                Move::ranged(MoveKind::Accurate, "a1", 0.9, 1.1),
                Move::ranged(MoveKind::Accurate, "a2", 0.8, 1.2),
            ],
            wide: vec![Move::ranged(MoveKind::Wide, "w1", 0.1, 2.0)],
            crit: vec![Move::crit("c1", 1.0, 25)],
            healing: vec![Move::ranged(MoveKind::Heal, "h1", 0.1, 0.3)],
        }
    }

    #[test]
    fn test_reset_picks_four_distinct_moves() {
        let pool = pool();
        let mut rng = GameRng::new(21);
        let mut moveset = Moveset::new();

        for _ in 0..50 {
            moveset.reset(10, 14, 60, &pool, &mut rng).unwrap();
            assert_eq!(moveset.len(), MOVESET_SIZE);

            let mut names: Vec<&str> = moveset.moves.iter().map(|m| m.name.as_str()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), MOVESET_SIZE);
        }
    }

    #[test]
    fn test_reset_resolves_damage_and_heal() {
        let pool = pool();
        let mut rng = GameRng::new(4);
        let mut moveset = Moveset::new();

        for _ in 0..50 {
            moveset.reset(10, 14, 60, &pool, &mut rng).unwrap();
            for m in &moveset.moves {
                if m.is_heal() {
                    assert_eq!((m.min_heal, m.max_heal), (6, 18));
                    assert_eq!(m.max_damage, 0);
                } else {
                    assert!(m.min_damage >= 1);
                    assert!(m.max_damage >= m.min_damage);
                    assert_eq!(m.max_heal, 0);
                }
            }
        }
    }

    #[test]
    fn test_pool_too_small() {
        let small = MovePool {
            accurate: vec![Move::ranged(MoveKind::Accurate, "a", 1.0, 1.0)],
            ..MovePool::default()
        };
        let mut rng = GameRng::new(1);
        let err = Moveset::new().reset(1, 2, 10, &small, &mut rng).unwrap_err();
        assert_eq!(err, BattleError::PoolTooSmall { needed: 4, available: 1 });
    }

    #[test]
    fn test_boss_pool_with_replacement() {
        let boss = vec![
            Move::ranged(MoveKind::Wide, "ooze", 0.5, 1.5),
            Move::ranged(MoveKind::Heal, "absorb", 0.05, 0.1),
        ];
        let mut rng = GameRng::new(2);
        let mut moveset = Moveset::new();
        moveset.reset_from(5, 8, 100, &boss, &mut rng).unwrap();
        assert_eq!(moveset.len(), MOVESET_SIZE);
        assert!(moveset.moves.iter().all(|m| m.name == "ooze" || m.name == "absorb"));

        assert!(moveset.reset_from(5, 8, 100, &[], &mut rng).is_err());
    }
}

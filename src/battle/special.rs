use serde::{Deserialize, Serialize};

/// Maximum number of special moves the player can bring into battle
pub const MAX_MOVES: usize = 5;

/// Special moves: once-per-cooldown modifiers for the next exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialMove {
    Distract,
    Focus,
    Intimidate,
    Reflect,
    Stun,
    Invert,
    Sacrifice,
    Shield,
}

/// Every special move, by the level it unlocks at (ids follow this order)
pub const SMOVES_ORDER_BY_LVL: [SpecialMove; 8] = [
    SpecialMove::Distract,
    SpecialMove::Focus,
    SpecialMove::Intimidate,
    SpecialMove::Reflect,
    SpecialMove::Stun,
    SpecialMove::Invert,
    SpecialMove::Sacrifice,
    SpecialMove::Shield,
];

pub const NUM_SPECIAL_MOVES: usize = SMOVES_ORDER_BY_LVL.len();

/// Accuracy taken off the enemy by Distract
pub const DISTRACT_ACCURACY: i32 = 30;
/// Percent damage bonus from Intimidate
pub const INTIMIDATE_BONUS: i32 = 25;
/// Percent chance Stun skips the enemy's turn
pub const STUN_CHANCE: i32 = 80;
/// Percent of current hp paid by Sacrifice
pub const SACRIFICE_COST: i32 = 25;
/// Percent of max hp absorbed by Shield
pub const SHIELD_PERCENT: i32 = 20;

impl SpecialMove {
    pub fn from_id(id: usize) -> Option<SpecialMove> {
        SMOVES_ORDER_BY_LVL.get(id).copied()
    }

    pub fn id(self) -> usize {
        SMOVES_ORDER_BY_LVL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialMove::Distract => "DISTRACT",
            SpecialMove::Focus => "FOCUS",
            SpecialMove::Intimidate => "INTIMIDATE",
            SpecialMove::Reflect => "REFLECT",
            SpecialMove::Stun => "STUN",
            SpecialMove::Invert => "INVERT",
            SpecialMove::Sacrifice => "SACRIFICE",
            SpecialMove::Shield => "SHIELD",
        }
    }

    pub fn desc(self) -> &'static str {
        match self {
            SpecialMove::Distract => "Enemy's next attack has 30% less accuracy.",
            SpecialMove::Focus => "Your next attack cannot miss and always crits.",
            SpecialMove::Intimidate => "Your next attack deals 25% more damage.",
            SpecialMove::Reflect => "Reflects the enemy's next attack back at it.",
            SpecialMove::Stun => "80% chance the enemy loses its next turn.",
            SpecialMove::Invert => "The enemy's next attack heals you instead.",
            SpecialMove::Sacrifice => "Lose 25% of your hp; your next attack hits harder the more you lost.",
            SpecialMove::Shield => "Absorbs damage up to 20% of your max hp this round.",
        }
    }

    pub fn level_unlocked(self) -> i32 {
        match self {
            SpecialMove::Distract | SpecialMove::Focus => 1,
            SpecialMove::Intimidate => 5,
            SpecialMove::Reflect => 10,
            SpecialMove::Stun => 15,
            SpecialMove::Invert => 20,
            SpecialMove::Sacrifice => 25,
            SpecialMove::Shield => 30,
        }
    }

    pub fn is_unlocked(self, level: i32) -> bool {
        level >= self.level_unlocked()
    }
}

/// The special moves the player brings into battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialMoveset {
    pub smoveset: Vec<SpecialMove>,
}

impl SpecialMoveset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a special move; false if the set is already full
    pub fn add(&mut self, smove: SpecialMove) -> bool {
        if self.is_full() {
            return false;
        }
        self.smoveset.push(smove);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<SpecialMove> {
        (index < self.smoveset.len()).then(|| self.smoveset.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<SpecialMove> {
        self.smoveset.get(index).copied()
    }

    pub fn contains(&self, smove: SpecialMove) -> bool {
        self.smoveset.contains(&smove)
    }

    pub fn clear(&mut self) {
        self.smoveset.clear();
    }

    pub fn is_full(&self) -> bool {
        self.smoveset.len() >= MAX_MOVES
    }

    pub fn is_empty(&self) -> bool {
        self.smoveset.is_empty()
    }

    pub fn len(&self) -> usize {
        self.smoveset.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SpecialMove> + '_ {
        self.smoveset.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_levels_are_ordered() {
        let levels: Vec<i32> = SMOVES_ORDER_BY_LVL.iter().map(|s| s.level_unlocked()).collect();
        assert_eq!(levels, vec![1, 1, 5, 10, 15, 20, 25, 30]);
        assert!(SpecialMove::Stun.is_unlocked(15));
        assert!(!SpecialMove::Stun.is_unlocked(14));
    }

    #[test]
    fn test_ids() {
        for (i, smove) in SMOVES_ORDER_BY_LVL.iter().enumerate() {
            assert_eq!(smove.id(), i);
            assert_eq!(SpecialMove::from_id(i), Some(*smove));
        }
        assert_eq!(SpecialMove::from_id(NUM_SPECIAL_MOVES), None);
    }

    #[test]
    fn test_moveset_caps_at_max() {
        let mut set = SpecialMoveset::new();
        for _ in 0..MAX_MOVES {
            assert!(set.add(SpecialMove::Focus));
        }
        assert!(!set.add(SpecialMove::Stun));
        assert_eq!(set.len(), MAX_MOVES);

        assert_eq!(set.remove(0), Some(SpecialMove::Focus));
        assert_eq!(set.remove(10), None);
        set.clear();
        assert!(set.is_empty());
    }
}

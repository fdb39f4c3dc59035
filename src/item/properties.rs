use serde::{Deserialize, Serialize};

/// How likely an item is to drop
///
/// Drops are weighted: common 60%, rare 25%, epic 10%, legendary 5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Cumulative thresholds for a roll in 0..100
pub const COMMON_ITEM_RNG_INDEX: i32 = 60;
pub const RARE_ITEM_RNG_INDEX: i32 = 85;
pub const EPIC_ITEM_RNG_INDEX: i32 = 95;
pub const LEGENDARY_ITEM_RNG_INDEX: i32 = 100;

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Numeric rarity as used by `items.json` (`rare0`..`rare3`) and the console
    pub fn index(self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
            Rarity::Legendary => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Rarity> {
        Self::ALL.get(index).copied()
    }

    /// Maps a roll in `0..100` to a rarity using the drop thresholds
    ///
    /// Rolls outside the range yield `None`.
    pub fn from_roll(roll: i32) -> Option<Rarity> {
        match roll {
            r if r < 0 => None,
            r if r < COMMON_ITEM_RNG_INDEX => Some(Rarity::Common),
            r if r < RARE_ITEM_RNG_INDEX => Some(Rarity::Rare),
            r if r < EPIC_ITEM_RNG_INDEX => Some(Rarity::Epic),
            r if r < LEGENDARY_ITEM_RNG_INDEX => Some(Rarity::Legendary),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
        }
    }
}

/// Equipment slots, in the order they appear in the equipment panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Helmet,
    Armor,
    Weapon,
    Gloves,
    Shoes,
    Necklace,
    Shield,
    Ring,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 8] = [
        EquipSlot::Helmet,
        EquipSlot::Armor,
        EquipSlot::Weapon,
        EquipSlot::Gloves,
        EquipSlot::Shoes,
        EquipSlot::Necklace,
        EquipSlot::Shield,
        EquipSlot::Ring,
    ];

    /// Index into the equipment slots (item type code minus 2)
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<EquipSlot> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            EquipSlot::Helmet => "HELMET",
            EquipSlot::Armor => "ARMOR",
            EquipSlot::Weapon => "WEAPON",
            EquipSlot::Gloves => "GLOVES",
            EquipSlot::Shoes => "SHOES",
            EquipSlot::Necklace => "NECKLACE",
            EquipSlot::Shield => "SHIELD",
            EquipSlot::Ring => "RING",
        }
    }
}

/// What an item is for
///
/// Type codes from the item data: 0 potion, 1 misc, 2..=9 equips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores current hp when consumed
    Potion,
    /// Can only be sold
    Misc,
    /// Worn for stat bonuses
    Equip(EquipSlot),
}

impl ItemKind {
    pub fn from_code(code: i32) -> Option<ItemKind> {
        match code {
            0 => Some(ItemKind::Potion),
            1 => Some(ItemKind::Misc),
            c if c >= 2 => EquipSlot::from_index((c - 2) as usize).map(ItemKind::Equip),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ItemKind::Potion => 0,
            ItemKind::Misc => 1,
            ItemKind::Equip(slot) => slot.index() as i32 + 2,
        }
    }

    pub fn equip_slot(self) -> Option<EquipSlot> {
        match self {
            ItemKind::Equip(slot) => Some(slot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_thresholds_partition_rolls() {
        let mut counts = [0; 4];
        for roll in 0..100 {
            let rarity = Rarity::from_roll(roll).unwrap();
            counts[rarity.index()] += 1;
        }
        assert_eq!(counts, [60, 25, 10, 5]);
        assert_eq!(Rarity::from_roll(100), None);
        assert_eq!(Rarity::from_roll(-1), None);
    }

    #[test]
    fn test_item_kind_codes() {
        assert_eq!(ItemKind::from_code(0), Some(ItemKind::Potion));
        assert_eq!(ItemKind::from_code(1), Some(ItemKind::Misc));
        assert_eq!(ItemKind::from_code(2), Some(ItemKind::Equip(EquipSlot::Helmet)));
        assert_eq!(ItemKind::from_code(9), Some(ItemKind::Equip(EquipSlot::Ring)));
        assert_eq!(ItemKind::from_code(10), None);
        assert_eq!(ItemKind::from_code(-1), None);

        for code in 0..10 {
            assert_eq!(ItemKind::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_equip_slot_index() {
        assert_eq!(EquipSlot::Weapon.index(), 2);
        assert_eq!(EquipSlot::from_index(7), Some(EquipSlot::Ring));
        assert_eq!(EquipSlot::from_index(8), None);
    }
}

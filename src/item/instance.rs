use serde::{Deserialize, Serialize};
use super::definition::ItemDefinition;
use super::properties::{EquipSlot, ItemKind, Rarity};
use crate::rng::GameRng;

/// An item the player actually owns
///
/// Copied from an `ItemDefinition` and then scaled once with `adjust`.
/// `index` is the inventory slot it occupies; `equipped` is set while it
/// sits in an equipment slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub desc: String,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub img_index: u32,
    pub hp: i32,
    pub mhp: i32,
    pub dmg: i32,
    pub acc: i32,
    pub sell: i32,
    pub index: usize,
    pub equipped: bool,
}

impl Item {
    pub fn from_definition(def: &ItemDefinition) -> Self {
        Item {
            name: def.name.clone(),
            desc: def.desc.clone(),
            kind: def.kind,
            rarity: def.rarity,
            img_index: def.img_index,
            hp: def.hp,
            mhp: def.mhp,
            dmg: def.dmg,
            acc: def.acc,
            sell: def.sell,
            index: 0,
            equipped: false,
        }
    }

    pub fn is_potion(&self) -> bool {
        self.kind == ItemKind::Potion
    }

    pub fn equip_slot(&self) -> Option<EquipSlot> {
        self.kind.equip_slot()
    }

    /// Scales the item's stats to a level
    ///
    /// Should be called exactly once, right after the item is rolled.
    /// Level 1 leaves the item unchanged (the random divisor is still drawn).
    ///
    /// # Example
    /// ```
    /// use unlucky::item::{Item, ItemDefinition, ItemKind, EquipSlot, Rarity};
    /// use unlucky::rng::GameRng;
    ///
    /// let def = ItemDefinition::equip("axe", "", ItemKind::Equip(EquipSlot::Weapon), Rarity::Common, 0, 0, 2, 0, 10);
    /// let mut axe = Item::from_definition(&def);
    /// axe.adjust(4, &mut GameRng::new(1));
    /// assert_eq!(axe.dmg, 6);
    /// ```
    pub fn adjust(&mut self, level: i32, rng: &mut GameRng) {
        let level = level.max(1);
        let steps = level - 1;

        let mhp_seed = self.mhp / rng.range_inclusive(3, 5);
        self.mhp += mhp_seed * steps;
        if level != 1 {
            self.dmg *= steps;
        }

        if self.is_potion() {
            let hp_seed = self.hp / rng.range_inclusive(3, 5);
            self.hp += hp_seed * steps;
        }

        self.sell += self.sell / 4 * steps;
    }

    /// Tooltip text including stat lines
    pub fn full_desc(&self) -> String {
        let mut desc = self.desc.clone();
        match self.kind {
            ItemKind::Potion => {
                desc.push_str(&format!("\nHEALS FOR {} HP", self.hp));
            }
            ItemKind::Misc => {}
            ItemKind::Equip(_) => {
                if self.mhp != 0 {
                    desc.push_str(&format!("\n+{} HP", self.mhp));
                }
                if self.dmg != 0 {
                    desc.push_str(&format!("\n+{} DAMAGE", self.dmg));
                }
                if self.acc != 0 {
                    desc.push_str(&format!("\n+{}% ACCURACY", self.acc));
                }
            }
        }
        desc.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helmet() -> Item {
        Item::from_definition(&ItemDefinition::equip(
            "leather cap",
            "a worn cap",
            ItemKind::Equip(EquipSlot::Helmet),
            Rarity::Common,
            0,
            12,
            3,
            2,
            8,
        ))
    }

    #[test]
    fn test_adjust_level_one_is_identity() {
        let mut rng = GameRng::new(5);
        let mut item = helmet();
        let before = item.clone();
        item.adjust(1, &mut rng);
        assert_eq!(item, before);

        // Levels below one are clamped
        item.adjust(-3, &mut rng);
        assert_eq!(item, before);
    }

    #[test]
    fn test_adjust_scales_with_level() {
        let mut rng = GameRng::new(5);
        let mut item = helmet();
        item.adjust(3, &mut rng);

        // 12 / (3..=5) is 4, 3 or 2, applied twice
        assert!([16, 18, 20].contains(&item.mhp), "mhp was {}", item.mhp);
        assert_eq!(item.dmg, 6);
        assert_eq!(item.acc, 2);
        assert_eq!(item.sell, 8 + 2 * 2);
    }

    #[test]
    fn test_adjust_potion_heal() {
        let mut rng = GameRng::new(8);
        let mut potion = Item::from_definition(&ItemDefinition::potion("p", "d", Rarity::Common, 0, 30, 4));
        potion.adjust(2, &mut rng);
        assert!((36..=40).contains(&potion.hp));
        assert_eq!(potion.sell, 5);
    }

    #[test]
    fn test_full_desc() {
        let item = helmet();
        assert_eq!(item.full_desc(), "a worn cap\n+12 HP\n+3 DAMAGE\n+2% ACCURACY");

        let potion = Item::from_definition(&ItemDefinition::potion("p", "tasty", Rarity::Common, 0, 7, 1));
        assert_eq!(potion.full_desc(), "tasty\nHEALS FOR 7 HP");

        let misc = Item::from_definition(&ItemDefinition::misc("rock", "just a rock  ", Rarity::Common, 0, 1));
        assert_eq!(misc.full_desc(), "just a rock");
    }
}

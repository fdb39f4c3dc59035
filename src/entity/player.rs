//! The protagonist
//!
//! Owns its combat stats, exp/level progression, gold, bag and equipment,
//! plus the transient tile-movement state used while exploring a map.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::stats::Stats;
use crate::battle::{Moveset, SpecialMoveset};
use crate::inventory::{Equipment, Inventory, InventoryError, InventorySlot};
use crate::item::{EquipSlot, Item};
use crate::map::{Direction, Position};
use crate::rng::GameRng;

pub const PLAYER_INIT_MAX_HP: i32 = 65;
pub const PLAYER_INIT_MIN_DMG: i32 = 12;
pub const PLAYER_INIT_MAX_DMG: i32 = 16;
pub const PLAYER_ACCURACY: i32 = 80;
pub const PLAYER_MIN_HP_INCREASE: i32 = 3;
pub const PLAYER_MAX_HP_INCREASE: i32 = 5;
pub const PLAYER_MIN_DMG_INCREASE: i32 = 1;
pub const PLAYER_MAX_DMG_INCREASE: i32 = 3;
/// Turns between special moves for a new player
pub const DEFAULT_SMOVE_CD: u32 = 3;

/// Exp needed to finish `level`
///
/// `offset` is a random 3..=5 drawn at each level up.
pub fn max_exp_for(level: i32, offset: i32) -> i32 {
    level * level + 4 * offset * level + 10
}

/// What a level up granted, for the level-up screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpSummary {
    pub previous_level: i32,
    pub new_level: i32,
    pub hp_increase: i32,
    pub min_dmg_increase: i32,
    pub max_dmg_increase: i32,
    pub accuracy_increase: i32,
}

impl LevelUpSummary {
    pub fn levels_gained(&self) -> i32 {
        self.new_level - self.previous_level
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("You reached level {}!", self.new_level),
            format!(
                "HP +{}, DAMAGE +{}-{}, ACCURACY +{}%",
                self.hp_increase, self.min_dmg_increase, self.max_dmg_increase, self.accuracy_increase
            ),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub stats: Stats,
    pub level: i32,
    pub exp: i32,
    pub max_exp: i32,
    pub gold: i32,

    // pending level-up gains, applied by `apply_level_up`
    #[serde(skip)]
    pub hp_increase: i32,
    #[serde(skip)]
    pub min_dmg_increase: i32,
    #[serde(skip)]
    pub max_dmg_increase: i32,
    #[serde(skip)]
    pub accuracy_increase: i32,

    pub inventory: Inventory,
    pub equips: Equipment,
    pub smoveset: SpecialMoveset,
    pub smove_cd: u32,

    /// Rolled fresh for every battle
    #[serde(skip)]
    pub moveset: Moveset,

    // Tile movement
    #[serde(skip)]
    pub position: Position,
    #[serde(skip)]
    pub facing: Direction,
    #[serde(skip)]
    pub continue_moving: bool,
    #[serde(skip)]
    pub tile_interaction: bool,
    #[serde(skip)]
    pub teleporting: bool,
    #[serde(skip)]
    pub battling: Option<Enemy>,
}

impl Player {
    pub fn new(rng: &mut GameRng) -> Self {
        Player {
            stats: Stats::new(PLAYER_INIT_MAX_HP, PLAYER_INIT_MIN_DMG, PLAYER_INIT_MAX_DMG, PLAYER_ACCURACY),
            level: 1,
            exp: 0,
            max_exp: max_exp_for(1, rng.range_inclusive(3, 5)),
            gold: 0,
            hp_increase: 0,
            min_dmg_increase: 0,
            max_dmg_increase: 0,
            accuracy_increase: 0,
            inventory: Inventory::new(),
            equips: Equipment::new(),
            smoveset: SpecialMoveset::new(),
            smove_cd: DEFAULT_SMOVE_CD,
            moveset: Moveset::new(),
            position: (0, 0),
            facing: Direction::Down,
            continue_moving: false,
            tile_interaction: false,
            teleporting: false,
            battling: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.stats.is_dead()
    }

    /// Restores hp to max
    pub fn revive(&mut self) {
        self.stats.hp = self.stats.max_hp;
    }

    // ======================================================================
    // Exp and leveling
    // ======================================================================

    /// Adds exp, leveling up as many times as it covers
    ///
    /// Returns a summary when at least one level was gained. Afterwards
    /// `exp < max_exp` always holds.
    pub fn add_exp(&mut self, amount: i32, rng: &mut GameRng) -> Option<LevelUpSummary> {
        let amount = amount.max(0);
        if self.exp + amount >= self.max_exp {
            let previous_level = self.level;
            let remainder = self.exp + amount - self.max_exp;
            self.level_up(remainder, rng);
            Some(self.apply_level_up(previous_level))
        } else {
            self.exp += amount;
            None
        }
    }

    /// Increments level and recalculates max exp
    ///
    /// Gains accumulate in the `*_increase` fields; repeats while the
    /// remainder still covers the new `max_exp`.
    pub fn level_up(&mut self, mut remainder: i32, rng: &mut GameRng) {
        loop {
            self.level += 1;
            self.hp_increase += rng.range_inclusive(PLAYER_MIN_HP_INCREASE, PLAYER_MAX_HP_INCREASE);
            self.min_dmg_increase += rng.range_inclusive(PLAYER_MIN_DMG_INCREASE, PLAYER_MAX_DMG_INCREASE);
            self.max_dmg_increase += rng.range_inclusive(PLAYER_MIN_DMG_INCREASE, PLAYER_MAX_DMG_INCREASE);
            // accuracy increases by 1% every 10 levels
            if self.level % 10 == 0 {
                self.accuracy_increase += 1;
            }
            self.max_exp = max_exp_for(self.level, rng.range_inclusive(3, 5));

            if remainder >= self.max_exp {
                remainder -= self.max_exp;
            } else {
                self.exp = remainder;
                break;
            }
        }
    }

    /// Adds the pending level-up gains to the real stats and clears them
    pub fn apply_level_up(&mut self, previous_level: i32) -> LevelUpSummary {
        let summary = LevelUpSummary {
            previous_level,
            new_level: self.level,
            hp_increase: self.hp_increase,
            min_dmg_increase: self.min_dmg_increase,
            max_dmg_increase: self.max_dmg_increase,
            accuracy_increase: self.accuracy_increase,
        };

        self.stats.max_hp += self.hp_increase;
        self.stats.hp = self.stats.max_hp;
        self.stats.min_damage += self.min_dmg_increase;
        self.stats.max_damage += self.max_dmg_increase;
        self.stats.accuracy += self.accuracy_increase;

        self.hp_increase = 0;
        self.min_dmg_increase = 0;
        self.max_dmg_increase = 0;
        self.accuracy_increase = 0;

        info!("Level up: {} -> {}", previous_level, self.level);
        summary
    }

    // ======================================================================
    // Equipment
    // ======================================================================

    /// Adds an equip's bonuses to the stats
    pub fn equip(&mut self, item: &Item) {
        self.stats.max_hp = self.stats.max_hp.saturating_add(item.mhp);
        self.stats.hp = self.stats.hp.min(self.stats.max_hp);
        self.stats.min_damage = self.stats.min_damage.saturating_add(item.dmg);
        self.stats.max_damage = self.stats.max_damage.saturating_add(item.dmg);
        self.stats.accuracy = self.stats.accuracy.saturating_add(item.acc);
    }

    /// Removes an equip's bonuses from the stats
    pub fn unequip(&mut self, item: &Item) {
        self.stats.set_max_hp(self.stats.max_hp.saturating_sub(item.mhp));
        self.stats.min_damage = self.stats.min_damage.saturating_sub(item.dmg);
        self.stats.max_damage = self.stats.max_damage.saturating_sub(item.dmg);
        self.stats.accuracy = self.stats.accuracy.saturating_sub(item.acc);
    }

    /// Equips the item in an inventory slot
    ///
    /// If something is already worn in that equipment slot it moves into
    /// the inventory slot the new equip came from.
    pub fn equip_from_inventory(&mut self, index: usize) -> Result<(), InventoryError> {
        let item = self.inventory.get_item(index).ok_or(InventoryError::EmptySlot(index))?;
        let slot = item.equip_slot().ok_or_else(|| InventoryError::NotEquippable(item.name.clone()))?;

        let Some(item) = self.inventory.remove_item(index) else {
            return Err(InventoryError::EmptySlot(index));
        };
        if let Some(old) = self.equips.remove_equip(slot) {
            self.unequip(&old);
            self.inventory.add_item_at(old, index)?;
        }

        self.equip(&item);
        debug!("Equipped {} in {}", item.name, slot.name());
        self.equips.add_equip(item).map_err(|item| InventoryError::NotEquippable(item.name))
    }

    /// Moves an equip into a specific free inventory slot
    ///
    /// Returns false (and leaves the equip worn) when the slot is taken or
    /// nothing is equipped.
    pub fn unequip_to_inventory(&mut self, slot: EquipSlot, index: usize) -> bool {
        if !self.inventory.is_free_slot(index) {
            return false;
        }
        let Some(item) = self.equips.remove_equip(slot) else {
            return false;
        };
        self.unequip(&item);
        match self.inventory.add_item_at(item, index) {
            Ok(()) => true,
            Err(err) => {
                // unreachable in practice: the slot was checked free above
                if let Some(item) = err.into_item() {
                    self.equip(&item);
                    let _ = self.equips.add_equip(item);
                }
                false
            }
        }
    }

    /// Moves an equip into the first free inventory slot
    pub fn unequip_slot(&mut self, slot: EquipSlot) -> Option<usize> {
        let index = self.inventory.find_empty_slot()?;
        self.unequip_to_inventory(slot, index).then_some(index)
    }

    /// Resolves dropping the item dragged from `from` onto `to`
    ///
    /// Bag onto bag moves or swaps, bag onto any equipment cell equips,
    /// and an equip onto a free bag cell unequips there. Anything else
    /// leaves the item where it was and returns `Ok(false)`.
    pub fn move_item(&mut self, from: InventorySlot, to: Option<InventorySlot>) -> Result<bool, InventoryError> {
        match (from, to) {
            (InventorySlot::Bag(a), Some(InventorySlot::Bag(b))) if a != b => {
                self.inventory.swap(a, b)?;
                Ok(true)
            }
            (InventorySlot::Bag(a), Some(InventorySlot::Equip(_))) => {
                self.equip_from_inventory(a)?;
                Ok(true)
            }
            (InventorySlot::Equip(slot), Some(InventorySlot::Bag(b))) => Ok(self.unequip_to_inventory(slot, b)),
            _ => Ok(false),
        }
    }

    /// Drinks a potion, returning the hp actually healed
    pub fn consume(&mut self, index: usize) -> Result<i32, InventoryError> {
        let item = self.inventory.get_item(index).ok_or(InventoryError::EmptySlot(index))?;
        if !item.is_potion() {
            return Err(InventoryError::NotConsumable(item.name.clone()));
        }
        let hp = item.hp;
        self.inventory.remove_item(index);
        Ok(self.stats.heal(hp))
    }

    /// Sells an inventory item, returning the gold gained
    pub fn sell(&mut self, index: usize) -> Result<i32, InventoryError> {
        let item = self.inventory.remove_item(index).ok_or(InventoryError::EmptySlot(index))?;
        self.gold += item.sell;
        Ok(item.sell)
    }

    // ======================================================================
    // Map state
    // ======================================================================

    /// Puts the player on a map tile with movement flags cleared
    pub fn place(&mut self, position: Position) {
        self.position = position;
        self.continue_moving = false;
        self.tile_interaction = false;
        self.teleporting = false;
        self.battling = None;
    }

    pub fn is_battling(&self) -> bool {
        self.battling.is_some()
    }

    pub fn finish_battling(&mut self) {
        self.battling = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, ItemKind, Rarity};

    fn sword(dmg: i32) -> Item {
        Item::from_definition(&ItemDefinition::equip(
            "sword", "", ItemKind::Equip(EquipSlot::Weapon), Rarity::Common, 0, 10, dmg, 5, 20,
        ))
    }

    #[test]
    fn test_new_player() {
        let mut rng = GameRng::new(1);
        let player = Player::new(&mut rng);
        assert_eq!(player.level, 1);
        assert_eq!(player.stats.hp, 65);
        assert_eq!((player.stats.min_damage, player.stats.max_damage), (12, 16));
        assert!([23, 27, 31].contains(&player.max_exp));
        assert_eq!(player.smove_cd, 3);
    }

    #[test]
    fn test_max_exp_increases() {
        for offset in 3..=5 {
            for level in 1..100 {
                assert!(max_exp_for(level + 1, offset) > max_exp_for(level, offset));
                assert!(max_exp_for(level, offset) > 0);
            }
        }
    }

    #[test]
    fn test_add_exp_without_level_up() {
        let mut rng = GameRng::new(2);
        let mut player = Player::new(&mut rng);
        assert!(player.add_exp(5, &mut rng).is_none());
        assert_eq!(player.exp, 5);
    }

    #[test]
    fn test_add_exp_multiple_levels() {
        let mut rng = GameRng::new(3);
        let mut player = Player::new(&mut rng);
        let summary = player.add_exp(1000, &mut rng).unwrap();

        assert!(summary.levels_gained() > 1);
        assert_eq!(summary.new_level, player.level);
        assert!(player.exp < player.max_exp);
        assert!(player.exp >= 0);
        assert_eq!(player.stats.max_hp, 65 + summary.hp_increase);
        assert_eq!(player.stats.hp, player.stats.max_hp);
        let levels = summary.levels_gained();
        assert!(summary.hp_increase >= 3 * levels && summary.hp_increase <= 5 * levels);
        assert_eq!(player.hp_increase, 0);
    }

    #[test]
    fn test_accuracy_every_ten_levels() {
        let mut rng = GameRng::new(4);
        let mut player = Player::new(&mut rng);
        player.level = 9;
        player.level_up(0, &mut rng);
        assert_eq!(player.accuracy_increase, 1);
        player.level_up(0, &mut rng);
        assert_eq!(player.accuracy_increase, 1);
    }

    #[test]
    fn test_equip_from_inventory_swaps() {
        let mut rng = GameRng::new(5);
        let mut player = Player::new(&mut rng);
        player.inventory.add_item_at(sword(2), 3).unwrap();
        player.inventory.add_item_at(sword(7), 8).unwrap();

        player.equip_from_inventory(3).unwrap();
        assert!(player.inventory.is_free_slot(3));
        assert_eq!(player.stats.min_damage, 14);
        assert_eq!(player.stats.max_hp, 75);

        player.equip_from_inventory(8).unwrap();
        assert_eq!(player.equips.get(EquipSlot::Weapon).unwrap().dmg, 7);
        assert_eq!(player.inventory.get_item(8).unwrap().dmg, 2);
        assert!(!player.inventory.get_item(8).unwrap().equipped);
        assert_eq!(player.stats.min_damage, 19);
        assert_eq!(player.stats.accuracy, 85);
    }

    #[test]
    fn test_equip_bonuses_saturate() {
        let mut rng = GameRng::new(5);
        let mut player = Player::new(&mut rng);
        player.stats.max_hp = i32::MAX;
        player.stats.accuracy = i32::MAX;
        let item = sword(3);

        player.equip(&item);
        assert_eq!(player.stats.max_hp, i32::MAX);
        assert_eq!(player.stats.accuracy, i32::MAX);
        assert_eq!(player.stats.min_damage, 15);

        player.stats.min_damage = i32::MIN;
        player.unequip(&item);
        assert_eq!(player.stats.min_damage, i32::MIN);
        assert_eq!(player.stats.max_hp, i32::MAX - 10);
    }

    #[test]
    fn test_move_item_between_cells() {
        let mut rng = GameRng::new(5);
        let mut player = Player::new(&mut rng);
        player.inventory.add_item_at(sword(2), 0).unwrap();
        player.inventory.add_item_at(sword(7), 5).unwrap();

        // bag onto an occupied bag cell trades places
        assert!(player.move_item(InventorySlot::Bag(0), Some(InventorySlot::Bag(5))).unwrap());
        assert_eq!(player.inventory.get_item(0).unwrap().dmg, 7);
        assert_eq!(player.inventory.get_item(5).unwrap().dmg, 2);
        assert_eq!(player.inventory.get_item(5).unwrap().index, 5);

        // bag onto any equipment cell equips in the item's own slot
        let ring_cell = Some(InventorySlot::Equip(EquipSlot::Ring));
        assert!(player.move_item(InventorySlot::Bag(5), ring_cell).unwrap());
        assert_eq!(player.equips.get(EquipSlot::Weapon).unwrap().dmg, 2);
        assert!(player.inventory.is_free_slot(5));

        // equip onto an occupied bag cell stays worn, onto a free one moves there
        let weapon = InventorySlot::Equip(EquipSlot::Weapon);
        assert!(!player.move_item(weapon, Some(InventorySlot::Bag(0))).unwrap());
        assert!(player.equips.get(EquipSlot::Weapon).is_some());
        assert!(player.move_item(weapon, Some(InventorySlot::Bag(11))).unwrap());
        assert_eq!(player.inventory.get_item(11).unwrap().dmg, 2);
        assert!(player.equips.get(EquipSlot::Weapon).is_none());
        assert_eq!(player.stats.min_damage, 12);

        // dropped outside any cell or back on itself
        assert!(!player.move_item(InventorySlot::Bag(0), None).unwrap());
        assert!(!player.move_item(InventorySlot::Bag(0), Some(InventorySlot::Bag(0))).unwrap());
        assert_eq!(player.inventory.get_item(0).unwrap().dmg, 7);
    }

    #[test]
    fn test_equip_errors() {
        let mut rng = GameRng::new(5);
        let mut player = Player::new(&mut rng);
        assert!(matches!(player.equip_from_inventory(0), Err(InventoryError::EmptySlot(0))));

        let potion = Item::from_definition(&ItemDefinition::potion("p", "", Rarity::Common, 0, 10, 1));
        player.inventory.add_item(potion).unwrap();
        assert!(matches!(player.equip_from_inventory(0), Err(InventoryError::NotEquippable(_))));
    }

    #[test]
    fn test_unequip_only_into_free_slot() {
        let mut rng = GameRng::new(6);
        let mut player = Player::new(&mut rng);
        player.inventory.add_item(sword(2)).unwrap();
        player.equip_from_inventory(0).unwrap();
        player.inventory.add_item_at(sword(1), 1).unwrap();

        assert!(!player.unequip_to_inventory(EquipSlot::Weapon, 1));
        assert!(player.equips.get(EquipSlot::Weapon).is_some());

        assert!(player.unequip_to_inventory(EquipSlot::Weapon, 5));
        assert_eq!(player.stats.min_damage, PLAYER_INIT_MIN_DMG);
        assert_eq!(player.stats.max_hp, PLAYER_INIT_MAX_HP);
        assert_eq!(player.inventory.get_item(5).unwrap().index, 5);

        assert_eq!(player.unequip_slot(EquipSlot::Weapon), None);
    }

    #[test]
    fn test_unequip_clamps_hp() {
        let mut rng = GameRng::new(6);
        let mut player = Player::new(&mut rng);
        player.inventory.add_item(sword(0)).unwrap();
        player.equip_from_inventory(0).unwrap();
        player.stats.hp = player.stats.max_hp;

        assert_eq!(player.unequip_slot(EquipSlot::Weapon), Some(0));
        assert_eq!(player.stats.hp, PLAYER_INIT_MAX_HP);
    }

    #[test]
    fn test_consume_and_sell() {
        let mut rng = GameRng::new(7);
        let mut player = Player::new(&mut rng);
        player.stats.damage(30);
        let potion = Item::from_definition(&ItemDefinition::potion("p", "", Rarity::Common, 0, 50, 4));
        player.inventory.add_item(potion).unwrap();
        player.inventory.add_item(sword(1)).unwrap();

        assert!(matches!(player.consume(1), Err(InventoryError::NotConsumable(_))));
        assert_eq!(player.consume(0).unwrap(), 30);
        assert!(player.inventory.is_free_slot(0));

        assert_eq!(player.sell(1).unwrap(), 20);
        assert_eq!(player.gold, 20);
        assert!(matches!(player.sell(1), Err(InventoryError::EmptySlot(1))));
    }

    #[test]
    fn test_revive() {
        let mut rng = GameRng::new(8);
        let mut player = Player::new(&mut rng);
        player.stats.damage(1000);
        assert!(player.is_dead());
        player.revive();
        assert_eq!(player.stats.hp, player.stats.max_hp);
    }
}

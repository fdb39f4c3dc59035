use crate::item::{EquipSlot, Item};
use serde::{Serialize, Deserialize};

/// Top-left corner of the equipment panel (2 columns x 4 rows)
pub const EQUIP_X: i32 = 112;
pub const EQUIP_Y: i32 = 72;
const EQUIP_COLS: usize = 2;

/// Items the player is wearing, one per `EquipSlot`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<Item>; 8],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts an equip into its slot
    ///
    /// Hands the item back if it isn't equipment or its slot is taken.
    pub fn add_equip(&mut self, mut item: Item) -> Result<(), Item> {
        let Some(slot) = item.equip_slot() else {
            return Err(item);
        };
        let entry = &mut self.slots[slot.index()];
        if entry.is_some() {
            return Err(item);
        }
        item.equipped = true;
        *entry = Some(item);
        Ok(())
    }

    pub fn remove_equip(&mut self, slot: EquipSlot) -> Option<Item> {
        let mut item = self.slots[slot.index()].take()?;
        item.equipped = false;
        Some(item)
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Worn items in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &Item)> {
        EquipSlot::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(slot, item)| item.as_ref().map(|item| (slot, item)))
    }
}

/// Equipment slot under a screen point, if any
pub fn hovered_equip_slot(x: i32, y: i32) -> Option<EquipSlot> {
    let size = super::inventory::SLOT_SIZE;
    if x < EQUIP_X || y < EQUIP_Y {
        return None;
    }
    let col = ((x - EQUIP_X) / size) as usize;
    let row = ((y - EQUIP_Y) / size) as usize;
    if col >= EQUIP_COLS {
        return None;
    }
    EquipSlot::from_index(row * EQUIP_COLS + col)
}

/// Top-left corner of an equipment slot on screen
pub fn equip_slot_position(slot: EquipSlot) -> (i32, i32) {
    let size = super::inventory::SLOT_SIZE;
    let index = slot.index();
    let col = (index % EQUIP_COLS) as i32;
    let row = (index / EQUIP_COLS) as i32;
    (EQUIP_X + col * size, EQUIP_Y + row * size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, ItemKind, Rarity};

    fn ring(name: &str) -> Item {
        Item::from_definition(&ItemDefinition::equip(
            name, "", ItemKind::Equip(EquipSlot::Ring), Rarity::Epic, 0, 5, 0, 0, 10,
        ))
    }

    #[test]
    fn test_add_and_remove_equip() {
        let mut equips = Equipment::new();
        equips.add_equip(ring("a")).unwrap();
        assert!(equips.get(EquipSlot::Ring).unwrap().equipped);

        let rejected = equips.add_equip(ring("b")).unwrap_err();
        assert_eq!(rejected.name, "b");

        let removed = equips.remove_equip(EquipSlot::Ring).unwrap();
        assert!(!removed.equipped);
        assert!(equips.is_empty());
        assert!(equips.remove_equip(EquipSlot::Ring).is_none());
    }

    #[test]
    fn test_non_equip_rejected() {
        let mut equips = Equipment::new();
        let potion = Item::from_definition(&ItemDefinition::potion("p", "", Rarity::Common, 0, 5, 1));
        assert!(equips.add_equip(potion).is_err());
    }

    #[test]
    fn test_iter_in_slot_order() {
        let mut equips = Equipment::new();
        equips.add_equip(ring("r")).unwrap();
        let helmet = ItemDefinition::equip("h", "", ItemKind::Equip(EquipSlot::Helmet), Rarity::Common, 0, 1, 0, 0, 1);
        equips.add_equip(Item::from_definition(&helmet)).unwrap();

        let slots: Vec<EquipSlot> = equips.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![EquipSlot::Helmet, EquipSlot::Ring]);
    }

    #[test]
    fn test_hovered_equip_slot() {
        for slot in EquipSlot::ALL {
            let (x, y) = equip_slot_position(slot);
            assert_eq!(hovered_equip_slot(x + 1, y + 1), Some(slot));
        }
        assert_eq!(hovered_equip_slot(EQUIP_X + 64, EQUIP_Y), None);
        assert_eq!(hovered_equip_slot(EQUIP_X, EQUIP_Y + 4 * 32), None);
    }
}

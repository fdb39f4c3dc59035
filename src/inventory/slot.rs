use crate::item::EquipSlot;

use super::equipment::hovered_equip_slot;
use super::inventory::hovered_index;

/// A bag cell or an equipment cell of the inventory screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventorySlot {
    Bag(usize),
    Equip(EquipSlot),
}

/// The slot under a point of the inventory screen, bag first
pub fn slot_at(x: i32, y: i32) -> Option<InventorySlot> {
    hovered_index(x, y)
        .map(InventorySlot::Bag)
        .or_else(|| hovered_equip_slot(x, y).map(InventorySlot::Equip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::equipment::equip_slot_position;
    use crate::inventory::inventory::slot_position;

    #[test]
    fn test_slot_at_matches_layout() {
        let (x, y) = slot_position(7);
        assert_eq!(slot_at(x + 3, y + 3), Some(InventorySlot::Bag(7)));
        let (x, y) = equip_slot_position(EquipSlot::Shoes);
        assert_eq!(slot_at(x + 3, y + 3), Some(InventorySlot::Equip(EquipSlot::Shoes)));
        assert_eq!(slot_at(2, 2), None);
    }
}

use crate::item::Item;
use super::error::InventoryError;
use serde::{Serialize, Deserialize};

/// Columns in the inventory grid
pub const NUM_COLS: usize = 6;
/// Rows in the inventory grid
pub const NUM_ROWS: usize = 4;
pub const NUM_SLOTS: usize = NUM_COLS * NUM_ROWS;

/// Size of one inventory cell in logical pixels
pub const SLOT_SIZE: i32 = 32;
/// Top-left corner of the inventory grid on screen
pub const INV_X: i32 = 196;
pub const INV_Y: i32 = 72;

/// The player's bag
///
/// Fixed grid of 24 slots. Every stored item knows its own slot through
/// `Item::index`, which the inventory keeps in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    /// Slots that can hold one item each (None = empty)
    pub slots: Vec<Option<Item>>,
}

impl Inventory {
    /// Creates a new empty inventory
    pub fn new() -> Self {
        Inventory {
            slots: vec![None; NUM_SLOTS],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the inventory has no items
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Returns true if all slots are occupied
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    pub fn num_items(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Finds the first empty slot index
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// True when `index` is in range and holds nothing
    pub fn is_free_slot(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    pub fn get_item(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Adds an item to the first free slot
    ///
    /// Returns the slot it landed in. A full inventory hands the item back
    /// inside `InventoryError::InventoryFull`.
    pub fn add_item(&mut self, mut item: Item) -> Result<usize, InventoryError> {
        let Some(index) = self.find_empty_slot() else {
            return Err(InventoryError::InventoryFull(Box::new(item)));
        };
        item.index = index;
        item.equipped = false;
        self.slots[index] = Some(item);
        Ok(index)
    }

    /// Places an item in a specific slot
    pub fn add_item_at(&mut self, mut item: Item, index: usize) -> Result<(), InventoryError> {
        match self.slots.get(index) {
            None => Err(InventoryError::InvalidSlot(index)),
            Some(Some(_)) => Err(InventoryError::SlotOccupied { index, item: Box::new(item) }),
            Some(None) => {
                item.index = index;
                item.equipped = false;
                self.slots[index] = Some(item);
                Ok(())
            }
        }
    }

    /// Takes the item out of a slot
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Moves an item from `from` to `to`
    ///
    /// Onto an occupied slot the two items trade places; onto a free slot
    /// the item simply moves.
    pub fn swap(&mut self, from: usize, to: usize) -> Result<(), InventoryError> {
        if from >= self.capacity() {
            return Err(InventoryError::InvalidSlot(from));
        }
        if to >= self.capacity() {
            return Err(InventoryError::InvalidSlot(to));
        }
        if self.slots[from].is_none() {
            return Err(InventoryError::EmptySlot(from));
        }

        self.slots.swap(from, to);
        for index in [from, to] {
            if let Some(item) = &mut self.slots[index] {
                item.index = index;
            }
        }
        Ok(())
    }

    /// Clears all items from the inventory
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Returns an iterator over all stored items
    pub fn iter_items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Inventory slot under a screen point, if any
///
/// Slot `i` sits at column `i % 6`, row `i / 6` of the grid anchored at
/// (`INV_X`, `INV_Y`).
pub fn hovered_index(x: i32, y: i32) -> Option<usize> {
    if x < INV_X || y < INV_Y {
        return None;
    }
    let col = ((x - INV_X) / SLOT_SIZE) as usize;
    let row = ((y - INV_Y) / SLOT_SIZE) as usize;
    if col >= NUM_COLS || row >= NUM_ROWS {
        return None;
    }
    Some(row * NUM_COLS + col)
}

/// Top-left corner of an inventory slot on screen
pub fn slot_position(index: usize) -> (i32, i32) {
    let col = (index % NUM_COLS) as i32;
    let row = (index / NUM_COLS) as i32;
    (INV_X + col * SLOT_SIZE, INV_Y + row * SLOT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, Rarity};

    fn rock(name: &str) -> Item {
        Item::from_definition(&ItemDefinition::misc(name, "", Rarity::Common, 0, 1))
    }

    #[test]
    fn test_add_fills_first_free_slot() {
        let mut inv = Inventory::new();
        assert_eq!(inv.add_item(rock("a")).unwrap(), 0);
        assert_eq!(inv.add_item(rock("b")).unwrap(), 1);
        inv.remove_item(0);
        assert_eq!(inv.add_item(rock("c")).unwrap(), 0);
        assert_eq!(inv.get_item(0).unwrap().index, 0);
        assert_eq!(inv.num_items(), 2);
    }

    #[test]
    fn test_full_inventory_returns_item() {
        let mut inv = Inventory::new();
        for i in 0..NUM_SLOTS {
            inv.add_item(rock(&i.to_string())).unwrap();
        }
        assert!(inv.is_full());

        let err = inv.add_item(rock("extra")).unwrap_err();
        assert_eq!(err.to_string(), "Inventory is full");
        assert_eq!(err.into_item().unwrap().name, "extra");
    }

    #[test]
    fn test_add_item_at() {
        let mut inv = Inventory::new();
        inv.add_item_at(rock("a"), 5).unwrap();
        assert!(!inv.is_free_slot(5));
        assert!(inv.is_free_slot(4));
        assert!(!inv.is_free_slot(NUM_SLOTS));

        let err = inv.add_item_at(rock("b"), 5).unwrap_err();
        assert!(matches!(err, InventoryError::SlotOccupied { index: 5, .. }));
        assert!(matches!(inv.add_item_at(rock("c"), 99), Err(InventoryError::InvalidSlot(99))));
    }

    #[test]
    fn test_swap_moves_and_trades() {
        let mut inv = Inventory::new();
        inv.add_item(rock("a")).unwrap();
        inv.add_item(rock("b")).unwrap();

        inv.swap(0, 1).unwrap();
        assert_eq!(inv.get_item(0).unwrap().name, "b");
        assert_eq!(inv.get_item(1).unwrap().name, "a");
        assert_eq!(inv.get_item(1).unwrap().index, 1);

        inv.swap(1, 10).unwrap();
        assert!(inv.is_free_slot(1));
        assert_eq!(inv.get_item(10).unwrap().index, 10);

        assert!(matches!(inv.swap(3, 4), Err(InventoryError::EmptySlot(3))));
    }

    #[test]
    fn test_clear() {
        let mut inv = Inventory::new();
        inv.add_item(rock("a")).unwrap();
        inv.clear();
        assert!(inv.is_empty());
    }

    #[test]
    fn test_hovered_index() {
        assert_eq!(hovered_index(INV_X, INV_Y), Some(0));
        assert_eq!(hovered_index(INV_X + 33, INV_Y + 1), Some(1));
        assert_eq!(hovered_index(INV_X + 5, INV_Y + 33), Some(6));
        assert_eq!(hovered_index(INV_X + 6 * 32 - 1, INV_Y + 4 * 32 - 1), Some(23));
        assert_eq!(hovered_index(INV_X + 6 * 32, INV_Y), None);
        assert_eq!(hovered_index(INV_X - 1, INV_Y), None);

        for i in 0..NUM_SLOTS {
            let (x, y) = slot_position(i);
            assert_eq!(hovered_index(x + 16, y + 16), Some(i));
        }
    }
}

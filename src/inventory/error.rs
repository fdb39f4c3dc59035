use thiserror::Error;
use crate::item::Item;

/// Errors that can occur during inventory operations
///
/// Variants that reject an item hand it back so nothing is lost.
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    /// Slot index out of bounds
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    /// Target slot already holds an item
    #[error("Slot {index} is occupied")]
    SlotOccupied { index: usize, item: Box<Item> },

    /// No free slot left
    #[error("Inventory is full")]
    InventoryFull(Box<Item>),

    /// Nothing in the requested slot
    #[error("Slot {0} is empty")]
    EmptySlot(usize),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("{0} cannot be consumed")]
    NotConsumable(String),
}

impl InventoryError {
    /// Recovers the rejected item, if this error carries one
    pub fn into_item(self) -> Option<Item> {
        match self {
            InventoryError::SlotOccupied { item, .. } | InventoryError::InventoryFull(item) => Some(*item),
            _ => None,
        }
    }
}

impl From<InventoryError> for String {
    fn from(error: InventoryError) -> Self {
        error.to_string()
    }
}

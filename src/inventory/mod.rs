// Inventory system module
//
// This module provides inventory management for Unlucky, including:
// - The 24-slot bag with drag-and-drop slot lookup
// - Equipment slots worn by the player

pub mod equipment;
pub mod error;
pub mod inventory;
pub mod slot;

// Re-export main types
pub use equipment::{Equipment, hovered_equip_slot};
pub use error::InventoryError;
pub use inventory::{Inventory, hovered_index};
pub use slot::{InventorySlot, slot_at};

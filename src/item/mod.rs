// Item system module
//
// This module provides the loot side of the game:
// - Item definitions and rarity/type properties
// - Owned item instances scaled to a level
// - The rarity-pooled registry loaded from items.json

pub mod definition;
pub mod instance;
pub mod properties;
pub mod registry;

// Re-export main types for convenient access
pub use definition::ItemDefinition;
pub use instance::Item;
pub use properties::{EquipSlot, ItemKind, Rarity};
pub use registry::ItemRegistry;

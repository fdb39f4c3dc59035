use log::debug;
use serde::Deserialize;

use super::definition::{ItemDefinition, RawItem};
use super::instance::Item;
use super::properties::*;
use crate::resource::ResourceError;
use crate::rng::GameRng;

/// Every item that can drop, grouped by rarity
///
/// This is the single source of truth for what items exist in the game.
/// Lookups always hand out an owned `Item` copy so callers can adjust it
/// without touching the pool.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    pools: [Vec<ItemDefinition>; 4],
}

/// `items.json` layout: one array per rarity
#[derive(Debug, Deserialize)]
struct ItemFile {
    #[serde(default)]
    rare0: Vec<RawItem>,
    #[serde(default)]
    rare1: Vec<RawItem>,
    #[serde(default)]
    rare2: Vec<RawItem>,
    #[serde(default)]
    rare3: Vec<RawItem>,
}

impl ItemRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the contents of `items.json`
    pub fn from_json(json: &str) -> Result<Self, ResourceError> {
        let file: ItemFile = serde_json::from_str(json)
            .map_err(|source| ResourceError::Json { name: "items.json".to_string(), source })?;

        let mut registry = Self::new();
        let groups = [file.rare0, file.rare1, file.rare2, file.rare3];
        for (rarity, raws) in Rarity::ALL.into_iter().zip(groups) {
            for raw in raws {
                let code = raw.kind;
                let name = raw.name.clone();
                let def = raw
                    .into_definition(rarity)
                    .ok_or(ResourceError::UnknownItemType { item: name, code })?;
                registry.register(def);
            }
        }

        debug!(
            "Loaded items: {} common, {} rare, {} epic, {} legendary",
            registry.pools[0].len(),
            registry.pools[1].len(),
            registry.pools[2].len(),
            registry.pools[3].len()
        );
        Ok(registry)
    }

    /// Adds a definition to the pool of its rarity
    pub fn register(&mut self, def: ItemDefinition) {
        self.pools[def.rarity.index()].push(def);
    }

    pub fn pool(&self, rarity: Rarity) -> &[ItemDefinition] {
        &self.pools[rarity.index()]
    }

    /// Total number of definitions across all rarities
    pub fn len(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a definition by name
    pub fn find(&self, name: &str) -> Option<&ItemDefinition> {
        self.pools.iter().flatten().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    // ======================================================================
    // Item Rolls
    // ======================================================================

    /// Random item of a given rarity
    pub fn get_item(&self, rarity: Rarity, rng: &mut GameRng) -> Option<Item> {
        let pool = self.pool(rarity);
        if pool.is_empty() {
            return None;
        }
        Some(Item::from_definition(&pool[rng.below(pool.len())]))
    }

    /// Item at a fixed position within a rarity pool
    pub fn get_item_at(&self, rarity: Rarity, index: usize) -> Option<Item> {
        self.pool(rarity).get(index).map(Item::from_definition)
    }

    /// Random item, rarity weighted by the drop thresholds
    ///
    /// Falls back to `None` when the rolled rarity has no items.
    pub fn get_random_item(&self, rng: &mut GameRng) -> Option<Item> {
        let roll = rng.below(LEGENDARY_ITEM_RNG_INDEX as usize) as i32;
        let rarity = Rarity::from_roll(roll)?;
        self.get_item(rarity, rng)
    }

    /// Random item with every rarity equally likely
    pub fn get_random_item_from_pool(&self, rng: &mut GameRng) -> Option<Item> {
        let rarity = Rarity::from_index(rng.below(Rarity::ALL.len()))?;
        self.get_item(rarity, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rare0": [
            { "name": "red potion", "desc": "a small potion", "type": 0, "hp": 10, "sell": 2, "imgIndex": 0 },
            { "name": "slime ball", "desc": "sticky", "type": 1, "sell": 3, "imgIndex": 1 }
        ],
        "rare1": [
            { "name": "iron sword", "desc": "a sword", "type": 4, "mhp": 0, "dmg": 2, "acc": 0, "sell": 20, "imgIndex": 2 }
        ],
        "rare2": [],
        "rare3": [
            { "name": "golden ring", "desc": "shiny", "type": 9, "mhp": 10, "dmg": 1, "acc": 5, "sell": 80, "imgIndex": 3 }
        ]
    }"#;

    #[test]
    fn test_parse_groups_by_rarity() {
        let registry = ItemRegistry::from_json(SAMPLE).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.pool(Rarity::Common).len(), 2);
        assert_eq!(registry.pool(Rarity::Epic).len(), 0);

        let sword = registry.find("IRON SWORD").unwrap();
        assert_eq!(sword.kind, ItemKind::Equip(EquipSlot::Weapon));
        assert_eq!(sword.rarity, Rarity::Rare);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let json = r#"{ "rare0": [ { "name": "odd", "desc": "", "type": 42 } ] }"#;
        let err = ItemRegistry::from_json(json).unwrap_err();
        assert!(matches!(err, ResourceError::UnknownItemType { code: 42, .. }));
    }

    #[test]
    fn test_get_item_at() {
        let registry = ItemRegistry::from_json(SAMPLE).unwrap();
        assert_eq!(registry.get_item_at(Rarity::Common, 1).unwrap().name, "slime ball");
        assert!(registry.get_item_at(Rarity::Common, 2).is_none());
    }

    #[test]
    fn test_empty_pool_yields_none() {
        let registry = ItemRegistry::from_json(SAMPLE).unwrap();
        let mut rng = GameRng::new(3);
        assert!(registry.get_item(Rarity::Epic, &mut rng).is_none());
    }

    #[test]
    fn test_random_items_come_from_pools() {
        let registry = ItemRegistry::from_json(SAMPLE).unwrap();
        let mut rng = GameRng::new(11);
        for _ in 0..200 {
            if let Some(item) = registry.get_random_item(&mut rng) {
                assert!(registry.find(&item.name).is_some());
            }
            if let Some(item) = registry.get_random_item_from_pool(&mut rng) {
                assert_ne!(item.rarity, Rarity::Epic);
            }
        }
    }
}

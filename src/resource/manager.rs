use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::{info, warn};

use super::builtin;
use super::error::ResourceError;
use crate::battle::moves::{boss_moves_from_json, Move, MovePool};
use crate::item::ItemRegistry;
use crate::map::{GameMap, TileMap};

/// Main store of the game's data files
///
/// Moves and items are parsed once at startup. Maps are read on demand
/// when a level is entered. Files missing from the asset directory fall
/// back to the copies compiled into the binary.
#[derive(Debug, Clone)]
pub struct ResourceManager {
    asset_dir: Option<PathBuf>,
    pub moves: MovePool,
    pub boss_moves: BTreeMap<String, Vec<Move>>,
    pub items: ItemRegistry,
}

impl ResourceManager {
    /// Loads every data file under `asset_dir`
    pub fn load(asset_dir: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let dir = asset_dir.as_ref().to_path_buf();
        info!("Loading assets from {}", dir.display());

        let moves = read_or_builtin(&dir, "moves/moves.json", builtin::MOVES_JSON)?;
        let boss_moves = read_or_builtin(&dir, "moves/boss_moves.json", builtin::BOSS_MOVES_JSON)?;
        let items = read_or_builtin(&dir, "items/items.json", builtin::ITEMS_JSON)?;

        let manager = ResourceManager {
            asset_dir: Some(dir),
            moves: MovePool::from_json(&moves)?,
            boss_moves: boss_moves_from_json(&boss_moves)?,
            items: ItemRegistry::from_json(&items)?,
        };
        info!("Loaded {} moves and {} items", manager.moves.len(), manager.items.len());
        Ok(manager)
    }

    /// Uses only the compiled-in assets
    pub fn builtin() -> Result<Self, ResourceError> {
        Ok(ResourceManager {
            asset_dir: None,
            moves: MovePool::from_json(builtin::MOVES_JSON)?,
            boss_moves: boss_moves_from_json(builtin::BOSS_MOVES_JSON)?,
            items: ItemRegistry::from_json(builtin::ITEMS_JSON)?,
        })
    }

    pub fn asset_dir(&self) -> Option<&Path> {
        self.asset_dir.as_deref()
    }

    /// Loads the tile map of a world level
    ///
    /// Looks for `maps/w{world}_m{level}.txt` on disk, then in the built-in
    /// maps, then falls back to the test map.
    pub fn load_map(&self, world: usize, level: usize) -> Result<TileMap, ResourceError> {
        let name = GameMap::file_name(world, level);
        let text = match &self.asset_dir {
            Some(dir) => match read_file(&dir.join(&name))? {
                Some(text) => text,
                None => fallback_map(&name, world, level).to_string(),
            },
            None => fallback_map(&name, world, level).to_string(),
        };
        TileMap::parse(&text).map_err(|source| ResourceError::Map { name, source })
    }
}

fn fallback_map(name: &str, world: usize, level: usize) -> &'static str {
    builtin::map(world, level).unwrap_or_else(|| {
        warn!("No map {name}, using the test map");
        builtin::TEST_MAP
    })
}

/// Reads a file, `None` if it doesn't exist
fn read_file(path: &Path) -> Result<Option<String>, ResourceError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ResourceError::Io { path: path.to_path_buf(), source }),
    }
}

fn read_or_builtin(dir: &Path, name: &str, fallback: &str) -> Result<String, ResourceError> {
    match read_file(&dir.join(name))? {
        Some(text) => Ok(text),
        None => {
            warn!("{} not found in {}, using built-in copy", name, dir.display());
            Ok(fallback.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Rarity;

    #[test]
    fn test_builtin_assets_parse() {
        let rm = ResourceManager::builtin().unwrap();
        assert!(rm.moves.len() >= 4);
        assert!(!rm.moves.healing.is_empty());
        assert!(rm.boss_moves.contains_key("slime"));
        for rarity in Rarity::ALL {
            assert!(!rm.items.pool(rarity).is_empty(), "{rarity:?} pool is empty");
        }
    }

    #[test]
    fn test_builtin_maps_parse() {
        let rm = ResourceManager::builtin().unwrap();
        for level in 0..5 {
            let map = rm.load_map(0, level).unwrap();
            assert!(map.num_entities() > 0);
        }
        // unknown maps fall back to the test map
        let fallback = rm.load_map(3, 2).unwrap();
        let test_map = TileMap::parse(builtin::TEST_MAP).unwrap();
        assert_eq!(fallback.spawn, test_map.spawn);
    }

    #[test]
    fn test_missing_dir_uses_builtin() {
        let rm = ResourceManager::load("/nonexistent/unlucky-assets").unwrap();
        assert_eq!(rm.items.len(), ResourceManager::builtin().unwrap().items.len());
        assert!(rm.load_map(0, 0).is_ok());
    }
}

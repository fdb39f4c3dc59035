//! Save manager for handling save/load operations
//!
//! This module provides the SaveManager struct which handles:
//! - Saving game state to files
//! - Loading game state from files
//! - Autosave timing
//! - Autosave cleanup

use super::types::*;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub const NUM_SLOTS: u8 = 5;

pub struct SaveManager {
    save_directory: PathBuf,
    current_save_slot: u8,
    autosave_interval: Duration,
    last_autosave: SystemTime,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
            current_save_slot: 1,
            autosave_interval: Duration::from_secs(300),
            last_autosave: SystemTime::now(),
        })
    }

    /// `<data dir>/unlucky/saves`, or `./saves` when there is no data dir
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("unlucky").join("saves"))
            .unwrap_or_else(|| PathBuf::from("./saves"))
    }

    pub fn directory(&self) -> &Path {
        &self.save_directory
    }

    /// Sets the current save slot (1-5)
    pub fn set_save_slot(&mut self, slot: u8) {
        self.current_save_slot = slot.clamp(1, NUM_SLOTS);
    }

    pub fn get_save_slot(&self) -> u8 {
        self.current_save_slot
    }

    pub fn set_autosave_interval(&mut self, interval: Duration) {
        self.autosave_interval = interval;
    }

    /// Save the game state to a file
    pub fn save_game(&mut self, save_file: &SaveFile) -> Result<PathBuf, SaveError> {
        let filename = self.generate_filename(save_file.metadata.save_type, save_file.metadata.save_slot);
        let filepath = self.save_directory.join(&filename);

        let json = serde_json::to_string_pretty(save_file)?;
        fs::write(&filepath, json)?;

        if save_file.metadata.save_type == SaveType::Auto {
            self.last_autosave = SystemTime::now();
        }

        info!("Game saved to: {}", filepath.display());
        Ok(filepath)
    }

    /// Load a save file from a specific slot
    pub fn load_game(&self, slot: u8) -> Result<SaveFile, SaveError> {
        let filename = format!("slot_{}.json", slot);
        match self.load_game_by_filename(&filename) {
            Err(SaveError::Io(e)) if e.kind() == ErrorKind::NotFound => Err(SaveError::NotFound(slot)),
            other => other,
        }
    }

    /// Load a save file by filename
    pub fn load_game_by_filename(&self, filename: &str) -> Result<SaveFile, SaveError> {
        let filepath = self.save_directory.join(filename);

        let json = fs::read_to_string(&filepath)?;
        let save_file: SaveFile = serde_json::from_str(&json)?;

        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }
        if save_file.player.level < 1 || save_file.player.stats.max_hp < 1 {
            return Err(SaveError::CorruptedData(format!("bad player state in {filename}")));
        }

        debug!("Loaded {} (version {})", filename, save_file.version);
        Ok(save_file)
    }

    /// Check if autosave is needed
    pub fn should_autosave(&self) -> bool {
        match SystemTime::now().duration_since(self.last_autosave) {
            Ok(elapsed) => elapsed >= self.autosave_interval,
            Err(_) => false,
        }
    }

    fn generate_filename(&self, save_type: SaveType, slot: u8) -> String {
        match save_type {
            SaveType::Manual | SaveType::QuickSave => format!("slot_{}.json", slot),
            SaveType::Auto => {
                let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                format!("autosave_slot{}_{}.json", slot, timestamp)
            }
        }
    }

    /// Delete old autosaves, keeping only the N most recent per slot
    pub fn cleanup_autosaves(&self, keep_count: usize) -> Result<(), SaveError> {
        for slot in 1..=NUM_SLOTS {
            let prefix = format!("autosave_slot{}_", slot);

            let mut autosaves: Vec<_> = fs::read_dir(&self.save_directory)?
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_name().to_str().is_some_and(|s| s.starts_with(&prefix)))
                .collect();

            // Timestamped names sort oldest first
            autosaves.sort_by_key(|entry| std::cmp::Reverse(entry.file_name()));

            for entry in autosaves.iter().skip(keep_count) {
                debug!("Removing old autosave {}", entry.path().display());
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }

    /// Check if a save file exists for a given slot
    pub fn save_exists(&self, slot: u8) -> bool {
        self.save_directory.join(format!("slot_{}.json", slot)).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Player;
    use crate::item::{Item, ItemDefinition, ItemKind, Rarity, EquipSlot};
    use crate::battle::SpecialMove;
    use crate::progress::Progress;
    use crate::rng::GameRng;
    use crate::statistics::Statistics;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("unlucky-test-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = temp_dir("round-trip");
        let mut manager = SaveManager::new(&dir).unwrap();
        assert!(!manager.save_exists(1));
        assert!(matches!(manager.load_game(1), Err(SaveError::NotFound(1))));

        let mut rng = GameRng::new(5);
        let mut player = Player::new(&mut rng);
        player.add_exp(500, &mut rng);
        player.gold = 123;
        let helm = ItemDefinition::equip("cap", "", ItemKind::Equip(EquipSlot::Helmet), Rarity::Rare, 0, 4, 1, 0, 10);
        player.inventory.add_item(Item::from_definition(&helm)).unwrap();
        player.equip_from_inventory(0).unwrap();
        player.smoveset.add(SpecialMove::Focus);
        player.smove_cd = 1;

        let mut stats = Statistics::new();
        stats.record_steps(42);
        let progress = Progress { highest_world: 0, highest_level: 2 };

        let save = SaveFile::new(&player, progress, &stats, SaveType::Manual, 1, 60);
        let path = manager.save_game(&save).unwrap();
        assert!(path.ends_with("slot_1.json"));
        assert!(manager.save_exists(1));

        let loaded = manager.load_game(1).unwrap();
        assert_eq!(loaded.version, CURRENT_SAVE_VERSION);
        assert_eq!(loaded.player.level, player.level);
        assert_eq!(loaded.player.exp, player.exp);
        assert_eq!(loaded.player.max_exp, player.max_exp);
        assert_eq!(loaded.player.gold, 123);
        assert_eq!(loaded.player.stats, player.stats);
        assert!(loaded.player.equips.get(EquipSlot::Helmet).is_some());
        assert!(loaded.player.smoveset.contains(SpecialMove::Focus));
        assert_eq!(loaded.player.smove_cd, 1);
        assert_eq!(loaded.progress, progress);
        assert_eq!(loaded.statistics.tiles_walked, 42);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = temp_dir("version");
        let mut manager = SaveManager::new(&dir).unwrap();
        let mut rng = GameRng::new(1);
        let mut save = SaveFile::new(&Player::new(&mut rng), Progress::new(), &Statistics::new(), SaveType::Manual, 2, 0);
        save.version = CURRENT_SAVE_VERSION + 1;
        manager.save_game(&save).unwrap();
        assert!(matches!(manager.load_game(2), Err(SaveError::InvalidVersion(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_autosave_naming_and_timer() {
        let dir = temp_dir("autosave");
        let mut manager = SaveManager::new(&dir).unwrap();
        assert!(!manager.should_autosave());
        manager.set_autosave_interval(Duration::ZERO);
        assert!(manager.should_autosave());

        let mut rng = GameRng::new(1);
        let save = SaveFile::new(&Player::new(&mut rng), Progress::new(), &Statistics::new(), SaveType::Auto, 3, 0);
        let path = manager.save_game(&save).unwrap();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap().to_string();
        assert!(name.starts_with("autosave_slot3_"));

        manager.cleanup_autosaves(0).unwrap();
        assert!(!path.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}

//! Save/Load system for Unlucky
//!
//! This module provides the save/load system with:
//! - JSON-based save files (human-readable, debuggable)
//! - Multiple save slots (1-5)
//! - Timestamped autosaves on a configurable interval
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//!
//! # Example Usage
//!
//! ```no_run
//! use unlucky::save::{SaveFile, SaveManager, SaveType};
//! # fn demo(game: &unlucky::Game) -> Result<(), unlucky::save::SaveError> {
//! let mut save_manager = SaveManager::new(SaveManager::default_dir())?;
//!
//! let save_file = SaveFile::new(&game.player, game.progress, &game.statistics, SaveType::Manual, 1, 0);
//! save_manager.save_game(&save_file)?;
//!
//! let loaded = save_manager.load_game(1)?;
//! # let _ = loaded;
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod types;

// Re-export commonly used types
pub use manager::SaveManager;
pub use types::*;

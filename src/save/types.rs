//! Save data types for Unlucky
//!
//! This module defines all the data structures used for saving and loading game state.
//! It uses Serde for serialization/deserialization to JSON format.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

use crate::entity::Player;
use crate::progress::Progress;
use crate::statistics::Statistics;

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The root save file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub timestamp: SystemTime,
    pub metadata: SaveMetadata,
    pub player: Player,
    pub progress: Progress,
    #[serde(default)]
    pub statistics: Statistics,
}

impl SaveFile {
    pub fn new(
        player: &Player,
        progress: Progress,
        statistics: &Statistics,
        save_type: SaveType,
        save_slot: u8,
        playtime_seconds: u64,
    ) -> Self {
        SaveFile {
            version: CURRENT_SAVE_VERSION,
            timestamp: SystemTime::now(),
            metadata: SaveMetadata {
                game_version: env!("CARGO_PKG_VERSION").to_string(),
                player_level: player.level,
                playtime_seconds,
                save_type,
                save_slot,
            },
            player: player.clone(),
            progress,
            statistics: statistics.clone(),
        }
    }
}

/// Metadata about the save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub game_version: String,
    pub player_level: i32,
    pub playtime_seconds: u64,
    pub save_type: SaveType,
    pub save_slot: u8,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SaveType {
    Manual,
    Auto,
    QuickSave,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No save in slot {0}")]
    NotFound(u8),

    #[error("Invalid save version: {0}")]
    InvalidVersion(u32),

    #[error("Corrupted save data: {0}")]
    CorruptedData(String),
}

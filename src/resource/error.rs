use std::path::PathBuf;
use thiserror::Error;

use crate::map::MapError;

/// Errors raised while loading game data
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Item '{item}' has unknown type {code}")]
    UnknownItemType { item: String, code: i32 },

    #[error("{file}: move '{name}' has unknown type {code}")]
    UnknownMoveType { file: String, name: String, code: i32 },

    #[error("Map {name}: {source}")]
    Map {
        name: String,
        #[source]
        source: MapError,
    },
}

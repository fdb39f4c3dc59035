// Resource module
//
// Loads moves, items and maps from the asset directory.

pub mod builtin;
pub mod error;
pub mod manager;

pub use error::ResourceError;
pub use manager::ResourceManager;

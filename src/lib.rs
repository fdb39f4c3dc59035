//! Unlucky - a turn-based RPG where luck decides most fights
//!
//! The library holds every rule of the game: tile maps and their events,
//! battles with moves and special moves, items, the inventory, progress,
//! saves and the debug console. The SDL2 front-end in `main.rs` only draws
//! `Game` and forwards input to it.

pub mod battle;
pub mod command;
pub mod config;
pub mod dialog;
pub mod entity;
pub mod event;
pub mod game;
pub mod inventory;
pub mod item;
pub mod map;
pub mod progress;
pub mod resource;
pub mod rng;
pub mod save;
pub mod screen;
pub mod statistics;

pub use game::Game;

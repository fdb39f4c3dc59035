//! Screen-Space GUI System
//!
//! Everything drawn on the 400x240 logical canvas. Components either keep
//! a little cursor state of their own (`BattleMenu`, `InventoryUI`,
//! `Console`) or are plain functions over library state.
//!
//! # Available Components
//!
//! - [`Menu`] - Titled option list used by the menu screens
//! - [`BattleMenu`] - Move buttons and special move list
//! - [`InventoryUI`] - Bag, equipment and tooltips
//! - [`Hud`] / [`Console`] - Map status bar and debug console
//! - [`DeathScreen`] - Defeat overlay
//! - `render_map`, `render_dialog` and the `screens` functions

pub mod battle_ui;
pub mod death_screen;
pub mod dialog_box;
pub mod health_bar;
pub mod hud;
pub mod inventory_ui;
pub mod map_view;
pub mod menu;
pub mod screens;

pub use battle_ui::{BattleChoice, BattleMenu};
pub use death_screen::DeathScreen;
pub use dialog_box::render_dialog;
pub use hud::{Console, Hud};
pub use inventory_ui::{InventorySlot, InventoryUI};
pub use map_view::render_map;
pub use menu::{Menu, MenuItem};

// Screen module
//
// Menu state machines for the screens outside the map. They only track
// selection and what confirming leads to; drawing is up to the front-end.

pub mod main_menu;
pub mod selector;
pub mod special_moves;
pub mod world_select;

pub use main_menu::{MainMenu, MainMenuOption};
pub use selector::Selector;
pub use special_moves::{SmoveToggle, SpecialMoveManager};
pub use world_select::{LevelSelect, WorldSelect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    WorldSelect,
    LevelSelect,
    Game,
    SpecialMoves,
    Statistics,
    Quit,
}

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

use unlucky::event::EventState;
use unlucky::map::Direction;

/// Actions the player can perform
///
/// Raw SDL2 events are turned into these first, so the rest of the
/// front-end never looks at keycodes.
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    // === Menu Navigation ===
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    MenuConfirm,
    MenuBack,

    // === Map ===
    Move(Direction),
    ToggleInventory,

    // === Battle ===
    /// Number key shortcut: moves 0-3, then special (4) and run (5)
    BattlePick(usize),

    // === Dialog ===
    AdvanceDialog,

    // === Inventory Actions ===
    UseItem,
    SellItem,
    LeftClick(i32, i32),
    LeftRelease(i32, i32),
    RightClick(i32, i32),
    MouseMove(i32, i32),

    // === Console ===
    OpenConsole,
    ConsoleText(String),
    ConsoleBackspace,
    ConsoleSubmit,
    CloseConsole,

    // === System ===
    QuickSave,
    Quit,
}

/// Input context determines which actions are available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Main menu, world/level select, special moves, statistics
    Menu,
    /// Walking around the map
    Map,
    /// A dialog box is waiting for a click
    Dialog,
    /// The battle menu is open
    Battle,
    Inventory,
    /// Level-up or death summary
    Summary,
    Console,
    /// Fading between states; only quitting works
    Locked,
}

impl InputContext {
    /// Picks the context for the game screen from the game's state
    pub fn for_game(state: EventState, dialog_active: bool, console_open: bool) -> Self {
        if console_open {
            return InputContext::Console;
        }
        match state {
            EventState::Transition => InputContext::Locked,
            _ if dialog_active => InputContext::Dialog,
            EventState::Battling => InputContext::Battle,
            EventState::Inventory => InputContext::Inventory,
            EventState::LevelUp | EventState::Death => InputContext::Summary,
            EventState::Moving | EventState::None => InputContext::Map,
            EventState::TileEvent => InputContext::Dialog,
        }
    }
}

/// Turns SDL2 events into GameActions for the current context
pub struct InputSystem {
    pub context: InputContext,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Menu,
        }
    }

    /// Drains the event pump
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<GameAction> {
        let mut actions = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(GameAction::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => self.handle_keydown(key, repeat, &mut actions),
                Event::TextInput { text, .. } if self.context == InputContext::Console => {
                    actions.push(GameAction::ConsoleText(text));
                }
                Event::MouseButtonDown { mouse_btn, x, y, .. } => match (self.context, mouse_btn) {
                    (InputContext::Inventory, MouseButton::Left) => actions.push(GameAction::LeftClick(x, y)),
                    (InputContext::Inventory, MouseButton::Right) => actions.push(GameAction::RightClick(x, y)),
                    (InputContext::Dialog, MouseButton::Left) => actions.push(GameAction::AdvanceDialog),
                    _ => {}
                },
                Event::MouseButtonUp { mouse_btn: MouseButton::Left, x, y, .. }
                    if self.context == InputContext::Inventory =>
                {
                    actions.push(GameAction::LeftRelease(x, y));
                }
                Event::MouseMotion { x, y, .. } if self.context == InputContext::Inventory => {
                    actions.push(GameAction::MouseMove(x, y));
                }
                _ => {}
            }
        }

        actions
    }

    fn handle_keydown(&self, key: Keycode, repeat: bool, actions: &mut Vec<GameAction>) {
        match self.context {
            InputContext::Menu => self.handle_menu_keys(key, actions),
            InputContext::Map => self.handle_map_keys(key, actions),
            InputContext::Dialog if !repeat => {
                if matches!(key, Keycode::Return | Keycode::Space | Keycode::Z) {
                    actions.push(GameAction::AdvanceDialog);
                }
            }
            InputContext::Battle => self.handle_battle_keys(key, actions),
            InputContext::Inventory => self.handle_inventory_keys(key, actions),
            InputContext::Summary if !repeat => {
                if matches!(key, Keycode::Return | Keycode::Space | Keycode::Z) {
                    actions.push(GameAction::MenuConfirm);
                }
            }
            InputContext::Console => match key {
                Keycode::Return => actions.push(GameAction::ConsoleSubmit),
                Keycode::Backspace => actions.push(GameAction::ConsoleBackspace),
                Keycode::Escape => actions.push(GameAction::CloseConsole),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_menu_keys(&self, key: Keycode, actions: &mut Vec<GameAction>) {
        match key {
            Keycode::Up | Keycode::W => actions.push(GameAction::MenuUp),
            Keycode::Down | Keycode::S => actions.push(GameAction::MenuDown),
            Keycode::Left | Keycode::A => actions.push(GameAction::MenuLeft),
            Keycode::Right | Keycode::D => actions.push(GameAction::MenuRight),
            Keycode::Return | Keycode::Space | Keycode::Z => actions.push(GameAction::MenuConfirm),
            Keycode::Escape | Keycode::X => actions.push(GameAction::MenuBack),
            _ => {}
        }
    }

    /// Movement keys repeat while held; the game's step timer paces them
    fn handle_map_keys(&self, key: Keycode, actions: &mut Vec<GameAction>) {
        match key {
            Keycode::Up | Keycode::W => actions.push(GameAction::Move(Direction::Up)),
            Keycode::Down | Keycode::S => actions.push(GameAction::Move(Direction::Down)),
            Keycode::Left | Keycode::A => actions.push(GameAction::Move(Direction::Left)),
            Keycode::Right | Keycode::D => actions.push(GameAction::Move(Direction::Right)),
            Keycode::I | Keycode::Tab => actions.push(GameAction::ToggleInventory),
            Keycode::O | Keycode::Slash | Keycode::Backquote => actions.push(GameAction::OpenConsole),
            Keycode::F5 => actions.push(GameAction::QuickSave),
            Keycode::Escape => actions.push(GameAction::MenuBack),
            _ => {}
        }
    }

    fn handle_battle_keys(&self, key: Keycode, actions: &mut Vec<GameAction>) {
        match key {
            Keycode::Num1 => actions.push(GameAction::BattlePick(0)),
            Keycode::Num2 => actions.push(GameAction::BattlePick(1)),
            Keycode::Num3 => actions.push(GameAction::BattlePick(2)),
            Keycode::Num4 => actions.push(GameAction::BattlePick(3)),
            Keycode::Num5 => actions.push(GameAction::BattlePick(4)),
            Keycode::R => actions.push(GameAction::BattlePick(5)),
            _ => self.handle_menu_keys(key, actions),
        }
    }

    fn handle_inventory_keys(&self, key: Keycode, actions: &mut Vec<GameAction>) {
        match key {
            Keycode::I | Keycode::Tab | Keycode::Escape => actions.push(GameAction::ToggleInventory),
            Keycode::Up | Keycode::W => actions.push(GameAction::MenuUp),
            Keycode::Down | Keycode::S => actions.push(GameAction::MenuDown),
            Keycode::Left | Keycode::A => actions.push(GameAction::MenuLeft),
            Keycode::Right | Keycode::D => actions.push(GameAction::MenuRight),
            Keycode::Return | Keycode::Space | Keycode::E => actions.push(GameAction::UseItem),
            Keycode::Delete | Keycode::Q => actions.push(GameAction::SellItem),
            _ => {}
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

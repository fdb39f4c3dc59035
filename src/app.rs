// Screen routing for the SDL2 front-end
//
// App owns the Game plus every piece of UI state, turns GameActions into
// Game calls and draws whichever screen is current.

use log::{info, warn};
use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use unlucky::event::{EventState, FadePhase};
use unlucky::save::{SaveError, SaveManager, SaveType};
use unlucky::screen::{LevelSelect, MainMenu, Screen, SmoveToggle, SpecialMoveManager, WorldSelect};
use unlucky::Game;

use crate::gui::hud::help_lines;
use crate::gui::screens;
use crate::gui::{
    render_dialog, render_map, BattleChoice, BattleMenu, Console, DeathScreen, Hud, InventorySlot, InventoryUI,
};
use crate::input::{GameAction, InputContext};

/// Autosaves kept on disk
const AUTOSAVES_KEPT: usize = 3;

pub struct App {
    pub screen: Screen,
    pub game: Game,
    saves: SaveManager,
    autosave_enabled: bool,

    main_menu: MainMenu,
    world_select: WorldSelect,
    level_select: LevelSelect,
    smove_manager: SpecialMoveManager,
    smove_message: Option<String>,

    battle_menu: BattleMenu,
    inventory_ui: InventoryUI,
    hud: Hud,
    console: Console,
    death_screen: DeathScreen,
}

impl App {
    pub fn new(game: Game, saves: SaveManager, autosave_enabled: bool) -> Self {
        App {
            screen: Screen::MainMenu,
            game,
            saves,
            autosave_enabled,
            main_menu: MainMenu::new(),
            world_select: WorldSelect::new(),
            level_select: LevelSelect::new(0),
            smove_manager: SpecialMoveManager::new(),
            smove_message: None,
            battle_menu: BattleMenu::new(),
            inventory_ui: InventoryUI::new(),
            hud: Hud::new(),
            console: Console::default(),
            death_screen: DeathScreen::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.screen != Screen::Quit
    }

    /// Which input context the current screen wants
    pub fn input_context(&self) -> InputContext {
        match self.screen {
            Screen::Game => InputContext::for_game(self.game.state, self.game.dialog.is_active(), self.console.open),
            _ => InputContext::Menu,
        }
    }

    // ======================================================================
    // Saving
    // ======================================================================

    pub fn save(&mut self, save_type: SaveType) -> Result<(), SaveError> {
        let save = self.game.to_save(save_type, self.saves.get_save_slot());
        self.saves.save_game(&save)?;
        if save_type == SaveType::Auto {
            self.saves.cleanup_autosaves(AUTOSAVES_KEPT)?;
        }
        Ok(())
    }

    /// Saves in the background of play once the interval has passed
    fn autosave(&mut self) {
        let calm = matches!(self.game.state, EventState::None | EventState::Moving);
        if self.autosave_enabled && calm && self.saves.should_autosave() {
            match self.save(SaveType::Auto) {
                Ok(()) => self.hud.notify("AUTOSAVED"),
                Err(e) => warn!("Autosave failed: {}", e),
            }
        }
    }

    fn save_with_notice(&mut self, save_type: SaveType) {
        match self.save(save_type) {
            Ok(()) => self.hud.notify("GAME SAVED"),
            Err(e) => {
                warn!("Save failed: {}", e);
                self.hud.notify("SAVE FAILED");
            }
        }
    }

    // ======================================================================
    // Per frame
    // ======================================================================

    pub fn update(&mut self, dt: f32) {
        self.hud.update(dt);
        if self.screen != Screen::Game {
            return;
        }
        self.game.update(dt);
        if self.game.exit_requested {
            self.console.close();
            self.leave_game(Screen::MainMenu);
            return;
        }
        self.autosave();
    }

    fn leave_game(&mut self, to: Screen) {
        self.game.leave_level();
        self.save_with_notice(SaveType::Manual);
        self.screen = to;
    }

    pub fn handle(&mut self, action: GameAction) {
        if action == GameAction::Quit {
            if let Err(e) = self.save(SaveType::Manual) {
                warn!("Could not save on quit: {}", e);
            }
            self.screen = Screen::Quit;
            return;
        }
        match self.screen {
            Screen::MainMenu => self.handle_main_menu(action),
            Screen::WorldSelect => self.handle_world_select(action),
            Screen::LevelSelect => self.handle_level_select(action),
            Screen::SpecialMoves => self.handle_special_moves(action),
            Screen::Statistics => {
                if matches!(action, GameAction::MenuBack | GameAction::MenuConfirm) {
                    self.screen = Screen::MainMenu;
                }
            }
            Screen::Game => self.handle_game(action),
            Screen::Quit => {}
        }
    }

    // ======================================================================
    // Menu screens
    // ======================================================================

    fn handle_main_menu(&mut self, action: GameAction) {
        match action {
            GameAction::MenuUp => self.main_menu.select_previous(),
            GameAction::MenuDown => self.main_menu.select_next(),
            GameAction::MenuConfirm => {
                self.screen = self.main_menu.confirm();
                if self.screen == Screen::SpecialMoves {
                    self.smove_message = None;
                }
                if self.screen == Screen::Quit {
                    if let Err(e) = self.save(SaveType::Manual) {
                        warn!("Could not save on quit: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_world_select(&mut self, action: GameAction) {
        match action {
            GameAction::MenuUp => self.world_select.select_previous(),
            GameAction::MenuDown => self.world_select.select_next(),
            GameAction::MenuConfirm => {
                if let Some(world) = self.world_select.confirm(&self.game.progress) {
                    self.level_select = LevelSelect::new(world);
                    self.screen = Screen::LevelSelect;
                }
            }
            GameAction::MenuBack => self.screen = Screen::MainMenu,
            _ => {}
        }
    }

    fn handle_level_select(&mut self, action: GameAction) {
        match action {
            GameAction::MenuUp => self.level_select.select_previous(),
            GameAction::MenuDown => self.level_select.select_next(),
            GameAction::MenuConfirm => {
                let Some((world, level)) = self.level_select.confirm(&self.game.progress) else {
                    return;
                };
                match self.game.enter_level(world, level) {
                    Ok(()) => {
                        self.battle_menu.reset();
                        self.inventory_ui.message = None;
                        self.screen = Screen::Game;
                    }
                    Err(e) => warn!("Could not load level {}-{}: {}", world + 1, level + 1, e),
                }
            }
            GameAction::MenuBack => self.screen = Screen::WorldSelect,
            _ => {}
        }
    }

    fn handle_special_moves(&mut self, action: GameAction) {
        match action {
            GameAction::MenuUp => self.smove_manager.select_previous(),
            GameAction::MenuDown => self.smove_manager.select_next(),
            GameAction::MenuConfirm => {
                let name = self.smove_manager.selected().name();
                let message = match self.smove_manager.toggle(&mut self.game.player) {
                    SmoveToggle::Added => format!("ADDED {name}"),
                    SmoveToggle::Removed => format!("REMOVED {name}"),
                    SmoveToggle::Full => "YOUR SPECIAL MOVESET IS FULL".to_string(),
                    SmoveToggle::Locked => format!("{name} IS STILL LOCKED"),
                };
                self.smove_message = Some(message);
            }
            GameAction::MenuBack => self.screen = Screen::MainMenu,
            _ => {}
        }
    }

    // ======================================================================
    // Game screen
    // ======================================================================

    fn handle_game(&mut self, action: GameAction) {
        match self.input_context() {
            InputContext::Console => self.handle_console(action),
            InputContext::Map => match action {
                GameAction::Move(dir) => {
                    self.game.try_move(dir);
                }
                GameAction::ToggleInventory => {
                    self.inventory_ui.message = None;
                    self.game.toggle_inventory();
                }
                GameAction::OpenConsole => self.console.open(),
                GameAction::QuickSave => self.save_with_notice(SaveType::QuickSave),
                GameAction::MenuBack => {
                    info!("Leaving the level");
                    self.leave_game(Screen::LevelSelect);
                }
                _ => {}
            },
            InputContext::Dialog => {
                if action == GameAction::AdvanceDialog {
                    if self.game.dialog.is_cycle_done() {
                        self.game.advance_dialog();
                    } else {
                        self.game.skip_dialog();
                    }
                }
            }
            InputContext::Battle => self.handle_battle(action),
            InputContext::Inventory => self.handle_inventory(action),
            InputContext::Summary => {
                if action == GameAction::MenuConfirm {
                    match self.game.state {
                        EventState::LevelUp => self.game.close_level_up(),
                        EventState::Death => self.game.respawn(),
                        _ => {}
                    }
                }
            }
            InputContext::Menu | InputContext::Locked => {}
        }
    }

    fn handle_battle(&mut self, action: GameAction) {
        if !self.game.awaiting_battle_input() {
            return;
        }
        let choice = match action {
            GameAction::MenuUp | GameAction::MenuLeft => {
                self.battle_menu.select_previous();
                None
            }
            GameAction::MenuDown | GameAction::MenuRight => {
                self.battle_menu.select_next();
                None
            }
            GameAction::MenuBack => {
                self.battle_menu.back();
                None
            }
            GameAction::BattlePick(index) => {
                self.battle_menu.pick(index);
                match self.game.battle.as_ref() {
                    Some(battle) => self.battle_menu.confirm(battle, &self.game.player),
                    None => None,
                }
            }
            GameAction::MenuConfirm => match self.game.battle.as_ref() {
                Some(battle) => self.battle_menu.confirm(battle, &self.game.player),
                None => None,
            },
            _ => None,
        };
        let result = match choice {
            Some(BattleChoice::Move(index)) => self.game.battle_move(index),
            Some(BattleChoice::Special(index)) => self.game.battle_special_move(index).map(|_| ()),
            Some(BattleChoice::Run) => self.game.battle_run().map(|_| ()),
            None => return,
        };
        self.battle_menu.reset();
        if let Err(e) = result {
            warn!("Battle action refused: {}", e);
        }
    }

    fn handle_inventory(&mut self, action: GameAction) {
        match action {
            GameAction::ToggleInventory => self.game.toggle_inventory(),
            GameAction::MenuUp => self.inventory_ui.move_cursor(0, -1),
            GameAction::MenuDown => self.inventory_ui.move_cursor(0, 1),
            GameAction::MenuLeft => self.inventory_ui.move_cursor(-1, 0),
            GameAction::MenuRight => self.inventory_ui.move_cursor(1, 0),
            GameAction::MouseMove(x, y) => {
                self.inventory_ui.hover(x, y);
            }
            GameAction::UseItem => self.use_selected(),
            GameAction::SellItem => self.sell_selected(),
            GameAction::LeftClick(x, y) => {
                self.inventory_ui.start_drag(x, y, &self.game.player);
            }
            GameAction::LeftRelease(x, y) => {
                let Some((from, to)) = self.inventory_ui.end_drag(x, y) else {
                    return;
                };
                if to == Some(from) {
                    // released where it was picked up: a click
                    self.use_selected();
                    return;
                }
                match self.game.drag_item(from, to) {
                    Ok(true) => self.inventory_ui.message = None,
                    Ok(false) => {}
                    Err(e) => self.inventory_ui.message = Some(e.to_string()),
                }
            }
            GameAction::RightClick(x, y) => {
                if self.inventory_ui.hover(x, y).is_some() {
                    self.sell_selected();
                }
            }
            _ => {}
        }
    }

    fn use_selected(&mut self) {
        let message = match self.inventory_ui.cursor() {
            InventorySlot::Bag(index) => match self.game.use_item(index) {
                Ok(line) => line,
                Err(e) => e.to_string(),
            },
            InventorySlot::Equip(slot) => match self.game.unequip(slot) {
                Some(_) => format!("Unequipped {}.", slot.name()),
                None => "Nothing to unequip or no room in the bag.".to_string(),
            },
        };
        self.inventory_ui.message = Some(message);
    }

    fn sell_selected(&mut self) {
        if let InventorySlot::Bag(index) = self.inventory_ui.cursor() {
            let message = match self.game.sell_item(index) {
                Ok(gold) => format!("Sold for {gold} gold."),
                Err(e) => e.to_string(),
            };
            self.inventory_ui.message = Some(message);
        }
    }

    fn handle_console(&mut self, action: GameAction) {
        match action {
            GameAction::ConsoleText(text) => self.console.type_text(&text),
            GameAction::ConsoleBackspace => self.console.backspace(),
            GameAction::CloseConsole => self.console.close(),
            GameAction::ConsoleSubmit => {
                let line = self.console.submit();
                if line.trim().eq_ignore_ascii_case("/help") {
                    for usage in help_lines() {
                        self.console.push_feedback(usage);
                    }
                    return;
                }
                let feedback = match self.game.execute_line(&line) {
                    Ok(cmd) => format!("OK {cmd}"),
                    Err(e) => e.to_string(),
                };
                self.console.push_feedback(feedback);
            }
            _ => {}
        }
    }

    // ======================================================================
    // Rendering
    // ======================================================================

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        match self.screen {
            Screen::MainMenu => screens::render_main_menu(canvas, &self.main_menu)?,
            Screen::WorldSelect => screens::render_world_select(canvas, &self.world_select, &self.game.progress)?,
            Screen::LevelSelect => screens::render_level_select(canvas, &self.level_select, &self.game.progress)?,
            Screen::SpecialMoves => screens::render_special_moves(
                canvas,
                &self.smove_manager,
                &self.game.player,
                self.smove_message.as_deref(),
            )?,
            Screen::Statistics => screens::render_statistics(canvas, &self.game.statistics)?,
            Screen::Game => self.render_game(canvas)?,
            Screen::Quit => {}
        }
        canvas.present();
        Ok(())
    }

    fn render_game(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        let game = &self.game;
        let Some(map) = game.map.as_ref() else {
            canvas.set_draw_color(Color::RGB(0, 0, 0));
            canvas.clear();
            return Ok(());
        };

        // during a fade, draw whichever side of it is showing
        let shown = if game.state == EventState::Transition {
            match game.transition.phase() {
                FadePhase::Out => game.transition.prev,
                FadePhase::In => game.transition.next,
            }
        } else {
            game.state
        };

        match shown {
            EventState::Battling => match game.battle.as_ref() {
                Some(battle) => self.battle_menu.render(canvas, battle, &game.player, game.awaiting_battle_input())?,
                None => render_map(canvas, map, &game.player)?,
            },
            EventState::Inventory => self.inventory_ui.render(canvas, &game.player)?,
            _ => {
                render_map(canvas, map, &game.player)?;
                self.hud.render(canvas, &game.player, map)?;
            }
        }

        match shown {
            EventState::LevelUp => {
                if let Some(summary) = game.level_up.as_ref() {
                    screens::render_level_up(canvas, summary)?;
                }
            }
            EventState::Death => self.death_screen.render(canvas)?,
            _ => {}
        }

        if game.state != EventState::Transition {
            render_dialog(canvas, &game.dialog)?;
        }
        self.hud.render_console(canvas, &self.console)?;

        let alpha = game.transition.overlay_alpha();
        if game.state == EventState::Transition && alpha > 0.0 {
            canvas.set_blend_mode(BlendMode::Blend);
            canvas.set_draw_color(Color::RGBA(0, 0, 0, (alpha.clamp(0.0, 1.0) * 255.0) as u8));
            canvas.fill_rect(None)?;
            canvas.set_blend_mode(BlendMode::None);
        }
        Ok(())
    }
}

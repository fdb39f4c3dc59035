//! Battle screen: both fighters' status and the move menu

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use unlucky::battle::Battle;
use unlucky::battle::moveset::MOVESET_SIZE;
use unlucky::entity::Player;
use unlucky::screen::Selector;

use super::health_bar::{HealthBar, HealthBarStyle};
use crate::text::{draw_centered_text, draw_simple_text};

/// What confirming in the battle menu picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleChoice {
    Move(usize),
    Special(usize),
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    /// Four moves, then SPECIAL and RUN
    Main,
    Specials,
}

const SPECIAL_INDEX: usize = MOVESET_SIZE;
const RUN_INDEX: usize = MOVESET_SIZE + 1;

/// Battle menu selection state and drawing
pub struct BattleMenu {
    panel: Panel,
    main: Selector,
    specials: Selector,
    player_bar: HealthBar,
    enemy_bar: HealthBar,
}

impl BattleMenu {
    pub fn new() -> Self {
        BattleMenu {
            panel: Panel::Main,
            main: Selector::new(MOVESET_SIZE + 2),
            specials: Selector::new(0),
            player_bar: HealthBar::new(),
            enemy_bar: HealthBar::with_style(HealthBarStyle {
                health_color: Color::RGB(150, 0, 150),
                ..Default::default()
            }),
        }
    }

    /// Back to the main panel, for a new turn
    pub fn reset(&mut self) {
        self.panel = Panel::Main;
    }

    pub fn select_previous(&mut self) {
        match self.panel {
            Panel::Main => self.main.select_previous(),
            Panel::Specials => self.specials.select_previous(),
        }
    }

    pub fn select_next(&mut self) {
        match self.panel {
            Panel::Main => self.main.select_next(),
            Panel::Specials => self.specials.select_next(),
        }
    }

    /// Jumps to a main panel button, closing the special list
    pub fn pick(&mut self, index: usize) {
        self.panel = Panel::Main;
        self.main.select(index);
    }

    /// Closes the special move list
    pub fn back(&mut self) {
        self.panel = Panel::Main;
    }

    /// Confirms the selection; opening the special list returns `None`
    pub fn confirm(&mut self, battle: &Battle, player: &Player) -> Option<BattleChoice> {
        match self.panel {
            Panel::Main => match self.main.index() {
                SPECIAL_INDEX => {
                    if player.smoveset.is_empty() || !battle.smove_ready(player) {
                        return None;
                    }
                    self.specials = Selector::new(player.smoveset.len());
                    self.panel = Panel::Specials;
                    None
                }
                RUN_INDEX => Some(BattleChoice::Run),
                index => Some(BattleChoice::Move(index)),
            },
            Panel::Specials => {
                self.panel = Panel::Main;
                Some(BattleChoice::Special(self.specials.index()))
            }
        }
    }

    // ======================================================================
    // Rendering
    // ======================================================================

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        battle: &Battle,
        player: &Player,
        show_menu: bool,
    ) -> Result<(), String> {
        let (screen_width, _) = canvas.logical_size();
        canvas.set_draw_color(Color::RGB(24, 28, 40));
        canvas.clear();

        // Enemy, top right
        let enemy = &battle.enemy;
        let enemy_color = if enemy.is_boss() {
            Color::RGB(200, 60, 60)
        } else {
            Color::RGB(90, 200, 120)
        };
        canvas.set_draw_color(enemy_color);
        canvas.fill_rect(Rect::new(280, 40, 40, 40))?;
        let title = format!("{} LV.{}", enemy.name(), enemy.level);
        draw_simple_text(canvas, &title, 200, 12, Color::RGB(255, 255, 255), 1)?;
        self.enemy_bar.render(canvas, 200, 24, enemy.stats.hp, enemy.stats.max_hp)?;

        // Player, left
        canvas.set_draw_color(Color::RGB(90, 140, 230));
        canvas.fill_rect(Rect::new(60, 90, 32, 32))?;
        draw_simple_text(canvas, &format!("YOU LV.{}", player.level), 12, 12, Color::RGB(255, 255, 255), 1)?;
        self.player_bar.render(canvas, 12, 24, player.stats.hp, player.stats.max_hp)?;

        if !show_menu {
            return Ok(());
        }

        match self.panel {
            Panel::Main => self.render_main(canvas, battle, player, screen_width),
            Panel::Specials => self.render_specials(canvas, player, screen_width),
        }
    }

    fn render_main(&self, canvas: &mut Canvas<Window>, battle: &Battle, player: &Player, screen_width: u32) -> Result<(), String> {
        let button_width = (screen_width - 24) / 2;
        for (i, m) in player.moveset.moves.iter().enumerate().take(MOVESET_SIZE) {
            let x = 8 + (i as u32 % 2 * (button_width + 8)) as i32;
            let y = 140 + (i as i32 / 2) * 34;
            let rect = Rect::new(x, y, button_width, 30);
            self.button(canvas, rect, self.main.index() == i)?;
            draw_simple_text(canvas, &m.name.to_uppercase(), x + 6, y + 5, Color::RGB(255, 255, 255), 1)?;
            let desc = m.description().replace('\n', " ");
            draw_simple_text(canvas, &desc, x + 6, y + 17, Color::RGB(170, 170, 180), 1)?;
        }

        let special_label = if player.smoveset.is_empty() {
            "NO SPECIAL MOVES".to_string()
        } else if battle.smove_ready(player) {
            "SPECIAL MOVE".to_string()
        } else {
            format!("SPECIAL ({} TURNS)", player.smove_cd - battle.turns_since_smove)
        };
        let special = Rect::new(8, 210, button_width, 22);
        self.button(canvas, special, self.main.index() == SPECIAL_INDEX)?;
        draw_simple_text(canvas, &special_label, special.x() + 6, special.y() + 8, Color::RGB(255, 220, 120), 1)?;

        let run = Rect::new(16 + button_width as i32, 210, button_width, 22);
        self.button(canvas, run, self.main.index() == RUN_INDEX)?;
        draw_centered_text(canvas, "RUN", run.center().x(), run.y() + 8, Color::RGB(255, 255, 255), 1)?;
        Ok(())
    }

    fn render_specials(&self, canvas: &mut Canvas<Window>, player: &Player, screen_width: u32) -> Result<(), String> {
        let width = screen_width - 16;
        for (i, smove) in player.smoveset.iter().enumerate() {
            let y = 140 + i as i32 * 19;
            let rect = Rect::new(8, y, width, 17);
            self.button(canvas, rect, self.specials.index() == i)?;
            draw_simple_text(canvas, smove.name(), 14, y + 5, Color::RGB(255, 220, 120), 1)?;
            draw_simple_text(canvas, smove.desc(), 100, y + 5, Color::RGB(200, 200, 210), 1)?;
        }
        Ok(())
    }

    fn button(&self, canvas: &mut Canvas<Window>, rect: Rect, selected: bool) -> Result<(), String> {
        let fill = if selected {
            Color::RGB(80, 100, 140)
        } else {
            Color::RGB(40, 44, 60)
        };
        canvas.set_draw_color(fill);
        canvas.fill_rect(rect)?;
        canvas.set_draw_color(Color::RGB(120, 120, 140));
        canvas.draw_rect(rect)
    }
}

impl Default for BattleMenu {
    fn default() -> Self {
        Self::new()
    }
}

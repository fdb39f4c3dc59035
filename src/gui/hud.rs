//! Map HUD: player status, the debug console, and short notices

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use unlucky::command::Command;
use unlucky::entity::Player;
use unlucky::map::GameMap;

use super::health_bar::HealthBar;
use crate::text::draw_simple_text;

/// Seconds a notice stays on screen
const NOTICE_TIME: f32 = 2.5;
/// Console feedback lines kept
const CONSOLE_HISTORY: usize = 6;
const MAX_INPUT: usize = 60;

/// Text console for debug commands
#[derive(Debug, Default)]
pub struct Console {
    pub open: bool,
    pub input: String,
    history: Vec<String>,
}

impl Console {
    /// Opens the console with a leading `/`
    pub fn open(&mut self) {
        self.open = true;
        self.input = "/".to_string();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            if self.input.len() < MAX_INPUT && (c.is_ascii_graphic() || c == ' ') {
                self.input.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Takes the typed line, leaving the console open on a fresh `/`
    pub fn submit(&mut self) -> String {
        std::mem::replace(&mut self.input, "/".to_string())
    }

    pub fn push_feedback(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
        if self.history.len() > CONSOLE_HISTORY {
            self.history.remove(0);
        }
    }
}

pub struct Hud {
    health_bar: HealthBar,
    notice: Option<(String, f32)>,
}

impl Hud {
    pub fn new() -> Self {
        Hud {
            health_bar: HealthBar::new(),
            notice: None,
        }
    }

    /// Shows a short message at the top of the screen
    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), NOTICE_TIME));
    }

    pub fn update(&mut self, dt: f32) {
        if let Some((_, timer)) = &mut self.notice {
            *timer -= dt;
            if *timer <= 0.0 {
                self.notice = None;
            }
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, player: &Player, map: &GameMap) -> Result<(), String> {
        let white = Color::RGB(255, 255, 255);

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 150));
        canvas.fill_rect(Rect::new(0, 0, 400, 30))?;
        canvas.set_blend_mode(BlendMode::None);

        draw_simple_text(canvas, &format!("LV.{}", player.level), 6, 4, white, 1)?;
        self.health_bar.render(canvas, 40, 4, player.stats.hp, player.stats.max_hp)?;
        let exp = format!("EXP {}/{}", player.exp, player.max_exp);
        draw_simple_text(canvas, &exp, 6, 17, Color::RGB(180, 200, 255), 1)?;
        let gold = format!("GOLD {}", player.gold);
        draw_simple_text(canvas, &gold, 120, 17, Color::RGB(255, 220, 100), 1)?;
        let level = format!("{}-{}", map.world + 1, map.level + 1);
        draw_simple_text(canvas, &level, 360, 4, white, 1)?;

        if let Some((text, _)) = &self.notice {
            draw_simple_text(canvas, text, 200, 17, Color::RGB(140, 255, 140), 1)?;
        }
        Ok(())
    }

    pub fn render_console(&self, canvas: &mut Canvas<Window>, console: &Console) -> Result<(), String> {
        if !console.open {
            return Ok(());
        }
        let (width, height) = canvas.logical_size();
        let lines = console.history.len() as u32;
        let box_height = 16 + lines * 10;
        let top = (height - box_height) as i32;

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 200));
        canvas.fill_rect(Rect::new(0, top, width, box_height))?;
        canvas.set_blend_mode(BlendMode::None);

        for (i, line) in console.history.iter().enumerate() {
            draw_simple_text(canvas, line, 4, top + 3 + i as i32 * 10, Color::RGB(170, 170, 180), 1)?;
        }
        let prompt = format!("{}_", console.input);
        draw_simple_text(canvas, &prompt, 4, height as i32 - 11, Color::RGB(255, 255, 255), 1)
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

/// Command list shown by `/help`
pub fn help_lines() -> impl Iterator<Item = &'static str> {
    Command::USAGE.iter().copied()
}

//! Death Screen Component
//!
//! Shown after a lost battle until the player confirms. The fade back to
//! the map and the respawn itself are handled by `Game::respawn`.

use crate::text::draw_centered_text;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

use unlucky::battle::battle::DEATH_GOLD_PENALTY;

/// Configuration for death screen appearance
#[derive(Debug, Clone)]
pub struct DeathScreenStyle {
    /// Overlay darkness (0-255, higher = darker)
    pub overlay_alpha: u8,

    /// "YOU DIED" text color
    pub title_color: Color,

    /// Penalty text color
    pub penalty_color: Color,

    pub instruction_color: Color,
}

impl Default for DeathScreenStyle {
    fn default() -> Self {
        DeathScreenStyle {
            overlay_alpha: 220,
            title_color: Color::RGB(255, 50, 50),
            penalty_color: Color::RGB(255, 255, 100),
            instruction_color: Color::RGB(150, 150, 160),
        }
    }
}

pub struct DeathScreen {
    style: DeathScreenStyle,
}

impl DeathScreen {
    pub fn new() -> Self {
        DeathScreen {
            style: DeathScreenStyle::default(),
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let (screen_width, screen_height) = canvas.logical_size();
        let center_x = screen_width as i32 / 2;
        let center_y = screen_height as i32 / 2;

        draw_centered_text(canvas, "YOU DIED", center_x, center_y - 50, self.style.title_color, 4)?;
        let penalty = format!("YOU LOST {}% OF YOUR GOLD", DEATH_GOLD_PENALTY);
        draw_centered_text(canvas, &penalty, center_x, center_y + 4, self.style.penalty_color, 1)?;
        draw_centered_text(
            canvas,
            "PRESS ENTER TO RESPAWN",
            center_x,
            center_y + 50,
            self.style.instruction_color,
            1,
        )
    }
}

impl Default for DeathScreen {
    fn default() -> Self {
        Self::new()
    }
}

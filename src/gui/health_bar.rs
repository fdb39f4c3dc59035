//! HP bar drawn in the HUD and the battle screen
//!
//! Stateless: create one per style and call `render` with the current
//! hp every frame.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::text::draw_simple_text;

/// Configuration for health bar appearance
#[derive(Debug, Clone)]
pub struct HealthBarStyle {
    pub width: u32,
    pub height: u32,

    /// Background bar color (shown where hp is missing)
    pub background_color: Color,

    /// Fill color above the low-hp threshold
    pub health_color: Color,

    /// Fill color below 30% hp
    pub low_health_color: Color,

    pub border_color: Color,

    /// Draw "hp/max" to the right of the bar
    pub show_numbers: bool,

    pub text_color: Color,
}

impl Default for HealthBarStyle {
    fn default() -> Self {
        HealthBarStyle {
            width: 80,
            height: 6,
            background_color: Color::RGB(50, 50, 50),
            health_color: Color::RGB(0, 200, 0),
            low_health_color: Color::RGB(200, 0, 0),
            border_color: Color::RGB(0, 0, 0),
            show_numbers: true,
            text_color: Color::RGB(255, 255, 255),
        }
    }
}

pub struct HealthBar {
    style: HealthBarStyle,
}

impl HealthBar {
    pub fn new() -> Self {
        HealthBar {
            style: HealthBarStyle::default(),
        }
    }

    pub fn with_style(style: HealthBarStyle) -> Self {
        HealthBar { style }
    }

    /// Draws the bar with its top-left corner at (`x`, `y`)
    pub fn render(&self, canvas: &mut Canvas<Window>, x: i32, y: i32, hp: i32, max_hp: i32) -> Result<(), String> {
        let percentage = if max_hp > 0 { hp as f32 / max_hp as f32 } else { 0.0 };

        let frame = Rect::new(x, y, self.style.width, self.style.height);
        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(frame)?;

        let fill_width = (self.style.width as f32 * percentage.clamp(0.0, 1.0)) as u32;
        if fill_width > 0 {
            let fill_color = if percentage < 0.3 {
                self.style.low_health_color
            } else {
                self.style.health_color
            };
            canvas.set_draw_color(fill_color);
            canvas.fill_rect(Rect::new(x, y, fill_width, self.style.height))?;
        }

        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(frame)?;

        if self.style.show_numbers {
            let label = format!("{}/{}", hp.max(0), max_hp);
            let text_y = y + self.style.height as i32 / 2 - 3;
            draw_simple_text(canvas, &label, x + self.style.width as i32 + 4, text_y, self.style.text_color, 1)?;
        }

        Ok(())
    }
}

impl Default for HealthBar {
    fn default() -> Self {
        Self::new()
    }
}

//! Base Menu Component
//!
//! A titled list of options with a selection highlight. Selection state
//! lives in the library's screen types; the menu only draws it.

use crate::text::{draw_centered_text, draw_simple_text};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Configuration for menu appearance
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Menu box width in pixels
    pub width: u32,

    /// Menu box height in pixels
    pub height: u32,

    pub background_color: Color,

    pub border_color: Color,

    /// Border thickness (draws double border if > 1)
    pub border_thickness: u32,

    /// Overlay darkness (0-255, higher = darker); 0 draws no overlay
    pub overlay_alpha: u8,

    pub title_color: Color,

    pub item_color: Color,

    pub selected_item_color: Color,

    /// Text color of locked entries
    pub disabled_item_color: Color,

    pub highlight_color: Color,

    /// Vertical distance between items
    pub item_height: u32,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            width: 240,
            height: 180,
            background_color: Color::RGB(30, 30, 40),
            border_color: Color::RGB(100, 100, 120),
            border_thickness: 2,
            overlay_alpha: 0,
            title_color: Color::RGB(220, 220, 240),
            item_color: Color::RGB(160, 160, 170),
            selected_item_color: Color::RGB(255, 255, 255),
            disabled_item_color: Color::RGB(80, 80, 90),
            highlight_color: Color::RGB(80, 100, 140),
            item_height: 22,
        }
    }
}

/// A menu entry
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub text: String,
    /// Locked entries are drawn grayed out
    pub enabled: bool,
}

impl MenuItem {
    pub fn new(text: impl Into<String>) -> Self {
        MenuItem {
            text: text.into(),
            enabled: true,
        }
    }

    pub fn locked(text: impl Into<String>) -> Self {
        MenuItem {
            text: text.into(),
            enabled: false,
        }
    }
}

/// A centered menu box
pub struct Menu {
    style: MenuStyle,
}

impl Menu {
    pub fn new() -> Self {
        Menu {
            style: MenuStyle::default(),
        }
    }

    pub fn with_style(style: MenuStyle) -> Self {
        Menu { style }
    }

    /// Draws the box, title, items and highlight; returns the box
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        title: &str,
        items: &[MenuItem],
        selected_index: usize,
    ) -> Result<Rect, String> {
        // 1. Optional overlay
        if self.style.overlay_alpha > 0 {
            canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
            canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
            canvas.fill_rect(None)?;
            canvas.set_blend_mode(sdl2::render::BlendMode::None);
        }

        // 2. Centered on the logical size
        let (screen_width, screen_height) = canvas.logical_size();
        let menu_x = screen_width.saturating_sub(self.style.width) / 2;
        let menu_y = screen_height.saturating_sub(self.style.height) / 2;
        let frame = Rect::new(menu_x as i32, menu_y as i32, self.style.width, self.style.height);

        // 3. Background and border
        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(frame)?;
        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(frame)?;
        if self.style.border_thickness > 1 {
            canvas.draw_rect(Rect::new(
                frame.x() + 2,
                frame.y() + 2,
                self.style.width - 4,
                self.style.height - 4,
            ))?;
        }

        // 4. Title
        let center_x = frame.x() + self.style.width as i32 / 2;
        draw_centered_text(canvas, title, center_x, frame.y() + 12, self.style.title_color, 2)?;

        // 5. Items
        let item_start_y = frame.y() + 40;
        for (i, item) in items.iter().enumerate() {
            let item_y = item_start_y + (i as u32 * self.style.item_height) as i32;
            let is_selected = i == selected_index;

            if is_selected {
                canvas.set_draw_color(self.style.highlight_color);
                canvas.fill_rect(Rect::new(frame.x() + 8, item_y - 4, self.style.width - 16, 15))?;
            }

            let text_color = match (item.enabled, is_selected) {
                (false, _) => self.style.disabled_item_color,
                (true, true) => self.style.selected_item_color,
                (true, false) => self.style.item_color,
            };
            draw_simple_text(canvas, &item.text, frame.x() + 20, item_y, text_color, 1)?;
        }

        Ok(frame)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

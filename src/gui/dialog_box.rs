//! Dialog box along the bottom of the screen

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use unlucky::dialog::Dialog;

use crate::text::draw_simple_text;

const BOX_HEIGHT: u32 = 52;
const PADDING: i32 = 8;
const LINE_HEIGHT: i32 = 10;

/// Splits `text` into lines of at most `width` characters on spaces
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws the current line of `dialog`, and the blinking arrow once it has
/// finished animating
pub fn render_dialog(canvas: &mut Canvas<Window>, dialog: &Dialog) -> Result<(), String> {
    if !dialog.is_active() {
        return Ok(());
    }
    let (screen_width, screen_height) = canvas.logical_size();
    let frame = Rect::new(4, (screen_height - BOX_HEIGHT - 4) as i32, screen_width - 8, BOX_HEIGHT);

    canvas.set_draw_color(Color::RGB(20, 20, 30));
    canvas.fill_rect(frame)?;
    canvas.set_draw_color(Color::RGB(200, 200, 210));
    canvas.draw_rect(frame)?;

    let chars_per_line = ((frame.width() as i32 - PADDING * 2) / 6) as usize;
    let text = dialog.visible_text();
    for (i, line) in wrap_text(&text, chars_per_line).iter().take(4).enumerate() {
        draw_simple_text(
            canvas,
            line,
            frame.x() + PADDING,
            frame.y() + PADDING + i as i32 * LINE_HEIGHT,
            Color::RGB(240, 240, 240),
            1,
        )?;
    }

    if dialog.is_cycle_done() && dialog.blink() {
        draw_simple_text(
            canvas,
            ">",
            frame.right() - PADDING - 6,
            frame.bottom() - PADDING - 7,
            Color::RGB(255, 220, 100),
            1,
        )?;
    }
    Ok(())
}

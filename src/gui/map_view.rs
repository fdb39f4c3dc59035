//! Map rendering
//!
//! Tiles, enemies and the player are drawn as colored squares with a
//! camera centered on the player, then weather and night on top.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use unlucky::entity::{EnemyKind, Player};
use unlucky::map::weather::ParticleKind;
use unlucky::map::{Direction, GameMap, TileKind};

use crate::text::draw_simple_text;

pub const TILE_SIZE: i32 = 16;

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Normal => Color::RGB(70, 120, 60),
        TileKind::Blocked => Color::RGB(40, 50, 45),
        TileKind::Change => Color::RGB(120, 90, 160),
        TileKind::InAndOut => Color::RGB(160, 120, 60),
        TileKind::Stop => Color::RGB(150, 60, 60),
        TileKind::Down | TileKind::Up | TileKind::Right | TileKind::Left => Color::RGB(90, 110, 150),
        TileKind::QuestionMark => Color::RGB(200, 180, 60),
        TileKind::ExclamationMark => Color::RGB(220, 120, 40),
        TileKind::Teleport => Color::RGB(60, 170, 190),
    }
}

fn tile_glyph(kind: TileKind) -> Option<&'static str> {
    match kind {
        TileKind::Down => Some("-"),
        TileKind::Up => Some("+"),
        TileKind::Right => Some(">"),
        TileKind::Left => Some("<"),
        TileKind::QuestionMark => Some("?"),
        TileKind::ExclamationMark => Some("!"),
        TileKind::Stop => Some("."),
        _ => None,
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Slime => Color::RGB(90, 220, 120),
        EnemyKind::Ghost => Color::RGB(220, 220, 240),
        EnemyKind::KingSlime => Color::RGB(220, 60, 60),
    }
}

/// Draws the visible part of `map` around the player
pub fn render_map(canvas: &mut Canvas<Window>, map: &GameMap, player: &Player) -> Result<(), String> {
    let (screen_width, screen_height) = canvas.logical_size();
    canvas.set_draw_color(Color::RGB(10, 10, 14));
    canvas.clear();

    // camera keeps the player centered
    let (px, py) = player.position;
    let offset_x = screen_width as i32 / 2 - px * TILE_SIZE - TILE_SIZE / 2;
    let offset_y = screen_height as i32 / 2 - py * TILE_SIZE - TILE_SIZE / 2;

    let tile_map = &map.tile_map;
    for pos in tile_map.positions() {
        let Some(tile) = tile_map.tile(pos) else {
            continue;
        };
        let x = offset_x + pos.0 * TILE_SIZE;
        let y = offset_y + pos.1 * TILE_SIZE;
        if x + TILE_SIZE < 0 || y + TILE_SIZE < 0 || x > screen_width as i32 || y > screen_height as i32 {
            continue;
        }
        canvas.set_draw_color(tile_color(tile.kind));
        canvas.fill_rect(Rect::new(x, y, TILE_SIZE as u32, TILE_SIZE as u32))?;
        if let Some(glyph) = tile_glyph(tile.kind) {
            draw_simple_text(canvas, glyph, x + 5, y + 4, Color::RGB(20, 20, 20), 1)?;
        }
        if let Some(enemy) = tile.entity() {
            canvas.set_draw_color(enemy_color(enemy));
            canvas.fill_rect(Rect::new(x + 3, y + 3, 10, 10))?;
        }
    }

    // player, with a notch on the facing side
    let x = offset_x + px * TILE_SIZE;
    let y = offset_y + py * TILE_SIZE;
    canvas.set_draw_color(Color::RGB(90, 140, 230));
    canvas.fill_rect(Rect::new(x + 2, y + 2, 12, 12))?;
    let notch = match player.facing {
        Direction::Up => Rect::new(x + 6, y, 4, 3),
        Direction::Down => Rect::new(x + 6, y + 13, 4, 3),
        Direction::Left => Rect::new(x, y + 6, 3, 4),
        Direction::Right => Rect::new(x + 13, y + 6, 3, 4),
    };
    canvas.set_draw_color(Color::RGB(255, 255, 255));
    canvas.fill_rect(notch)?;

    render_weather(canvas, map)
}

fn render_weather(canvas: &mut Canvas<Window>, map: &GameMap) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    for p in &map.particles.particles {
        let rect = match p.kind {
            ParticleKind::Raindrop => {
                canvas.set_draw_color(Color::RGBA(150, 170, 255, 180));
                Rect::new(p.x as i32, p.y as i32, 1, 4)
            }
            ParticleKind::Snowflake => {
                canvas.set_draw_color(Color::RGBA(255, 255, 255, 220));
                Rect::new(p.x as i32, p.y as i32, 2, 2)
            }
        };
        canvas.fill_rect(rect)?;
    }
    if map.dark {
        canvas.set_draw_color(Color::RGBA(0, 0, 30, 140));
        canvas.fill_rect(None)?;
    }
    if map.lightning.is_flashing() {
        canvas.set_draw_color(Color::RGBA(255, 255, 255, 160));
        canvas.fill_rect(None)?;
    }
    canvas.set_blend_mode(BlendMode::None);
    Ok(())
}

//! Menu screens outside the map, and the level-up summary

use sdl2::pixels::Color;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use unlucky::entity::{LevelUpSummary, Player};
use unlucky::progress::{Progress, LEVELS_PER_WORLD, NUM_WORLDS};
use unlucky::screen::{LevelSelect, MainMenu, MainMenuOption, SpecialMoveManager, WorldSelect};
use unlucky::battle::SMOVES_ORDER_BY_LVL;
use unlucky::statistics::Statistics;

use super::menu::MenuStyle;
use super::{Menu, MenuItem};
use crate::text::{draw_centered_text, draw_simple_text};

const BACKGROUND: Color = Color::RGB(16, 18, 26);

fn clear(canvas: &mut Canvas<Window>) {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();
}

pub fn render_main_menu(canvas: &mut Canvas<Window>, menu: &MainMenu) -> Result<(), String> {
    clear(canvas);
    draw_centered_text(canvas, "UNLUCKY", 200, 20, Color::RGB(255, 220, 100), 4)?;
    let items: Vec<MenuItem> = MainMenuOption::ALL.iter().map(|o| MenuItem::new(o.label())).collect();
    let style = MenuStyle {
        width: 180,
        height: 140,
        ..Default::default()
    };
    Menu::with_style(style).render(canvas, "", &items, menu.selected_index())?;
    draw_centered_text(canvas, "ARROWS + ENTER", 200, 222, Color::RGB(100, 100, 110), 1)?;
    Ok(())
}

pub fn render_world_select(canvas: &mut Canvas<Window>, select: &WorldSelect, progress: &Progress) -> Result<(), String> {
    clear(canvas);
    let items: Vec<MenuItem> = (0..NUM_WORLDS)
        .map(|w| {
            let (min, max) = WorldSelect::level_range(w);
            let text = format!("{} (LV.{}-{})", WorldSelect::name(w), min, max);
            if progress.is_world_unlocked(w) {
                MenuItem::new(text)
            } else {
                MenuItem::locked(text)
            }
        })
        .collect();
    let style = MenuStyle {
        width: 260,
        height: 170,
        ..Default::default()
    };
    Menu::with_style(style).render(canvas, "SELECT A WORLD", &items, select.selected_index())?;
    Ok(())
}

pub fn render_level_select(canvas: &mut Canvas<Window>, select: &LevelSelect, progress: &Progress) -> Result<(), String> {
    clear(canvas);
    let items: Vec<MenuItem> = (0..LEVELS_PER_WORLD)
        .map(|l| {
            let text = format!("{}  {}", select.label(l, progress), select.range_text(l));
            if progress.is_level_unlocked(select.world, l) {
                MenuItem::new(text)
            } else {
                MenuItem::locked(text)
            }
        })
        .collect();
    let title = WorldSelect::name(select.world);
    let style = MenuStyle {
        width: 260,
        height: 170,
        ..Default::default()
    };
    Menu::with_style(style).render(canvas, title, &items, select.selected_index())?;
    Ok(())
}

pub fn render_special_moves(
    canvas: &mut Canvas<Window>,
    manager: &SpecialMoveManager,
    player: &Player,
    message: Option<&str>,
) -> Result<(), String> {
    clear(canvas);
    draw_centered_text(canvas, "SPECIAL MOVES", 200, 8, Color::RGB(220, 220, 240), 2)?;

    for (i, smove) in SMOVES_ORDER_BY_LVL.iter().enumerate() {
        let y = 32 + i as i32 * 14;
        let selected = i == manager.selected_index();
        let color = match (smove.is_unlocked(player.level), selected) {
            (false, _) => Color::RGB(90, 90, 100),
            (true, true) => Color::RGB(255, 255, 255),
            (true, false) => Color::RGB(170, 170, 180),
        };
        if selected {
            draw_simple_text(canvas, ">", 12, y, Color::RGB(255, 220, 100), 1)?;
        }
        draw_simple_text(canvas, smove.name(), 22, y, color, 1)?;
        let status = SpecialMoveManager::status(*smove, player);
        draw_simple_text(canvas, &status, 110, y, color, 1)?;
    }

    let selected = manager.selected();
    draw_simple_text(canvas, selected.desc(), 12, 150, Color::RGB(200, 200, 210), 1)?;

    let set: Vec<&str> = player.smoveset.iter().map(|s| s.name()).collect();
    let set_line = format!("SET: {}", if set.is_empty() { "EMPTY".to_string() } else { set.join(" ") });
    draw_simple_text(canvas, &set_line, 12, 172, Color::RGB(255, 220, 120), 1)?;
    draw_simple_text(canvas, &SpecialMoveManager::turn_prompt(player), 12, 186, Color::RGB(150, 150, 160), 1)?;

    if let Some(message) = message {
        draw_simple_text(canvas, message, 12, 204, Color::RGB(140, 255, 140), 1)?;
    }
    draw_simple_text(canvas, "ENTER ADD/REMOVE  ESC BACK", 12, 224, Color::RGB(100, 100, 110), 1)?;
    Ok(())
}

pub fn render_statistics(canvas: &mut Canvas<Window>, stats: &Statistics) -> Result<(), String> {
    clear(canvas);
    draw_centered_text(canvas, "STATISTICS", 200, 10, Color::RGB(220, 220, 240), 2)?;
    for (i, (label, value)) in stats.rows().iter().enumerate() {
        let y = 38 + i as i32 * 15;
        draw_simple_text(canvas, label, 80, y, Color::RGB(170, 170, 180), 1)?;
        draw_simple_text(canvas, value, 260, y, Color::RGB(255, 255, 255), 1)?;
    }
    draw_simple_text(canvas, "ESC BACK", 12, 224, Color::RGB(100, 100, 110), 1)?;
    Ok(())
}

pub fn render_level_up(canvas: &mut Canvas<Window>, summary: &LevelUpSummary) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, 200));
    canvas.fill_rect(None)?;
    canvas.set_blend_mode(BlendMode::None);

    draw_centered_text(canvas, "LEVEL UP!", 200, 50, Color::RGB(255, 220, 100), 3)?;
    let levels = format!("LV.{} -> LV.{}", summary.previous_level, summary.new_level);
    draw_centered_text(canvas, &levels, 200, 90, Color::RGB(255, 255, 255), 2)?;
    let rows = [
        format!("MAX HP +{}", summary.hp_increase),
        format!("MIN DAMAGE +{}", summary.min_dmg_increase),
        format!("MAX DAMAGE +{}", summary.max_dmg_increase),
        format!("ACCURACY +{}%", summary.accuracy_increase),
    ];
    for (i, row) in rows.iter().enumerate() {
        draw_centered_text(canvas, row, 200, 120 + i as i32 * 12, Color::RGB(180, 255, 180), 1)?;
    }
    draw_centered_text(canvas, "PRESS ENTER", 200, 200, Color::RGB(150, 150, 160), 1)?;
    Ok(())
}

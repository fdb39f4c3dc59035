//! Inventory UI System
//!
//! Renders the 24-slot bag, the equipment panel and a tooltip for the
//! slot under the cursor, and tracks an item being dragged with the
//! mouse. Slot geometry comes from the library so mouse hit tests and
//! drawing agree.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use unlucky::entity::Player;
use unlucky::inventory::equipment::equip_slot_position;
use unlucky::inventory::inventory::{slot_position, NUM_COLS, NUM_SLOTS, SLOT_SIZE};
pub use unlucky::inventory::InventorySlot;
use unlucky::inventory::slot_at;
use unlucky::item::{EquipSlot, Item, Rarity};

use crate::text::draw_simple_text;

/// Represents the visual style of the inventory UI.
#[derive(Debug, Clone)]
pub struct InventoryUIStyle {
    pub background_color: Color,
    pub border_color: Color,
    pub slot_color: Color,
    pub selected_slot_color: Color,
}

impl Default for InventoryUIStyle {
    fn default() -> Self {
        InventoryUIStyle {
            background_color: Color::RGB(25, 25, 35),
            border_color: Color::RGB(80, 80, 100),
            slot_color: Color::RGB(50, 50, 60),
            selected_slot_color: Color::RGB(255, 255, 100),
        }
    }
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::RGB(200, 200, 200),
        Rarity::Rare => Color::RGB(80, 160, 255),
        Rarity::Epic => Color::RGB(190, 90, 255),
        Rarity::Legendary => Color::RGB(255, 170, 40),
    }
}

fn item_in(player: &Player, slot: InventorySlot) -> Option<&Item> {
    match slot {
        InventorySlot::Bag(i) => player.inventory.get_item(i),
        InventorySlot::Equip(equip) => player.equips.get(equip),
    }
}

/// Cursor state and drawing for the inventory screen
pub struct InventoryUI {
    style: InventoryUIStyle,
    cursor: InventorySlot,
    // slot the dragged item came from, and where the mouse is now
    drag: Option<(InventorySlot, i32, i32)>,
    /// Result of the last action, shown under the tooltip
    pub message: Option<String>,
}

impl InventoryUI {
    pub fn new() -> Self {
        InventoryUI {
            style: InventoryUIStyle::default(),
            cursor: InventorySlot::Bag(0),
            drag: None,
            message: None,
        }
    }

    pub fn cursor(&self) -> InventorySlot {
        self.cursor
    }

    /// Moves the bag cursor by a column/row step, wrapping inside the grid
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let index = match self.cursor {
            InventorySlot::Bag(i) => i as i32,
            InventorySlot::Equip(_) => 0,
        };
        let cols = NUM_COLS as i32;
        let rows = NUM_SLOTS as i32 / cols;
        let col = (index % cols + dx).rem_euclid(cols);
        let row = (index / cols + dy).rem_euclid(rows);
        self.cursor = InventorySlot::Bag((row * cols + col) as usize);
    }

    /// Points the cursor at the slot under the mouse, if any
    pub fn hover(&mut self, x: i32, y: i32) -> Option<InventorySlot> {
        if let Some((from, _, _)) = self.drag {
            self.drag = Some((from, x, y));
        }
        let slot = slot_at(x, y)?;
        self.cursor = slot;
        Some(slot)
    }

    /// Picks up the item under the mouse; false if the cell is empty
    pub fn start_drag(&mut self, x: i32, y: i32, player: &Player) -> bool {
        let Some(slot) = self.hover(x, y) else {
            return false;
        };
        if item_in(player, slot).is_none() {
            return false;
        }
        self.drag = Some((slot, x, y));
        true
    }

    /// Lets go of the dragged item, returning where it came from and the
    /// cell it was dropped on
    pub fn end_drag(&mut self, x: i32, y: i32) -> Option<(InventorySlot, Option<InventorySlot>)> {
        let (from, _, _) = self.drag.take()?;
        let to = self.hover(x, y);
        Some((from, to))
    }

    // ======================================================================
    // Rendering
    // ======================================================================

    pub fn render(&self, canvas: &mut Canvas<Window>, player: &Player) -> Result<(), String> {
        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(Rect::new(0, 0, 400, 240))?;

        draw_simple_text(canvas, "INVENTORY", 196, 56, Color::RGB(220, 220, 240), 1)?;
        draw_simple_text(canvas, "EQUIPS", 112, 56, Color::RGB(220, 220, 240), 1)?;

        let dragged = self.drag.map(|(from, _, _)| from);
        for index in 0..NUM_SLOTS {
            let (x, y) = slot_position(index);
            let slot = InventorySlot::Bag(index);
            let item = player.inventory.get_item(index).filter(|_| dragged != Some(slot));
            self.render_slot(canvas, x, y, item, self.cursor == slot)?;
        }
        for equip in EquipSlot::ALL {
            let (x, y) = equip_slot_position(equip);
            let slot = InventorySlot::Equip(equip);
            let item = player.equips.get(equip).filter(|_| dragged != Some(slot));
            self.render_slot(canvas, x, y, item, self.cursor == slot)?;
        }

        self.render_stats(canvas, player)?;

        if let Some(item) = item_in(player, self.cursor) {
            self.render_tooltip(canvas, item)?;
        }
        if let Some(message) = &self.message {
            draw_simple_text(canvas, message, 8, 210, Color::RGB(140, 255, 140), 1)?;
        }
        draw_simple_text(
            canvas,
            "E USE/EQUIP  Q SELL  DRAG TO MOVE",
            8,
            226,
            Color::RGB(120, 120, 130),
            1,
        )?;

        // dragged item follows the mouse, drawn last
        if let Some((from, x, y)) = self.drag {
            if let Some(item) = item_in(player, from) {
                let half = SLOT_SIZE / 2;
                self.render_slot(canvas, x - half, y - half, Some(item), false)?;
            }
        }
        Ok(())
    }

    fn render_slot(
        &self,
        canvas: &mut Canvas<Window>,
        x: i32,
        y: i32,
        item: Option<&Item>,
        selected: bool,
    ) -> Result<(), String> {
        let size = SLOT_SIZE as u32;
        let rect = Rect::new(x + 1, y + 1, size - 2, size - 2);
        canvas.set_draw_color(self.style.slot_color);
        canvas.fill_rect(rect)?;

        if let Some(item) = item {
            canvas.set_draw_color(rarity_color(item.rarity));
            canvas.fill_rect(Rect::new(x + 8, y + 8, size - 16, size - 16))?;
            let initial: String = item.name.chars().take(1).collect();
            draw_simple_text(canvas, &initial, x + 13, y + 12, Color::RGB(20, 20, 20), 1)?;
        }

        let border = if selected {
            self.style.selected_slot_color
        } else {
            self.style.border_color
        };
        canvas.set_draw_color(border);
        canvas.draw_rect(rect)
    }

    fn render_stats(&self, canvas: &mut Canvas<Window>, player: &Player) -> Result<(), String> {
        let color = Color::RGB(200, 200, 210);
        let s = &player.stats;
        let lines = [
            format!("LV. {}", player.level),
            format!("HP {}/{}", s.hp, s.max_hp),
            format!("DMG {}-{}", s.min_damage, s.max_damage),
            format!("ACC {}%", s.accuracy),
            format!("GOLD {}", player.gold),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_simple_text(canvas, line, 8, 8 + i as i32 * 10, color, 1)?;
        }
        Ok(())
    }

    fn render_tooltip(&self, canvas: &mut Canvas<Window>, item: &Item) -> Result<(), String> {
        let x = 8;
        let mut y = 72;
        draw_simple_text(canvas, &item.name.to_uppercase(), x, y, rarity_color(item.rarity), 1)?;
        y += 10;
        draw_simple_text(canvas, item.rarity.name(), x, y, Color::RGB(150, 150, 160), 1)?;
        y += 12;
        for line in item.full_desc().lines() {
            for chunk in super::dialog_box::wrap_text(line, 16) {
                draw_simple_text(canvas, &chunk, x, y, Color::RGB(220, 220, 220), 1)?;
                y += 10;
            }
        }
        let sell = format!("SELLS FOR {}", item.sell);
        draw_simple_text(canvas, &sell, x, y + 2, Color::RGB(255, 220, 100), 1)
    }
}

impl Default for InventoryUI {
    fn default() -> Self {
        Self::new()
    }
}

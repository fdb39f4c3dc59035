// Map movement, tile events and dialog flow

use log::{debug, warn};

use super::{Game, STEP_TIME};
use crate::entity::Enemy;
use crate::event::EventState;
use crate::inventory::{InventoryError, InventorySlot};
use crate::item::EquipSlot;
use crate::map::{Direction, MoveEvent, MoveOutcome, TileKind};

impl Game {
    // ======================================================================
    // Movement
    // ======================================================================

    /// Takes one step on the map
    ///
    /// Returns `None` when the player can't move right now. Walking into an
    /// enemy starts a battle; question and exclamation marks open a dialog.
    pub fn try_move(&mut self, dir: Direction) -> Option<MoveOutcome> {
        if !self.can_move() {
            return None;
        }
        let map = self.map.as_ref()?;
        let outcome = map.try_move(&mut self.player, dir, &mut self.rng);
        self.statistics.record_steps(outcome.path.len());
        self.move_timer = STEP_TIME * outcome.path.len() as f32;

        match outcome.event.clone() {
            MoveEvent::Battle { enemy, at, from } => {
                let level = map.enemy_level(&mut self.rng);
                // fight from the tile in front of the enemy
                self.player.position = from;
                if let Err(e) = self.start_battle(Enemy::new(enemy, level), Some(at)) {
                    warn!("Could not start battle: {e}");
                }
            }
            MoveEvent::Interaction(kind) => self.tile_interaction(kind),
            MoveEvent::Teleport { from, to } => debug!("Teleported from {from:?} to {to:?}"),
            _ => {}
        }
        Some(outcome)
    }

    fn tile_interaction(&mut self, kind: TileKind) {
        let Some(map) = self.map.as_ref() else {
            return;
        };
        let result = match kind {
            TileKind::QuestionMark => map.question_mark(&mut self.player, &self.resources.items, &mut self.rng),
            TileKind::ExclamationMark => map.exclamation_mark(&mut self.player, &mut self.rng),
            _ => return,
        };
        self.statistics.record_tile_event(&result);
        self.interaction_tile = Some(self.player.position);
        self.dialog.start(result.lines, EventState::TileEvent, EventState::Moving);
        self.state = EventState::TileEvent;
    }

    // ======================================================================
    // Dialog
    // ======================================================================

    /// Click on the dialog box
    ///
    /// Only acts once the current line has finished animating.
    pub fn advance_dialog(&mut self) {
        if self.state == EventState::Transition {
            return;
        }
        let Some(next) = self.dialog.click() else {
            return;
        };
        match self.state {
            EventState::TileEvent => {
                if let (Some(pos), Some(map)) = (self.interaction_tile.take(), self.map.as_mut()) {
                    map.clear_tile(pos);
                }
                self.player.tile_interaction = false;
                self.state = next;
            }
            EventState::Battling => self.advance_battle(),
            _ => self.state = next,
        }
    }

    /// Reveals the rest of the current dialog line
    pub fn skip_dialog(&mut self) {
        if self.state != EventState::Transition {
            self.dialog.skip();
        }
    }

    // ======================================================================
    // Inventory
    // ======================================================================

    pub fn toggle_inventory(&mut self) {
        match self.state {
            EventState::Moving => self.state = EventState::Inventory,
            EventState::Inventory => self.state = EventState::Moving,
            _ => {}
        }
    }

    /// Drinks a potion or puts on an equip, returning a status line
    pub fn use_item(&mut self, index: usize) -> Result<String, InventoryError> {
        let item = self.player.inventory.get_item(index).ok_or(InventoryError::EmptySlot(index))?;
        let (name, is_potion) = (item.name.to_uppercase(), item.is_potion());
        if is_potion {
            let healed = self.player.consume(index)?;
            Ok(format!("Used {name} and healed {healed} hp."))
        } else {
            self.player.equip_from_inventory(index)?;
            Ok(format!("Equipped {name}."))
        }
    }

    pub fn sell_item(&mut self, index: usize) -> Result<i32, InventoryError> {
        let gold = self.player.sell(index)?;
        debug!("Sold slot {index} for {gold} gold");
        Ok(gold)
    }

    /// Moves an equip back into the first free bag slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<usize> {
        self.player.unequip_slot(slot)
    }

    /// Drops a dragged item onto the cell under the cursor, if any
    pub fn drag_item(&mut self, from: InventorySlot, to: Option<InventorySlot>) -> Result<bool, InventoryError> {
        if self.state != EventState::Inventory {
            return Ok(false);
        }
        let moved = self.player.move_item(from, to)?;
        if moved {
            debug!("Moved item from {from:?} to {to:?}");
        }
        Ok(moved)
    }

    // ======================================================================
    // After-battle screens
    // ======================================================================

    pub fn close_level_up(&mut self) {
        if self.state == EventState::LevelUp {
            self.level_up = None;
            self.state = EventState::Moving;
        }
    }

    /// Leaves the death screen and puts the player back on the spawn tile
    pub fn respawn(&mut self) {
        if self.state != EventState::Death {
            return;
        }
        if let Some(spawn) = self.map.as_ref().map(|m| m.tile_map.spawn) {
            self.player.place(spawn);
        }
        self.start_transition(EventState::Death, EventState::Moving);
    }
}

#[cfg(test)]
mod tests {
    use crate::event::EventState;
    use crate::game::test_support::game_on;
    use crate::inventory::InventorySlot;
    use crate::item::{EquipSlot, Item, ItemDefinition, Rarity};
    use crate::map::{Direction, MoveEvent, TileKind};

    #[test]
    fn test_step_counts_and_cooldown() {
        let mut game = game_on("3 1\n0,0,0\n1,0,0");
        let outcome = game.try_move(Direction::Right).unwrap();
        assert_eq!(outcome.event, MoveEvent::None);
        assert_eq!(game.player.position, (1, 0));
        assert_eq!(game.statistics.tiles_walked, 1);

        // still walking
        assert!(game.try_move(Direction::Right).is_none());
        game.update(0.2);
        assert!(game.try_move(Direction::Right).is_some());
        assert_eq!(game.player.position, (2, 0));
    }

    #[test]
    fn test_interaction_tile_cleared_after_dialog() {
        let mut game = game_on("2 1\n0,107\n1,0");
        let outcome = game.try_move(Direction::Right).unwrap();
        assert_eq!(outcome.event, MoveEvent::Interaction(TileKind::ExclamationMark));
        assert_eq!(game.state, EventState::TileEvent);
        assert!(game.dialog.is_active());

        // cannot walk off during the dialog
        assert!(game.try_move(Direction::Left).is_none());

        while game.dialog.is_active() {
            game.skip_dialog();
            game.advance_dialog();
        }
        assert_eq!(game.state, EventState::Moving);
        let tile = game.map.as_ref().unwrap().tile_map.tile((1, 0)).unwrap();
        assert_eq!(tile.kind, TileKind::Normal);
        assert!(!game.player.tile_interaction);
    }

    #[test]
    fn test_walking_into_enemy_starts_battle() {
        let mut game = game_on("3 1\n0,0,0\n1,2,0");
        let outcome = game.try_move(Direction::Right).unwrap();
        assert!(matches!(outcome.event, MoveEvent::Battle { at: (1, 0), from: (0, 0), .. }));
        assert_eq!(game.player.position, (0, 0));
        assert!(game.battle.is_some());
        assert!(game.player.is_battling());
        assert_eq!(game.state, EventState::Transition);
    }

    #[test]
    fn test_inventory_use_item() {
        let mut game = game_on("2 1\n0,0\n1,0");
        game.toggle_inventory();
        assert_eq!(game.state, EventState::Inventory);
        assert!(game.try_move(Direction::Right).is_none());

        let potion = ItemDefinition::potion("tonic", "", Rarity::Common, 0, 10, 2);
        game.player.stats.hp = 1;
        game.player.inventory.add_item(Item::from_definition(&potion)).unwrap();
        let line = game.use_item(0).unwrap();
        assert_eq!(line, "Used TONIC and healed 10 hp.");
        assert_eq!(game.player.stats.hp, 11);
        assert!(game.use_item(0).is_err());

        game.toggle_inventory();
        assert_eq!(game.state, EventState::Moving);
    }

    #[test]
    fn test_drag_item_only_in_inventory() {
        let mut game = game_on("2 1\n0,0\n1,0");
        let rock = ItemDefinition::misc("rock", "", Rarity::Common, 0, 1);
        game.player.inventory.add_item(Item::from_definition(&rock)).unwrap();

        let to_bag = Some(InventorySlot::Bag(9));
        assert!(!game.drag_item(InventorySlot::Bag(0), to_bag).unwrap());
        assert!(game.player.inventory.get_item(0).is_some());

        game.toggle_inventory();
        assert!(game.drag_item(InventorySlot::Bag(0), to_bag).unwrap());
        assert_eq!(game.player.inventory.get_item(9).unwrap().name, "rock");

        let to_equips = Some(InventorySlot::Equip(EquipSlot::Helmet));
        assert!(game.drag_item(InventorySlot::Bag(9), to_equips).is_err());
        assert!(game.player.inventory.get_item(9).is_some());
    }
}

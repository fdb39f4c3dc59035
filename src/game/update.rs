// Per-frame timers

use super::Game;
use crate::event::EventState;

impl Game {
    /// Advances dialog text, transitions, weather and the step cooldown
    pub fn update(&mut self, dt: f32) {
        self.playtime += f64::from(dt);
        self.move_timer = (self.move_timer - dt).max(0.0);

        if let Some(map) = self.map.as_mut() {
            map.update(dt);
        }

        if self.state == EventState::Transition {
            if let Some(next) = self.transition.update(dt) {
                self.state = next;
            }
            return;
        }
        self.dialog.update(dt);
    }

    /// Whether the player can take another step this frame
    pub fn can_move(&self) -> bool {
        self.state == EventState::Moving && self.move_timer <= 0.0 && self.map.is_some()
    }
}

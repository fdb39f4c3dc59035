// Event state and screen transitions
//
// The game screen is always in exactly one `EventState`. Moving between
// some of them plays a fade `Transition`.

/// What the game screen is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventState {
    #[default]
    None,
    Moving,
    Battling,
    Transition,
    TileEvent,
    Inventory,
    LevelUp,
    Death,
}

/// Seconds for each half of a transition
pub const FADE_TIME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Out,
    In,
}

/// Fade out then fade in between two event states
#[derive(Debug, Clone)]
pub struct Transition {
    pub prev: EventState,
    pub next: EventState,
    phase: FadePhase,
    elapsed: f32,
    active: bool,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition {
    pub fn new() -> Self {
        Transition {
            prev: EventState::None,
            next: EventState::None,
            phase: FadePhase::Out,
            elapsed: 0.0,
            active: false,
        }
    }

    pub fn start(&mut self, prev: EventState, next: EventState) {
        self.prev = prev;
        self.next = next;
        self.phase = FadePhase::Out;
        self.elapsed = 0.0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Advances the fade; returns `Some(next)` once the fade in is done
    pub fn update(&mut self, dt: f32) -> Option<EventState> {
        if !self.active {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < FADE_TIME {
            return None;
        }
        match self.phase {
            FadePhase::Out => {
                self.phase = FadePhase::In;
                self.elapsed = 0.0;
                None
            }
            FadePhase::In => {
                self.active = false;
                self.elapsed = 0.0;
                Some(self.next)
            }
        }
    }

    /// Black overlay opacity in 0..=1
    pub fn overlay_alpha(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        let t = (self.elapsed / FADE_TIME).clamp(0.0, 1.0);
        match self.phase {
            FadePhase::Out => t,
            FadePhase::In => 1.0 - t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_fades_out_then_in() {
        let mut t = Transition::new();
        assert_eq!(t.update(1.0), None);

        t.start(EventState::Battling, EventState::Moving);
        assert!(t.is_active());
        assert_eq!(t.update(0.25), None);
        assert_eq!(t.phase(), FadePhase::Out);
        assert!((t.overlay_alpha() - 0.5).abs() < 1e-5);

        assert_eq!(t.update(0.25), None);
        assert_eq!(t.phase(), FadePhase::In);
        assert_eq!(t.update(0.4), None);
        assert_eq!(t.update(0.1), Some(EventState::Moving));
        assert!(!t.is_active());
        assert_eq!(t.overlay_alpha(), 0.0);
    }
}

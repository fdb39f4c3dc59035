use crate::event::EventState;

/// Seconds between two revealed characters
pub const TEXT_SPEED: f32 = 0.03;
/// Seconds between blinks of the "more" arrow
pub const BLINK_TIME: f32 = 0.5;

/// Animated dialog box text
///
/// Lines are revealed one character at a time. Clicking after a line is
/// done moves to the next one; clicking after the last line closes the
/// dialog and hands back the event state to switch to.
#[derive(Debug, Clone)]
pub struct Dialog {
    lines: Vec<String>,
    index: usize,
    shown: usize,
    timer: f32,
    text_speed: f32,
    blink_timer: f32,
    blink: bool,
    pub prev: EventState,
    pub next: EventState,
    active: bool,
}

impl Default for Dialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog {
    pub fn new() -> Self {
        Self::with_speed(TEXT_SPEED)
    }

    pub fn with_speed(text_speed: f32) -> Self {
        Dialog {
            lines: Vec::new(),
            index: 0,
            shown: 0,
            timer: 0.0,
            text_speed: text_speed.max(0.0),
            blink_timer: 0.0,
            blink: false,
            prev: EventState::None,
            next: EventState::None,
            active: false,
        }
    }

    /// Opens the dialog with `lines`; does nothing for an empty list
    pub fn start(&mut self, lines: Vec<String>, prev: EventState, next: EventState) {
        if lines.is_empty() {
            return;
        }
        self.lines = lines;
        self.index = 0;
        self.prev = prev;
        self.next = next;
        self.active = true;
        self.reset_cycle();
    }

    fn reset_cycle(&mut self) {
        self.shown = 0;
        self.timer = 0.0;
        self.blink_timer = 0.0;
        self.blink = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn current_line(&self) -> &str {
        self.lines.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// Whether the current line is fully revealed
    pub fn is_cycle_done(&self) -> bool {
        self.active && self.shown >= self.current_line().chars().count()
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        if self.is_cycle_done() {
            self.blink_timer += dt;
            if self.blink_timer >= BLINK_TIME {
                self.blink_timer = 0.0;
                self.blink = !self.blink;
            }
            return;
        }
        self.timer += dt;
        let total = self.current_line().chars().count();
        while self.timer >= self.text_speed && self.shown < total {
            self.timer -= self.text_speed;
            self.shown += 1;
            if self.text_speed <= 0.0 {
                self.shown = total;
            }
        }
    }

    /// Advances the dialog; returns `Some(next)` when the last line is dismissed
    pub fn click(&mut self) -> Option<EventState> {
        if !self.is_cycle_done() {
            return None;
        }
        if self.index + 1 < self.lines.len() {
            self.index += 1;
            self.reset_cycle();
            None
        } else {
            self.end();
            Some(self.next)
        }
    }

    /// Reveals the current line at once
    pub fn skip(&mut self) {
        if self.active {
            self.shown = self.current_line().chars().count();
        }
    }

    pub fn end(&mut self) {
        self.active = false;
        self.lines.clear();
        self.index = 0;
        self.reset_cycle();
    }

    /// The revealed part of the current line
    pub fn visible_text(&self) -> String {
        self.current_line().chars().take(self.shown).collect()
    }

    /// Arrow offset toggle for the blinking indicator
    pub fn blink(&self) -> bool {
        self.blink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_dialog_is_ignored() {
        let mut d = Dialog::new();
        d.start(Vec::new(), EventState::Moving, EventState::Moving);
        assert!(!d.is_active());
        assert_eq!(d.click(), None);
    }

    #[test]
    fn test_text_reveals_one_char_per_tick() {
        let mut d = Dialog::with_speed(0.1);
        d.start(lines(&["abc"]), EventState::TileEvent, EventState::Moving);
        assert_eq!(d.visible_text(), "");
        d.update(0.15);
        assert_eq!(d.visible_text(), "a");
        d.update(0.1);
        assert_eq!(d.visible_text(), "ab");
        assert!(!d.is_cycle_done());
        d.update(0.1);
        assert_eq!(d.visible_text(), "abc");
        assert!(d.is_cycle_done());
    }

    #[test]
    fn test_click_semantics() {
        let mut d = Dialog::with_speed(0.1);
        d.start(lines(&["hi", "yo"]), EventState::TileEvent, EventState::Moving);

        // still animating
        assert_eq!(d.click(), None);
        assert_eq!(d.visible_text(), "");

        d.update(0.5);
        assert!(d.is_cycle_done());
        assert_eq!(d.click(), None);
        assert_eq!(d.visible_text(), "");
        assert!(d.is_active());

        d.skip();
        assert_eq!(d.visible_text(), "yo");
        assert_eq!(d.click(), Some(EventState::Moving));
        assert!(!d.is_active());
    }

    #[test]
    fn test_indicator_blinks_after_cycle() {
        let mut d = Dialog::with_speed(0.1);
        d.start(lines(&["x"]), EventState::None, EventState::Moving);
        d.update(0.1);
        assert!(d.is_cycle_done());
        assert!(!d.blink());
        d.update(0.5);
        assert!(d.blink());
        d.update(0.5);
        assert!(!d.blink());
    }
}

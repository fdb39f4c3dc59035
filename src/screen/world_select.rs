//! World and level selection
//!
//! Locked worlds are listed with a placeholder name; locked levels are
//! shown but can't be picked.

use super::selector::Selector;
use crate::map::GameMap;
use crate::progress::{Progress, LEVELS_PER_WORLD, NUM_WORLDS};

pub const WORLD_NAMES: [&str; NUM_WORLDS] = [
    "SLIME FOREST",
    "????????????????????",
    "????????????????????",
    "????????????????????",
    "????????????????????",
];

#[derive(Debug, Clone)]
pub struct WorldSelect {
    selector: Selector,
}

impl Default for WorldSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldSelect {
    pub fn new() -> Self {
        WorldSelect { selector: Selector::new(NUM_WORLDS) }
    }

    pub fn select_previous(&mut self) {
        self.selector.select_previous();
    }

    pub fn select_next(&mut self) {
        self.selector.select_next();
    }

    pub fn selected_index(&self) -> usize {
        self.selector.index()
    }

    pub fn name(world: usize) -> &'static str {
        WORLD_NAMES.get(world).copied().unwrap_or("")
    }

    /// Enemy levels across the whole world
    pub fn level_range(world: usize) -> (i32, i32) {
        let (min, _) = GameMap::level_range(world, 0);
        let (_, max) = GameMap::level_range(world, LEVELS_PER_WORLD - 1);
        (min, max)
    }

    /// The selected world, if it's unlocked
    pub fn confirm(&self, progress: &Progress) -> Option<usize> {
        let world = self.selector.index();
        progress.is_world_unlocked(world).then_some(world)
    }
}

#[derive(Debug, Clone)]
pub struct LevelSelect {
    pub world: usize,
    selector: Selector,
}

impl LevelSelect {
    pub fn new(world: usize) -> Self {
        LevelSelect { world, selector: Selector::new(LEVELS_PER_WORLD) }
    }

    pub fn select_previous(&mut self) {
        self.selector.select_previous();
    }

    pub fn select_next(&mut self) {
        self.selector.select_next();
    }

    pub fn selected_index(&self) -> usize {
        self.selector.index()
    }

    pub fn label(&self, level: usize, progress: &Progress) -> String {
        if progress.is_level_unlocked(self.world, level) {
            format!("LEVEL {}", level + 1)
        } else {
            "????????".to_string()
        }
    }

    pub fn range_text(&self, level: usize) -> String {
        let (min, max) = GameMap::level_range(self.world, level);
        format!("ENEMY LV. {min}-{max}")
    }

    /// `(world, level)` of the selection, if it's unlocked
    pub fn confirm(&self, progress: &Progress) -> Option<(usize, usize)> {
        let level = self.selector.index();
        progress.is_level_unlocked(self.world, level).then_some((self.world, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unlocked_worlds_confirm() {
        let progress = Progress::new();
        let mut ws = WorldSelect::new();
        assert_eq!(ws.confirm(&progress), Some(0));
        ws.select_next();
        assert_eq!(ws.confirm(&progress), None);
        assert_eq!(WorldSelect::name(0), "SLIME FOREST");
        assert_eq!(WorldSelect::name(1).len(), 20);
    }

    #[test]
    fn test_level_select_respects_progress() {
        let progress = Progress { highest_world: 0, highest_level: 1 };
        let mut ls = LevelSelect::new(0);
        ls.select_next();
        assert_eq!(ls.confirm(&progress), Some((0, 1)));
        ls.select_next();
        assert_eq!(ls.confirm(&progress), None);
        assert_eq!(ls.label(2, &progress), "????????");
        assert_eq!(ls.label(0, &progress), "LEVEL 1");
        assert_eq!(ls.range_text(0), "ENEMY LV. 1-3");
        assert_eq!(WorldSelect::level_range(0), (1, 11));
    }
}

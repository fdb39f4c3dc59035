use serde::{Deserialize, Serialize};

pub const NUM_WORLDS: usize = 5;
pub const LEVELS_PER_WORLD: usize = 5;

/// How far the player has made it through the worlds
///
/// `highest_world`/`highest_level` is the furthest level the player may
/// enter. Clearing it unlocks the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub highest_world: usize,
    pub highest_level: usize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_world_unlocked(&self, world: usize) -> bool {
        world < NUM_WORLDS && world <= self.highest_world
    }

    pub fn is_level_unlocked(&self, world: usize, level: usize) -> bool {
        if !self.is_world_unlocked(world) || level >= LEVELS_PER_WORLD {
            return false;
        }
        world < self.highest_world || level <= self.highest_level
    }

    /// Marks a level cleared; returns true if it unlocked something new
    ///
    /// ```
    /// use unlucky::progress::Progress;
    ///
    /// let mut progress = Progress::new();
    /// assert!(progress.complete(0, 0));
    /// assert!(progress.is_level_unlocked(0, 1));
    /// assert!(!progress.complete(0, 0));
    /// ```
    pub fn complete(&mut self, world: usize, level: usize) -> bool {
        if (world, level) != (self.highest_world, self.highest_level) {
            return false;
        }
        if level + 1 < LEVELS_PER_WORLD {
            self.highest_level += 1;
            true
        } else if world + 1 < NUM_WORLDS {
            self.highest_world += 1;
            self.highest_level = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_only_first_level() {
        let p = Progress::new();
        assert!(p.is_world_unlocked(0));
        assert!(!p.is_world_unlocked(1));
        assert!(p.is_level_unlocked(0, 0));
        assert!(!p.is_level_unlocked(0, 1));
    }

    #[test]
    fn test_completing_last_level_opens_next_world() {
        let mut p = Progress { highest_world: 0, highest_level: LEVELS_PER_WORLD - 1 };
        assert!(p.complete(0, LEVELS_PER_WORLD - 1));
        assert_eq!(p, Progress { highest_world: 1, highest_level: 0 });
        // every level of a finished world stays open
        assert!(p.is_level_unlocked(0, 3));
        assert!(!p.is_level_unlocked(1, 1));
    }

    #[test]
    fn test_final_level_is_capped() {
        let mut p = Progress { highest_world: NUM_WORLDS - 1, highest_level: LEVELS_PER_WORLD - 1 };
        assert!(!p.complete(NUM_WORLDS - 1, LEVELS_PER_WORLD - 1));
        assert!(!p.is_world_unlocked(NUM_WORLDS));
    }
}

use super::selector::Selector;
use crate::battle::special::SMOVES_ORDER_BY_LVL;
use crate::battle::SpecialMove;
use crate::entity::Player;

/// What a toggle did to the player's special moveset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoveToggle {
    Added,
    Removed,
    Full,
    Locked,
}

/// Screen for choosing which special moves to bring into battle
///
/// Lists every special move in unlock order.
#[derive(Debug, Clone)]
pub struct SpecialMoveManager {
    selector: Selector,
}

impl Default for SpecialMoveManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialMoveManager {
    pub fn new() -> Self {
        SpecialMoveManager { selector: Selector::new(SMOVES_ORDER_BY_LVL.len()) }
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

    pub fn selected(&self) -> SpecialMove {
        SMOVES_ORDER_BY_LVL[self.selector.index()]
    }

    pub fn status(smove: SpecialMove, player: &Player) -> String {
        if smove.is_unlocked(player.level) {
            "UNLOCKED".to_string()
        } else {
            format!("UNLOCKED AT LV.{}", smove.level_unlocked())
        }
    }

    pub fn turn_prompt(player: &Player) -> String {
        format!("Special moves can be used in battle every {} turns.", player.smove_cd)
    }

    /// Adds the selected move, or removes it if it's already in the set
    pub fn toggle(&self, player: &mut Player) -> SmoveToggle {
        let smove = self.selected();
        let found = player.smoveset.iter().position(|s| s == smove);
        if let Some(index) = found {
            player.smoveset.remove(index);
            return SmoveToggle::Removed;
        }
        if !smove.is_unlocked(player.level) {
            SmoveToggle::Locked
        } else if player.smoveset.add(smove) {
            SmoveToggle::Added
        } else {
            SmoveToggle::Full
        }
    }
}

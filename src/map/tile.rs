use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::entity::EnemyKind;

/// Id used for a cleared tile (consumed question/exclamation marks)
pub const EMPTY_TILE_ID: i32 = -1;

/// Animated tile ids begin at 96
pub const CHANGE_ID: i32 = 99;
pub const IN_AND_OUT_ID: i32 = 100;
pub const STOP_ID: i32 = 101;
pub const DOWN_ID: i32 = 102;
pub const UP_ID: i32 = 103;
pub const RIGHT_ID: i32 = 104;
pub const LEFT_ID: i32 = 105;
pub const QUESTION_MARK_ID: i32 = 106;
pub const EXCLAMATION_MARK_ID: i32 = 107;
pub const TELEPORT_ID: i32 = 108;

/// How the player interacts with a tile
///
/// - normal: Player can pass through
/// - blocked: Player cannot go through
/// - change: Player goes forwards or backwards in the direction they entered
/// - in and out: Player goes 1 tile in a random direction other than back
/// - stop: Player's movement is stopped
/// - down, up, right, left: Player is pushed 1 tile that way
/// - question / exclamation mark: one-off reward or penalty
/// - teleport: Player is sent to another teleport tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Normal,
    Blocked,
    Change,
    InAndOut,
    Stop,
    Down,
    Up,
    Right,
    Left,
    QuestionMark,
    ExclamationMark,
    Teleport,
}

impl TileKind {
    /// Wall, water and tree ids of the tileset
    pub fn is_blocked_id(id: i32) -> bool {
        (1..=31).contains(&id) || (48..=63).contains(&id)
    }

    pub fn from_id(id: i32) -> TileKind {
        if Self::is_blocked_id(id) {
            return TileKind::Blocked;
        }
        match id {
            CHANGE_ID => TileKind::Change,
            IN_AND_OUT_ID => TileKind::InAndOut,
            STOP_ID => TileKind::Stop,
            DOWN_ID => TileKind::Down,
            UP_ID => TileKind::Up,
            RIGHT_ID => TileKind::Right,
            LEFT_ID => TileKind::Left,
            QUESTION_MARK_ID => TileKind::QuestionMark,
            EXCLAMATION_MARK_ID => TileKind::ExclamationMark,
            TELEPORT_ID => TileKind::Teleport,
            _ => TileKind::Normal,
        }
    }

    /// Direction a push tile sends the player
    pub fn push_direction(self) -> Option<Direction> {
        match self {
            TileKind::Down => Some(Direction::Down),
            TileKind::Up => Some(Direction::Up),
            TileKind::Right => Some(Direction::Right),
            TileKind::Left => Some(Direction::Left),
            _ => None,
        }
    }
}

/// One cell of a tile map
///
/// A tile holds at most one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: i32,
    pub kind: TileKind,
    entity: Option<EnemyKind>,
}

impl Tile {
    pub fn from_id(id: i32) -> Self {
        Tile {
            id,
            kind: TileKind::from_id(id),
            entity: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.kind == TileKind::Blocked
    }

    /// Any tile that isn't normal or blocked
    pub fn is_special(&self) -> bool {
        !matches!(self.kind, TileKind::Normal | TileKind::Blocked)
    }

    /// Tiles the player cannot stay on
    pub fn is_moving(&self) -> bool {
        matches!(
            self.kind,
            TileKind::Change | TileKind::InAndOut | TileKind::Down | TileKind::Up | TileKind::Right | TileKind::Left
        )
    }

    pub fn is_interaction(&self) -> bool {
        matches!(self.kind, TileKind::QuestionMark | TileKind::ExclamationMark)
    }

    /// Places an entity; no-op if one is already here
    pub fn add_entity(&mut self, entity: EnemyKind) {
        if self.entity.is_none() {
            self.entity = Some(entity);
        }
    }

    pub fn remove_entity(&mut self) -> Option<EnemyKind> {
        self.entity.take()
    }

    pub fn entity(&self) -> Option<EnemyKind> {
        self.entity
    }

    pub fn contains_entity(&self) -> bool {
        self.entity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_by_id() {
        assert_eq!(Tile::from_id(0).kind, TileKind::Normal);
        assert_eq!(Tile::from_id(EMPTY_TILE_ID).kind, TileKind::Normal);
        assert!(Tile::from_id(1).is_blocked());
        assert!(Tile::from_id(31).is_blocked());
        assert!(!Tile::from_id(32).is_blocked());
        assert!(Tile::from_id(48).is_blocked());
        assert!(Tile::from_id(63).is_blocked());
        assert!(!Tile::from_id(64).is_blocked());

        assert_eq!(Tile::from_id(99).kind, TileKind::Change);
        assert_eq!(Tile::from_id(105).kind, TileKind::Left);
        assert_eq!(Tile::from_id(108).kind, TileKind::Teleport);
        assert_eq!(Tile::from_id(109).kind, TileKind::Normal);
    }

    #[test]
    fn test_predicates() {
        let stop = Tile::from_id(STOP_ID);
        assert!(stop.is_special());
        assert!(!stop.is_moving());

        let change = Tile::from_id(CHANGE_ID);
        assert!(change.is_special() && change.is_moving());

        assert!(Tile::from_id(QUESTION_MARK_ID).is_interaction());
        assert!(!Tile::from_id(0).is_special());
        assert!(!Tile::from_id(5).is_special());
        assert_eq!(TileKind::Right.push_direction(), Some(Direction::Right));
    }

    #[test]
    fn test_one_entity_per_tile() {
        let mut tile = Tile::from_id(0);
        tile.add_entity(EnemyKind::Slime);
        tile.add_entity(EnemyKind::Ghost);
        assert_eq!(tile.entity(), Some(EnemyKind::Slime));
        assert_eq!(tile.remove_entity(), Some(EnemyKind::Slime));
        assert!(!tile.contains_entity());
    }
}

use serde::{Deserialize, Serialize};

/// Tile coordinates, (0, 0) is the top-left tile
pub type Position = (i32, i32);

/// Movement directions (codes 0..3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

    pub fn from_code(code: i32) -> Option<Direction> {
        match code {
            0 => Some(Direction::Down),
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
            Direction::Right => 2,
            Direction::Left => 3,
        }
    }

    /// Tile offset of one step, y grows downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    /// The neighbouring position one step this way
    pub fn step(self, (x, y): Position) -> Position {
        let (dx, dy) = self.delta();
        (x + dx, y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_cancel() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().step(dir.step((3, 3))), (3, 3));
        }
    }

    #[test]
    fn test_codes() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Direction::from_code(4), None);
        assert_eq!(Direction::Up.delta(), (0, -1));
    }
}

use thiserror::Error;

use super::direction::Position;
use super::tile::Tile;
use crate::entity::EnemyKind;

/// Entity id marking the player spawn in a map file
pub const PLAYER_SPAWN_ID: i32 = 1;

/// Problems found while parsing a map file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("Bad map header '{0}', expected 'width height'")]
    BadHeader(String),

    #[error("Map ended after {found} rows, expected {expected}")]
    MissingRows { expected: usize, found: usize },

    #[error("Row {row} has {found} ids, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("Row {row}: '{value}' is not a number")]
    BadId { row: usize, value: String },

    #[error("Unknown entity id {id} at ({x}, {y})")]
    UnknownEntity { id: i32, x: i32, y: i32 },

    #[error("Map has no player spawn")]
    MissingSpawn,
}

/// A grid of tiles with the entities standing on them
///
/// Text format:
/// ```text
/// width height
/// <height rows of comma separated tile ids, top row first>
/// <height rows of comma separated entity ids: 0 none, 1 spawn, 2..=4 enemies>
/// ```
/// Largest width or height a map file may declare
pub const MAX_MAP_SIDE: i32 = 1024;

#[derive(Debug, Clone)]
pub struct TileMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    pub spawn: Position,
}

impl TileMap {
    /// Parses a map file
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().unwrap_or_default();
        let dims: Vec<&str> = header.split_whitespace().collect();
        let (width, height) = match dims.as_slice() {
            [w, h] => match (w.parse::<i32>(), h.parse::<i32>()) {
                (Ok(w), Ok(h)) if (1..=MAX_MAP_SIDE).contains(&w) && (1..=MAX_MAP_SIDE).contains(&h) => (w, h),
                _ => return Err(MapError::BadHeader(header.to_string())),
            },
            _ => return Err(MapError::BadHeader(header.to_string())),
        };

        let rows = height as usize;
        let cols = width as usize;
        let mut read_layer = |offset: usize| -> Result<Vec<i32>, MapError> {
            let mut ids = Vec::new();
            for row in 0..rows {
                let line = lines.next().ok_or(MapError::MissingRows {
                    expected: rows * 2,
                    found: offset + row,
                })?;
                let values = parse_row(line, offset + row)?;
                if values.len() != cols {
                    return Err(MapError::RowLength { row: offset + row, expected: cols, found: values.len() });
                }
                ids.extend(values);
            }
            Ok(ids)
        };

        let tile_ids = read_layer(0)?;
        let entity_ids = read_layer(rows)?;

        let mut tiles: Vec<Tile> = tile_ids.into_iter().map(Tile::from_id).collect();
        let mut spawn = None;
        for (i, id) in entity_ids.into_iter().enumerate() {
            let x = (i % cols) as i32;
            let y = (i / cols) as i32;
            match id {
                0 => {}
                PLAYER_SPAWN_ID => spawn = Some((x, y)),
                _ => {
                    let kind = EnemyKind::from_id(id).ok_or(MapError::UnknownEntity { id, x, y })?;
                    tiles[i].add_entity(kind);
                }
            }
        }

        Ok(TileMap {
            width,
            height,
            tiles,
            spawn: spawn.ok_or(MapError::MissingSpawn)?,
        })
    }

    pub fn in_bounds(&self, (x, y): Position) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.1 * self.width + pos.0) as usize)
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.offset(pos).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.offset(pos).map(|i| &mut self.tiles[i])
    }

    /// Replaces a tile, keeping any entity on it
    pub fn set_tile(&mut self, pos: Position, id: i32) -> bool {
        let Some(tile) = self.tile_mut(pos) else {
            return false;
        };
        let entity = tile.remove_entity();
        *tile = Tile::from_id(id);
        if let Some(entity) = entity {
            tile.add_entity(entity);
        }
        true
    }

    /// Places an entity on an in-bounds, unblocked tile
    pub fn add_entity(&mut self, pos: Position, entity: EnemyKind) -> bool {
        match self.tile_mut(pos) {
            Some(tile) if !tile.is_blocked() && !tile.contains_entity() => {
                tile.add_entity(entity);
                true
            }
            _ => false,
        }
    }

    pub fn remove_entity(&mut self, pos: Position) -> Option<EnemyKind> {
        self.tile_mut(pos).and_then(Tile::remove_entity)
    }

    pub fn entity_at(&self, pos: Position) -> Option<EnemyKind> {
        self.tile(pos).and_then(Tile::entity)
    }

    /// All teleport tiles except `from`
    pub fn teleport_destinations(&self, from: Position) -> Vec<Position> {
        self.positions()
            .filter(|pos| *pos != from)
            .filter(|pos| self.tile(*pos).is_some_and(|t| t.kind == super::tile::TileKind::Teleport))
            .collect()
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    pub fn num_entities(&self) -> usize {
        self.tiles.iter().filter(|t| t.contains_entity()).count()
    }
}

fn parse_row(line: &str, row: usize) -> Result<Vec<i32>, MapError> {
    line.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse::<i32>().map_err(|_| MapError::BadId { row, value: value.to_string() })
        })
        .collect()
}

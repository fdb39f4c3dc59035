use std::collections::BTreeMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::resource::ResourceError;

/// The four families of battle moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Narrow damage range
    Accurate,
    /// Wide damage range
    Wide,
    /// Fixed damage with a chance to crit
    Crit,
    /// Restores a share of max hp
    Heal,
}

impl MoveKind {
    pub fn from_code(code: i32) -> Option<MoveKind> {
        match code {
            0 => Some(MoveKind::Accurate),
            1 => Some(MoveKind::Wide),
            2 => Some(MoveKind::Crit),
            3 => Some(MoveKind::Heal),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            MoveKind::Accurate => 0,
            MoveKind::Wide => 1,
            MoveKind::Crit => 2,
            MoveKind::Heal => 3,
        }
    }
}

/// A battle move
///
/// `min`/`max` are damage multipliers of the user's damage seed, or
/// fractions of max hp for heals. The resolved integer ranges are filled
/// in by `set_damage`/`set_heal` each time a moveset is rolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub name: String,
    pub min: f32,
    pub max: f32,
    /// Crit chance in percent (crit moves only)
    pub crit_chance: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub min_heal: i32,
    pub max_heal: i32,
}

impl Move {
    /// Accurate, wide or heal move with a range
    pub fn ranged(kind: MoveKind, name: impl Into<String>, min: f32, max: f32) -> Self {
        Move {
            kind,
            name: name.into(),
            min,
            max,
            crit_chance: 0,
            min_damage: 0,
            max_damage: 0,
            min_heal: 0,
            max_heal: 0,
        }
    }

    pub fn crit(name: impl Into<String>, damage: f32, crit_chance: i32) -> Self {
        Move {
            crit_chance,
            ..Move::ranged(MoveKind::Crit, name, damage, damage)
        }
    }

    pub fn is_heal(&self) -> bool {
        self.kind == MoveKind::Heal
    }

    /// Resolves the damage range from a damage seed
    pub fn set_damage(&mut self, seed: i32) {
        let seed = seed as f32;
        self.min_damage = ((self.min * seed).round() as i32).max(1);
        self.max_damage = ((self.max * seed).round() as i32).max(self.min_damage);
    }

    /// Resolves the heal range from the user's max hp
    pub fn set_heal(&mut self, max_hp: i32) {
        let max_hp = max_hp as f32;
        self.min_heal = ((self.min * max_hp).round() as i32).max(1);
        self.max_heal = ((self.max * max_hp).round() as i32).max(self.min_heal);
    }

    /// Short stat line for move buttons
    pub fn description(&self) -> String {
        match self.kind {
            MoveKind::Accurate | MoveKind::Wide => {
                format!("DAMAGE: {}-{}", self.min_damage, self.max_damage)
            }
            MoveKind::Crit => format!("DAMAGE: {}\nCRIT: {}%", self.min_damage, self.crit_chance),
            MoveKind::Heal => format!("HEAL: {}-{}", self.min_heal, self.max_heal),
        }
    }
}

/// One move as written in `moves.json` / `boss_moves.json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMove {
    #[serde(rename = "type", default)]
    kind: Option<i32>,
    name: String,
    #[serde(default)]
    min_damage: f32,
    #[serde(default)]
    max_damage: f32,
    #[serde(default)]
    damage: f32,
    #[serde(default)]
    crit: i32,
    #[serde(default)]
    min_heal: f32,
    #[serde(default)]
    max_heal: f32,
}

impl RawMove {
    fn into_move(self, fallback: MoveKind, file: &str) -> Result<Move, ResourceError> {
        let kind = match self.kind {
            Some(code) => MoveKind::from_code(code).ok_or_else(|| ResourceError::UnknownMoveType {
                file: file.to_string(),
                name: self.name.clone(),
                code,
            })?,
            None => fallback,
        };
        Ok(match kind {
            MoveKind::Accurate | MoveKind::Wide => Move::ranged(kind, self.name, self.min_damage, self.max_damage),
            MoveKind::Crit => Move::crit(self.name, self.damage, self.crit),
            MoveKind::Heal => Move::ranged(kind, self.name, self.min_heal, self.max_heal),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MoveFile {
    accurate: Vec<RawMove>,
    wide: Vec<RawMove>,
    crit: Vec<RawMove>,
    healing: Vec<RawMove>,
}

/// Every move a regular combatant can roll, by family
#[derive(Debug, Clone, Default)]
pub struct MovePool {
    pub accurate: Vec<Move>,
    pub wide: Vec<Move>,
    pub crit: Vec<Move>,
    pub healing: Vec<Move>,
}

impl MovePool {
    /// Parses the contents of `moves.json`
    pub fn from_json(json: &str) -> Result<Self, ResourceError> {
        const FILE: &str = "moves.json";
        let file: MoveFile = serde_json::from_str(json)
            .map_err(|source| ResourceError::Json { name: FILE.to_string(), source })?;

        let convert = |raws: Vec<RawMove>, kind: MoveKind| -> Result<Vec<Move>, ResourceError> {
            raws.into_iter().map(|raw| raw.into_move(kind, FILE)).collect()
        };

        let pool = MovePool {
            accurate: convert(file.accurate, MoveKind::Accurate)?,
            wide: convert(file.wide, MoveKind::Wide)?,
            crit: convert(file.crit, MoveKind::Crit)?,
            healing: convert(file.healing, MoveKind::Heal)?,
        };
        debug!("Loaded {} moves", pool.len());
        Ok(pool)
    }

    /// All moves concatenated: accurate, wide, crit, then heal
    pub fn all(&self) -> Vec<Move> {
        self.accurate
            .iter()
            .chain(&self.wide)
            .chain(&self.crit)
            .chain(&self.healing)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accurate.len() + self.wide.len() + self.crit.len() + self.healing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses `boss_moves.json`: boss name to its dedicated move pool
pub fn boss_moves_from_json(json: &str) -> Result<BTreeMap<String, Vec<Move>>, ResourceError> {
    const FILE: &str = "boss_moves.json";
    let file: BTreeMap<String, Vec<RawMove>> = serde_json::from_str(json)
        .map_err(|source| ResourceError::Json { name: FILE.to_string(), source })?;

    file.into_iter()
        .map(|(boss, raws)| {
            let moves = raws
                .into_iter()
                .map(|raw| raw.into_move(MoveKind::Wide, FILE))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((boss, moves))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_damage_rounds_multipliers() {
        let mut m = Move::ranged(MoveKind::Wide, "swing", 0.5, 1.5);
        m.set_damage(15);
        assert_eq!(m.min_damage, 8);
        assert_eq!(m.max_damage, 23);

        let mut c = Move::crit("smash", 1.2, 20);
        c.set_damage(10);
        assert_eq!((c.min_damage, c.max_damage), (12, 12));
    }

    #[test]
    fn test_resolved_values_at_least_one() {
        let mut m = Move::ranged(MoveKind::Accurate, "poke", 0.01, 0.02);
        m.set_damage(3);
        assert_eq!((m.min_damage, m.max_damage), (1, 1));

        let mut h = Move::ranged(MoveKind::Heal, "rest", 0.0, 0.0);
        h.set_heal(50);
        assert_eq!((h.min_heal, h.max_heal), (1, 1));
    }

    #[test]
    fn test_set_heal_uses_fractions() {
        let mut h = Move::ranged(MoveKind::Heal, "mend", 0.1, 0.25);
        h.set_heal(80);
        assert_eq!((h.min_heal, h.max_heal), (8, 20));
        assert_eq!(h.description(), "HEAL: 8-20");
    }

    #[test]
    fn test_parse_move_file() {
        let json = r#"{
            "accurate": [{ "type": 0, "name": "jab", "minDamage": 0.9, "maxDamage": 1.1 }],
            "wide": [{ "type": 1, "name": "flail", "minDamage": 0.2, "maxDamage": 2.0 }],
            "crit": [{ "name": "gamble", "damage": 1.0, "crit": 40 }],
            "healing": [{ "type": 3, "name": "nap", "minHeal": 0.1, "maxHeal": 0.2 }]
        }"#;
        let pool = MovePool::from_json(json).unwrap();
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.crit[0].kind, MoveKind::Crit);
        assert_eq!(pool.crit[0].crit_chance, 40);

        let all = pool.all();
        let kinds: Vec<MoveKind> = all.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MoveKind::Accurate, MoveKind::Wide, MoveKind::Crit, MoveKind::Heal]);
    }

    #[test]
    fn test_parse_boss_moves() {
        let json = r#"{ "slime": [
            { "type": 1, "name": "ooze", "minDamage": 0.5, "maxDamage": 1.5 },
            { "type": 3, "name": "absorb", "minHeal": 0.05, "maxHeal": 0.1 }
        ] }"#;
        let bosses = boss_moves_from_json(json).unwrap();
        let slime = &bosses["slime"];
        assert_eq!(slime.len(), 2);
        assert!(slime[1].is_heal());
    }

    #[test]
    fn test_unknown_move_type() {
        let json = r#"{ "slime": [ { "type": 9, "name": "??" } ] }"#;
        assert!(matches!(
            boss_moves_from_json(json),
            Err(ResourceError::UnknownMoveType { code: 9, .. })
        ));
    }
}

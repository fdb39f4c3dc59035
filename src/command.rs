//! Debug console commands
//!
//! Typed into the HUD console as `/name arg arg...`. Parsing only checks the
//! shape of a command and the ranges that don't depend on game state; map
//! bounds are checked when the command is applied by `Game::execute`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::battle::SpecialMove;
use crate::battle::special::{MAX_MOVES, NUM_SPECIAL_MOVES};
use crate::entity::EnemyKind;
use crate::inventory::InventoryError;
use crate::item::Rarity;
use crate::map::Weather;

#[derive(Debug, Clone, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("{command} takes {expected} argument(s), got {found}")]
    Arity { command: &'static str, expected: &'static str, found: usize },

    #[error("{command}: '{arg}' is not a valid value")]
    BadArgument { command: &'static str, arg: String },

    #[error("{command}: {value} is out of range ({range})")]
    OutOfRange { command: &'static str, value: i64, range: &'static str },

    #[error("Tile ({0}, {1}) is outside the map")]
    OutOfBounds(i32, i32),

    #[error("No item of that rarity could be added")]
    NoItem,

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("Command not available right now")]
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/heal`
    Heal,
    /// `/tp x y`
    Teleport { x: i32, y: i32 },
    /// `/sethp hp`
    SetHp(i32),
    /// `/setmaxhp hp`
    SetMaxHp(i32),
    /// `/randitem`
    RandomItem,
    /// `/item rarity`
    Item(Rarity),
    /// `/setweather id`
    SetWeather(Weather),
    /// `/addentity id x y`
    AddEntity { kind: EnemyKind, x: i32, y: i32 },
    /// `/removeentity x y`
    RemoveEntity { x: i32, y: i32 },
    /// `/togglenight bool`
    ToggleNight(bool),
    /// `/fillinv`
    FillInventory,
    /// `/clearinv`
    ClearInventory,
    /// `/fillrarity rarity`
    FillRarity(Rarity),
    /// `/levelup exp`
    LevelUp(i32),
    /// `/battle id`
    Battle(EnemyKind),
    /// `/setacc acc`
    SetAccuracy(i32),
    /// `/setsmovecd cd`
    SetSmoveCd(u32),
    /// `/addsmove id`
    AddSmove(SpecialMove),
    /// `/setsmoveset id...`
    SetSmoveset(Vec<SpecialMove>),
    /// `/clearsmoveset`
    ClearSmoveset,
    /// `/exit`
    Exit,
}

impl Command {
    /// Every command name with its usage, for the console help line
    pub const USAGE: [&'static str; 21] = [
        "/heal",
        "/tp x y",
        "/sethp hp",
        "/setmaxhp hp",
        "/randitem",
        "/item rarity",
        "/setweather id",
        "/addentity id x y",
        "/removeentity x y",
        "/togglenight bool",
        "/fillinv",
        "/clearinv",
        "/fillrarity rarity",
        "/levelup exp",
        "/battle id",
        "/setacc acc",
        "/setsmovecd cd",
        "/addsmove id",
        "/setsmoveset id...",
        "/clearsmoveset",
        "/exit",
    ];

    /// Parses a console line
    ///
    /// ```
    /// use unlucky::command::Command;
    /// use unlucky::map::Weather;
    ///
    /// assert_eq!(Command::parse(" /SetWeather 3 ").unwrap(), Command::SetWeather(Weather::Thunderstorm));
    /// assert!(Command::parse("/tp 1").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let mut parts = line.split(' ');
        let name = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();

        let cmd = match name.as_str() {
            "/heal" => {
                no_args("/heal", &args)?;
                Command::Heal
            }
            "/tp" => {
                arity("/tp", &args, 2, "2")?;
                Command::Teleport { x: number("/tp", args[0])?, y: number("/tp", args[1])? }
            }
            "/sethp" => {
                arity("/sethp", &args, 1, "1")?;
                Command::SetHp(number("/sethp", args[0])?)
            }
            "/setmaxhp" => {
                arity("/setmaxhp", &args, 1, "1")?;
                Command::SetMaxHp(number("/setmaxhp", args[0])?)
            }
            "/randitem" => {
                no_args("/randitem", &args)?;
                Command::RandomItem
            }
            "/item" => {
                arity("/item", &args, 1, "1")?;
                Command::Item(rarity("/item", args[0])?)
            }
            "/setweather" => {
                arity("/setweather", &args, 1, "1")?;
                let id = number("/setweather", args[0])?;
                let weather = Weather::from_id(id).ok_or(CommandError::OutOfRange {
                    command: "/setweather",
                    value: id as i64,
                    range: "0-5",
                })?;
                Command::SetWeather(weather)
            }
            "/addentity" => {
                arity("/addentity", &args, 3, "3")?;
                Command::AddEntity {
                    kind: enemy("/addentity", args[0])?,
                    x: number("/addentity", args[1])?,
                    y: number("/addentity", args[2])?,
                }
            }
            "/removeentity" => {
                arity("/removeentity", &args, 2, "2")?;
                Command::RemoveEntity { x: number("/removeentity", args[0])?, y: number("/removeentity", args[1])? }
            }
            "/togglenight" => {
                arity("/togglenight", &args, 1, "1")?;
                let on = match args[0].to_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(bad("/togglenight", args[0])),
                };
                Command::ToggleNight(on)
            }
            "/fillinv" => {
                no_args("/fillinv", &args)?;
                Command::FillInventory
            }
            "/clearinv" => {
                no_args("/clearinv", &args)?;
                Command::ClearInventory
            }
            "/fillrarity" => {
                arity("/fillrarity", &args, 1, "1")?;
                Command::FillRarity(rarity("/fillrarity", args[0])?)
            }
            "/levelup" => {
                arity("/levelup", &args, 1, "1")?;
                Command::LevelUp(non_negative("/levelup", args[0])?)
            }
            "/battle" => {
                arity("/battle", &args, 1, "1")?;
                Command::Battle(enemy("/battle", args[0])?)
            }
            "/setacc" => {
                arity("/setacc", &args, 1, "1")?;
                Command::SetAccuracy(non_negative("/setacc", args[0])?)
            }
            "/setsmovecd" => {
                arity("/setsmovecd", &args, 1, "1")?;
                Command::SetSmoveCd(non_negative("/setsmovecd", args[0])? as u32)
            }
            "/addsmove" => {
                arity("/addsmove", &args, 1, "1")?;
                Command::AddSmove(smove("/addsmove", args[0])?)
            }
            "/setsmoveset" => {
                if args.is_empty() || args.len() > MAX_MOVES {
                    return Err(CommandError::Arity { command: "/setsmoveset", expected: "1-5", found: args.len() });
                }
                let smoves = args.iter().map(|a| smove("/setsmoveset", a)).collect::<Result<Vec<_>, _>>()?;
                Command::SetSmoveset(smoves)
            }
            "/clearsmoveset" => {
                no_args("/clearsmoveset", &args)?;
                Command::ClearSmoveset
            }
            "/exit" => {
                no_args("/exit", &args)?;
                Command::Exit
            }
            _ => return Err(CommandError::Unknown(name)),
        };
        Ok(cmd)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Heal => write!(f, "/heal"),
            Command::Teleport { x, y } => write!(f, "/tp {x} {y}"),
            Command::SetHp(hp) => write!(f, "/sethp {hp}"),
            Command::SetMaxHp(hp) => write!(f, "/setmaxhp {hp}"),
            Command::RandomItem => write!(f, "/randitem"),
            Command::Item(r) => write!(f, "/item {}", r.index()),
            Command::SetWeather(w) => write!(f, "/setweather {}", *w as i32),
            Command::AddEntity { kind, x, y } => write!(f, "/addentity {} {x} {y}", kind.id()),
            Command::RemoveEntity { x, y } => write!(f, "/removeentity {x} {y}"),
            Command::ToggleNight(on) => write!(f, "/togglenight {on}"),
            Command::FillInventory => write!(f, "/fillinv"),
            Command::ClearInventory => write!(f, "/clearinv"),
            Command::FillRarity(r) => write!(f, "/fillrarity {}", r.index()),
            Command::LevelUp(exp) => write!(f, "/levelup {exp}"),
            Command::Battle(kind) => write!(f, "/battle {}", kind.id()),
            Command::SetAccuracy(acc) => write!(f, "/setacc {acc}"),
            Command::SetSmoveCd(cd) => write!(f, "/setsmovecd {cd}"),
            Command::AddSmove(s) => write!(f, "/addsmove {}", s.id()),
            Command::SetSmoveset(smoves) => {
                write!(f, "/setsmoveset")?;
                for s in smoves {
                    write!(f, " {}", s.id())?;
                }
                Ok(())
            }
            Command::ClearSmoveset => write!(f, "/clearsmoveset"),
            Command::Exit => write!(f, "/exit"),
        }
    }
}

// ==========================================================================
// Argument helpers
// ==========================================================================

fn arity(command: &'static str, args: &[&str], n: usize, expected: &'static str) -> Result<(), CommandError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(CommandError::Arity { command, expected, found: args.len() })
    }
}

fn no_args(command: &'static str, args: &[&str]) -> Result<(), CommandError> {
    arity(command, args, 0, "no")
}

fn bad(command: &'static str, arg: &str) -> CommandError {
    CommandError::BadArgument { command, arg: arg.to_string() }
}

fn number(command: &'static str, arg: &str) -> Result<i32, CommandError> {
    arg.parse().map_err(|_| bad(command, arg))
}

fn non_negative(command: &'static str, arg: &str) -> Result<i32, CommandError> {
    let n = number(command, arg)?;
    if n < 0 {
        return Err(CommandError::OutOfRange { command, value: n as i64, range: ">= 0" });
    }
    Ok(n)
}

fn rarity(command: &'static str, arg: &str) -> Result<Rarity, CommandError> {
    let n = number(command, arg)?;
    usize::try_from(n)
        .ok()
        .and_then(Rarity::from_index)
        .ok_or(CommandError::OutOfRange { command, value: n as i64, range: "0-3" })
}

fn enemy(command: &'static str, arg: &str) -> Result<EnemyKind, CommandError> {
    let n = number(command, arg)?;
    EnemyKind::from_id(n).ok_or(CommandError::OutOfRange { command, value: n as i64, range: "2-4" })
}

fn smove(command: &'static str, arg: &str) -> Result<SpecialMove, CommandError> {
    let n = number(command, arg)?;
    usize::try_from(n)
        .ok()
        .filter(|id| *id < NUM_SPECIAL_MOVES)
        .and_then(SpecialMove::from_id)
        .ok_or(CommandError::OutOfRange { command, value: n as i64, range: "0-7" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/heal").unwrap(), Command::Heal);
        assert_eq!(Command::parse("  /CLEARINV ").unwrap(), Command::ClearInventory);
        assert_eq!(Command::parse("/exit").unwrap(), Command::Exit);
        assert_eq!(Command::parse("/tp 3 4").unwrap(), Command::Teleport { x: 3, y: 4 });
        assert_eq!(Command::parse("/togglenight TRUE").unwrap(), Command::ToggleNight(true));
        assert_eq!(
            Command::parse("/addentity 4 1 2").unwrap(),
            Command::AddEntity { kind: EnemyKind::KingSlime, x: 1, y: 2 }
        );
        assert_eq!(Command::parse("/item 3").unwrap(), Command::Item(Rarity::Legendary));
    }

    #[test]
    fn test_arity_guards() {
        assert!(matches!(Command::parse("/tp 1"), Err(CommandError::Arity { found: 1, .. })));
        assert!(matches!(Command::parse("/heal now"), Err(CommandError::Arity { .. })));
        // double space gives an empty argument
        assert!(matches!(Command::parse("/tp 1  2"), Err(CommandError::Arity { .. })));
        assert!(matches!(Command::parse("/setsmoveset"), Err(CommandError::Arity { .. })));
        assert!(matches!(Command::parse("/setsmoveset 0 1 2 3 4 5"), Err(CommandError::Arity { .. })));
    }

    #[test]
    fn test_bad_numbers_and_ranges() {
        assert!(matches!(Command::parse("/sethp ten"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("/togglenight yes"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("/setweather 6"), Err(CommandError::OutOfRange { value: 6, .. })));
        assert!(matches!(Command::parse("/battle 1"), Err(CommandError::OutOfRange { .. })));
        assert!(matches!(Command::parse("/item 4"), Err(CommandError::OutOfRange { .. })));
        assert!(matches!(Command::parse("/setacc -1"), Err(CommandError::OutOfRange { .. })));
        assert!(matches!(Command::parse("/addsmove 8"), Err(CommandError::OutOfRange { .. })));
        assert!(matches!(Command::parse("/fly"), Err(CommandError::Unknown(_))));
        assert!(matches!(Command::parse("   "), Err(CommandError::Empty)));
    }

    #[test]
    fn test_smoveset_and_display() {
        let cmd = Command::parse("/setsmoveset 0 7 3").unwrap();
        assert_eq!(
            cmd,
            Command::SetSmoveset(vec![SpecialMove::Distract, SpecialMove::Shield, SpecialMove::Reflect])
        );
        assert_eq!(cmd.to_string(), "/setsmoveset 0 7 3");
        assert_eq!("/setsmovecd 0".parse::<Command>().unwrap(), Command::SetSmoveCd(0));
    }
}

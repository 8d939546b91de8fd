use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ChestId;
}

/// Grid coordinate: `y` is the row, `x` the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, delta: Delta) -> Self {
        Self { y: self.y + delta.dy, x: self.x + delta.dx }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    pub dy: i32,
    pub dx: i32,
}

impl Delta {
    pub const ZERO: Self = Self { dy: 0, dx: 0 };

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// True for the four orthogonal unit steps.
    pub fn is_unit(self) -> bool {
        self.dy.abs() + self.dx.abs() == 1
    }

    pub fn reversed(self) -> Self {
        Self { dy: -self.dy, dx: -self.dx }
    }

    pub fn scaled(self, factor: i32) -> Self {
        Self { dy: self.dy * factor, dx: self.dx * factor }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::West, Direction::East];

    pub fn delta(self) -> Delta {
        match self {
            Direction::North => Delta { dy: -1, dx: 0 },
            Direction::South => Delta { dy: 1, dx: 0 },
            Direction::West => Delta { dy: 0, dx: -1 },
            Direction::East => Delta { dy: 0, dx: 1 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Portal,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Portal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChestContents {
    Armor,
    Sword,
    Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChestReward {
    Armor,
    Sword,
    Money(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Exploring,
    LevelTransition,
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The target cell was blocked; nothing else happened this turn.
    Blocked,
    Moved,
    LevelAdvanced { level: u32 },
    Defeated,
}

/// One resolved player/enemy collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clash {
    SwordStrike { enemy: EnemyId, at: Pos },
    ArmorPush { enemy: EnemyId, from: Pos, to: Pos },
    ArmorFailed { enemy: EnemyId },
    Unarmored { enemy: EnemyId },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    pub clashes: Vec<Clash>,
    pub defeated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelStarted { level: u32, rows: usize, cols: usize },
    ChestOpened { reward: ChestReward, score: u32 },
    SwordUsed { at: Pos },
    EnemyPushed { from: Pos, to: Pos },
    PushFailed { hearts_full: u32, hearts_total: u32 },
    HeartLost { hearts_full: u32, hearts_total: u32 },
    Defeated { level: u32 },
    PortalReached { level: u32 },
    HeartsRefilled { restored: u32, score: u32 },
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEvent::LevelStarted { level, rows, cols } => {
                write!(f, "Level {level} ({rows}x{cols})")
            }
            LogEvent::ChestOpened { reward: ChestReward::Armor, .. } => {
                f.write_str("Chest: +1 Armor")
            }
            LogEvent::ChestOpened { reward: ChestReward::Sword, .. } => {
                f.write_str("Chest: +1 Sword")
            }
            LogEvent::ChestOpened { reward: ChestReward::Money(value), score } => {
                write!(f, "Chest: +{value} money (score {score})")
            }
            LogEvent::SwordUsed { .. } => f.write_str("Used a sword! Enemy eliminated!"),
            LogEvent::EnemyPushed { .. } => f.write_str("Armor used! Enemy pushed back!"),
            LogEvent::PushFailed { hearts_full, hearts_total } => {
                write!(f, "Armor used but push failed! Hearts: {hearts_full}/{hearts_total}")
            }
            LogEvent::HeartLost { hearts_full, hearts_total } => {
                write!(f, "Hit by enemy! Hearts: {hearts_full}/{hearts_total}")
            }
            LogEvent::Defeated { level } => write!(f, "Game over on level {level}"),
            LogEvent::PortalReached { level } => write!(f, "Level {level} complete!"),
            LogEvent::HeartsRefilled { restored, score } => {
                write!(f, "Refilled {restored} heart(s), score {score}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidDimensions { rows: usize, cols: usize },
    InvalidConfig(&'static str),
    SessionOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDimensions { rows, cols } => {
                write!(f, "map dimensions {rows}x{cols} are below the 3x3 minimum")
            }
            GameError::InvalidConfig(reason) => write!(f, "invalid game config: {reason}"),
            GameError::SessionOver => f.write_str("the session has ended in defeat"),
        }
    }
}

impl Error for GameError {}

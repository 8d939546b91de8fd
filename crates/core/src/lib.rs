pub mod config;
pub mod entities;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod rules;
pub mod state;
pub mod types;

pub use config::GameConfig;
pub use entities::{Chest, Enemy, Player};
pub use game::{Game, HudSnapshot};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use mapgen::{MapGenerator, generate_level};
pub use replay::*;
pub use state::{Grid, Map, Visibility};
pub use types::*;

//! Procedural level generation split into coherent submodules.

pub mod progression;

mod generator;
mod grid;
mod portal;
mod seed;
mod spawns;

use rand_chacha::rand_core::Rng;

use crate::config::GameConfig;
use crate::state::Map;
use crate::types::GameError;

pub use generator::MapGenerator;
pub(crate) use grid::reachability_from;
pub use grid::Reachability;
pub use progression::{level_estimate, map_dimensions_valid};
pub(crate) use seed::roll_bool;
pub use seed::{derive_level_seed, roll_below};

/// Generates a connected, populated level with the default tuning.
pub fn generate_level<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Map, GameError> {
    Ok(MapGenerator::new(rows, cols, &GameConfig::default())?.generate(rng))
}

//! Gameplay tuning shared by map generation and the session controller.

use serde::{Deserialize, Serialize};

use crate::types::GameError;

pub const MIN_MAP_SIZE: usize = 3;
/// Largest accepted fog-of-war radius; far beyond any generated map side.
pub const MAX_REVEAL_RADIUS: u32 = 1_024;
/// Largest accepted single chest payout.
pub const MAX_MONEY_VALUE: u32 = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fog-of-war disk radius revealed around the player.
    pub reveal_radius: u32,
    pub money_min: u32,
    pub money_max: u32,
    /// Score spent per heart when refilling at a portal.
    pub heart_cost: u32,
    pub starting_hearts: u32,
    /// Side of the first level; later levels grow with the level number.
    pub base_map_size: usize,
    /// Random terrain attempts before the carved-corridor fallback.
    pub generation_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reveal_radius: 3,
            money_min: 10,
            money_max: 50,
            heart_cost: 100,
            starting_hearts: 2,
            base_map_size: 15,
            generation_attempts: 8,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.money_min > self.money_max {
            return Err(GameError::InvalidConfig("money_min must not exceed money_max"));
        }
        if self.money_max > MAX_MONEY_VALUE {
            return Err(GameError::InvalidConfig("money_max must not exceed 1000000"));
        }
        if self.reveal_radius > MAX_REVEAL_RADIUS {
            return Err(GameError::InvalidConfig("reveal_radius must not exceed 1024"));
        }
        if self.heart_cost == 0 {
            return Err(GameError::InvalidConfig("heart_cost must be positive"));
        }
        if self.starting_hearts == 0 {
            return Err(GameError::InvalidConfig("starting_hearts must be positive"));
        }
        if self.base_map_size < MIN_MAP_SIZE {
            return Err(GameError::InvalidConfig("base_map_size must be at least 3"));
        }
        if self.generation_attempts == 0 {
            return Err(GameError::InvalidConfig("generation_attempts must be positive"));
        }
        Ok(())
    }

    /// Side length of the square map for a 1-based level number.
    ///
    /// The first level uses the base size; level `n > 1` uses `base + n`, so the
    /// level estimate derived from map size keeps growing with the level.
    pub fn map_size_for_level(&self, level: u32) -> usize {
        if level <= 1 { self.base_map_size } else { self.base_map_size + level as usize }
    }
}

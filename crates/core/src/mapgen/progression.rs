//! Difficulty scaling derived from map size.
//!
//! Callers grow the map with the level number, so `max(rows, cols)` doubles as a
//! level estimate. Every density and perception knob below keys off that estimate.

use crate::config::MIN_MAP_SIZE;

/// Map side that corresponds to level estimate zero.
pub const LEVEL_SIZE_BASELINE: usize = 15;

const BASE_FLOOR_PROBABILITY: f64 = 0.72;
const FLOOR_PROBABILITY_DECAY: f64 = 0.02;
const MIN_FLOOR_PROBABILITY: f64 = 0.50;

const PORTAL_BASE_DISTANCE: u32 = 8;

const BASE_ENEMY_COUNT: usize = 4;
const ENEMY_AREA_STEP: usize = 200;
const ENEMY_CAP_AREA_STEP: usize = 40;
const BASE_CHEST_COUNT: usize = 6;
const CHEST_AREA_STEP: usize = 250;
const CHEST_CAP_AREA_STEP: usize = 45;
const MIN_ENTITY_CAP: usize = 5;

const BASE_ENEMY_VISION: u32 = 5;
const MAX_ENEMY_VISION: u32 = 9;

pub fn map_dimensions_valid(rows: usize, cols: usize) -> bool {
    rows >= MIN_MAP_SIZE && cols >= MIN_MAP_SIZE
}

pub fn level_estimate(rows: usize, cols: usize) -> u32 {
    (rows.max(cols).saturating_sub(LEVEL_SIZE_BASELINE) as u32).max(1)
}

pub(super) fn floor_probability(level: u32) -> f64 {
    let decay = FLOOR_PROBABILITY_DECAY * f64::from(level.saturating_sub(1));
    (BASE_FLOOR_PROBABILITY - decay).max(MIN_FLOOR_PROBABILITY)
}

pub(super) fn portal_min_distance(level: u32, rows: usize, cols: usize) -> u32 {
    (PORTAL_BASE_DISTANCE + level).min(((rows + cols) / 2) as u32)
}

pub(super) fn enemy_count(level: u32, area: usize, free_cells: usize) -> usize {
    let wanted = BASE_ENEMY_COUNT + level as usize + area / ENEMY_AREA_STEP;
    let cap = MIN_ENTITY_CAP.max(area / ENEMY_CAP_AREA_STEP);
    wanted.min(cap).min(free_cells)
}

pub(super) fn chest_count(level: u32, area: usize, free_cells: usize) -> usize {
    let wanted = BASE_CHEST_COUNT + (level / 2) as usize + area / CHEST_AREA_STEP;
    let cap = MIN_ENTITY_CAP.max(area / CHEST_CAP_AREA_STEP);
    wanted.min(cap).min(free_cells)
}

pub(super) fn enemy_vision(level: u32) -> i32 {
    (BASE_ENEMY_VISION + level / 3).min(MAX_ENEMY_VISION) as i32
}

//! Enemy and chest placement on the reachable part of a finished layout.

use rand_chacha::rand_core::Rng;
use slotmap::SlotMap;

use crate::config::GameConfig;
use crate::entities::{Chest, Enemy};
use crate::state::Grid;
use crate::types::{ChestContents, ChestId, EnemyId, Pos};

use super::grid::Reachability;
use super::progression;
use super::seed::{roll_below, roll_inclusive};

const CHEST_CONTENTS: [ChestContents; 3] =
    [ChestContents::Armor, ChestContents::Sword, ChestContents::Money];

pub(super) struct SpawnContext<'a> {
    pub(super) grid: &'a Grid,
    pub(super) reachable: &'a Reachability,
    pub(super) spawn: Pos,
    pub(super) portal: Pos,
    pub(super) level: u32,
    pub(super) config: &'a GameConfig,
}

pub(super) struct Spawns {
    pub(super) enemies: SlotMap<EnemyId, Enemy>,
    pub(super) chests: SlotMap<ChestId, Chest>,
}

/// Enemies first, then chests, each drawn without replacement from the free
/// reachable cells (row-major pool, so a seeded draw is reproducible).
pub(super) fn place_entities<R: Rng>(context: &SpawnContext<'_>, rng: &mut R) -> Spawns {
    let mut free: Vec<Pos> = context
        .reachable
        .cells_row_major(context.grid)
        .into_iter()
        .filter(|&pos| pos != context.spawn && pos != context.portal)
        .collect();

    let area = context.grid.rows() * context.grid.cols();
    let enemy_total = progression::enemy_count(context.level, area, free.len());
    let chest_total =
        progression::chest_count(context.level, area, free.len().saturating_sub(enemy_total));
    let vision = progression::enemy_vision(context.level);

    let mut enemies = SlotMap::with_capacity_and_key(enemy_total);
    for _ in 0..enemy_total {
        let pos = free.swap_remove(roll_below(rng, free.len()));
        enemies.insert(Enemy::new(pos, vision));
    }

    let mut chests = SlotMap::with_capacity_and_key(chest_total);
    for _ in 0..chest_total {
        let pos = free.swap_remove(roll_below(rng, free.len()));
        chests.insert(roll_chest(pos, context.config, rng));
    }

    Spawns { enemies, chests }
}

fn roll_chest<R: Rng>(pos: Pos, config: &GameConfig, rng: &mut R) -> Chest {
    let contents = CHEST_CONTENTS[roll_below(rng, CHEST_CONTENTS.len())];
    let money_value = if contents == ChestContents::Money {
        roll_inclusive(rng, config.money_min, config.money_max)
    } else {
        0
    };
    Chest::new(pos, contents, money_value)
}

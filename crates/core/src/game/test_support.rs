//! Shared fixtures for the `game` test suites.

use super::*;
use crate::entities::{Chest, Enemy};

/// A level-one session on a hand-drawn map, with an empty log.
pub(super) fn game_on(map: Map) -> Game {
    Game {
        seed: 0,
        config: GameConfig::default(),
        level: 1,
        phase: SessionPhase::Exploring,
        map,
        portal_hint: String::new(),
        log: Vec::new(),
        turns: 0,
    }
}

pub(super) fn add_enemy(game: &mut Game, pos: Pos) -> EnemyId {
    game.map.enemies.insert(Enemy::new(pos, 5))
}

pub(super) fn add_chest(game: &mut Game, pos: Pos, contents: ChestContents, value: u32) -> ChestId {
    game.map.chests.insert(Chest::new(pos, contents, value))
}

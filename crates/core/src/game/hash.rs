//! Stable snapshot hashing for deterministic verification.
//! Replay and determinism checks compare these values across runs.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.level);
        hasher.write_u64(self.turns);
        hasher.write_u8(match self.phase {
            SessionPhase::Exploring => 0,
            SessionPhase::LevelTransition => 1,
            SessionPhase::Defeated => 2,
        });
        hasher.write(self.portal_hint.as_bytes());
        hasher.write(&self.map.canonical_bytes());

        let player = &self.map.player;
        hasher.write_i32(player.pos.y);
        hasher.write_i32(player.pos.x);
        for stat in [
            player.moves,
            player.hearts_total,
            player.hearts_full,
            player.armors,
            player.swords,
            player.score,
        ] {
            hasher.write_u32(stat);
        }
        for enemy in self.map.enemies.values() {
            hasher.write_u32(enemy.last_move_turn);
            hasher.write_i32(enemy.last_step.dy);
            hasher.write_i32(enemy.last_step.dx);
        }
        for revealed in self.map.visibility.as_slice() {
            hasher.write_u8(u8::from(*revealed));
        }
        hasher.finish()
    }
}

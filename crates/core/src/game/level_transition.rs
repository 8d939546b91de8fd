//! Level construction and the portal hand-off between levels.
//! Persistent player stats cross over here; everything else is rebuilt.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use super::*;
use crate::mapgen::{MapGenerator, derive_level_seed, roll_bool};

/// Generates the map for `level` from its own seeded stream and rolls the portal
/// hint from the same stream.
pub(super) fn build_level(
    seed: u64,
    config: &GameConfig,
    level: u32,
) -> Result<(Map, String), GameError> {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(seed, level));
    let size = config.map_size_for_level(level);
    let map = MapGenerator::new(size, size, config)?.generate(&mut rng);
    let hint = roll_portal_hint(map.portal, &mut rng);
    Ok((map, hint))
}

fn roll_portal_hint<R: Rng>(portal: Pos, rng: &mut R) -> String {
    if roll_bool(rng) { format!("({}, ?)", portal.y) } else { format!("(?, {})", portal.x) }
}

impl Game {
    /// Grants a heart container, refills from score, then installs the next level
    /// with the carried stats on its fresh player.
    pub(super) fn advance_level(&mut self) -> Result<(), GameError> {
        self.log.push(LogEvent::PortalReached { level: self.level });

        let mut carried = self.map.player.clone();
        carried.add_heart_slot();
        let restored = carried.refill_hearts(self.config.heart_cost);
        if restored > 0 {
            self.log.push(LogEvent::HeartsRefilled { restored, score: carried.score });
        }

        let next = self.level + 1;
        let (mut map, hint) = build_level(self.seed, &self.config, next)?;
        map.player.carry_stats_from(&carried);

        self.log.push(LogEvent::LevelStarted { level: next, rows: map.rows(), cols: map.cols() });
        self.map = map;
        self.portal_hint = hint;
        self.level = next;
        self.phase = SessionPhase::Exploring;
        Ok(())
    }
}

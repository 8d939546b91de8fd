//! Interaction rules between the player and the other occupants of a level.

use crate::state::Map;
use crate::types::*;

/// Cells an armour hit tries to shove the enemy.
pub const KNOCKBACK_CELLS: i32 = 2;

impl Map {
    /// Gives every enemy its chase step for the player's current move count.
    pub fn step_enemies(&mut self) -> usize {
        let current_move = self.player.moves;
        let mut moved = 0;
        for enemy in self.enemies.values_mut() {
            if enemy.step_toward_player(&self.player, &self.grid, current_move) {
                moved += 1;
            }
        }
        moved
    }

    /// Resolves every enemy sharing the player's cell, in enumeration order.
    /// A sword removes the enemy, armour tries a knockback (a heart is lost if the
    /// enemy cannot budge), and with neither the player loses a heart. Resolution
    /// stops as soon as the player runs out of hearts.
    pub fn resolve_combat(&mut self) -> CombatOutcome {
        let player_pos = self.player.pos;
        let colliding: Vec<EnemyId> = self
            .enemies
            .iter()
            .filter(|(_, enemy)| enemy.pos == player_pos)
            .map(|(id, _)| id)
            .collect();

        let mut outcome = CombatOutcome::default();
        for enemy in colliding {
            if self.player.swords > 0 {
                self.player.swords -= 1;
                self.enemies.remove(enemy);
                outcome.clashes.push(Clash::SwordStrike { enemy, at: player_pos });
                continue;
            }

            if self.player.armors > 0 {
                let Some(target) = self.enemies.get_mut(enemy) else {
                    continue;
                };
                self.player.armors -= 1;
                let from = target.pos;
                if target.knock_back(player_pos, &self.grid, KNOCKBACK_CELLS) {
                    outcome.clashes.push(Clash::ArmorPush { enemy, from, to: target.pos });
                    continue;
                }
                self.player.lose_heart();
                outcome.clashes.push(Clash::ArmorFailed { enemy });
            } else {
                self.player.lose_heart();
                outcome.clashes.push(Clash::Unarmored { enemy });
            }

            if self.player.is_defeated() {
                outcome.defeated = true;
                break;
            }
        }
        outcome
    }

    /// Opens the first unopened chest under the player, if any, and applies its reward.
    pub fn resolve_chest(&mut self) -> Option<ChestReward> {
        let id = self.unopened_chest_at(self.player.pos)?;
        let reward = self.chests.get_mut(id)?.open()?;
        self.player.apply_reward(reward);
        Some(reward)
    }

    pub fn reached_portal(&self) -> bool {
        self.player.pos == self.portal
    }
}

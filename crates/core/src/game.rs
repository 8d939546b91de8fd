mod hash;
mod hud;
mod level_transition;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

use crate::config::GameConfig;
use crate::state::Map;
use crate::types::*;

pub use hud::HudSnapshot;

/// Turn-driven session: owns the current level and the running event log.
pub struct Game {
    seed: u64,
    config: GameConfig,
    level: u32,
    phase: SessionPhase,
    map: Map,
    portal_hint: String,
    log: Vec<LogEvent>,
    turns: u64,
}

impl Game {
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let level = 1;
        let (map, portal_hint) = level_transition::build_level(seed, &config, level)?;
        let log = vec![LogEvent::LevelStarted { level, rows: map.rows(), cols: map.cols() }];
        Ok(Self {
            seed,
            config,
            level,
            phase: SessionPhase::Exploring,
            map,
            portal_hint,
            log,
            turns: 0,
        })
    }

    /// Runs one player turn: move, reveal, enemy steps, combat, chest, portal.
    /// A blocked move changes nothing at all.
    pub fn apply_move(&mut self, direction: Direction) -> Result<TurnOutcome, GameError> {
        if self.phase == SessionPhase::Defeated {
            return Err(GameError::SessionOver);
        }
        if !self.map.move_player(direction.delta()) {
            return Ok(TurnOutcome::Blocked);
        }
        self.turns += 1;

        let pos = self.map.player.pos;
        self.map.reveal_area(pos, self.config.reveal_radius);
        self.map.step_enemies();

        let hearts_before = self.map.player.hearts_full;
        let combat = self.map.resolve_combat();
        self.log_clashes(&combat, hearts_before);
        if combat.defeated {
            self.phase = SessionPhase::Defeated;
            self.log.push(LogEvent::Defeated { level: self.level });
            return Ok(TurnOutcome::Defeated);
        }

        if let Some(reward) = self.map.resolve_chest() {
            self.log.push(LogEvent::ChestOpened { reward, score: self.map.player.score });
        }

        if self.map.reached_portal() {
            self.phase = SessionPhase::LevelTransition;
            self.advance_level()?;
            return Ok(TurnOutcome::LevelAdvanced { level: self.level });
        }
        Ok(TurnOutcome::Moved)
    }

    fn log_clashes(&mut self, combat: &CombatOutcome, hearts_before: u32) {
        let hearts_total = self.map.player.hearts_total;
        let mut hearts_full = hearts_before;
        for clash in &combat.clashes {
            let event = match *clash {
                Clash::SwordStrike { at, .. } => LogEvent::SwordUsed { at },
                Clash::ArmorPush { from, to, .. } => LogEvent::EnemyPushed { from, to },
                Clash::ArmorFailed { .. } => {
                    hearts_full = hearts_full.saturating_sub(1);
                    LogEvent::PushFailed { hearts_full, hearts_total }
                }
                Clash::Unarmored { .. } => {
                    hearts_full = hearts_full.saturating_sub(1);
                    LogEvent::HeartLost { hearts_full, hearts_total }
                }
            };
            self.log.push(event);
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// One coordinate of the portal, the other masked with `?`.
    pub fn portal_hint(&self) -> &str {
        &self.portal_hint
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn latest_event(&self) -> Option<&LogEvent> {
        self.log.last()
    }

    /// Successful moves across the whole session.
    pub fn turns(&self) -> u64 {
        self.turns
    }
}

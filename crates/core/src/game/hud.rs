//! Read-only status view for renderers.

use std::fmt;

use super::*;

/// Everything a status bar shows for the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    pub level: u32,
    pub hearts_full: u32,
    pub hearts_total: u32,
    pub moves: u32,
    pub position: Pos,
    pub rows: usize,
    pub cols: usize,
    pub portal_hint: String,
    pub armors: u32,
    pub swords: u32,
    pub score: u32,
}

impl Game {
    pub fn hud(&self) -> HudSnapshot {
        let player = &self.map.player;
        HudSnapshot {
            level: self.level,
            hearts_full: player.hearts_full,
            hearts_total: player.hearts_total,
            moves: player.moves,
            position: player.pos,
            rows: self.map.rows(),
            cols: self.map.cols(),
            portal_hint: self.portal_hint.clone(),
            armors: player.armors,
            swords: player.swords,
            score: player.score,
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} | Hearts {}/{} | Moves {} | Pos ({}, {}) | Map {}x{} | Portal {} | Armor {} | Sword {} | Score {}",
            self.level,
            self.hearts_full,
            self.hearts_total,
            self.moves,
            self.position.y,
            self.position.x,
            self.rows,
            self.cols,
            self.portal_hint,
            self.armors,
            self.swords,
            self.score,
        )
    }
}

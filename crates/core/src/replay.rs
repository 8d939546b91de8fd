use std::error::Error;
use std::fmt;

use crate::game::Game;
use crate::journal::{InputJournal, InputPayload, JOURNAL_FORMAT_VERSION};
use crate::types::{GameError, SessionPhase};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    Game(GameError),
    UnexpectedFormat(u16),
}

impl From<GameError> for ReplayError {
    fn from(error: GameError) -> Self {
        ReplayError::Game(error)
    }
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Game(error) => write!(f, "replay failed: {error}"),
            ReplayError::UnexpectedFormat(version) => write!(
                f,
                "journal format version {version} is not supported (expected {JOURNAL_FORMAT_VERSION})"
            ),
        }
    }
}

impl Error for ReplayError {}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_level: u32,
    pub final_phase: SessionPhase,
    pub turns: u64,
    pub final_snapshot_hash: u64,
}

/// Rebuilds the session from the journal seed and config and feeds it every
/// recorded input. Inputs recorded after a defeat are ignored.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnexpectedFormat(journal.format_version));
    }
    let mut game = Game::new(journal.seed, journal.config.clone())?;

    for record in &journal.inputs {
        match record.payload {
            InputPayload::Move { direction } => match game.apply_move(direction) {
                Ok(_) => {}
                Err(GameError::SessionOver) => break,
                Err(error) => return Err(error.into()),
            },
        }
    }

    Ok(ReplayResult {
        final_level: game.level(),
        final_phase: game.phase(),
        turns: game.turns(),
        final_snapshot_hash: game.snapshot_hash(),
    })
}

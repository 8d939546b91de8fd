//! File helpers shared by the command-line harnesses.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use delve_core::{GameConfig, InputJournal};

/// Reads a JSON game config, or the defaults when no path is given. Missing fields
/// fall back to their default values.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?;
    config.validate().with_context(|| format!("Rejected config: {}", path.display()))?;
    Ok(config)
}

pub fn read_journal(path: &Path) -> Result<InputJournal> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    InputJournal::from_json(&text).context("Failed to deserialize journal JSON")
}

pub fn write_journal(path: &Path, journal: &InputJournal) -> Result<()> {
    let text = journal.to_json().context("Failed to serialize journal")?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write journal file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use delve_core::Direction;

    use super::*;

    #[test]
    fn no_path_means_default_config() {
        assert_eq!(load_config(None).expect("defaults"), GameConfig::default());
    }

    #[test]
    fn partial_config_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "reveal_radius": 5, "money_max": 80 }"#).expect("write");

        let config = load_config(Some(&path)).expect("valid config");
        assert_eq!(config.reveal_radius, 5);
        assert_eq!(config.money_max, 80);
        assert_eq!(config.heart_cost, 100);
    }

    #[test]
    fn invalid_config_file_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "money_min": 90, "money_max": 10 }"#).expect("write");

        let err = load_config(Some(&path)).expect_err("inverted money range");
        assert!(format!("{err:#}").contains("money_min"));
    }

    #[test]
    fn missing_config_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");
        let err = load_config(Some(&path)).expect_err("file does not exist");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn journal_files_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("journal.json");
        let mut journal = InputJournal::new(11, GameConfig::default());
        journal.append_move(Direction::South, 0);
        journal.append_move(Direction::East, 1);

        write_journal(&path, &journal).expect("write");
        assert_eq!(read_journal(&path).expect("read"), journal);
    }
}

//! Last-used board parameters, persisted as JSON next to the stats log.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSettings {
    pub width: u16,
    pub height: u16,
    pub mines: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        // Classic beginner board.
        Self {
            width: 9,
            height: 9,
            mines: 10,
        }
    }
}

/// Missing or unreadable settings fall back to the defaults.
pub fn load(path: &Path) -> BoardSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring corrupt settings file {}: {err}", path.display());
                BoardSettings::default()
            }
        },
        Err(_) => BoardSettings::default(),
    }
}

pub fn save(path: &Path, settings: &BoardSettings) -> Result<()> {
    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write settings file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("minefield-settings-does-not-exist.json");
        assert_eq!(load(&path), BoardSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "minefield-settings-test-{}.json",
            std::process::id()
        ));
        let settings = BoardSettings {
            width: 30,
            height: 16,
            mines: 99,
        };

        save(&path, &settings).unwrap();
        assert_eq!(load(&path), settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "minefield-settings-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(load(&path), BoardSettings::default());

        let _ = std::fs::remove_file(&path);
    }
}

//! This module provides a local store for user preferences
//!
//! There is a single preference today: the display theme.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The display theme of the app
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// User preferences, stored in a local file
#[derive(Debug, PartialEq)]
pub struct Prefs {
    backing_file: PathBuf,
    data: PrefData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct PrefData {
    theme: Theme,
}

impl Prefs {
    /// Initialize preferences from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize preferences with the default contents
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: PrefData::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.data.theme
    }

    /// Changes the theme and stores it right away. Saves are best-effort: a failed write
    /// warns and keeps the in-memory value, it never errors the session
    pub fn set_theme(&mut self, theme: Theme) {
        self.data.theme = theme;
        self.save_to_file();
    }

    /// Store the current preferences to their backing file
    fn save_to_file(&self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
            return;
        };
    }
}

//! Colour-theme preference, persisted as a single key in a small JSON file.
//!
//! Read once at startup, written on every change.  A missing or unreadable
//! file is not an error: the default theme is used.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::style::Color;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const PREFS_FILE: &str = "prefs.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "theme-green")]
    Green,
    #[serde(rename = "theme-blue")]
    Blue,
    #[serde(rename = "theme-orange")]
    Orange,
    #[serde(rename = "theme-purple")]
    Purple,
    #[serde(rename = "theme-red")]
    Red,
    #[serde(rename = "theme-teal")]
    Teal,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Green,
        Theme::Blue,
        Theme::Orange,
        Theme::Purple,
        Theme::Red,
        Theme::Teal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Green => "Green",
            Theme::Blue => "Blue",
            Theme::Orange => "Orange",
            Theme::Purple => "Purple",
            Theme::Red => "Red",
            Theme::Teal => "Teal",
        }
    }

    /// Accent colour used for titles, borders and the snake body.
    pub fn accent(self) -> Color {
        match self {
            Theme::Green => Color::Rgb { r: 0x0f, g: 0x9d, b: 0x58 },
            Theme::Blue => Color::Rgb { r: 0x42, g: 0x85, b: 0xf4 },
            Theme::Orange => Color::Rgb { r: 0xff, g: 0x98, b: 0x00 },
            Theme::Purple => Color::Rgb { r: 0x9c, g: 0x27, b: 0xb0 },
            Theme::Red => Color::Rgb { r: 0xdb, g: 0x44, b: 0x37 },
            Theme::Teal => Color::Rgb { r: 0x00, g: 0x96, b: 0x88 },
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Theme {
        let i = Theme::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Theme::ALL[(i + 1) % Theme::ALL.len()]
    }
}

/// On-disk shape: `{ "app-theme": "theme-green" }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(rename = "app-theme", default)]
    theme: Theme,
}

/// Where the preference lives.
#[derive(Clone, Debug)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(PREFS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Theme {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Theme::default();
        };
        match serde_json::from_str::<PrefsFile>(&raw) {
            Ok(prefs) => prefs.theme,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable preferences");
                Theme::default()
            }
        }
    }

    /// Write through a temp file so a crash never leaves half a file behind.
    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let data = serde_json::to_vec_pretty(&PrefsFile { theme })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        info!(theme = theme.name(), "theme saved");
        Ok(())
    }
}

/// Platform data directory for prefs and logs.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "portfolio", "neon_arcade")
        .context("could not resolve a data directory")?;
    Ok(dirs.data_local_dir().to_path_buf())
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::theme::Variant;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub system: SystemConfig,
    pub window: WindowConfig,
    pub theme: ThemeConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub fps_limit: u32,
    pub antialiasing: u32,
    pub font: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub variant: Variant,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub foreground: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub questions: Option<PathBuf>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            log_level: "info".to_owned(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1200,
            height: 700,
            fps_limit: 60,
            antialiasing: 8,
            font: "font.ttf".to_owned(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    fn from_toml(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::Toml {
            path: path.to_owned(),
            source,
        })
    }

    /// Reads the config at `path`, or at the default location when none is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_file(path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH)))
    }
}

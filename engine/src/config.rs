use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use mindsweep_types::ui::UiOptions;

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

fn default_languages() -> Vec<String> {
    vec!["en-US".to_string(), "zh-CN".to_string()]
}

#[derive(Debug, Default, Deserialize)]
pub struct MindsweepConfig {
    pub app: Option<AppConfig>,
    pub speech: Option<SpeechConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and badges.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable motion effects (pops, twinkles, spinner).
    #[serde(default)]
    pub reduced_motion: bool,
    /// Show the welcome overlay on startup.
    #[serde(default = "default_true")]
    pub welcome: bool,
}

#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    /// External speech-to-text command; absent means the capability is
    /// unavailable and the mic stays disabled for the session.
    pub command: Option<String>,
    /// Recognition languages passed to the command.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: None,
            languages: default_languages(),
        }
    }
}

impl MindsweepConfig {
    /// `~/.mindsweep/config.toml`, or `MINDSWEEP_CONFIG` when set.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = env::var("MINDSWEEP_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".mindsweep").join("config.toml"))
    }

    /// Load the config file if one exists. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|app| app.ascii_only),
            high_contrast: app.is_some_and(|app| app.high_contrast),
            reduced_motion: app.is_some_and(|app| app.reduced_motion),
        }
    }

    #[must_use]
    pub fn welcome_enabled(&self) -> bool {
        self.app.as_ref().is_none_or(|app| app.welcome)
    }

    #[must_use]
    pub fn speech(&self) -> SpeechConfig {
        match &self.speech {
            Some(speech) => SpeechConfig {
                command: speech.command.clone(),
                languages: speech.languages.clone(),
            },
            None => SpeechConfig::default(),
        }
    }
}

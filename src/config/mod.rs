//! User settings and on-disk locations.
//!
//! Everything ted persists lives under one per-user directory
//! (`~/.ted` unless `TED_HOME` is set): the settings file, the history
//! database and the log files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Models offered by the settings editor, default first.
pub const AVAILABLE_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-2.5-pro-preview-05-06",
    "gemini-2.5-flash-preview-05-20",
];

const HOME_ENV: &str = "TED_HOME";
const API_KEY_ENVS: &[&str] = &["TED_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Well-known files under the ted home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TedPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub history_file: PathBuf,
    pub log_dir: PathBuf,
}

impl TedPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join("config.json"),
            history_file: root.join("history.db"),
            log_dir: root.join("logs"),
            root,
        }
    }

    /// `$TED_HOME`, or `~/.ted`.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(root));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(".ted")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Read the settings file, writing a default one if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let settings = Settings::default();
            settings.save(path)?;
            debug!("Wrote default settings to {}", path.display());
            return Ok(settings);
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings.normalized())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomic(path, &data)
    }

    /// Apply API key overrides using `getter` to look up environment variables.
    pub fn with_env_overrides(mut self, mut getter: impl FnMut(&str) -> Option<String>) -> Self {
        if let Some(key) = API_KEY_ENVS
            .iter()
            .find_map(|name| getter(name).filter(|v| !v.trim().is_empty()))
        {
            self.api_key = Some(key);
        }
        self
    }

    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn normalized(mut self) -> Self {
        if self.model.trim().is_empty() {
            self.model = DEFAULT_MODEL.to_string();
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            self.temperature = DEFAULT_TEMPERATURE;
        }
        let base = self.base_url.trim().trim_end_matches('/');
        self.base_url = if base.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base.to_string()
        };
        self
    }
}

/// Map a 1-based menu choice to a model name.
pub fn parse_model_choice(input: &str) -> Option<&'static str> {
    let n: usize = input.trim().parse().ok()?;
    n.checked_sub(1).and_then(|i| AVAILABLE_MODELS.get(i)).copied()
}

pub fn parse_temperature(input: &str) -> Option<f32> {
    let t: f32 = input.trim().parse().ok()?;
    (0.0..=1.0).contains(&t).then_some(t)
}

fn ensure_parent_dir(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    ensure_parent_dir(path)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).map_err(|source| ConfigError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

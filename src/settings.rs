//! Game settings and preferences
//!
//! Loaded from an optional JSON file, then overridden by command line flags.
//! Missing fields fall back to their defaults, so a settings file only needs
//! the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{flag} expects a value")]
    MissingValue { flag: String },
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown option: {0}")]
    UnknownFlag(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the first session; later sessions use seed + n.
    /// Unset: seeded from the system time
    pub seed: Option<u64>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    pub muted: bool,
    /// Ring the terminal bell on hits and points
    pub bell: bool,

    // === Run mode ===
    /// No terminal: autopilot input, frames written to stdout as JSON lines
    pub headless: bool,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Sprite manifest overriding the classic sprite sizes
    pub assets: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            // HUD
            show_fps: false,

            // Audio
            muted: false,
            bell: false,

            // Run mode
            headless: false,
            max_ticks: None,
            assets: None,
        }
    }
}

pub const USAGE: &str = "\
Usage: flappy [options]

Options:
  --settings PATH  Load settings from a JSON file
  --seed N         Seed for the obstacle generator
  --assets PATH    Sprite size manifest (JSON)
  --headless       Autopilot, print frames as JSON lines
  --ticks N        Stop after N ticks
  --mute           Disable sound
  --bell           Ring the terminal bell on hits and points
  --fps            Show frame rate
  --help           Show this help message";

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Build settings from command line arguments (program name excluded).
    /// `--settings` is applied first wherever it appears; the other flags
    /// override it.
    pub fn from_args(args: &[String]) -> Result<Self, SettingsError> {
        let mut settings = match args.iter().position(|a| a == "--settings") {
            Some(i) => {
                let path = args.get(i + 1).ok_or_else(|| missing("--settings"))?;
                Self::load(Path::new(path))?
            }
            None => Self::default(),
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--settings" => {
                    iter.next();
                }
                "--seed" => settings.seed = Some(parse_value(arg, iter.next())?),
                "--ticks" => settings.max_ticks = Some(parse_value(arg, iter.next())?),
                "--assets" => {
                    let path = iter.next().ok_or_else(|| missing(arg))?;
                    settings.assets = Some(PathBuf::from(path));
                }
                "--headless" => settings.headless = true,
                "--mute" => settings.muted = true,
                "--bell" => settings.bell = true,
                "--fps" => settings.show_fps = true,
                other => return Err(SettingsError::UnknownFlag(other.to_string())),
            }
        }
        Ok(settings)
    }

    /// Seed for the `index`th session of this run
    pub fn session_seed(&self, index: u64, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback).wrapping_add(index)
    }
}

fn missing(flag: &str) -> SettingsError {
    SettingsError::MissingValue {
        flag: flag.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, SettingsError> {
    let value = value.ok_or_else(|| missing(flag))?;
    value.parse().map_err(|_| SettingsError::InvalidValue {
        flag: flag.to_string(),
        value: value.clone(),
    })
}

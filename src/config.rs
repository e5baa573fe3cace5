use crate::error::{Result, SubshiftError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Subtitle container format, selected once at the boundary from the filename
/// extension and never re-inferred from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Ass,
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleFormat::Srt => write!(f, "srt"),
            SubtitleFormat::Ass => write!(f, "ass"),
        }
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(SubtitleFormat::Srt),
            "ass" => Ok(SubtitleFormat::Ass),
            _ => Err(format!("Unknown format: {}. Use 'srt' or 'ass'", s)),
        }
    }
}

impl SubtitleFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Ass => "ass",
        }
    }

    /// Derive the format from a file's extension. Returns `None` for anything
    /// other than `.srt`/`.ass`; callers reject those files before parsing.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        ext.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub media_root: Option<PathBuf>,
    pub access_token: Option<String>,
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media_root: None,
            access_token: None,
            concurrency: 4,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                config = toml::from_str(&contents).map_err(|e| {
                    SubshiftError::Config(format!(
                        "Failed to parse {}: {}",
                        config_path.display(),
                        e
                    ))
                })?;
            }
        }

        // Override with environment variables
        if let Ok(root) = std::env::var("SUBSHIFT_MEDIA_ROOT") {
            config.media_root = Some(PathBuf::from(root));
        }
        if let Ok(token) = std::env::var("SUBSHIFT_ACCESS_TOKEN") {
            config.access_token = Some(token);
        }
        if let Ok(concurrency) = std::env::var("SUBSHIFT_CONCURRENCY") {
            if let Ok(c) = concurrency.parse() {
                config.concurrency = c;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(SubshiftError::Config(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        if let Some(ref root) = self.media_root {
            if !root.is_dir() {
                return Err(SubshiftError::Config(format!(
                    "Media root is not a directory: {}",
                    root.display()
                )));
            }
        }

        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subshift").join("config.toml"))
    }
}

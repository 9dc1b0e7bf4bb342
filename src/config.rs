use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::tempo::TempoParams;

pub const LOCAL_CONFIG: &str = "tempotag.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tempo: TempoParams,
    #[serde(default)]
    pub decode: DecodeConfig,
}

#[derive(Debug, Deserialize)]
pub struct DecodeConfig {
    /// Only the first `max_seconds` of each track are analyzed
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_seconds: default_max_seconds(),
        }
    }
}

pub fn default_max_seconds() -> f32 { 60.0 }

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).context("Invalid config file")
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse_config(&content)
}

/// First existing config among `./tempotag.toml`, `~/.config/tempotag/config.toml`
/// and the platform config directory.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("tempotag").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("tempotag").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.tempo, TempoParams::default());
        assert_eq!(cfg.decode.max_seconds, 60.0);
    }

    #[test]
    fn sections_override_fields() {
        let cfg = parse_config(
            r#"
            [tempo]
            spike_ratio = 1.8
            bucket_width = 4

            [decode]
            max_seconds = 30.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tempo.spike_ratio, 1.8);
        assert_eq!(cfg.tempo.bucket_width, 4);
        assert_eq!(cfg.tempo.lookback_windows, 43);
        assert_eq!(cfg.decode.max_seconds, 30.0);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("[tempo]\nspike_ratio = \"loud\"").is_err());
        assert!(load_config(Path::new("/nonexistent/tempotag.toml")).is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the exported PDF is written into; empty means auto
    /// (~/Downloads when present, else the home directory)
    #[serde(default)]
    pub output_dir: String,
    /// Settling delay before rasterization, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_delay_ms: u64,
}

fn default_settle_ms() -> u64 {
    800
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            settle_delay_ms: default_settle_ms(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".html2pdf-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// The tool runs fine without a config file; defaults apply
    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Resolved export target directory
    pub fn output_dir(&self) -> PathBuf {
        if !self.output_dir.is_empty() {
            return PathBuf::from(&self.output_dir);
        }
        if let Ok(home) = env::var("HOME") {
            let downloads = PathBuf::from(&home).join("Downloads");
            if downloads.is_dir() {
                return downloads;
            }
            return PathBuf::from(home);
        }
        env::temp_dir()
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_output_dir_wins() {
        let config = Config {
            output_dir: "/tmp/exports".to_string(),
            ..Config::default()
        };
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn default_settle_matches_capture_heuristic() {
        assert_eq!(Config::default().settle_delay(), Duration::from_millis(800));
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.weather.gov";
pub const DEFAULT_USER_AGENT: &str = "(nws-weather-cli, nws-weather@users.noreply.github.com)";
pub const DEFAULT_SEPARATOR_WIDTH: usize = 80;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_base_url = "https://api.weather.gov"
/// user_agent = "(my-weather-script, me@example.com)"
/// metric = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the NWS API, without trailing slash.
    pub api_base_url: String,

    /// Sent as `User-Agent` on every request; api.weather.gov requires one.
    pub user_agent: String,

    /// Report in °C and km/h unless overridden on the command line.
    pub metric: bool,

    /// Width of the forecast footer line when the terminal width is unknown.
    pub separator_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            metric: false,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit file. Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut cfg: Config = toml::from_str(contents)?;
        cfg.api_base_url = cfg.api_base_url.trim_end_matches('/').to_string();

        if cfg.user_agent.trim().is_empty() {
            return Err(anyhow!("`user_agent` must not be empty; api.weather.gov rejects anonymous requests"));
        }

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nws-weather", "nws-weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml_str("").expect("empty config must parse");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = Config::from_toml_str("metric = true\napi_base_url = \"http://localhost:8080/\"\n")
            .expect("config must parse");

        assert!(cfg.metric);
        assert_eq!(cfg.api_base_url, "http://localhost:8080");
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.separator_width, DEFAULT_SEPARATOR_WIDTH);
    }

    #[test]
    fn blank_user_agent_is_rejected() {
        let err = Config::from_toml_str("user_agent = \"  \"").unwrap_err();
        assert!(err.to_string().contains("user_agent"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load_from(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

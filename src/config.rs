use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, UsersError};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub endpoint: Option<String>,
    #[serde(default)]
    pub remote_writes: bool,
    pub timeout_secs: Option<u64>,
    pub state_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| UsersError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| UsersError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "users")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(UsersError::NoConfigDir)
    }

    /// Get the endpoint with env var taking precedence over config file
    pub fn endpoint(&self) -> Result<Url> {
        let raw = std::env::var("USERS_ENDPOINT")
            .ok()
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        parse_endpoint(&raw)
    }

    /// Get the state file path with env var taking precedence over config file
    pub fn state_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var("USERS_STATE_FILE") {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.state_file {
            return Ok(path.clone());
        }
        Self::config_path().map(|p| p.with_file_name("state.json"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| UsersError::InvalidEndpoint(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(UsersError::InvalidEndpoint(raw.to_string())),
    }
}

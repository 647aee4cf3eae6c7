use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::errors::WikiError;
use crate::types::Title;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_FRONT_PAGE: &str = "FrontPage";

/// Application configuration and constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub template_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub front_page: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            template_dir: PathBuf::from("templates"),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            front_page: DEFAULT_FRONT_PAGE.to_string(),
        }
    }

    /// Defaults overridden by `WIKI_*` environment variables
    pub fn from_env() -> Result<Self, WikiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `WIKI_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WikiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(dir) = lookup("WIKI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WIKI_TEMPLATE_DIR") {
            config.template_dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("WIKI_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("WIKI_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| WikiError::Config(format!("WIKI_PORT {:?}: {}", port, e)))?;
        }
        if let Some(front) = lookup("WIKI_FRONT_PAGE") {
            config.front_page = front;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), WikiError> {
        self.socket_addr()?;
        self.front_page_title()?;
        Ok(())
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| WikiError::Config(format!("WIKI_HOST {:?}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// The page `/` redirects to
    pub fn front_page_title(&self) -> Result<Title, WikiError> {
        Title::parse(&self.front_page).map_err(|_| {
            WikiError::Config(format!("WIKI_FRONT_PAGE {:?} is not a valid title", self.front_page))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration management for Zookeepr.
//!
//! This module provides configuration loading and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{Result, ZookeeprError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default data file name inside the data directory
pub const DATA_FILE_NAME: &str = "animals.json";

/// Main configuration structure for Zookeepr.
///
/// ## Example Configuration File (zookeepr.toml)
///
/// ```toml
/// [general]
/// log_level = "info"
///
/// [server]
/// host = "127.0.0.1"
/// port = 3001
///
/// [storage]
/// data_file = "./data/animals.json"
/// backup = true
///
/// [search]
/// parallel_search = true
/// parallel_threshold = 10000
///
/// [pages]
/// public_dir = "./public"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// HTTP listener
    pub server: ServerConfig,

    /// Backing data file
    pub storage: StorageConfig,

    /// Filtering performance
    pub search: SearchConfig,

    /// Static HTML pages
    pub pages: PagesConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data file location (None = default location)
    pub data_file: Option<PathBuf>,

    /// Keep the previous data file as `<file>.bak` on each save
    pub backup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_file: None,
            backup: true,
        }
    }
}

/// Filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Use parallel filtering for large stores
    pub parallel_search: bool,

    /// Store size above which filtering goes parallel
    pub parallel_threshold: usize,
}

impl SearchConfig {
    /// Whether a store of `len` animals should be filtered in parallel.
    pub fn use_parallel(&self, len: usize) -> bool {
        self.parallel_search && len > self.parallel_threshold
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            parallel_search: true,
            parallel_threshold: 10000,
        }
    }
}

/// Static page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Directory holding index.html, animals.html and zookeepers.html
    pub public_dir: PathBuf,
}

impl Default for PagesConfig {
    fn default() -> Self {
        PagesConfig {
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents).map_err(|e| ZookeeprError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
        })?;

        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("zookeepr.toml"))
    }

    /// Get the default data directory path.
    pub fn default_data_dir() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the data file (from config or default).
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.storage.data_file {
            Ok(path.clone())
        } else {
            Ok(Self::default_data_dir()?.join(DATA_FILE_NAME))
        }
    }

    /// Resolve the listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| ZookeeprError::ConfigError {
                reason: format!("Invalid host '{}': {}", self.server.host, e),
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "zookeepr").ok_or_else(|| ZookeeprError::ConfigError {
        reason: "Could not determine project directories".to_string(),
    })
}

//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\library-extender\config.toml
//! - macOS: ~/Library/Application Support/library-extender/config.toml
//! - Linux: ~/.config/library-extender/config.toml
//!
//! The config file is human-readable and editable. Settings are
//! loaded at startup and saved when changed (and on GUI shutdown).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::enrichment::http::HttpSettings;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where downloaded tracks go
    pub library: LibraryConfig,

    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// HTTP behaviour shared by every source client
    pub network: NetworkConfig,

    /// yt-dlp settings
    pub download: DownloadConfig,
}

/// Library location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Destination folder for tagged files
    pub location: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            location: default_library_location(),
        }
    }
}

/// `~/Music`, or `./Music` when there is no home directory.
pub fn default_library_location() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Music")
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Credentials {
    /// Musixmatch API key; lyrics skip Musixmatch without one
    pub musixmatch_api_key: Option<String>,
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Override the User-Agent sent to metadata services
    pub user_agent: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: None,
        }
    }
}

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownloadConfig {
    /// MP3 target bitrate in kbps
    pub bitrate_kbps: u32,

    /// yt-dlp executable name or path
    pub ytdlp_path: String,

    /// Number of search results requested
    pub search_limit: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            bitrate_kbps: 192,
            ytdlp_path: "yt-dlp".to_string(),
            search_limit: 10,
        }
    }
}

impl Config {
    /// HTTP settings for the source clients
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings::from(&self.network)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("library-extender"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to a specific file, atomically.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write to temp, then rename
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Save configuration asynchronously (for use in Iced tasks)
pub async fn save_async(config: Config) -> Result<(), ConfigError> {
    // Config save is quick, but we move to blocking thread to not block UI
    tokio::task::spawn_blocking(move || save(&config))
        .await
        .map_err(|e| ConfigError::TaskJoin(e.to_string()))?
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[library]"));
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[network]"));
        assert!(toml.contains("[download]"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.library.location.ends_with("Music"));
        assert_eq!(config.network.timeout_secs, 10);
        assert_eq!(config.download.bitrate_kbps, 192);
        assert_eq!(config.download.ytdlp_path, "yt-dlp");
        assert_eq!(config.download.search_limit, 10);
        assert!(config.credentials.musixmatch_api_key.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
musixmatch_api_key = "my-key"

[download]
bitrate_kbps = 320
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified fields are set
        assert_eq!(
            config.credentials.musixmatch_api_key,
            Some("my-key".to_string())
        );
        assert_eq!(config.download.bitrate_kbps, 320);

        // Other fields use defaults
        assert_eq!(config.download.ytdlp_path, "yt-dlp");
        assert_eq!(config.network.timeout_secs, 10);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.library.location = PathBuf::from("/srv/music");
        config.network.user_agent = Some("Test/1.0".to_string());

        save_to(&config, &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        assert_eq!(load_from(&path), config);
    }

    #[test]
    fn test_unparseable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        assert_eq!(load_from(&path), Config::default());
    }

    #[test]
    fn test_http_settings_from_config() {
        let mut config = Config::default();
        config.network.timeout_secs = 25;
        assert_eq!(config.http_settings().timeout.as_secs(), 25);
    }
}

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use service::{ServiceConfig, DEFAULT_UPLOAD_TICK};

pub const APP_NAME: &str = "skycloud";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log level, overridden by RUST_LOG
    pub log_level: String,
    /// Delay between simulated upload steps, in milliseconds
    pub upload_tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            upload_tick_ms: DEFAULT_UPLOAD_TICK.as_millis() as u64,
        }
    }
}

impl AppConfig {
    pub fn service_config(&self) -> Result<ServiceConfig, StateError> {
        let log_level = tracing::Level::from_str(&self.log_level)
            .map_err(|_| StateError::InvalidLogLevel(self.log_level.clone()))?;
        if self.upload_tick_ms == 0 {
            return Err(StateError::InvalidUploadTick);
        }

        Ok(ServiceConfig {
            upload_tick: Duration::from_millis(self.upload_tick_ms),
            log_level,
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the skycloud directory (~/.skycloud)
    pub app_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the default skycloud directory path (~/.skycloud)
    pub fn default_dir() -> Result<PathBuf, StateError> {
        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Write a fresh config into `app_dir`, creating the directory as needed
    pub fn init(app_dir: &Path, config: AppConfig) -> Result<Self, StateError> {
        let config_path = app_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        // refuse to write something we could not load back
        config.service_config()?;

        fs::create_dir_all(app_dir)?;
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            app_dir: app_dir.to_path_buf(),
            config_path,
            config,
        })
    }

    /// Load existing state from `app_dir`
    pub fn load(app_dir: &Path) -> Result<Self, StateError> {
        let config_path = app_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            app_dir: app_dir.to_path_buf(),
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("skycloud directory not initialized. Run 'skycloud init' first")]
    NotInitialized,

    #[error("skycloud directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("upload tick must be greater than zero")]
    InvalidUploadTick,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            log_level: "debug".to_string(),
            upload_tick_ms: 50,
        };

        let state = AppState::init(dir.path(), config.clone()).unwrap();
        assert!(state.config_path.exists());

        let loaded = AppState::load(dir.path()).unwrap();
        assert_eq!(loaded.config, config);

        let service = loaded.config.service_config().unwrap();
        assert_eq!(service.log_level, tracing::Level::DEBUG);
        assert_eq!(service.upload_tick, Duration::from_millis(50));
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        AppState::init(dir.path(), AppConfig::default()).unwrap();
        assert!(matches!(
            AppState::init(dir.path(), AppConfig::default()),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(&dir.path().join("nested")),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_bad_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AppState::init(dir.path(), config),
            Err(StateError::InvalidLogLevel(_))
        ));
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());

        let config = AppConfig {
            upload_tick_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.service_config(),
            Err(StateError::InvalidUploadTick)
        ));
    }

    #[test]
    fn test_config_file_is_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "log_level = \"info\"\nupload_tick_ms = 120\n",
        )
        .unwrap();

        let state = AppState::load(dir.path()).unwrap();
        assert_eq!(state.config.upload_tick_ms, 120);
    }
}

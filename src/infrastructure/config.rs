use crate::domain::{
    config::{BaseCmdConfig, ProjectConfig},
    error::{BaseCmdError, BaseCmdResult},
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".basecmd";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> BaseCmdResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Manager with explicit locations
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration from files
    pub fn load_config(&self) -> BaseCmdResult<BaseCmdConfig> {
        // Start with default configuration
        let mut config = BaseCmdConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        // Keys set in the project file win over global ones
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                let project_config: ProjectConfig = Self::read_toml(project_path)?;
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> BaseCmdResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| BaseCmdError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("basecmd").join(CONFIG_FILE_NAME))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> BaseCmdResult<BaseCmdConfig> {
        Self::read_toml(path)
    }

    fn read_toml<T: DeserializeOwned>(path: &Path) -> BaseCmdResult<T> {
        let content = fs::read_to_string(path).map_err(|e| BaseCmdError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| BaseCmdError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path, creating its directory
    pub fn save_config_to_path(&self, path: &Path, config: &BaseCmdConfig) -> BaseCmdResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BaseCmdError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| BaseCmdError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| BaseCmdError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration in `path/.basecmd/config.toml`
    pub fn init_project_config(&self, path: &Path) -> BaseCmdResult<PathBuf> {
        let config_file = path.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

        if config_file.exists() {
            return Err(BaseCmdError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        self.save_config_to_path(&config_file, &BaseCmdConfig::default())?;
        Ok(config_file)
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

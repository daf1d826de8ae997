use crate::core::history::{DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

pub const DEFAULT_PHOTO: &str =
    "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=400&h=400&fit=crop&crop=face";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_photo")]
    pub default_photo: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}
fn default_page_limit() -> u32 {
    20
}
fn default_photo() -> String {
    DEFAULT_PHOTO.to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

/// Keys every config file is expected to carry.
pub const CONFIG_KEYS: [&str; 5] = [
    "database",
    "retention_days",
    "page_limit",
    "default_photo",
    "separator_char",
];

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            retention_days: default_retention_days(),
            page_limit: default_page_limit(),
            default_photo: default_photo(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory (`~/.rattendance`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rattendance")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the rest of the program cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(AppError::Config(format!(
                "retention_days must be between 1 and {} (found {})",
                MAX_RETENTION_DAYS, self.retention_days
            )));
        }
        if self.page_limit == 0 {
            return Err(AppError::Config("page_limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Write this configuration to the standard config file.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        // Write config file
        if !is_test {
            Self::with_database(db_path.clone()).save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

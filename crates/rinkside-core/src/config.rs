// Configuration loading and validation (config/rinkside.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name, under both `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "rinkside.toml";

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "rinkside_core=info,rinkside_tui=info,warn";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub league: LeagueConfig,
    pub new_franchise: NewFranchiseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// Millions.
    pub cap_ceiling: f64,
    pub cap_floor: f64,
}

/// Settings for a franchise created from scratch.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFranchiseConfig {
    pub nhl_team: String,
    pub ahl_team: String,
    #[serde(default = "default_general_manager")]
    pub general_manager: String,
    pub start_season: u32,
    /// Optional roster sheet imported into a brand-new franchise.
    #[serde(default)]
    pub roster_csv: Option<String>,
}

fn default_general_manager() -> String {
    "Unnamed GM".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Save file location. When the `[storage]` section is absent the save
    /// goes to the platform data directory.
    pub save_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Config {
    /// Where the franchise is saved. Relative paths resolve against
    /// `base_dir`; absolute paths are used as given.
    pub fn save_path(&self, base_dir: &Path) -> PathBuf {
        match self.storage.save_path.as_deref() {
            Some(p) => {
                let path = Path::new(p);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    base_dir.join(path)
                }
            }
            None => default_data_dir(base_dir).join("franchise.json"),
        }
    }

    /// Starting roster sheet for a new franchise, resolved like the save path.
    pub fn roster_csv_path(&self, base_dir: &Path) -> Option<PathBuf> {
        let p = self.new_franchise.roster_csv.as_deref()?;
        let path = Path::new(p);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        })
    }
}

/// Platform data directory for rinkside, or `base_dir` when the platform
/// has none.
fn default_data_dir(base_dir: &Path) -> PathBuf {
    directories::ProjectDirs::from("", "", "rinkside")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| base_dir.to_path_buf())
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/rinkside.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `defaults/rinkside.toml` to `config/` unless a config already exists.
/// Returns whether a file was copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<bool, ConfigError> {
    let default_file = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if !default_file.exists() {
        if !target.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/{CONFIG_FILE} nor config/{CONFIG_FILE} found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(false);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            let content =
                std::fs::read(&default_file).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", default_file.display()),
                })?;
            std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Load config relative to the current working directory, copying the
/// defaults first if needed.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;
    if !league.cap_ceiling.is_finite() || league.cap_ceiling <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "league.cap_ceiling".into(),
            message: format!("must be > 0, got {}", league.cap_ceiling),
        });
    }
    if !(0.0..=league.cap_ceiling).contains(&league.cap_floor) {
        return Err(ConfigError::ValidationError {
            field: "league.cap_floor".into(),
            message: format!(
                "must be between 0 and cap_ceiling ({}), got {}",
                league.cap_ceiling, league.cap_floor
            ),
        });
    }

    let nf = &config.new_franchise;
    let names: &[(&str, &str)] = &[
        ("new_franchise.nhl_team", &nf.nhl_team),
        ("new_franchise.ahl_team", &nf.ahl_team),
    ];
    for (field, value) in names {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }
    if nf.nhl_team.trim() == nf.ahl_team.trim() {
        return Err(ConfigError::ValidationError {
            field: "new_franchise.ahl_team".into(),
            message: "must differ from nhl_team".into(),
        });
    }

    if config
        .storage
        .save_path
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "storage.save_path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

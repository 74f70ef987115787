use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::HouseholdConfig;

/// Name of the per-household directory
pub const ROOST_DIR: &str = ".roost";
/// Config file inside the household directory
pub const CONFIG_FILE: &str = "roost.toml";
/// Subdirectory holding one JSON document per persistence key
pub const DATA_DIR: &str = "data";

/// Error type for household config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("not a roost household: no .roost/ directory found")]
    NotAHousehold,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse roost.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid roost.toml: {0}")]
    Invalid(String),
}

/// Walk up from `start` looking for `.roost/roost.toml`.
/// Returns the directory that contains `.roost/`.
pub fn discover_household(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();
    loop {
        let roost_dir = current.join(ROOST_DIR);
        if roost_dir.is_dir() && roost_dir.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(ConfigError::NotAHousehold);
        }
    }
}

/// Read and validate `.roost/roost.toml`
pub fn read_config(roost_dir: &Path) -> Result<HouseholdConfig, ConfigError> {
    let config_path = roost_dir.join(CONFIG_FILE);
    let text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: HouseholdConfig = toml::from_str(&text)?;
    validate_config(&config)?;
    Ok(config)
}

/// Current user must be on the roster; roster ids and names must be unique.
pub fn validate_config(config: &HouseholdConfig) -> Result<(), ConfigError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for r in &config.roommates {
        if !ids.insert(r.id) {
            return Err(ConfigError::Invalid(format!("duplicate roommate id {}", r.id)));
        }
        // Expenses key on names, so a collision would merge two people's balances
        if !names.insert(r.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "duplicate roommate name \"{}\"",
                r.name
            )));
        }
    }
    let roster = config.roster();
    if !roster.contains_id(config.household.current_user) {
        return Err(ConfigError::Invalid(format!(
            "current_user {} is not on the roster",
            config.household.current_user
        )));
    }
    Ok(())
}

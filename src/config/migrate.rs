//! Config file upgrades: older files lack the keys added after 0.1.

use super::{CONFIG_KEYS, Config};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Keys from [`CONFIG_KEYS`] absent in the YAML file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)?;

    let Some(map) = yaml.as_mapping() else {
        return Ok(CONFIG_KEYS.to_vec());
    };

    Ok(CONFIG_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect())
}

/// Rewrite the config file with defaults for any missing key.
/// Returns true when the file changed.
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        info(format!("No config file at {}: nothing to migrate.", path.display()));
        return Ok(false);
    }

    let missing = missing_fields(path)?;
    if missing.is_empty() {
        return Ok(false);
    }

    // serde fills the gaps with defaults
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    fs::write(path, serde_yaml::to_string(&cfg)?)?;

    success(format!("Config migrated, added: {}", missing.join(", ")));
    Ok(true)
}

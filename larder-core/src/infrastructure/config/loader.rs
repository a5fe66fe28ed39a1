// larder-core/src/infrastructure/config/loader.rs

use serde::{Deserialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::recipe::MatchPolicy;
use crate::infrastructure::config::settings::AppConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

const CONFIG_CANDIDATES: [&str; 2] = ["larder.yaml", "larder_conf.yaml"];

// --- LOADER ---

#[instrument(skip(data_dir))]
pub fn load_app_config(data_dir: &Path) -> Result<AppConfig, InfrastructureError> {
    // 1. Discover the main file
    let config_path = find_main_config(data_dir)?;
    info!(path = ?config_path, "Loading larder configuration");

    // 2. Base YAML
    let mut config: AppConfig = load_fragment(&config_path)?;

    // 3. Satellite fragments (fail-secure: a corrupt fragment aborts)
    if let Some(config_folder) = config.config_paths.first() {
        let config_dir = data_dir.join(config_folder);
        if config_dir.exists() {
            load_satellite_configs(&mut config, &config_dir)?;
        }
    }

    // 4. Environment overrides (layering)
    // LARDER_DB_PATH=/tmp/test.duckdb larder match
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config.validate()?;
    Ok(config)
}

/// Same as `load_app_config`, but a missing file yields the defaults.
pub fn load_or_default(data_dir: &Path) -> Result<AppConfig, InfrastructureError> {
    match load_app_config(data_dir) {
        Err(InfrastructureError::ConfigNotFound(_)) => {
            let mut config = AppConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            Ok(config)
        }
        other => other,
    }
}

/// Writes a default `larder.yaml` unless one already exists.
pub fn write_default_config(data_dir: &Path) -> Result<PathBuf, InfrastructureError> {
    if let Ok(existing) = find_main_config(data_dir) {
        return Ok(existing);
    }
    fs::create_dir_all(data_dir)?;
    let path = data_dir.join(CONFIG_CANDIDATES[0]);
    let yaml = serde_yaml::to_string(&AppConfig::default())?;
    atomic_write(&path, yaml)?;
    Ok(path)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

// --- GENERIC LOGIC ---

/// Loads a typed configuration fragment from a YAML file.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)
}

fn load_satellite_configs(
    config: &mut AppConfig,
    config_dir: &Path,
) -> Result<(), InfrastructureError> {
    let matching_path = config_dir.join("matching.yml");
    if matching_path.exists() {
        #[derive(Deserialize)]
        struct MatchingWrapper {
            matching: MatchPolicy,
        }

        let wrapper: MatchingWrapper = load_fragment(&matching_path)?;
        config.matching.policy = wrapper.matching;
        info!("  🥕 Matching policy loaded");
    }

    Ok(())
}

fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("LARDER_DB_PATH") {
        info!(old = ?config.database, new = ?val, "Overriding database path via ENV");
        config.database = val;
    }
    if let Some(val) = lookup("LARDER_MAX_MISSING") {
        match val.parse::<usize>() {
            Ok(max) => {
                info!(old = config.matching.policy.max_missing, new = max, "Overriding max missing via ENV");
                config.matching.policy.max_missing = max;
            }
            Err(_) => warn!(value = ?val, "Ignoring invalid LARDER_MAX_MISSING"),
        }
    }
}

// gameplan-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["gameplan.yaml", "gameplan.yml"];

pub const ENV_CHUNK_SIZE: &str = "GAMEPLAN_CHUNK_SIZE";
pub const ENV_REPORT_LIMIT: &str = "GAMEPLAN_REPORT_LIMIT";

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Chargement YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config = parse_project_config(&content)?;

    // 3. Override via variables d'environnement (pattern 'Layering')
    // ex: GAMEPLAN_CHUNK_SIZE=50 gameplan validate ...
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    // 4. Les overrides passent aussi par la validation
    config.validate()?;
    Ok(config)
}

/// Same as [`load_project_config`], but a missing file yields the defaults
/// (still subject to env overrides). Broken files stay errors.
pub fn load_project_config_or_default(
    project_dir: &Path,
) -> Result<ProjectConfig, InfrastructureError> {
    match load_project_config(project_dir) {
        Err(InfrastructureError::ConfigNotFound(msg)) => {
            warn!(%msg, "No project configuration, using defaults");
            let mut config = ProjectConfig::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
            config.validate()?;
            Ok(config)
        }
        other => other,
    }
}

pub fn parse_project_config(content: &str) -> Result<ProjectConfig, InfrastructureError> {
    // An empty file is a valid (all-defaults) configuration
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    let config: ProjectConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
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

fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_CHUNK_SIZE) {
        let new = parse_env_usize(ENV_CHUNK_SIZE, &val)?;
        info!(old = config.validation.chunk_size, new, "Overriding chunk size via ENV");
        config.validation.chunk_size = new;
    }
    if let Some(val) = lookup(ENV_REPORT_LIMIT) {
        let new = parse_env_usize(ENV_REPORT_LIMIT, &val)?;
        info!(old = config.validation.report_limit, new, "Overriding report limit via ENV");
        config.validation.report_limit = new;
    }
    Ok(())
}

fn parse_env_usize(key: &str, raw: &str) -> Result<usize, InfrastructureError> {
    raw.trim().parse().map_err(|_| {
        InfrastructureError::ConfigError(format!("{} must be a positive integer, got '{}'", key, raw))
    })
}

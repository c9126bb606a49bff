use crate::filter::DEFAULT_SEARCH_COLUMN;
use crate::mission::BadgePolicy;
use crate::store::{validate_key, MISSIONS_KEY};
use crate::PanelError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct PanelConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub missions: MissionsConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct FilterConfig {
    /// Searchable column index (default: 4, the name column).
    pub column: Option<usize>,
    /// Cell separator for row input, a single character (default: tab).
    pub delimiter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MissionsConfig {
    #[serde(default)]
    pub badge_policy: BadgePolicy,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for MissionsConfig {
    fn default() -> Self {
        Self {
            badge_policy: BadgePolicy::default(),
            storage_key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    MISSIONS_KEY.into()
}

fn panel_home() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".panel")
}

pub fn default_store_dir() -> PathBuf {
    panel_home()
}

/// Load config from PANEL_CONFIG env var, ~/.panel/config.toml, or defaults.
pub fn load_config() -> Result<PanelConfig, PanelError> {
    let path = config_path();
    if path.exists() {
        load_config_from(&path)
    } else {
        Ok(PanelConfig::default())
    }
}

pub fn load_config_from(path: &Path) -> Result<PanelConfig, PanelError> {
    let content = std::fs::read_to_string(path)?;
    let config: PanelConfig = toml::from_str(&content)
        .map_err(|e| PanelError::Config(format!("{}: {e}", path.display())))?;
    validate_config(&config)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn config_path() -> PathBuf {
    match std::env::var("PANEL_CONFIG") {
        Ok(p) => PathBuf::from(p),
        Err(_) => panel_home().join("config.toml"),
    }
}

fn validate_config(config: &PanelConfig) -> Result<(), PanelError> {
    if let Some(d) = &config.filter.delimiter {
        parse_delimiter(d)?;
    }
    validate_key(&config.missions.storage_key)
}

pub fn parse_delimiter(s: &str) -> Result<char, PanelError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(PanelError::Config(format!(
            "delimiter must be a single character, got {s:?}"
        ))),
    }
}

/// CLI flag wins over config, config over the built-in default.
pub fn resolve_column(config: &PanelConfig, flag: Option<usize>) -> usize {
    flag.or(config.filter.column).unwrap_or(DEFAULT_SEARCH_COLUMN)
}

pub fn resolve_delimiter(config: &PanelConfig, flag: Option<&str>) -> Result<char, PanelError> {
    match flag.or(config.filter.delimiter.as_deref()) {
        Some(d) => parse_delimiter(d),
        None => Ok('\t'),
    }
}

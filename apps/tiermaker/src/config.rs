use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::domain::is_hex_color;
use tier_engine::{BoardDefaults, TierSeed};

pub const DEFAULT_CONFIG_FILE: &str = "tiermaker.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_filter: String,
    pub defaults: BoardDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            defaults: BoardDefaults::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    log_filter: Option<String>,
    new_tier_name: Option<String>,
    new_tier_color: Option<String>,
    tiers: Option<Vec<TierSeed>>,
}

/// Loads settings from the config file, then applies `APP__*` overrides.
///
/// An explicitly named file (flag or `TIERMAKER_CONFIG`) must exist; the
/// default `tiermaker.toml` is optional.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let env_path = std::env::var("TIERMAKER_CONFIG").ok().map(PathBuf::from);
    let named = explicit.map(Path::to_path_buf).or(env_path);

    let raw = match &named {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };

    let settings = parse_settings(raw.as_deref())?;
    let settings = apply_env_overrides(settings, |key| std::env::var(key).ok());
    validate(&settings)?;
    Ok(settings)
}

fn parse_settings(raw: Option<&str>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    let Some(raw) = raw else {
        return Ok(settings);
    };

    let file_cfg: FileConfig = toml::from_str(raw).context("failed to parse config file")?;
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.new_tier_name {
        settings.defaults.new_tier_name = v;
    }
    if let Some(v) = file_cfg.new_tier_color {
        settings.defaults.new_tier_color = v;
    }
    if let Some(tiers) = file_cfg.tiers {
        settings.defaults.tiers = tiers;
    }
    Ok(settings)
}

fn apply_env_overrides(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__NEW_TIER_NAME") {
        settings.defaults.new_tier_name = v;
    }
    if let Some(v) = lookup("APP__NEW_TIER_COLOR") {
        settings.defaults.new_tier_color = v;
    }
    settings
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    if !is_hex_color(&settings.defaults.new_tier_color) {
        bail!(
            "new_tier_color '{}' is not a #RRGGBB color",
            settings.defaults.new_tier_color
        );
    }
    for seed in &settings.defaults.tiers {
        if !is_hex_color(&seed.color) {
            bail!("tier '{}' has invalid color '{}'", seed.name, seed.color);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

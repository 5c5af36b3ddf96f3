use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::behavior::DEFAULT_PREVIEW_LIMIT;
use crate::poi::{DEFAULT_EXPECTATION_TTL, DEFAULT_SPAWN_MARGIN};

/// The config written to disk when none exists yet.
pub const DEFAULT_CONFIG: &str = include_str!("../../package-content/barrels_config.json5");

/// Errors that can occur while loading the plugin config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    /// The config file is not valid json5 or has wrongly typed fields.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Tunables for the barrel behaviours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Milliseconds a cancelled placement waits for its duplicates.
    pub expectation_ttl_ms: u64,
    /// Ticks between two expiry sweeps.
    pub sweep_interval_ticks: u32,
    /// Margin added around the barrel block when matching duplicate spawns.
    pub spawn_margin: f64,
    /// How many stacks the dropped barrel lists in its lore.
    pub preview_limit: usize,
    /// Filter directive for the plugin's logger.
    pub log_level: String,
}

impl PluginConfig {
    /// Loads the config at `path`, writing the default one first if the file
    /// does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::parse(&fs::read_to_string(path)?)?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG)?;
            log::info!("Wrote default config to {}", path.display());
            Self::default()
        };
        Ok(config)
    }

    /// Parses and validates a config from json5 source.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(source)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..=4.0).contains(&self.spawn_margin) {
            return Err("Spawn margin must be in range 0..4");
        }
        if self.expectation_ttl_ms == 0 {
            return Err("Expectation ttl must be greater than 0");
        }
        if self.sweep_interval_ticks == 0 {
            return Err("Sweep interval must be greater than 0");
        }
        if self.preview_limit == 0 {
            return Err("Preview limit must be greater than 0");
        }
        Ok(())
    }

    /// The expectation lifetime as a [`Duration`].
    #[must_use]
    pub fn expectation_ttl(&self) -> Duration {
        Duration::from_millis(self.expectation_ttl_ms)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            expectation_ttl_ms: DEFAULT_EXPECTATION_TTL.as_millis() as u64,
            sweep_interval_ticks: 20,
            spawn_margin: DEFAULT_SPAWN_MARGIN,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_default() {
        let parsed = PluginConfig::parse(DEFAULT_CONFIG).expect("default config parses");
        assert_eq!(parsed, PluginConfig::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = PluginConfig::parse("{ preview_limit: 3 }").expect("partial config parses");
        assert_eq!(parsed.preview_limit, 3);
        assert_eq!(parsed.expectation_ttl(), Duration::from_secs(1));
        assert_eq!(parsed.sweep_interval_ticks, 20);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for source in [
            "{ spawn_margin: -0.1 }",
            "{ spawn_margin: 4.5 }",
            "{ expectation_ttl_ms: 0 }",
            "{ sweep_interval_ticks: 0 }",
            "{ preview_limit: 0 }",
        ] {
            assert!(
                matches!(PluginConfig::parse(source), Err(ConfigError::Invalid(_))),
                "{source} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PluginConfig::parse("{ preview_limit: \"five\" }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = std::env::temp_dir().join(format!("barrels-config-{}", std::process::id()));
        let path = dir.join("barrels_config.json5");
        let _ = fs::remove_file(&path);

        let created = PluginConfig::load_or_create(&path).expect("config created");
        assert_eq!(created, PluginConfig::default());
        assert!(path.exists());

        fs::write(&path, "{ preview_limit: 9 }").expect("config written");
        let loaded = PluginConfig::load_or_create(&path).expect("config loaded");
        assert_eq!(loaded.preview_limit, 9);

        let _ = fs::remove_dir_all(&dir);
    }
}

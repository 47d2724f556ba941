use std::path::{Path, PathBuf};

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use serde::Serialize;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::roster::ConversionConfig;

/// Values supplied on the command line; unset fields leave lower layers alone
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_empty_lines: Option<bool>,
}

/// Layers built-in defaults, an optional TOML file and CLI overrides
pub struct ConfigService;

impl ConfigService {
    pub fn load(config_file: Option<&Path>, overrides: ConfigOverrides) -> Result<ConversionConfig> {
        let mut figment = Figment::from(Serialized::defaults(ConversionConfig::default()));

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(AppError::IoError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "Loading config file");
            figment = figment.merge(Toml::file(path));
        }

        let config: ConversionConfig = figment
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roster::MergePolicy;

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigService::load(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config, ConversionConfig::default());
    }

    #[test]
    fn test_file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(
            &path,
            "output_file = \"contacts.json\"\nmerge_policy = \"overwrite\"\ndefault_region = \"PT\"\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            default_region: Some("US".to_string()),
            ..Default::default()
        };
        let config = ConfigService::load(Some(&path), overrides).unwrap();

        assert_eq!(config.output_file, "contacts.json");
        assert_eq!(config.merge_policy, MergePolicy::Overwrite);
        assert_eq!(config.default_region, "US");
        assert_eq!(config.input_file, "input.csv");
    }

    #[test]
    fn test_missing_config_file() {
        let err = ConfigService::load(Some(Path::new("/nonexistent/roster.toml")), ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let overrides = ConfigOverrides {
            output_file: Some(String::new()),
            ..Default::default()
        };
        let err = ConfigService::load(None, overrides).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}

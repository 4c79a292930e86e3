use ksv_core::{OnDecodeError, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration for ksv
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub decode: DecodeConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Policy for values that are not valid base64 (empty, fail, keep)
    #[serde(default)]
    pub on_error: OnDecodeError,

    /// Move decoded values to stringData unless told otherwise
    #[serde(default)]
    pub string_data: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load config from `path`, or from the default location.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "ksv", "ksv") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.ksv/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.decode.on_error, OnDecodeError::EmptyString);
        assert!(!config.decode.string_data);
        assert_eq!(config.output.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains(r#"on_error = "empty""#));
        assert!(toml_str.contains(r#"format = "yaml""#));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.decode.on_error, config.decode.on_error);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[decode]
on_error = "keep"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.decode.on_error, OnDecodeError::KeepOriginal);
        assert!(!config.decode.string_data);
        assert_eq!(config.output.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let toml_str = "[decode]\non_error = \"ignore\"\n";
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.decode.on_error = OnDecodeError::Fail;
        config.decode.string_data = true;
        config.output.format = OutputFormat::Json;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.decode.on_error, OnDecodeError::Fail);
        assert!(loaded.decode.string_data);
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }
}

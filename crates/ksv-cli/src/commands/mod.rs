pub mod add;
pub mod completions;
pub mod config;
pub mod decode;
pub mod encode;

use anyhow::{Context, Result};
use ksv_config::Config;
use ksv_core::{OnDecodeError, OutputFormat};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::cli::{DecodeErrorPolicy, Format};

/// Effective options after merging command-line flags over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub on_error: OnDecodeError,
}

impl Settings {
    pub fn resolve(
        output: Option<Format>,
        on_decode_error: Option<DecodeErrorPolicy>,
        config: &Config,
    ) -> Self {
        Self {
            format: output.map(Into::into).unwrap_or(config.output.format),
            on_error: on_decode_error
                .map(Into::into)
                .unwrap_or(config.decode.on_error),
        }
    }
}

/// Read the whole manifest from `file`, or stdin when absent or "-"
pub fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    let input = match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?
        }
        _ => ksv_core::read_input(std::io::stdin().lock())?,
    };
    debug!("Read {} bytes of input", input.len());
    Ok(input)
}

/// Write a finished document to stdout
pub fn emit(document: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Json;
        config.decode.on_error = OnDecodeError::Fail;

        let settings = Settings::resolve(None, None, &config);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.on_error, OnDecodeError::Fail);

        let settings = Settings::resolve(
            Some(Format::Yaml),
            Some(DecodeErrorPolicy::Keep),
            &config,
        );
        assert_eq!(settings.format, OutputFormat::Yaml);
        assert_eq!(settings.on_error, OnDecodeError::KeepOriginal);
    }

    #[test]
    fn test_read_input_from_file() {
        let path = std::env::temp_dir().join(format!("ksv-input-{}.yaml", std::process::id()));
        std::fs::write(&path, "kind: Secret\n").unwrap();

        let input = read_input(Some(path.as_path())).unwrap();
        assert_eq!(input, b"kind: Secret\n");

        std::fs::remove_file(&path).unwrap();
        assert!(read_input(Some(path.as_path())).is_err());
    }
}

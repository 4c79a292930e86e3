//! Document codec: raw bytes in, YAML or JSON text out

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::secret::Secret;

/// Text format of an emitted document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Read a whole document from `reader`
pub fn read_input<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(Error::InputRead)?;
    Ok(buf)
}

/// Parse one Secret document. Blank input yields an empty Secret.
pub fn parse(input: &[u8]) -> Result<Secret> {
    if input.iter().all(u8::is_ascii_whitespace) {
        debug!("Input is blank, starting from an empty secret");
        return Ok(Secret::default());
    }

    serde_yaml::from_slice(input).map_err(Error::Parse)
}

pub fn to_yaml(secret: &Secret) -> Result<String> {
    serde_yaml::to_string(secret).map_err(|e| Error::Serialize(e.to_string()))
}

/// Serialize `secret` in the requested format
pub fn render(secret: &Secret, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => to_yaml(secret),
        OutputFormat::Json => {
            if secret.has_binary() {
                return Err(Error::Serialize(
                    "binary values can only be written as YAML".to_string(),
                ));
            }
            let mut json = serde_json::to_string_pretty(secret)
                .map_err(|e| Error::Serialize(e.to_string()))?;
            json.push('\n');
            Ok(json)
        }
    }
}

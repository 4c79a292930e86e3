//! Encode / decode / add-key transformations over a [`Secret`]

use std::mem;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::codec::{self, OutputFormat};
use crate::error::{AddKeyError, Error, Result};
use crate::secret::Secret;
use crate::value::SecretValue;

/// Standard alphabet with canonical padding; non-zero trailing bits are accepted.
const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// What to do with a `data` value that is not valid base64
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnDecodeError {
    /// Replace the value with an empty string and keep going
    #[default]
    #[serde(rename = "empty")]
    EmptyString,

    /// Abort the whole transformation
    #[serde(rename = "fail")]
    Fail,

    /// Leave the encoded value untouched in `data`
    #[serde(rename = "keep")]
    KeepOriginal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Move decoded entries from `data` into `stringData`
    pub move_to_plaintext: bool,
    pub on_error: OnDecodeError,
}

/// Base64-encode every value in `data`.
///
/// Whatever sits in `data` is treated as plaintext, so this is the inverse
/// of [`decode`] without the move option. `stringData` is not touched.
pub fn encode(mut secret: Secret) -> Secret {
    for (key, value) in secret.encoded_data.iter_mut() {
        debug!(key = %key, "Encoding value");
        *value = SecretValue::Text(STANDARD.encode(value.as_bytes()));
    }
    secret
}

/// Base64-decode every value in `data`, in place or into `stringData`.
///
/// Payloads that are not UTF-8 are kept as [`SecretValue::Binary`].
pub fn decode(mut secret: Secret, options: &DecodeOptions) -> Result<Secret> {
    let encoded = mem::take(&mut secret.encoded_data);

    for (key, value) in encoded {
        let decoded = match decode_value(&key, &value) {
            Ok(decoded) => decoded,
            Err(err) => match options.on_error {
                OnDecodeError::EmptyString => {
                    warn!("{}, using an empty value", err);
                    SecretValue::default()
                }
                OnDecodeError::Fail => return Err(err),
                OnDecodeError::KeepOriginal => {
                    warn!("{}, keeping the encoded value", err);
                    secret.encoded_data.insert(key, value);
                    continue;
                }
            },
        };

        if options.move_to_plaintext {
            debug!(key = %key, "Moving decoded value to stringData");
            if secret.plaintext_data.insert(key, decoded).is_some() {
                debug!("Overwrote an existing stringData entry");
            }
        } else {
            debug!(key = %key, "Decoding value in place");
            secret.encoded_data.insert(key, decoded);
        }
    }

    Ok(secret)
}

fn decode_value(key: &str, value: &SecretValue) -> Result<SecretValue> {
    let compact: Vec<u8> = value
        .as_bytes()
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\r' | b'\n'))
        .collect();

    DECODER
        .decode(compact)
        .map(SecretValue::from_bytes)
        .map_err(|source| Error::InvalidBase64 {
            key: key.to_string(),
            source,
        })
}

/// Parse a plaintext document, encode it and render the result
pub fn encode_document(input: &[u8], format: OutputFormat) -> Result<String> {
    let secret = codec::parse(input)?;
    codec::render(&encode(secret), format)
}

/// Parse an encoded document, decode it and render the result
pub fn decode_document(
    input: &[u8],
    options: &DecodeOptions,
    format: OutputFormat,
) -> Result<String> {
    let secret = decode(codec::parse(input)?, options)?;
    codec::render(&secret, format)
}

/// Insert `key: value` (plaintext) into an encoded document.
///
/// The document is decoded, mutated and written back out as YAML, then that
/// text goes through [`encode_document`] like any other input. An existing
/// key is overwritten. `KeepOriginal` acts as `Fail` here, since a value left
/// encoded would be encoded a second time.
pub fn add_key(
    input: &[u8],
    key: &str,
    value: &str,
    on_error: OnDecodeError,
    format: OutputFormat,
) -> Result<String> {
    let options = DecodeOptions {
        move_to_plaintext: false,
        on_error: match on_error {
            OnDecodeError::KeepOriginal => OnDecodeError::Fail,
            other => other,
        },
    };

    let mut secret = codec::parse(input)
        .and_then(|secret| decode(secret, &options))
        .map_err(|e| AddKeyError::CannotDecode(Box::new(e)))?;

    if secret
        .encoded_data
        .insert(key.to_string(), SecretValue::from(value))
        .is_some()
    {
        debug!(key, "Replacing existing key");
    }

    let plaintext =
        codec::to_yaml(&secret).map_err(|e| AddKeyError::CannotSerialize(Box::new(e)))?;

    let encoded = encode_document(plaintext.as_bytes(), format)
        .map_err(|e| AddKeyError::CannotEncode(Box::new(e)))?;

    Ok(encoded)
}

//! Error types for ksv-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read input: {0}")]
    InputRead(#[source] std::io::Error),

    #[error("Cannot parse secret document: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("Cannot serialize secret document: {0}")]
    Serialize(String),

    #[error("Value of key '{key}' is not valid base64: {source}")]
    InvalidBase64 {
        key: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error(transparent)]
    AddKey(#[from] AddKeyError),
}

/// Failure of one stage of [`crate::add_key`].
#[derive(Error, Debug)]
pub enum AddKeyError {
    #[error("Cannot decode secret: {0}")]
    CannotDecode(#[source] Box<Error>),

    #[error("Cannot serialize decoded secret: {0}")]
    CannotSerialize(#[source] Box<Error>),

    #[error("Cannot encode secret: {0}")]
    CannotEncode(#[source] Box<Error>),
}

//! Core transformations for ksv
//!
//! This crate contains:
//! - The Secret record (Kubernetes-style `v1/Secret` with `data` and `stringData`)
//! - Secret values, text or raw bytes (`!binary` in YAML)
//! - The document codec (YAML in, YAML or JSON out)
//! - The encode / decode / add-key transformations

pub mod codec;
pub mod error;
pub mod secret;
pub mod transform;
pub mod value;

pub use codec::{OutputFormat, parse, read_input, render, to_yaml};
pub use error::{AddKeyError, Error, Result};
pub use secret::Secret;
pub use transform::{
    DecodeOptions, OnDecodeError, add_key, decode, decode_document, encode, encode_document,
};
pub use value::SecretValue;

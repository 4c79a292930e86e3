use anyhow::Result;
use ksv_core::DecodeOptions;
use std::path::Path;

use super::{Settings, emit, read_input};

pub fn handle(file: Option<&Path>, string_data: bool, settings: &Settings) -> Result<()> {
    let options = DecodeOptions {
        move_to_plaintext: string_data,
        on_error: settings.on_error,
    };

    let input = read_input(file)?;
    let document = ksv_core::decode_document(&input, &options, settings.format)?;
    emit(&document)
}

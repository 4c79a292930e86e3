use anyhow::Result;
use std::path::Path;

use super::{Settings, emit, read_input};

pub fn handle(file: Option<&Path>, settings: &Settings) -> Result<()> {
    let input = read_input(file)?;
    let document = ksv_core::encode_document(&input, settings.format)?;
    emit(&document)
}

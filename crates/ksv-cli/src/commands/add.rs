use anyhow::Result;
use std::path::Path;
use tracing::info;

use super::{Settings, emit, read_input};

pub fn handle(file: Option<&Path>, key: &str, value: &str, settings: &Settings) -> Result<()> {
    let input = read_input(file)?;
    let document = ksv_core::add_key(&input, key, value, settings.on_error, settings.format)?;
    info!("Added key '{}'", key);
    emit(&document)
}

//! Named field selections stored in the configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;

use crate::{
    cli::TemplateCommand,
    config::{AppConfig, DEFAULT_CONFIG_FILE},
    data::CellValue,
    export::load_config,
    selection::FieldEntry,
    table,
};

pub fn execute(command: &TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::List { config } => list(config.as_ref()),
        TemplateCommand::Save {
            name,
            fields,
            config,
        } => {
            let path = config
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            save(&path, name, fields)
        }
    }
}

fn list(config: Option<&PathBuf>) -> Result<()> {
    let config = load_config(config, false)?;
    if config.templates.is_empty() {
        info!("No templates defined");
        return Ok(());
    }
    let rows = config
        .templates
        .iter()
        .map(|(name, entries)| {
            vec![
                CellValue::from(name.as_str()),
                CellValue::from(entries.iter().join(", ")),
            ]
        })
        .collect::<Vec<_>>();
    print!(
        "{}",
        table::render_rows(&["template".to_string(), "fields".to_string()], &rows)
    );
    Ok(())
}

/// Replaces (or adds) `name` and rewrites the whole configuration file.
pub fn save(path: &Path, name: &str, fields: &[FieldEntry]) -> Result<()> {
    let mut config = AppConfig::load_or_default(path)?;
    let replaced = config
        .templates
        .insert(name.to_string(), fields.to_vec())
        .is_some();
    config
        .save(path)
        .with_context(|| format!("Saving template '{name}'"))?;
    info!(
        "{} template '{}' with {} field(s) in {:?}",
        if replaced { "Replaced" } else { "Saved" },
        name,
        fields.len(),
        path
    );
    Ok(())
}

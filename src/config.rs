//! JSON configuration store.
//!
//! The file keeps the legacy layout (`is_select_all`, parallel
//! `selected_fields`/`displayed_fields` lists, `templates`, `save_folder_path`)
//! so existing configuration files keep working. The parallel lists are
//! turned into `(source, display)` pairs as soon as a selection is requested.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cli::HeaderStyle,
    document::{DEFAULT_TOOLTIP_ATTRIBUTE, HeaderMode},
    error::ExportError,
    selection::{FieldEntry, FieldSelection},
};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_select_all")]
    pub is_select_all: bool,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    #[serde(default)]
    pub displayed_fields: Vec<String>,
    #[serde(default)]
    pub templates: BTreeMap<String, Vec<FieldEntry>>,
    #[serde(default)]
    pub save_folder_path: String,
    #[serde(default)]
    pub header_mode: HeaderStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<usize>,
}

fn default_select_all() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            is_select_all: true,
            selected_fields: Vec::new(),
            displayed_fields: Vec::new(),
            templates: BTreeMap::new(),
            save_folder_path: String::new(),
            header_mode: HeaderStyle::default(),
            tooltip_attribute: None,
            min_rows: None,
        }
    }
}

/// What the export should contain, as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPlan {
    All,
    Fields(FieldSelection),
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => anyhow::Error::new(ExportError::InputMissing(path.into())),
            _ => anyhow::Error::new(err).context(format!("Opening config file {path:?}")),
        })?;
        let config = serde_json::from_str(&contents).map_err(|err| {
            ExportError::InputMalformed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })?;
        Ok(config)
    }

    /// Loads `path` when it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating config file {path:?}"))?;
        serde_json::to_writer_pretty(file, self).context("Writing config JSON")
    }

    pub fn header_mode(&self) -> HeaderMode {
        match self.header_mode {
            HeaderStyle::Simple => HeaderMode::Simple,
            HeaderStyle::Tooltip => HeaderMode::Tooltip {
                attribute: self
                    .tooltip_attribute
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TOOLTIP_ATTRIBUTE.to_string()),
            },
        }
    }

    pub fn save_folder(&self) -> Option<PathBuf> {
        let trimmed = self.save_folder_path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn selection(&self, template: Option<&str>) -> Result<SelectionPlan, ExportError> {
        if let Some(name) = template {
            let entries = self
                .templates
                .get(name)
                .ok_or_else(|| ExportError::UnknownTemplate(name.to_string()))?;
            return Ok(SelectionPlan::Fields(FieldSelection::from_entries(
                entries.clone(),
            )));
        }
        if self.is_select_all {
            Ok(SelectionPlan::All)
        } else {
            Ok(SelectionPlan::Fields(FieldSelection::from_parallel(
                &self.selected_fields,
                &self.displayed_fields,
            )))
        }
    }
}

//! Export, preview and field listing commands.
//!
//! Every command follows the same pipeline: load the configuration, read and
//! parse the document, extract header fields, resolve the field selection,
//! run the processing pass, then hand the result to a renderer.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{info, warn};

use crate::{
    assemble::{ResultTable, build_table},
    cli::{DocumentArgs, ExportArgs, FieldsArgs, HeaderStyle, PreviewArgs, SelectionArgs},
    config::{AppConfig, DEFAULT_CONFIG_FILE, SelectionPlan},
    data::CellValue,
    document::{DEFAULT_TOOLTIP_ATTRIBUTE, HeaderMode, ParsedDocument},
    error::ExportError,
    io_utils::{self, InputSource},
    selection::{ColumnIndexMap, FieldSelection},
    table,
    xlsx::{self, SheetPlan},
};

pub fn execute(args: &ExportArgs) -> Result<()> {
    let config = load_config(args.document.config.as_ref(), args.selection.is_explicit())?;
    let table = assemble(&args.document, &args.selection, &config)?;

    let min_rows = args.min_rows.or(config.min_rows);
    let folder = args.save_folder.clone().or_else(|| config.save_folder());
    if let Some(folder) = folder.as_deref().filter(|f| !f.exists()) {
        fs::create_dir_all(folder)
            .with_context(|| format!("Creating save folder {folder:?}"))?;
    }
    let path = io_utils::resolve_output_path(folder.as_deref(), args.output.as_deref());
    let plan = SheetPlan::new(&table, min_rows);
    xlsx::write_workbook(&plan, &path)?;
    info!("Spreadsheet saved to {:?}", path);
    Ok(())
}

pub fn preview(args: &PreviewArgs) -> Result<()> {
    let config = load_config(args.document.config.as_ref(), args.selection.is_explicit())?;
    let table = assemble(&args.document, &args.selection, &config)?;
    table::print_table(&table);
    Ok(())
}

pub fn list_fields(args: &FieldsArgs) -> Result<()> {
    let config = load_config(args.document.config.as_ref(), true)?;
    let document = read_document(&args.document)?;
    let fields = document
        .fields(&header_mode(&args.document, &config))
        .map_err(ExportError::from)?;
    let rows = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| vec![CellValue::Number(idx as i64), CellValue::from(field.as_str())])
        .collect::<Vec<_>>();
    print!(
        "{}",
        table::render_rows(&["#".to_string(), "field".to_string()], &rows)
    );
    Ok(())
}

/// Loads the configuration. The default file may be absent only when the
/// command line fully describes what to export.
pub fn load_config(path: Option<&PathBuf>, optional: bool) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Loading configuration from {path:?}")),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            let loaded = if optional {
                AppConfig::load_or_default(&default_path)
            } else {
                AppConfig::load(&default_path)
            };
            loaded.with_context(|| format!("Loading configuration from {default_path:?}"))
        }
    }
}

pub fn assemble(
    document_args: &DocumentArgs,
    selection_args: &SelectionArgs,
    config: &AppConfig,
) -> Result<ResultTable> {
    let document = read_document(document_args)?;
    let fields = document
        .fields(&header_mode(document_args, config))
        .map_err(ExportError::from)?;
    let rows = document.rows().map_err(ExportError::from)?;
    let map = resolve_columns(selection_args, config, &fields)?;
    build_table(&rows, &map)
}

fn read_document(args: &DocumentArgs) -> Result<ParsedDocument> {
    let source = if args.clipboard {
        InputSource::Clipboard
    } else {
        InputSource::from_path(&args.input)
    };
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!("Reading grade table from {}", source.describe());
    let html = io_utils::read_document(&source, encoding)?;
    Ok(ParsedDocument::parse(&html))
}

fn header_mode(args: &DocumentArgs, config: &AppConfig) -> HeaderMode {
    match args.header_mode {
        None => {
            let mut mode = config.header_mode();
            if let (HeaderMode::Tooltip { attribute }, Some(custom)) =
                (&mut mode, args.tooltip_attribute.as_ref())
            {
                *attribute = custom.clone();
            }
            mode
        }
        Some(HeaderStyle::Simple) => HeaderMode::Simple,
        Some(HeaderStyle::Tooltip) => HeaderMode::Tooltip {
            attribute: args
                .tooltip_attribute
                .clone()
                .or_else(|| config.tooltip_attribute.clone())
                .unwrap_or_else(|| DEFAULT_TOOLTIP_ATTRIBUTE.to_string()),
        },
    }
}

pub fn resolve_columns(
    args: &SelectionArgs,
    config: &AppConfig,
    fields: &[String],
) -> Result<ColumnIndexMap> {
    let plan = if args.all {
        SelectionPlan::All
    } else if !args.fields.is_empty() {
        SelectionPlan::Fields(FieldSelection::from_entries(args.fields.clone()))
    } else {
        config.selection(args.template.as_deref())?
    };

    let map = match plan {
        SelectionPlan::All => {
            let mut map = ColumnIndexMap::select_all(fields);
            map.reorder(&args.order);
            map
        }
        SelectionPlan::Fields(mut selection) => {
            selection.reorder(&args.order);
            ColumnIndexMap::resolve(&selection, fields)
        }
    };

    if !map.unresolved().is_empty() {
        warn!(
            "Skipped {} field(s) missing from the document: {}",
            map.unresolved().len(),
            map.unresolved().iter().join(", ")
        );
    }
    map.ensure_not_empty()?;
    Ok(map)
}

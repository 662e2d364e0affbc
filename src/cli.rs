use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::selection::FieldEntry;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Turn pasted HTML grade tables into styled spreadsheets",
    long_about = None
)]
pub struct Cli {
    /// Wait for Enter before exiting, whether the command succeeded or not
    #[arg(long, global = true)]
    pub pause: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a grade table into a styled .xlsx spreadsheet
    Export(ExportArgs),
    /// Print the assembled table instead of writing a spreadsheet
    Preview(PreviewArgs),
    /// List the header fields found in a document
    Fields(FieldsArgs),
    /// Inspect or record named field selections in the configuration file
    #[command(subcommand)]
    Template(TemplateCommand),
}

#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    /// HTML file containing the pasted table ('-' reads stdin)
    #[arg(short = 'i', long = "input", default_value = "html.txt")]
    pub input: PathBuf,
    /// Read the HTML from the system clipboard instead of a file
    #[arg(long, conflicts_with = "input")]
    pub clipboard: bool,
    /// Character encoding of the input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Configuration file (defaults to config.json in the working directory)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// How header cells are read (overrides the configuration)
    #[arg(long = "header-mode", value_enum)]
    pub header_mode: Option<HeaderStyle>,
    /// Attribute carrying the JSON field description in tooltip mode
    #[arg(long = "tooltip-attribute")]
    pub tooltip_attribute: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Use a named template from the configuration file
    #[arg(short = 't', long = "template", conflicts_with_all = ["fields", "all"])]
    pub template: Option<String>,
    /// Fields to export as `SOURCE` or `SOURCE=DISPLAY`, in output order
    #[arg(
        short = 'F',
        long = "field",
        value_delimiter = ',',
        value_parser = FieldEntry::parse,
        action = clap::ArgAction::Append
    )]
    pub fields: Vec<FieldEntry>,
    /// Export every field found in the document
    #[arg(long, conflicts_with = "fields")]
    pub all: bool,
    /// Move these source fields to the front, in this order
    #[arg(long = "order", value_delimiter = ',')]
    pub order: Vec<String>,
}

impl SelectionArgs {
    /// True when the selection is fully described on the command line.
    pub fn is_explicit(&self) -> bool {
        self.all || !self.fields.is_empty()
    }
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Pad the sheet with blank rows up to this many students
    #[arg(long = "min-rows")]
    pub min_rows: Option<usize>,
    /// Spreadsheet name (".xlsx" is appended when missing)
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,
    /// Folder for the spreadsheet (overrides the configured save folder)
    #[arg(long = "save-folder")]
    pub save_folder: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Debug, Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List the templates stored in the configuration file
    List {
        /// Configuration file (defaults to config.json)
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
    },
    /// Store the given fields as a named template
    Save {
        /// Template name; an existing template with this name is replaced
        name: String,
        /// Fields as `SOURCE` or `SOURCE=DISPLAY`, in output order
        #[arg(
            short = 'F',
            long = "field",
            required = true,
            value_delimiter = ',',
            value_parser = FieldEntry::parse,
            action = clap::ArgAction::Append
        )]
        fields: Vec<FieldEntry>,
        /// Configuration file (defaults to config.json)
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    /// Header text of every span in the table head
    #[default]
    Simple,
    /// JSON field description stored in a header attribute
    Tooltip,
}

//! HTML document model: header field extraction and body row handles.
//!
//! A pasted grade table is parsed once with `scraper` and kept in memory for
//! the whole export. [`ParsedDocument::fields`] turns the `thead` section into
//! the ordered header field list (with the synthesized student-name label at
//! index 0), and [`ParsedDocument::rows`] hands out one [`DataRow`] per `tr` of
//! the `tbody` section. The first body row is a legend row; it is still
//! returned here and skipped later by the processing pass.

use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::error::ParseError;

/// Label of the synthesized first column holding student names.
pub const NAME_FIELD: &str = "Opiskelijan nimi";
pub const REQUIRED_MARKER: &str = "Pakollinen";
pub const ELECTIVE_MARKER: &str = "Valinnainen";
pub const DEFAULT_TOOLTIP_ATTRIBUTE: &str = "data-tooltip";

const REQUIRED_CODE: &str = "pak";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Text of every `span` in the header, verbatim.
    #[default]
    Simple,
    /// JSON description carried by `attribute` on every header cell.
    Tooltip { attribute: String },
}

pub struct ParsedDocument {
    html: Html,
}

/// Borrowed handle to the `td` cells of one body row, in column order.
#[derive(Debug, Clone)]
pub struct DataRow<'a> {
    cells: Vec<ElementRef<'a>>,
}

impl<'a> DataRow<'a> {
    pub fn cell(&self, index: usize) -> Option<ElementRef<'a>> {
        self.cells.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct TooltipField {
    code: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl ParsedDocument {
    pub fn parse(source: &str) -> Self {
        let html = if contains_table_tag(source) {
            Html::parse_document(source)
        } else {
            // Bare thead/tbody fragments are dropped by the tree builder
            // unless they sit inside a table.
            Html::parse_document(&format!("<table>{source}</table>"))
        };
        Self { html }
    }

    pub fn fields(&self, mode: &HeaderMode) -> Result<Vec<String>, ParseError> {
        let thead = self
            .html
            .select(&selector("thead")?)
            .next()
            .ok_or(ParseError::MissingSection("thead"))?;

        let mut fields = vec![NAME_FIELD.to_string()];
        match mode {
            HeaderMode::Simple => {
                fields.extend(
                    thead
                        .select(&selector("span")?)
                        .map(|span| span.text().collect::<String>()),
                );
            }
            HeaderMode::Tooltip { attribute } => {
                let css = format!("[{attribute}]");
                for (index, cell) in thead.select(&selector(&css)?).enumerate() {
                    fields.push(tooltip_field_name(cell, attribute, index + 1)?);
                }
            }
        }
        if fields.len() == 1 {
            return Err(ParseError::NoHeaderCells);
        }
        debug!("Extracted {} header field(s)", fields.len() - 1);
        Ok(fields)
    }

    pub fn rows(&self) -> Result<Vec<DataRow<'_>>, ParseError> {
        let tbody = self
            .html
            .select(&selector("tbody")?)
            .next()
            .ok_or(ParseError::MissingSection("tbody"))?;
        let cell_selector = selector("td")?;
        let rows = tbody
            .select(&selector("tr")?)
            .map(|row| DataRow {
                cells: row.select(&cell_selector).collect(),
            })
            .collect::<Vec<_>>();
        debug!("Collected {} body row(s)", rows.len());
        Ok(rows)
    }
}

fn contains_table_tag(source: &str) -> bool {
    source.to_ascii_lowercase().contains("<table")
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::Selector(css.to_string()))
}

fn tooltip_field_name(
    cell: ElementRef<'_>,
    attribute: &str,
    index: usize,
) -> Result<String, ParseError> {
    let raw = cell.value().attr(attribute).unwrap_or_default();
    let info: TooltipField =
        serde_json::from_str(raw).map_err(|err| ParseError::Tooltip {
            index,
            attribute: attribute.to_string(),
            reason: err.to_string(),
        })?;

    let parts = [info.code.as_deref(), info.name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    let base = if parts.is_empty() {
        cell.text().collect::<String>().trim().to_string()
    } else {
        parts.join(" ")
    };

    Ok(match info.kind.as_deref() {
        Some(REQUIRED_CODE) => format!("{REQUIRED_MARKER} {base}"),
        Some(_) => format!("{ELECTIVE_MARKER} {base}"),
        None => base,
    })
}

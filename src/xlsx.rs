//! Styled spreadsheet output.
//!
//! [`SheetPlan`] fixes the sheet layout (padded rows, column widths) up front
//! so it can be checked without touching the file system; [`write_workbook`]
//! turns a plan into a single-sheet `.xlsx` file. The workbook is assembled in
//! memory and written in one step, so a failure never leaves a partial file.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::{assemble::ResultTable, data::CellValue};

pub const SHEET_NAME: &str = "Table";
pub const NAME_COLUMN_MARGIN: f64 = 2.0;
pub const MIN_COLUMN_WIDTH: f64 = 6.0;
pub const STRIPE_COLOR: u32 = 0x828181;

#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub name_width: f64,
    pub field_width: f64,
}

impl SheetPlan {
    pub fn new(table: &ResultTable, min_rows: Option<usize>) -> Self {
        let mut table = table.clone();
        if let Some(min_rows) = min_rows {
            table.pad_to(min_rows);
        }
        let headers = table.headers();
        let rows = table.rows();

        let name_longest = rows
            .iter()
            .filter_map(|row| row.first())
            .map(CellValue::display_len)
            .chain(headers.first().map(|h| h.chars().count()))
            .max()
            .unwrap_or(0);
        let field_longest = rows
            .iter()
            .flat_map(|row| row.iter().skip(1))
            .map(CellValue::display_len)
            .max()
            .unwrap_or(0);

        Self {
            headers,
            rows,
            name_width: name_longest as f64 + NAME_COLUMN_MARGIN,
            field_width: (field_longest as f64).max(MIN_COLUMN_WIDTH),
        }
    }

    /// Data rows get the stripe fill when their 1-based sheet row is even.
    pub fn is_shaded(sheet_row: u32) -> bool {
        (sheet_row + 1) % 2 == 0
    }
}

struct SheetFormats {
    header: Format,
    plain: Format,
    shaded: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        Self {
            header: cell.clone().set_bold(),
            shaded: cell.clone().set_background_color(Color::RGB(STRIPE_COLOR)),
            plain: cell,
        }
    }
}

pub fn write_workbook(plan: &SheetPlan, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let formats = SheetFormats::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (idx, header) in plan.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column(idx)?, header, &formats.header)?;
    }
    for (row_idx, row) in plan.rows.iter().enumerate() {
        let sheet_row = u32::try_from(row_idx + 1).context("Too many rows for a worksheet")?;
        let format = if SheetPlan::is_shaded(sheet_row) {
            &formats.shaded
        } else {
            &formats.plain
        };
        for (idx, value) in row.iter().enumerate() {
            write_cell(worksheet, sheet_row, column(idx)?, value, format)?;
        }
    }

    if !plan.headers.is_empty() {
        worksheet.set_column_width(0, plan.name_width)?;
    }
    for idx in 1..plan.headers.len() {
        worksheet.set_column_width(column(idx)?, plan.field_width)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Writing spreadsheet {path:?}"))?;
    info!(
        "Wrote {} row(s) x {} column(s) to {:?}",
        plan.rows.len(),
        plan.headers.len(),
        path
    );
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> Result<()> {
    match value {
        CellValue::Number(number) => {
            worksheet.write_number_with_format(row, col, *number as f64, format)?;
        }
        CellValue::Text(text) if text.is_empty() => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::Text(text) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
    }
    Ok(())
}

fn column(idx: usize) -> Result<u16> {
    u16::try_from(idx).context("Too many columns for a worksheet")
}

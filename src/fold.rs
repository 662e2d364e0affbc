//! Folding of columns that several source fields share.
//!
//! When two or more source fields are exported under one display name, the
//! processing pass appends all of their values to the same column, so that
//! column ends up an exact multiple of the student count long. Each run of
//! consecutive values belonging to one student is summed into a single number.

use log::debug;

use crate::{assemble::ResultTable, data::CellValue, error::ExportError};

pub fn fold_columns(table: &mut ResultTable) -> Result<(), ExportError> {
    let students = table.student_count();
    if students == 0 {
        return Ok(());
    }
    for column in table.columns_mut().iter_mut().skip(1) {
        let raw_len = column.values.len();
        if raw_len == 0 || raw_len == students || raw_len % students != 0 {
            continue;
        }
        let group = raw_len / students;
        debug!(
            "Folding column '{}': {} value(s) per student",
            column.name, group
        );
        let folded = column
            .values
            .chunks(group)
            .enumerate()
            .map(|(student, run)| sum_run(&column.name, student, run))
            .collect::<Result<Vec<_>, _>>()?;
        column.values = folded;
    }
    Ok(())
}

/// Sums the non-empty entries of one run; a run with no entries stays empty.
fn sum_run(column: &str, student: usize, run: &[CellValue]) -> Result<CellValue, ExportError> {
    let mut total: Option<i64> = None;
    for value in run {
        let number = match value {
            CellValue::Number(number) => *number,
            CellValue::Text(text) if text.is_empty() => continue,
            CellValue::Text(text) => text.parse::<i64>().map_err(|_| ExportError::Fold {
                column: column.to_string(),
                student: student + 1,
                value: text.clone(),
            })?,
        };
        let sum = total
            .unwrap_or(0)
            .checked_add(number)
            .ok_or_else(|| ExportError::FoldOverflow {
                column: column.to_string(),
                student: student + 1,
            })?;
        total = Some(sum);
    }
    Ok(total.map(CellValue::Number).unwrap_or_default())
}

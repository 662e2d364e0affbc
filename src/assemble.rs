//! Result table assembly.
//!
//! [`build_table`] is the per-row processing pass: it skips the legend row,
//! normalizes every mapped cell into the column named by the
//! [`ColumnIndexMap`], and finally folds duplicate-named columns.

use anyhow::Result;
use log::{debug, info};

use crate::{
    data::CellValue,
    document::{DataRow, NAME_FIELD},
    fold::fold_columns,
    normalize::normalize_cell,
    selection::ColumnIndexMap,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// Display name -> values, one per student, in selection order. The name
/// column is always present and first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    columns: Vec<Column>,
}

impl ResultTable {
    pub fn new(map: &ColumnIndexMap) -> Self {
        let mut table = Self {
            columns: vec![Column {
                name: NAME_FIELD.to_string(),
                values: Vec::new(),
            }],
        };
        for (_, name) in map.columns().iter().skip(1) {
            table.column_index_or_insert(name);
        }
        table
    }

    pub fn from_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        let mut table = Self {
            columns: vec![Column {
                name: NAME_FIELD.to_string(),
                values: Vec::new(),
            }],
        };
        for (name, values) in columns {
            let name: String = name.into();
            let idx = table.column_index_or_insert(&name);
            table.columns[idx].values.extend(values);
        }
        table
    }

    fn column_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(idx) = self.columns.iter().position(|c| c.name == name) {
            return idx;
        }
        self.columns.push(Column {
            name: name.to_string(),
            values: Vec::new(),
        });
        self.columns.len() - 1
    }

    pub fn push(&mut self, name: &str, value: CellValue) {
        let idx = self.column_index_or_insert(name);
        self.columns[idx].values.push(value);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn student_count(&self) -> usize {
        self.columns[0].values.len()
    }

    /// Row-major view; short columns read as empty cells.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        let height = self
            .columns
            .iter()
            .map(|c| c.values.len())
            .max()
            .unwrap_or(0);
        (0..height)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values.get(row).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Appends blank rows until every column holds `min_rows` values.
    pub fn pad_to(&mut self, min_rows: usize) {
        for column in &mut self.columns {
            if column.values.len() < min_rows {
                column.values.resize(min_rows, CellValue::empty());
            }
        }
    }
}

pub fn build_table(rows: &[DataRow<'_>], map: &ColumnIndexMap) -> Result<ResultTable> {
    let mut table = ResultTable::new(map);
    for (row_idx, row) in rows.iter().enumerate() {
        if row_idx == 0 {
            continue;
        }
        for (source, name) in map.columns() {
            let value = row
                .cell(*source)
                .map(normalize_cell)
                .unwrap_or_default();
            table.push(name, CellValue::Text(value));
        }
    }
    debug!(
        "Collected {} student row(s) across {} column(s) before folding",
        table.student_count(),
        table.columns().len()
    );
    fold_columns(&mut table)?;
    info!(
        "Assembled table with {} student(s) and {} column(s)",
        table.student_count(),
        table.columns().len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{document::ParsedDocument, selection::FieldSelection, selection::FieldEntry};

    const DOC: &str = r#"<table>
        <thead><tr><th>Nimi</th><th><span>A</span></th><th><span>B</span></th></tr></thead>
        <tbody>
          <tr><td>legend</td><td>a</td><td>b</td></tr>
          <tr><td><a>Ann</a></td><td>1</td><td>2</td></tr>
          <tr><td><a>Ben</a></td><td></td><td>4</td></tr>
          <tr><td><a>Cid</a></td><td>5</td></tr>
        </tbody></table>"#;

    #[test]
    fn aliased_fields_are_folded_per_student() {
        let doc = ParsedDocument::parse(DOC);
        let fields = doc.fields(&Default::default()).unwrap();
        let rows = doc.rows().unwrap();
        let selection = FieldSelection::from_entries(vec![
            FieldEntry::rename("A", "Combo"),
            FieldEntry::rename("B", "Combo"),
        ]);
        let map = ColumnIndexMap::resolve(&selection, &fields);
        let table = build_table(&rows, &map).unwrap();

        assert_eq!(table.headers(), vec![NAME_FIELD, "Combo"]);
        assert_eq!(
            table.column("Combo").unwrap(),
            &[CellValue::Number(3), CellValue::Number(4), CellValue::Number(5)]
        );
    }

    #[test]
    fn pad_to_never_truncates() {
        let mut table = ResultTable::from_columns([
            (NAME_FIELD, vec!["Ann".into(), "Ben".into()]),
            ("A", vec!["1".into(), "2".into()]),
        ]);
        table.pad_to(1);
        assert_eq!(table.student_count(), 2);
        table.pad_to(4);
        assert_eq!(table.student_count(), 4);
        assert_eq!(table.rows()[3], vec![CellValue::empty(), CellValue::empty()]);
    }
}

//! Field selection and header resolution.
//!
//! A [`FieldSelection`] is the ordered list of `(source, display)` pairs the
//! user wants exported. [`ColumnIndexMap::resolve`] pins every entry to its
//! position in the extracted header list. Names that do not occur in the
//! header are dropped from the map; they are kept in
//! [`ColumnIndexMap::unresolved`] and logged so a misconfigured selection is
//! visible without aborting the export.

use std::fmt;

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{document::NAME_FIELD, error::ExportError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FieldEntry {
    pub source: String,
    pub display: Option<String>,
}

impl FieldEntry {
    pub fn keep(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            display: None,
        }
    }

    pub fn rename(source: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            display: Some(display.into()),
        }
    }

    /// Parses the `SOURCE` or `SOURCE=DISPLAY` form used on the command line.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (source, display) = match raw.split_once('=') {
            Some((source, display)) => (source.trim(), Some(display.trim())),
            None => (raw.trim(), None),
        };
        if source.is_empty() {
            return Err(format!("Field '{raw}' has an empty source name"));
        }
        Ok(match display {
            Some(display) if !display.is_empty() => FieldEntry::rename(source, display),
            _ => FieldEntry::keep(source),
        })
    }

    pub fn display_name(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.source)
    }
}

impl TryFrom<Vec<String>> for FieldEntry {
    type Error = String;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(source), None, None) => Ok(FieldEntry::keep(source)),
            (Some(source), Some(display), None) => Ok(FieldEntry::rename(source, display)),
            _ => Err("field entries must be [source] or [source, display]".to_string()),
        }
    }
}

impl From<FieldEntry> for Vec<String> {
    fn from(entry: FieldEntry) -> Self {
        match entry.display {
            Some(display) => vec![entry.source, display],
            None => vec![entry.source],
        }
    }
}

impl fmt::Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display {
            Some(display) => write!(f, "{}={}", self.source, display),
            None => write!(f, "{}", self.source),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSelection {
    entries: Vec<FieldEntry>,
}

impl FieldSelection {
    pub fn from_entries(entries: Vec<FieldEntry>) -> Self {
        Self { entries }.with_name_first()
    }

    /// Builds a selection from position-aligned source and display lists.
    pub fn from_parallel(selected: &[String], displayed: &[String]) -> Self {
        if displayed.len() > selected.len() {
            warn!(
                "Ignoring {} display name(s) without a matching selected field",
                displayed.len() - selected.len()
            );
        }
        let entries = selected
            .iter()
            .enumerate()
            .map(|(idx, source)| match displayed.get(idx) {
                Some(display) if display != source => FieldEntry::rename(source, display),
                _ => FieldEntry::keep(source),
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.source == NAME_FIELD)
    }

    /// Moves the named sources to the front, in the given order. The name
    /// field stays first; unnamed entries keep their relative order.
    pub fn reorder(&mut self, order: &[String]) {
        let mut remaining = std::mem::take(&mut self.entries);
        let mut ordered = Vec::with_capacity(remaining.len());
        for source in order {
            if let Some(pos) = remaining.iter().position(|entry| &entry.source == source) {
                ordered.push(remaining.remove(pos));
            } else {
                warn!("Cannot reorder '{source}': it is not part of the selection");
            }
        }
        ordered.extend(remaining);
        *self = Self { entries: ordered }.with_name_first();
    }

    fn with_name_first(mut self) -> Self {
        self.entries.retain(|entry| entry.source != NAME_FIELD);
        self.entries.insert(0, FieldEntry::keep(NAME_FIELD));
        self
    }
}

/// Resolved `(source column, display name)` pairs; the name column is first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndexMap {
    columns: Vec<(usize, String)>,
    unresolved: Vec<String>,
}

impl ColumnIndexMap {
    pub fn resolve(selection: &FieldSelection, fields: &[String]) -> Self {
        let mut columns = vec![(0, NAME_FIELD.to_string())];
        let mut unresolved = Vec::new();
        for entry in selection.entries() {
            if entry.source == NAME_FIELD {
                continue;
            }
            if entry.display_name() == NAME_FIELD {
                warn!(
                    "Field '{}' cannot be renamed to '{NAME_FIELD}' and will be skipped",
                    entry.source
                );
                continue;
            }
            match fields
                .iter()
                .skip(1)
                .position(|field| field == &entry.source)
            {
                Some(pos) => columns.push((pos + 1, entry.display_name().to_string())),
                None => {
                    warn!(
                        "Field '{}' does not exist in the document and will be skipped",
                        entry.source
                    );
                    unresolved.push(entry.source.clone());
                }
            }
        }
        debug!(
            "Resolved columns: {}",
            columns
                .iter()
                .map(|(idx, name)| format!("{idx}->{name}"))
                .join(", ")
        );
        Self {
            columns,
            unresolved,
        }
    }

    /// Every header position mapped to its own header text.
    pub fn select_all(fields: &[String]) -> Self {
        let mut columns = vec![(0, NAME_FIELD.to_string())];
        for (idx, field) in fields.iter().enumerate().skip(1) {
            if field == NAME_FIELD {
                warn!("Header cell {idx} repeats '{NAME_FIELD}' and will be skipped");
                continue;
            }
            columns.push((idx, field.clone()));
        }
        Self {
            columns,
            unresolved: Vec::new(),
        }
    }

    /// Moves every column with one of the given display names to the front,
    /// in the given order. Source positions are kept as resolved, so repeated
    /// header names stay distinct columns.
    pub fn reorder(&mut self, order: &[String]) {
        let mut remaining = self.columns.split_off(1);
        let mut ordered = Vec::with_capacity(remaining.len());
        for name in order {
            if name == NAME_FIELD {
                continue;
            }
            let (moved, rest): (Vec<_>, Vec<_>) =
                remaining.into_iter().partition(|(_, display)| display == name);
            if moved.is_empty() {
                warn!("Cannot reorder '{name}': it is not part of the selection");
            }
            ordered.extend(moved);
            remaining = rest;
        }
        ordered.extend(remaining);
        self.columns.extend(ordered);
    }

    pub fn columns(&self) -> &[(usize, String)] {
        &self.columns
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Number of resolved columns besides the name column.
    pub fn field_count(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn ensure_not_empty(&self) -> Result<(), ExportError> {
        if self.field_count() == 0 {
            Err(ExportError::SelectionEmpty)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        std::iter::once(NAME_FIELD)
            .chain(names.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn first_matching_header_wins() {
        let fields = header(&["A", "B", "A"]);
        let selection = FieldSelection::from_entries(vec![FieldEntry::rename("A", "Alpha")]);
        let map = ColumnIndexMap::resolve(&selection, &fields);
        assert_eq!(
            map.columns(),
            &[(0, NAME_FIELD.to_string()), (1, "Alpha".to_string())]
        );
    }

    #[test]
    fn unknown_fields_are_recorded_not_fatal() {
        let fields = header(&["A"]);
        let selection =
            FieldSelection::from_entries(vec![FieldEntry::keep("A"), FieldEntry::keep("Zed")]);
        let map = ColumnIndexMap::resolve(&selection, &fields);
        assert_eq!(map.field_count(), 1);
        assert_eq!(map.unresolved(), &["Zed".to_string()]);
        assert!(map.ensure_not_empty().is_ok());
    }

    #[test]
    fn name_only_selection_is_empty() {
        let fields = header(&["A"]);
        let selection = FieldSelection::from_entries(vec![FieldEntry::keep("Missing")]);
        let map = ColumnIndexMap::resolve(&selection, &fields);
        assert!(matches!(
            map.ensure_not_empty(),
            Err(ExportError::SelectionEmpty)
        ));
    }

    #[test]
    fn parallel_lists_pair_up_by_position() {
        let selected = vec![NAME_FIELD.to_string(), "A".into(), "B".into()];
        let displayed = vec![NAME_FIELD.to_string(), "Alpha".into()];
        let selection = FieldSelection::from_parallel(&selected, &displayed);
        assert_eq!(
            selection.entries(),
            &[
                FieldEntry::keep(NAME_FIELD),
                FieldEntry::rename("A", "Alpha"),
                FieldEntry::keep("B"),
            ]
        );
    }

    #[test]
    fn reorder_keeps_name_first() {
        let mut selection = FieldSelection::from_entries(vec![
            FieldEntry::keep("A"),
            FieldEntry::keep("B"),
            FieldEntry::keep("C"),
        ]);
        selection.reorder(&["C".to_string(), NAME_FIELD.to_string(), "A".to_string()]);
        let order = selection
            .entries()
            .iter()
            .map(|entry| entry.source.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec![NAME_FIELD, "C", "A", "B"]);
    }

    #[test]
    fn reorder_keeps_repeated_header_positions() {
        let fields = header(&["A", "B", "A"]);
        let mut map = ColumnIndexMap::select_all(&fields);
        map.reorder(&["B".to_string(), "Zed".to_string()]);
        assert_eq!(
            map.columns(),
            &[
                (0, NAME_FIELD.to_string()),
                (2, "B".to_string()),
                (1, "A".to_string()),
                (3, "A".to_string()),
            ]
        );
    }

    #[test]
    fn reserved_name_is_never_a_field_column() {
        let fields = header(&["A", "B", NAME_FIELD]);
        let selection = FieldSelection::from_entries(vec![
            FieldEntry::rename("A", NAME_FIELD),
            FieldEntry::keep("B"),
        ]);
        let map = ColumnIndexMap::resolve(&selection, &fields);
        assert_eq!(
            map.columns(),
            &[(0, NAME_FIELD.to_string()), (2, "B".to_string())]
        );
        assert!(map.unresolved().is_empty());

        let all = ColumnIndexMap::select_all(&fields);
        assert_eq!(
            all.columns(),
            &[
                (0, NAME_FIELD.to_string()),
                (1, "A".to_string()),
                (2, "B".to_string()),
            ]
        );
    }

    #[test]
    fn field_entry_parses_rename_syntax() {
        assert_eq!(
            FieldEntry::parse("MAA01 = Math").unwrap(),
            FieldEntry::rename("MAA01", "Math")
        );
        assert_eq!(FieldEntry::parse("MAA01=").unwrap(), FieldEntry::keep("MAA01"));
        assert!(FieldEntry::parse("=Math").is_err());
    }

    #[test]
    fn field_entry_serializes_as_array() {
        let entries = vec![FieldEntry::keep("A"), FieldEntry::rename("B", "Bee")];
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(json, r#"[["A"],["B","Bee"]]"#);
        let back: Vec<FieldEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entries);
        assert!(serde_json::from_str::<FieldEntry>(r#"["a","b","c"]"#).is_err());
    }
}

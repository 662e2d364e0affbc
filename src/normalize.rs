//! Cell text normalization.
//!
//! Student names arrive as link text and are taken verbatim. Every other cell
//! is reduced to its letters and digits, and the single-letter pass marker
//! ("o" or "O") is rewritten to [`MARKER`].

use scraper::{ElementRef, Selector};

/// Canonical marker written for an achieved/passed grade.
pub const MARKER: &str = "X";

pub fn normalize_cell(cell: ElementRef<'_>) -> String {
    if let Some(link) = first_link(cell) {
        return link.text().collect();
    }
    normalize_text(&cell.text().collect::<String>())
}

pub fn normalize_text(raw: &str) -> String {
    let stripped = raw
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .collect::<String>();
    if stripped.eq_ignore_ascii_case("o") {
        MARKER.to_string()
    } else {
        stripped
    }
}

fn first_link(cell: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("a").ok()?;
    cell.select(&selector).next()
}

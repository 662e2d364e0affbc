//! I/O utilities for reading pasted documents and locating the output file.
//!
//! All input reading in grade-table flows through this module:
//!
//! - **Sources**: a file path, `-` for stdin, or the system clipboard.
//! - **Encoding**: input bytes are decoded via `encoding_rs`, defaulting to
//!   UTF-8. Undecodable input is rejected instead of silently replaced.
//! - **Output naming**: the spreadsheet name defaults to `students`, gains an
//!   `.xlsx` extension when it has none, and lands in the configured save
//!   folder (the current directory when unset).

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::error::ExportError;

pub const DEFAULT_OUTPUT_NAME: &str = "students";
pub const OUTPUT_EXTENSION: &str = "xlsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    Clipboard,
}

impl InputSource {
    pub fn from_path(path: &Path) -> Self {
        if is_dash(path) {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "stdin".to_string(),
            InputSource::Clipboard => "clipboard".to_string(),
        }
    }
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn read_document(source: &InputSource, encoding: &'static Encoding) -> Result<String> {
    match source {
        InputSource::File(path) => {
            let bytes = fs::read(path).map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => anyhow!(ExportError::InputMissing(path.clone())),
                _ => anyhow!(err).context(format!("Reading input file {path:?}")),
            })?;
            decode_bytes(&bytes, encoding).with_context(|| format!("Decoding {path:?}"))
        }
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("Reading document from stdin")?;
            decode_bytes(&bytes, encoding).context("Decoding stdin")
        }
        InputSource::Clipboard => Ok(read_clipboard()?),
    }
}

pub fn read_clipboard() -> Result<String, ExportError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
    clipboard
        .get_text()
        .map_err(|err| ExportError::Clipboard(err.to_string()))
}

pub fn resolve_output_path(folder: Option<&Path>, name: Option<&str>) -> PathBuf {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_OUTPUT_NAME);
    let mut file = PathBuf::from(name);
    let has_extension = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION));
    if !has_extension {
        file = PathBuf::from(format!("{name}.{OUTPUT_EXTENSION}"));
    }
    match folder.filter(|f| !f.as_os_str().is_empty()) {
        Some(folder) => folder.join(file),
        None => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_defaults_and_gains_extension() {
        assert_eq!(resolve_output_path(None, None), PathBuf::from("students.xlsx"));
        assert_eq!(
            resolve_output_path(None, Some("class 9b")),
            PathBuf::from("class 9b.xlsx")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("out")), Some("Report.XLSX")),
            Path::new("out").join("Report.XLSX")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("")), Some("  ")),
            PathBuf::from("students.xlsx")
        );
    }

    #[test]
    fn missing_input_is_reported_as_input_missing() {
        let source = InputSource::File(PathBuf::from("definitely/not/here.html"));
        let err = read_document(&source, UTF_8).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExportError>(),
            Some(ExportError::InputMissing(_))
        ));
    }

    #[test]
    fn latin1_input_is_decoded_with_label() {
        let encoding = resolve_encoding(Some("latin1")).unwrap();
        let text = decode_bytes(&[0x4e, 0xe4, 0x72], encoding).unwrap();
        assert_eq!(text, "När");
        assert!(resolve_encoding(Some("klingon")).is_err());
    }
}

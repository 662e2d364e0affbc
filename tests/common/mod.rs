#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("read fixture")
}

/// Builds a grade table with a legend row; the first cell of every student
/// row is rendered as a link, like the school system does.
pub fn grade_table_html(fields: &[&str], students: &[&[&str]]) -> String {
    let mut html = String::from("<table><thead><tr><th>Nimi</th>");
    for field in fields {
        html.push_str(&format!("<th><span>{field}</span></th>"));
    }
    html.push_str("</tr></thead><tbody><tr>");
    for _ in 0..=fields.len() {
        html.push_str("<td>legend</td>");
    }
    html.push_str("</tr>");
    for student in students {
        html.push_str("<tr>");
        for (idx, cell) in student.iter().enumerate() {
            if idx == 0 {
                html.push_str(&format!("<td><a href=\"#\">{cell}</a></td>"));
            } else {
                html.push_str(&format!("<td>{cell}</td>"));
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

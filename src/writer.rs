/*!
 * Plain-text output layout and output-file disposal
 */

use std::fs;
use std::path::Path;

use crate::error::{Proj2PromptError, Result};

const DIRECTORY_BANNER: &str = "#######";
const FILE_BANNER: &str = "-----";

/// Append-only text buffer in the verbose layout:
///
/// ```text
///
/// #######
/// Directory: src
/// #######
///
/// -----
/// File: src/main.rs
/// -----
/// fn main() {}
/// ```
#[derive(Debug, Default)]
pub struct OutputBuffer {
    text: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a directory header
    pub fn push_directory(&mut self, relative_path: &str) {
        self.push_header(DIRECTORY_BANNER, "Directory", relative_path);
    }

    /// Emit a file header followed by its rendered content
    pub fn push_file(&mut self, relative_path: &str, content: &str) {
        self.push_header(FILE_BANNER, "File", relative_path);
        self.text.push_str(content);
        self.text.push('\n');
    }

    fn push_header(&mut self, banner: &str, label: &str, relative_path: &str) {
        self.text.push('\n');
        self.text.push_str(banner);
        self.text.push('\n');
        self.text.push_str(label);
        self.text.push_str(": ");
        self.text.push_str(relative_path);
        self.text.push('\n');
        self.text.push_str(banner);
        self.text.push('\n');
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Write the generated text to `path`, replacing any existing file
pub fn write_output_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Proj2PromptError::Write {
        path: path.to_path_buf(),
        source,
    })
}

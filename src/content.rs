/*!
 * File content rendering: bounded sampling and binary detection
 */

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Proj2PromptError, Result};

/// Maximum number of bytes read from any file
pub const SAMPLE_LIMIT: usize = 8000;

/// Share of non-text bytes above which a sample is binary
pub const BINARY_THRESHOLD: f64 = 0.3;

/// Number of leading bytes shown in a binary summary
pub const HEX_PREVIEW_LEN: usize = 10;

/// Renders file content into prompt text
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer {
    mark_truncated: bool,
}

impl ContentRenderer {
    pub fn new(mark_truncated: bool) -> Self {
        Self { mark_truncated }
    }

    /// Render the file at `path`, whose size is `size` bytes
    pub fn render(&self, path: &Path, size: u64) -> Result<String> {
        if size == 0 {
            return Ok(String::new());
        }

        let sample = read_sample(path, size)?;

        if is_binary(&sample) {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            return Ok(binary_summary(&name, size, &sample));
        }

        let mut text = String::from_utf8_lossy(&sample).into_owned();
        if self.mark_truncated && size > sample.len() as u64 {
            text.push_str(&format!(
                "\n[Truncated: showing first {} of {} bytes]",
                sample.len(),
                size
            ));
        }
        Ok(text)
    }
}

/// Read at most `SAMPLE_LIMIT` bytes, never more than `size`
fn read_sample(path: &Path, size: u64) -> Result<Vec<u8>> {
    let limit = size.min(SAMPLE_LIMIT as u64);
    let file = File::open(path).map_err(|e| Proj2PromptError::io(path, e))?;

    let mut sample = Vec::with_capacity(limit as usize);
    file.take(limit)
        .read_to_end(&mut sample)
        .map_err(|e| Proj2PromptError::io(path, e))?;

    Ok(sample)
}

/// Null and control bytes other than tab, newline, vertical tab, form feed
/// and carriage return, plus DEL
fn is_non_text(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0E..=0x1F | 0x7F)
}

/// Whether more than 30% of the sample is non-text
pub fn is_binary(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }

    let non_text = sample.iter().filter(|&&b| is_non_text(b)).count();
    non_text as f64 / sample.len() as f64 > BINARY_THRESHOLD
}

/// Fixed-format summary shown instead of binary content
pub fn binary_summary(name: &str, size: u64, sample: &[u8]) -> String {
    let preview: Vec<String> = sample
        .iter()
        .take(HEX_PREVIEW_LEN)
        .map(|b| format!("{:02x}", b))
        .collect();

    format!(
        "[Binary file: {}, Size: {} bytes, First {} bytes: {}]",
        name,
        size,
        HEX_PREVIEW_LEN,
        preview.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn render_bytes(bytes: &[u8], renderer: ContentRenderer) -> String {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("sample.dat");
        fs::write(&path, bytes).unwrap();
        renderer.render(&path, bytes.len() as u64).unwrap()
    }

    #[test]
    fn test_text_detection() {
        assert!(!is_binary(b"fn main() {\n\tprintln!(\"hi\");\r\n}\n"));
        assert!(!is_binary("zażółć gęślą jaźń".as_bytes()));
        assert!(!is_binary(b""));
    }

    #[test]
    fn test_binary_detection_threshold() {
        // 3 of 10 is exactly 30%, still text
        assert!(!is_binary(&[0, 1, 2, b'a', b'b', b'c', b'd', b'e', b'f', b'g']));
        // 4 of 10 crosses the threshold
        assert!(is_binary(&[0, 1, 2, 0x7f, b'a', b'b', b'c', b'd', b'e', b'f']));
        // whitespace controls never count
        assert!(!is_binary(&[b'\t', b'\n', 0x0b, 0x0c, b'\r', b'\t', b'\n']));
    }

    #[test]
    fn test_binary_summary_format() {
        let bytes: Vec<u8> = (0u8..20).collect();
        let rendered = render_bytes(&bytes, ContentRenderer::default());

        assert_eq!(
            rendered,
            "[Binary file: sample.dat, Size: 20 bytes, First 10 bytes: 00 01 02 03 04 05 06 07 08 09]"
        );
    }

    #[test]
    fn test_short_binary_shows_available_bytes() {
        let rendered = render_bytes(&[0, 1, 2, 3], ContentRenderer::default());
        assert!(rendered.ends_with("First 10 bytes: 00 01 02 03]"));
        assert!(rendered.contains("Size: 4 bytes"));
    }

    #[test]
    fn test_small_text_is_verbatim() {
        let rendered = render_bytes(b"hello\nworld", ContentRenderer::default());
        assert_eq!(rendered, "hello\nworld");
    }

    #[test]
    fn test_large_text_is_cut_at_limit() {
        let bytes: Vec<u8> = (0..SAMPLE_LIMIT + 500)
            .map(|i| b'a' + (i % 26) as u8)
            .collect();

        let rendered = render_bytes(&bytes, ContentRenderer::default());
        assert_eq!(rendered.as_bytes(), &bytes[..SAMPLE_LIMIT]);
    }

    #[test]
    fn test_truncation_marker_is_opt_in() {
        let bytes = vec![b'x'; SAMPLE_LIMIT + 1];

        let rendered = render_bytes(&bytes, ContentRenderer::new(true));
        assert!(rendered.starts_with(&"x".repeat(SAMPLE_LIMIT)));
        assert!(rendered.ends_with("\n[Truncated: showing first 8000 of 8001 bytes]"));

        let exact = vec![b'x'; SAMPLE_LIMIT];
        let rendered = render_bytes(&exact, ContentRenderer::new(true));
        assert_eq!(rendered.len(), SAMPLE_LIMIT);
    }

    #[test]
    fn test_empty_file_skips_reading() {
        let temp_dir = tempdir().unwrap();
        // A missing path proves the file is never opened
        let missing = temp_dir.path().join("missing");
        let rendered = ContentRenderer::default().render(&missing, 0).unwrap();
        assert_eq!(rendered, "");
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");
        let err = ContentRenderer::default().render(&missing, 10).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}

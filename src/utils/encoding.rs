//! Reading source files into text.

use std::fs;
use std::path::{Path, PathBuf};

use chardetng::EncodingDetector;
use encoding_rs::UTF_8;
use thiserror::Error;

/// How many leading bytes are inspected for NUL when sniffing binary content.
const BINARY_SNIFF_BYTES: usize = 8192;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} looks like a binary file", .0.display())]
    Binary(PathBuf),
}

pub fn is_binary_content(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_BYTES).any(|&b| b == 0)
}

/// Read a file and decode it to a `String`.
///
/// Valid UTF-8 (with or without BOM) is used as-is; anything else is decoded
/// with the encoding chardetng guesses. Returns the text and the encoding name.
pub fn read_file_safe(path: &Path) -> Result<(String, &'static str), ReadError> {
    let bytes =
        fs::read(path).map_err(|source| ReadError::Io { path: path.to_path_buf(), source })?;
    if is_binary_content(&bytes) {
        return Err(ReadError::Binary(path.to_path_buf()));
    }
    Ok(decode_bytes(&bytes))
}

pub fn decode_bytes(bytes: &[u8]) -> (String, &'static str) {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
    ) {
        return (text.into_owned(), UTF_8.name());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, actual, _had_errors) = encoding.decode(bytes);
    (text.into_owned(), actual.name())
}

#[cfg(test)]
mod tests {
    use super::{decode_bytes, is_binary_content, read_file_safe, ReadError};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn utf8_is_passed_through_and_bom_stripped() {
        let (text, enc) = decode_bytes("\u{feff}fn main() {}\n".as_bytes());
        assert_eq!(text, "fn main() {}\n");
        assert_eq!(enc, "UTF-8");
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        // "café" in windows-1252
        let (text, enc) = decode_bytes(b"# caf\xe9\n");
        assert!(text.starts_with("# caf"));
        assert_ne!(enc, "UTF-8");
    }

    #[test]
    fn nul_bytes_mark_binary() {
        assert!(is_binary_content(b"\x7fELF\0\0"));
        assert!(!is_binary_content(b"plain text"));
    }

    #[test]
    fn read_reports_binary_and_missing_files() {
        let dir = TempDir::new().expect("tempdir");
        let bin = dir.path().join("blob.txt");
        fs::write(&bin, b"a\0b").expect("write");
        assert!(matches!(read_file_safe(&bin), Err(ReadError::Binary(_))));
        assert!(matches!(
            read_file_safe(&dir.path().join("gone.rs")),
            Err(ReadError::Io { .. })
        ));
    }
}

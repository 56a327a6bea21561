//! Reading documents from disk or stdin.
//!
//! The core only sees decoded text, so size limits, binary detection and
//! UTF-8 validation happen here.

use std::fs as std_fs;
use std::io::Read;
use std::path::Path;

use memchr::memchr;
use thiserror::Error;

/// Error types for reading input documents.
#[derive(Error, Debug)]
pub enum InputError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// Input contains binary content (NULL bytes detected).
    #[error("Binary file detected")]
    BinaryFile,

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),

    /// Input is not valid UTF-8.
    #[error("UTF-8 decoding error at byte {0}")]
    Encoding(usize),
}

/// Quick binary detection - checks first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = std::cmp::min(buffer.len(), 8192);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Decode bytes as strict UTF-8.
///
/// # Errors
/// Returns `InputError::BinaryFile` for binary content and
/// `InputError::Encoding` for invalid UTF-8.
pub fn decode_buffer(buffer: Vec<u8>) -> Result<String, InputError> {
    if is_binary(&buffer) {
        return Err(InputError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|e| InputError::Encoding(e.utf8_error().valid_up_to()))
}

/// Read a text document with size and binary checks.
///
/// # Errors
/// Returns an [`InputError`] when the file is missing, too large, binary or
/// not UTF-8.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, InputError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| InputError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(InputError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

/// Read a text document from any reader (stdin for the `apply` command).
///
/// # Errors
/// Same as [`read_text_safe`], minus `NotFound`.
pub fn read_text_from<R: Read>(reader: R, max_bytes: u64) -> Result<String, InputError> {
    let mut buffer = Vec::new();
    let read = reader.take(max_bytes.saturating_add(1)).read_to_end(&mut buffer)?;
    let read = read as u64;
    if read > max_bytes {
        return Err(InputError::TooLarge(read, max_bytes));
    }
    decode_buffer(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_document() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("doc.Rmd");
        std_fs::write(&p, "See \\@ref(intro)").unwrap();
        assert_eq!(read_text_safe(&p, 1024).unwrap(), "See \\@ref(intro)");
    }

    #[test]
    fn test_binary_rejected() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("binary.bin");
        let mut file = std_fs::File::create(&p).unwrap();
        file.write_all(b"\x00\x01\x02\x03").unwrap();
        assert!(matches!(read_text_safe(&p, 1024), Err(InputError::BinaryFile)));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let result = decode_buffer(b"ok \xff\xfe".to_vec());
        assert!(matches!(result, Err(InputError::Encoding(3))));
    }

    #[test]
    fn test_file_too_large() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("large.Rmd");
        std_fs::write(&p, "12345678901234567890").unwrap();
        assert!(matches!(
            read_text_safe(&p, 10),
            Err(InputError::TooLarge(20, 10))
        ));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_text_safe("/nonexistent/file.Rmd", 1024);
        assert!(matches!(result, Err(InputError::NotFound(_))));
    }

    #[test]
    fn test_reader_limit() {
        let result = read_text_from(&b"0123456789abc"[..], 10);
        assert!(matches!(result, Err(InputError::TooLarge(11, 10))));
        assert_eq!(read_text_from(&b"short"[..], 10).unwrap(), "short");
    }
}

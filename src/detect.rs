//! Capture input format detection.

use crate::error::{Error, Result};
use serde::de::IgnoredAny;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Shape of a capture input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    /// A single capture document (JSON object)
    Document,
    /// A JSON array of capture documents
    Array,
    /// One capture document per line (JSON Lines)
    Lines,
}

impl std::fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CaptureFormat::Document => "JSON document",
            CaptureFormat::Array => "JSON array",
            CaptureFormat::Lines => "JSON Lines",
        };
        f.write_str(name)
    }
}

/// UTF-8 byte order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes read from a file for sniffing.
const SNIFF_LEN: u64 = 64 * 1024;

/// Detect the capture format from a file path.
///
/// Only the first 64 KiB are inspected.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<CaptureFormat> {
    let file = File::open(path)?;
    let mut head = Vec::new();
    BufReader::new(file).take(SNIFF_LEN).read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Detect the capture format from bytes.
///
/// # Returns
/// * `Ok(CaptureFormat)` when the data starts like JSON
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<CaptureFormat> {
    let data = strip_bom(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or(Error::UnknownFormat)?;

    match data[start] {
        b'[' => Ok(CaptureFormat::Array),
        b'{' => {
            let text = String::from_utf8_lossy(&data[start..]);
            let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
            let first_complete = lines
                .next()
                .is_some_and(|l| serde_json::from_str::<IgnoredAny>(l).is_ok());
            let more = lines.next().is_some_and(|l| l.starts_with('{'));
            if first_complete && more {
                Ok(CaptureFormat::Lines)
            } else {
                Ok(CaptureFormat::Document)
            }
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Drop a leading UTF-8 byte order mark.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(BOM).unwrap_or(data)
}

/// Check if bytes look like capture input.
pub fn is_capture_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_document() {
        let data = b"{\n  \"url\": \"https://example.com\"\n}\n";
        assert_eq!(detect_format_from_bytes(data).unwrap(), CaptureFormat::Document);
        assert_eq!(
            detect_format_from_bytes(b"{\"url\": \"a\"}").unwrap(),
            CaptureFormat::Document
        );
    }

    #[test]
    fn test_detect_lines() {
        let data = b"{\"url\": \"a\"}\n\n{\"url\": \"b\"}\n";
        assert_eq!(detect_format_from_bytes(data).unwrap(), CaptureFormat::Lines);
    }

    #[test]
    fn test_detect_array_with_bom() {
        let data = b"\xEF\xBB\xBF  [{\"url\": \"a\"}]";
        assert_eq!(detect_format_from_bytes(data).unwrap(), CaptureFormat::Array);
    }

    #[test]
    fn test_detect_invalid_format() {
        assert!(matches!(
            detect_format_from_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(detect_format_from_bytes(b"   "), Err(Error::UnknownFormat)));
        assert!(!is_capture_bytes(b""));
    }
}

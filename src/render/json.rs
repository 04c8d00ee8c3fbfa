//! JSON rendering for page analyses.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
    /// One compact document per line
    Lines,
}

impl std::str::FromStr for JsonFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(JsonFormat::Pretty),
            "compact" => Ok(JsonFormat::Compact),
            "lines" | "jsonl" | "ndjson" => Ok(JsonFormat::Lines),
            other => Err(Error::InvalidInput(format!("unknown JSON format: {}", other))),
        }
    }
}

/// Serialize a value to JSON.
///
/// `Lines` renders the value compactly, terminated by a newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
        JsonFormat::Lines => serde_json::to_string(value).map(|mut line| {
            line.push('\n');
            line
        }),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a batch, one document per line for `Lines`, otherwise as an array.
pub fn to_json_batch<T: Serialize>(values: &[T], format: JsonFormat) -> Result<String> {
    if format != JsonFormat::Lines {
        return to_json(values, format);
    }
    let mut output = String::new();
    for value in values {
        output.push_str(&to_json(value, JsonFormat::Lines)?);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, BlockType, ComposedPage, Section};

    fn page() -> ComposedPage {
        let mut section = Section::new(0, BBox::new(0.0, 0.0, 1440.0, 600.0)).with_title("Hero");
        section.block_type = Some(BlockType::HeroCentered);
        ComposedPage {
            url: "https://example.com".to_string(),
            sections: vec![section],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&page(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"url\""));
        assert!(json.contains("HeroCentered.v1"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&page(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_to_json_lines_batch() {
        let output = to_json_batch(&[page(), page()], JsonFormat::Lines).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with('{')));

        let array = to_json_batch(&[page()], JsonFormat::Compact).unwrap();
        assert!(array.starts_with('['));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("Pretty".parse::<JsonFormat>().unwrap(), JsonFormat::Pretty);
        assert_eq!("jsonl".parse::<JsonFormat>().unwrap(), JsonFormat::Lines);
        assert!("yaml".parse::<JsonFormat>().is_err());
    }
}

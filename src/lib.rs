//! # unweb
//!
//! Web page reverse-engineering library for Rust.
//!
//! This library turns a captured web page (DOM geometry, leaf content and
//! computed styles recorded by a browser collaborator) into an ordered list of
//! semantically classified sections plus a design-token palette.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unweb::{analyze_file, render, PipelineConfig};
//!
//! fn main() -> unweb::Result<()> {
//!     let config = PipelineConfig::default();
//!     for analysis in analyze_file("capture.json", &config)? {
//!         for section in &analysis.page.sections {
//!             println!("{} {:?}", section.index, section.block_type);
//!         }
//!         println!("{}", render::to_theme_css(&analysis.tokens));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Ingestion**: atoms normalized, sections extracted or zipped from payloads
//! - **Layout**: grid / split / stack per section, text-media pattern
//! - **Classification**: rule scorers with explainable reasons
//! - **Tokens**: HSL colors, fonts, radius, spacing scale, brand profile
//! - **Composition**: keyword baseline, classifier and atom-rule overrides,
//!   external overrides, per-section labels and page content assets
//! - **Parallel processing**: uses Rayon for multi-page batches

pub mod analyze;
pub mod classify;
pub mod compose;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod tokens;

pub(crate) mod text;

// Re-export commonly used types
pub use analyze::{ComposerThresholds, ExtractorConfig, PipelineConfig};
pub use classify::Classifier;
pub use compose::Composer;
pub use detect::{detect_format_from_bytes, detect_format_from_path, CaptureFormat};
pub use error::{Error, Result};
pub use model::{
    Atom, AtomKind, BBox, BlockType, Candidate, ComposedPage, DesignTokens, Family, LayoutKind,
    LayoutPattern, LayoutSchema, PageCapture, Section, SectionGroup, SemanticOverride,
    SemanticRole,
};
pub use render::JsonFormat;
pub use tokens::TokenExtractor;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analysis of one captured page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// Classified sections
    pub page: ComposedPage,
    /// Design tokens
    pub tokens: DesignTokens,
}

/// Analyze one captured page.
///
/// Never fails: degraded input yields default values and diagnostic notes.
///
/// # Example
///
/// ```
/// use unweb::{analyze_capture, PageCapture, PipelineConfig};
///
/// let analysis = analyze_capture(&PageCapture::new("https://example.com"), &PipelineConfig::default());
/// assert!(analysis.page.sections.is_empty());
/// assert_eq!(analysis.tokens.radius, "12px");
/// ```
pub fn analyze_capture(capture: &PageCapture, config: &PipelineConfig) -> PageAnalysis {
    analyze_with_overrides(capture, config, &[])
}

/// Analyze one page with extra external overrides.
///
/// The extra overrides win over those embedded in the capture.
pub fn analyze_with_overrides(
    capture: &PageCapture,
    config: &PipelineConfig,
    overrides: &[SemanticOverride],
) -> PageAnalysis {
    log::debug!("Analyzing {}", capture.url);

    log::debug!("Step 1: ingest sections");
    let mut sections = analyze::ingest(capture, config);

    log::debug!("Step 2: classify {} sections", sections.len());
    Classifier::new().annotate(&mut sections, capture.viewport.height);

    log::debug!("Step 3: extract design tokens");
    let tokens = TokenExtractor::new().extract(&capture.style_samples, &sections);

    log::debug!("Step 4: compose");
    let mut page = Composer::new(config)
        .with_overrides(overrides.to_vec())
        .compose(capture, sections, &tokens);
    if config.timestamp {
        page.analyzed_at = Some(chrono::Utc::now());
    }

    PageAnalysis { page, tokens }
}

/// Analyze a batch of pages, in parallel when the configuration allows it.
///
/// Output order matches input order.
pub fn analyze_pages(captures: &[PageCapture], config: &PipelineConfig) -> Vec<PageAnalysis> {
    if config.parallel && captures.len() > 1 {
        captures
            .par_iter()
            .map(|capture| analyze_capture(capture, config))
            .collect()
    } else {
        captures
            .iter()
            .map(|capture| analyze_capture(capture, config))
            .collect()
    }
}

/// Decode captures from bytes: a document, an array, or JSON Lines.
pub fn load_captures(data: &[u8]) -> Result<Vec<PageCapture>> {
    let data = detect::strip_bom(data);
    match detect_format_from_bytes(data)? {
        CaptureFormat::Document => Ok(vec![serde_json::from_slice(data)?]),
        CaptureFormat::Array => Ok(serde_json::from_slice(data)?),
        CaptureFormat::Lines => {
            let text = std::str::from_utf8(data)
                .map_err(|e| Error::InvalidInput(format!("capture is not UTF-8: {}", e)))?;
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| serde_json::from_str(line).map_err(Error::from))
                .collect()
        }
    }
}

/// Analyze captures from bytes.
///
/// # Example
///
/// ```
/// use unweb::{analyze_bytes, PipelineConfig};
///
/// let analyses = analyze_bytes(br#"{"url": "https://example.com"}"#, &PipelineConfig::default()).unwrap();
/// assert_eq!(analyses.len(), 1);
/// ```
pub fn analyze_bytes(data: &[u8], config: &PipelineConfig) -> Result<Vec<PageAnalysis>> {
    let captures = load_captures(data)?;
    Ok(analyze_pages(&captures, config))
}

/// Analyze captures from a string.
pub fn analyze_str(data: &str, config: &PipelineConfig) -> Result<Vec<PageAnalysis>> {
    analyze_bytes(data.as_bytes(), config)
}

/// Analyze a capture file (JSON document, array or JSON Lines).
pub fn analyze_file<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<Vec<PageAnalysis>> {
    let data = std::fs::read(path)?;
    analyze_bytes(&data, config)
}

/// Override file layouts: a bare list or `{"sections": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OverrideFile {
    List(Vec<SemanticOverride>),
    Wrapped { sections: Vec<SemanticOverride> },
}

/// Parse an external semantic override document.
pub fn parse_overrides(data: &str) -> Result<Vec<SemanticOverride>> {
    let file: OverrideFile = serde_json::from_str(data)?;
    Ok(match file {
        OverrideFile::List(list) => list,
        OverrideFile::Wrapped { sections } => sections,
    })
}

/// Read an external semantic override file.
pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<Vec<SemanticOverride>> {
    let data = std::fs::read_to_string(path)?;
    parse_overrides(&data)
}

/// Builder for analyzing captured pages.
///
/// # Example
///
/// ```no_run
/// use unweb::Unweb;
///
/// let css = Unweb::new()
///     .high_fidelity()
///     .without_media()
///     .analyze_file("capture.json")?
///     .theme_css();
/// # Ok::<(), unweb::Error>(())
/// ```
pub struct Unweb {
    config: PipelineConfig,
    overrides: Vec<SemanticOverride>,
}

impl Unweb {
    /// Create a new Unweb builder.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            overrides: Vec::new(),
        }
    }

    /// Use a full configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable layout-group refinement.
    pub fn high_fidelity(mut self) -> Self {
        self.config = self.config.with_high_fidelity(true);
        self
    }

    /// Strip media payload from composed sections.
    pub fn without_media(mut self) -> Self {
        self.config = self.config.with_keep_media(false);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.config = self.config.sequential();
        self
    }

    /// Disable navbar injection.
    pub fn without_navbar(mut self) -> Self {
        self.config = self.config.with_navbar_injection(false);
        self
    }

    /// Leave `analyzed_at` unset so repeated runs serialize identically.
    pub fn without_timestamp(mut self) -> Self {
        self.config = self.config.with_timestamp(false);
        self
    }

    /// Add external semantic overrides.
    pub fn with_overrides(mut self, overrides: Vec<SemanticOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Analyze a single capture.
    pub fn analyze(&self, capture: &PageCapture) -> UnwebResult {
        UnwebResult {
            analysis: analyze_with_overrides(capture, &self.config, &self.overrides),
        }
    }

    /// Analyze every capture in a file.
    pub fn analyze_file_all<P: AsRef<Path>>(&self, path: P) -> Result<Vec<UnwebResult>> {
        let captures = load_captures(&std::fs::read(path)?)?;
        let analyze = |capture: &PageCapture| self.analyze(capture);
        Ok(if self.config.parallel && captures.len() > 1 {
            captures.par_iter().map(analyze).collect()
        } else {
            captures.iter().map(analyze).collect()
        })
    }

    /// Analyze the first capture in a file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<UnwebResult> {
        let captures = load_captures(&std::fs::read(path)?)?;
        self.first(captures)
    }

    /// Analyze the first capture in a byte buffer.
    pub fn analyze_bytes(&self, data: &[u8]) -> Result<UnwebResult> {
        let captures = load_captures(data)?;
        self.first(captures)
    }

    fn first(&self, captures: Vec<PageCapture>) -> Result<UnwebResult> {
        let capture = captures
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidInput("no capture documents".to_string()))?;
        Ok(self.analyze(&capture))
    }
}

impl Default for Unweb {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of analyzing a captured page.
pub struct UnwebResult {
    /// The page analysis
    pub analysis: PageAnalysis,
}

impl UnwebResult {
    /// Serialize the composed page.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.analysis.page, format)
    }

    /// Serialize the design tokens.
    pub fn tokens_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.analysis.tokens, format)
    }

    /// Render the design tokens as CSS variables.
    pub fn theme_css(&self) -> String {
        render::to_theme_css(&self.analysis.tokens)
    }

    /// Render a plain-text outline.
    pub fn outline(&self) -> String {
        render::to_outline(&self.analysis.page, Some(&self.analysis.tokens))
    }

    /// Get the composed page.
    pub fn page(&self) -> &ComposedPage {
        &self.analysis.page
    }

    /// Get the design tokens.
    pub fn tokens(&self) -> &DesignTokens {
        &self.analysis.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unweb_builder() {
        let unweb = Unweb::new().high_fidelity().without_media().sequential();
        assert!(unweb.config.high_fidelity);
        assert!(!unweb.config.keep_media);
        assert!(!unweb.config.parallel);
    }

    #[test]
    fn test_unweb_builder_default() {
        let unweb = Unweb::default();
        assert!(!unweb.config.high_fidelity);
        assert!(unweb.config.inject_navbar);
        assert!(unweb.overrides.is_empty());
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_analyze_bytes_empty_data() {
        let result = analyze_bytes(b"", &PipelineConfig::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_not_json() {
        let result = analyze_bytes(b"<html></html>", &PipelineConfig::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_malformed_json() {
        let result = analyze_bytes(b"{\"url\": ", &PipelineConfig::default());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_builder_rejects_empty_array() {
        let result = Unweb::new().analyze_bytes(b"[]");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_load_captures_lines() {
        let data = b"{\"url\": \"https://a.example\"}\n{\"url\": \"https://b.example\"}\n";
        let captures = load_captures(data).unwrap();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures[1].url, "https://b.example");
    }

    #[test]
    fn test_empty_capture_analysis() {
        let analysis = analyze_capture(&PageCapture::new("https://example.com"), &PipelineConfig::default());
        assert!(analysis.page.sections.is_empty());
        assert!(analysis.page.analyzed_at.is_some());
        assert_eq!(analysis.tokens.colors.primary, tokens::DEFAULT_PRIMARY);
    }

    #[test]
    fn test_parse_overrides_layouts() {
        let list = parse_overrides(r#"[{"index": 2, "semanticRole": "FAQ"}]"#).unwrap();
        assert_eq!(list[0].semantic_role.as_deref(), Some("FAQ"));

        let wrapped =
            parse_overrides(r#"{"sections": [{"index": 1, "layout_pattern": "splitLeftImage"}]}"#)
                .unwrap();
        assert_eq!(wrapped[0].index, 1);
        assert_eq!(wrapped[0].layout_pattern.as_deref(), Some("splitLeftImage"));
    }

    #[test]
    fn test_result_renderers() {
        let result = Unweb::new().analyze(&PageCapture::new("https://example.com"));
        assert!(result.to_json(JsonFormat::Compact).unwrap().contains("\"url\""));
        assert!(result.tokens_json(JsonFormat::Pretty).unwrap().contains("\"colors\""));
        assert!(result.theme_css().starts_with(":root"));
        assert!(result.outline().contains("sections: 0"));
    }
}

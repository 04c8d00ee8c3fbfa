//! Integration tests for the end-to-end analysis pipeline

use std::io::Write;

use unweb::{
    analyze_capture, analyze_file, analyze_str, load_captures, parse_overrides, BlockType, Error,
    JsonFormat, PageCapture, PipelineConfig, Unweb,
};

const LANDING: &str = r#"{
  "url": "https://acme.test",
  "viewport": {"width": 1440, "height": 900},
  "sections": [
    {"tag": "header", "bbox": {"x": 0, "y": 0, "width": 1440, "height": 640}},
    {"bbox": {"x": 0, "y": 700, "width": 1440, "height": 600}},
    {"bbox": {"x": 0, "y": 1400, "width": 1440, "height": 600}},
    {"tag": "footer", "bbox": {"x": 0, "y": 2100, "width": 1440, "height": 300}}
  ],
  "sectionPayloads": [
    {"title": "Build faster", "headings": ["Build faster"], "texts": ["Ship your site in minutes."], "buttons": ["Get started"]},
    {"title": "Features", "texts": ["Fast builds", "Secure hosting", "Global edge"]},
    {"title": "Pricing", "texts": ["Starter $29/mo billed monthly or yearly"]},
    {"source": "footer", "texts": ["© 2024 Acme"], "links": ["Privacy", "Terms"]}
  ]
}"#;

fn no_navbar() -> PipelineConfig {
    PipelineConfig::new().with_navbar_injection(false)
}

#[test]
fn test_landing_page_archetypes() {
    let analyses = analyze_str(LANDING, &no_navbar()).unwrap();
    assert_eq!(analyses.len(), 1);

    let page = &analyses[0].page;
    assert_eq!(page.url, "https://acme.test");
    assert_eq!(page.sections.len(), 4);
    assert_eq!(page.layout_schema.len(), 4);
    assert!(page.analyzed_at.is_some());

    assert_eq!(page.sections[0].block_type, Some(BlockType::HeroCentered));
    assert_eq!(page.sections[2].block_type, Some(BlockType::PricingCards));
    assert_eq!(page.sections[3].block_type, Some(BlockType::Footer));
    assert!(!page.sections[2].content.prices.is_empty());
}

#[test]
fn test_every_section_is_resolved() {
    let analyses = analyze_str(LANDING, &PipelineConfig::default()).unwrap();
    for section in &analyses[0].page.sections {
        assert!(section.block_type.is_some());
        assert!(section.layout_schema.is_some());
        assert!(section.anchor.is_some());
    }
}

#[test]
fn test_navbar_injected_before_header() {
    let analyses = analyze_str(LANDING, &PipelineConfig::default()).unwrap();
    let page = &analyses[0].page;

    assert_eq!(page.sections.len(), 5);
    assert_eq!(page.sections[0].block_type, Some(BlockType::Navbar));
    assert_eq!(page.sections[1].block_type, Some(BlockType::HeroCentered));
    let indices: Vec<usize> = page.sections.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_analysis_is_deterministic() {
    let capture = load_captures(LANDING.as_bytes()).unwrap().remove(0);
    let config = PipelineConfig::default();

    let mut first = analyze_capture(&capture, &config);
    let mut second = analyze_capture(&capture, &config);
    first.page.analyzed_at = None;
    second.page.analyzed_at = None;
    assert_eq!(first, second);
}

#[test]
fn test_untimed_output_is_byte_identical() {
    let unweb = Unweb::new().without_timestamp();
    let first = unweb.analyze_bytes(LANDING.as_bytes()).unwrap();
    let second = unweb.analyze_bytes(LANDING.as_bytes()).unwrap();

    assert!(first.page().analyzed_at.is_none());
    let json = first.to_json(JsonFormat::Pretty).unwrap();
    assert_eq!(json, second.to_json(JsonFormat::Pretty).unwrap());
    assert!(!json.contains("analyzedAt"));
    assert_eq!(
        first.tokens_json(JsonFormat::Compact).unwrap(),
        second.tokens_json(JsonFormat::Compact).unwrap()
    );
}

#[test]
fn test_parallel_matches_sequential() {
    let lines = format!(
        "{}\n{}\n{}\n",
        LANDING.replace('\n', ""),
        r#"{"url": "https://empty.test"}"#,
        LANDING.replace('\n', "").replace("acme.test", "other.test")
    );

    let mut parallel = analyze_str(&lines, &PipelineConfig::default()).unwrap();
    let mut sequential = analyze_str(&lines, &PipelineConfig::default().sequential()).unwrap();
    assert_eq!(parallel.len(), 3);
    for analysis in parallel.iter_mut().chain(sequential.iter_mut()) {
        analysis.page.analyzed_at = None;
    }
    assert_eq!(parallel, sequential);
    assert_eq!(parallel[1].page.url, "https://empty.test");
    assert_eq!(parallel[2].page.url, "https://other.test");
}

#[test]
fn test_empty_capture_yields_defaults() {
    let analysis = analyze_capture(&PageCapture::new("https://blank.test"), &PipelineConfig::default());
    assert!(analysis.page.sections.is_empty());
    assert!(analysis.page.groups.is_empty());
    assert_eq!(analysis.tokens.radius, "12px");
    assert_eq!(analysis.tokens.typography.body, "Inter");
}

#[test]
fn test_missing_geometry_is_noted() {
    let json = r#"{
      "url": "https://broken.test",
      "sections": [{"title": "Orphan"}],
      "sectionPayloads": [{"texts": ["No box here"]}]
    }"#;
    let analyses = analyze_str(json, &no_navbar()).unwrap();
    let section = &analyses[0].page.sections[0];
    assert!(section.notes.contains(&"malformed:missing_bbox".to_string()));
    assert_eq!(section.title, "Orphan");
    assert!(section.block_type.is_some());
}

#[test]
fn test_analyze_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LANDING.as_bytes()).unwrap();

    let analyses = analyze_file(file.path(), &no_navbar()).unwrap();
    assert_eq!(analyses[0].page.sections.len(), 4);

    let result = Unweb::new().without_navbar().analyze_file(file.path()).unwrap();
    assert_eq!(result.page().sections.len(), 4);
    assert!(result.theme_css().starts_with(":root {"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = analyze_file(dir.path().join("missing.json"), &PipelineConfig::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_not_json_is_rejected() {
    let result = analyze_str("<html><body></body></html>", &PipelineConfig::default());
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

#[test]
fn test_builder_overrides_win() {
    let overrides = parse_overrides(r#"{"sections": [{"index": 1, "blockType": "StatsKPI.v1"}]}"#).unwrap();
    let result = Unweb::new()
        .without_navbar()
        .with_overrides(overrides)
        .analyze_bytes(LANDING.as_bytes())
        .unwrap();

    let section = &result.page().sections[1];
    assert_eq!(section.block_type, Some(BlockType::StatsKpi));
    assert!(section.notes.contains(&"external:StatsKPI.v1".to_string()));
}

#[test]
fn test_json_lines_output() {
    let result = Unweb::new().without_navbar().analyze_bytes(LANDING.as_bytes()).unwrap();
    let line = result.to_json(JsonFormat::Lines).unwrap();
    assert!(line.ends_with('\n'));
    assert_eq!(line.trim_end().lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["url"], "https://acme.test");
}

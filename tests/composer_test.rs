//! Integration tests for section extraction, grouping and composition

use unweb::classify::AMBIGUOUS_NOTE;
use unweb::model::{ElementDescriptor, RawAtom};
use unweb::{
    analyze_capture, analyze_with_overrides, BBox, BlockType, Classifier, Composer, Family,
    LayoutSchema, PageCapture, PipelineConfig, Section, SemanticOverride, TokenExtractor,
};

/// A header, a logo strip inside `main` and a footer, described by elements and atoms.
fn element_capture() -> PageCapture {
    let mut capture = PageCapture::new("https://logos.test");
    capture.elements = vec![
        ElementDescriptor::new("header", BBox::new(0.0, 0.0, 1440.0, 600.0)),
        ElementDescriptor::new("section", BBox::new(0.0, 650.0, 1440.0, 500.0)).with_parent("main"),
        ElementDescriptor::new("footer", BBox::new(0.0, 1200.0, 1440.0, 300.0)),
        // near-duplicate of the logo strip
        ElementDescriptor::new("div", BBox::new(4.0, 654.0, 1432.0, 492.0)).with_class("logo-section"),
    ];

    let mut atoms = vec![
        RawAtom::new("h1", "Build faster", BBox::new(200.0, 120.0, 600.0, 80.0)),
        RawAtom::new("p", "Ship your site in minutes.", BBox::new(200.0, 220.0, 600.0, 40.0)),
        RawAtom::new("h2", "Our partners", BBox::new(200.0, 680.0, 400.0, 40.0)),
        RawAtom::new("p", "Teams everywhere", BBox::new(200.0, 740.0, 400.0, 30.0)),
        RawAtom::new("p", "rely on us", BBox::new(700.0, 740.0, 400.0, 30.0)),
    ];
    for i in 0..6 {
        atoms.push(RawAtom::new("img", "", BBox::new(40.0 + i as f64 * 220.0, 900.0, 120.0, 60.0)));
    }
    atoms.push(RawAtom::new("a", "Privacy", BBox::new(40.0, 1300.0, 80.0, 20.0)));
    atoms.push(RawAtom::new("a", "Terms", BBox::new(140.0, 1300.0, 80.0, 20.0)));
    capture.atoms = atoms;
    capture
}

fn no_navbar() -> PipelineConfig {
    PipelineConfig::new().with_navbar_injection(false)
}

#[test]
fn test_extracted_sections_follow_page_order() {
    let analysis = analyze_capture(&element_capture(), &no_navbar());
    let page = &analysis.page;

    assert_eq!(page.sections.len(), 3);
    let tags: Vec<Option<&str>> = page.sections.iter().map(|s| s.tag.as_deref()).collect();
    assert_eq!(tags, vec![Some("header"), Some("section"), Some("footer")]);
    assert_eq!(page.sections[1].title, "Our partners");
    assert_eq!(page.sections[1].stats.images, 6);
}

#[test]
fn test_logo_strip_beats_feature_grid() {
    let analysis = analyze_capture(&element_capture(), &no_navbar());
    let logos = &analysis.page.sections[1];

    assert_eq!(logos.block_type, Some(BlockType::LogoCloud));
    assert!(logos.score_of(BlockType::LogoCloud) >= 85);
    assert!(logos.score_of(BlockType::LogoCloud) > logos.score_of(BlockType::FeatureGrid));
}

#[test]
fn test_footer_keeps_its_type() {
    let mut capture = element_capture();
    capture
        .atoms
        .push(RawAtom::new("p", "Plans from $99/mo", BBox::new(600.0, 1300.0, 200.0, 20.0)));
    let analysis = analyze_capture(&capture, &no_navbar());

    let footer = &analysis.page.sections[2];
    assert_eq!(footer.source, "footer");
    assert_eq!(footer.block_type, Some(BlockType::Footer));
    assert_eq!(footer.layout_schema, Some(LayoutSchema::Footer));
    assert_eq!(footer.candidates[0].block_type, BlockType::Footer);
}

#[test]
fn test_external_override_wins_over_footer() {
    let overrides = vec![SemanticOverride {
        index: 2,
        semantic_role: Some("CTA".to_string()),
        ..Default::default()
    }];
    let analysis = analyze_with_overrides(&element_capture(), &no_navbar(), &overrides);

    let section = &analysis.page.sections[2];
    assert_eq!(section.block_type, Some(BlockType::LeadCaptureCta));
    assert!(section.notes.contains(&"external:LeadCaptureCTA.v1".to_string()));
}

#[test]
fn test_navbar_injection_shifts_groups() {
    let plain = analyze_capture(&element_capture(), &no_navbar()).page;
    let injected = analyze_capture(&element_capture(), &PipelineConfig::default()).page;

    assert_eq!(injected.sections.len(), plain.sections.len() + 1);
    assert_eq!(injected.sections[0].block_type, Some(BlockType::Navbar));
    assert_eq!(injected.sections[2].block_type, plain.sections[1].block_type);
    assert_eq!(injected.groups.len(), plain.groups.len());
    for (shifted, original) in injected.groups.iter().zip(&plain.groups) {
        let expected: Vec<usize> = original.indices.iter().map(|i| i + 1).collect();
        assert_eq!(shifted.indices, expected);
    }
}

#[test]
fn test_groups_partition_sections() {
    let page = analyze_capture(&element_capture(), &no_navbar()).page;

    let mut indices: Vec<usize> = page.groups.iter().flat_map(|g| g.indices.clone()).collect();
    indices.sort_unstable();
    let expected: Vec<usize> = (0..page.sections.len()).collect();
    assert_eq!(indices, expected);
}

#[test]
fn test_media_can_be_dropped() {
    let config = no_navbar().with_keep_media(false);
    let page = analyze_capture(&element_capture(), &config).page;
    assert!(page.sections.iter().all(|s| s.content.images.is_empty()));
    assert_eq!(page.sections[1].block_type, Some(BlockType::LogoCloud));
}

#[test]
fn test_ambiguous_section_keeps_skeleton_family() {
    let filler = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor ";
    let mut sections: Vec<Section> = (0..6)
        .map(|i| {
            let mut section = Section::new(i, BBox::new(0.0, i as f64 * 700.0, 1440.0, 600.0))
                .with_title("Lorem");
            section.content.texts.push(filler.repeat(3));
            section
        })
        .collect();
    let capture = PageCapture::new("https://lorem.test");
    let config = no_navbar();

    Classifier::new().annotate(&mut sections, capture.viewport.height);
    assert_eq!(sections[2].family, Family::Skeleton);

    let tokens = TokenExtractor::new().extract(&capture.style_samples, &sections);
    let page = Composer::new(&config).compose(&capture, sections, &tokens);

    let middle = &page.sections[2];
    assert_eq!(middle.block_type, Some(BlockType::FeatureGrid));
    assert_eq!(middle.family, Family::Skeleton);
    assert!(middle.notes.contains(&AMBIGUOUS_NOTE.to_string()));
}

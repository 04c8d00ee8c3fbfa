//! Synthesized navigation bar.

use crate::model::{
    BBox, BlockType, Candidate, ElementDescriptor, LayoutSchema, LinkItem, Section, StyleHints,
};
use crate::text::slugify;

/// Note on injected sections.
pub const INJECTED_NOTE: &str = "injected:navbar";

/// Links taken from section titles.
const MAX_NAV_LINKS: usize = 5;

/// Nominal navbar height (px).
const NAV_HEIGHT: f64 = 64.0;

/// Check whether the page shows navigation.
///
/// A nav/header container in the upper half of the first viewport, a `nav`
/// element, or at least three links anywhere.
pub fn has_nav_hint(sections: &[Section], elements: &[ElementDescriptor], viewport_height: f64) -> bool {
    let container = sections.iter().any(|s| {
        let tag = s.tag.as_deref().unwrap_or("").to_ascii_lowercase();
        let class = s.class_name.as_deref().unwrap_or("").to_ascii_lowercase();
        let named = ["nav", "header"]
            .iter()
            .any(|w| tag.contains(w) || class.contains(w));
        named && s.bbox.y <= viewport_height * 0.5
    });
    if container {
        return true;
    }
    if elements.iter().any(|e| e.tag.eq_ignore_ascii_case("nav")) {
        return true;
    }
    sections.iter().map(|s| s.content.links.len()).sum::<usize>() >= 3
}

/// Build a navbar from the composed sections.
pub fn navbar_section(sections: &[Section], viewport_width: f64) -> Section {
    let mut nav = Section::new(0, BBox::new(0.0, 0.0, viewport_width, NAV_HEIGHT)).with_title("Navbar");

    let mut links: Vec<LinkItem> = Vec::new();
    for section in sections.iter().skip(1) {
        if links.len() >= MAX_NAV_LINKS {
            break;
        }
        let label = section.title.trim();
        let slug = slugify(label);
        if slug.is_empty() || links.iter().any(|l| l.label == label) {
            continue;
        }
        links.push(LinkItem {
            label: label.to_string(),
            href: Some(format!("#{}", slug)),
        });
    }
    nav.content.links = links;

    let page_button = sections
        .iter()
        .flat_map(|s| s.content.buttons.iter())
        .find(|b| !b.label.trim().is_empty() && b.href.is_some())
        .cloned();
    let has_contact = sections.iter().any(|s| {
        matches!(
            s.block_type,
            Some(BlockType::ContactSection | BlockType::LeadCaptureCta)
        )
    });
    let button = page_button.or_else(|| {
        has_contact.then(|| LinkItem {
            label: "Contact Us".to_string(),
            href: Some("#contact".to_string()),
        })
    });
    let variant = if button.is_some() { "withCTA" } else { "simple" };
    nav.variant = Some(variant.to_string());
    nav.content.buttons.extend(button);

    nav.block_type = Some(BlockType::Navbar);
    nav.family = BlockType::Navbar.family();
    nav.candidates = vec![Candidate::new(BlockType::Navbar, 100).with_reason("injected:100")];
    nav.layout_schema = Some(LayoutSchema::Section);
    nav.intent_tags = vec!["navigation".to_string()];
    nav.anchor = Some("top".to_string());
    nav.style_hints = Some(StyleHints {
        padding_y: Some("sm".to_string()),
        ..Default::default()
    });
    nav.note(INJECTED_NOTE);
    nav
}

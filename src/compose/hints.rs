//! Rendering hints from section styles and geometry.

use crate::model::{AtomKind, AtomStyles, Section, StyleHints};
use crate::text::parse_px;
use std::collections::BTreeMap;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const BODY_TAGS: &[&str] = &["p", "span", "li", "a", "button"];

/// Derive style hints for a section.
///
/// Styled nodes are preferred; atoms stand in when no nodes were sampled.
pub fn style_hints(section: &Section, viewport_height: f64) -> StyleHints {
    let nodes: Vec<(&str, &AtomStyles)> = if section.computed_styles.nodes.is_empty() {
        section
            .atoms
            .iter()
            .map(|a| {
                let tag = if a.kind == AtomKind::Heading && !HEADING_TAGS.contains(&a.tag.as_str()) {
                    "h2"
                } else {
                    a.tag.as_str()
                };
                (tag, &a.styles)
            })
            .collect()
    } else {
        section
            .computed_styles
            .nodes
            .iter()
            .map(|n| (n.tag.as_str(), &n.styles))
            .collect()
    };

    let headings: Vec<&AtomStyles> = nodes
        .iter()
        .filter(|(tag, _)| HEADING_TAGS.contains(tag))
        .map(|(_, s)| *s)
        .collect();
    let body: Vec<&AtomStyles> = nodes
        .iter()
        .filter(|(tag, _)| BODY_TAGS.contains(tag))
        .map(|(_, s)| *s)
        .collect();

    StyleHints {
        align: align(nodes.iter().map(|(_, s)| *s)),
        padding_y: padding_y(section, viewport_height),
        heading_font: most_common(headings.iter().filter_map(|s| s.font_family.as_deref())),
        body_font: most_common(body.iter().filter_map(|s| s.font_family.as_deref())),
        heading_size: median_px(headings.iter().filter_map(|s| s.font_size.as_deref()))
            .map(|px| size_label(px, 20.0, 28.0)),
        body_size: median_px(body.iter().filter_map(|s| s.font_size.as_deref()))
            .map(|px| size_label(px, 14.0, 18.0)),
        has_gradient: !section.content.gradients.is_empty(),
    }
}

fn align<'a>(styles: impl Iterator<Item = &'a AtomStyles>) -> Option<String> {
    let value = most_common(styles.filter_map(|s| s.text_align.as_deref()))?;
    match value.as_str() {
        "center" => Some("center".to_string()),
        "left" | "right" | "start" => Some("left".to_string()),
        _ => None,
    }
}

fn padding_y(section: &Section, viewport_height: f64) -> Option<String> {
    let summary_padding = section
        .computed_styles
        .summary
        .padding
        .first()
        .and_then(|p| parse_px(&p.value));
    if let Some(px) = summary_padding {
        return Some(size_label(px, 16.0, 28.0));
    }
    let height = section.bbox.height;
    if height <= 0.0 || viewport_height <= 0.0 {
        return None;
    }
    Some(size_label(height, viewport_height * 0.33, viewport_height * 0.6))
}

fn size_label(value: f64, small: f64, medium: f64) -> String {
    let label = if value <= small {
        "sm"
    } else if value <= medium {
        "md"
    } else {
        "lg"
    };
    label.to_string()
}

/// Most frequent value; ties go to the smaller value.
fn most_common<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.map(str::trim).filter(|v| !v.is_empty()) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value.to_string())
}

fn median_px<'a>(values: impl Iterator<Item = &'a str>) -> Option<f64> {
    let mut sizes: Vec<f64> = values.filter_map(parse_px).collect();
    if sizes.is_empty() {
        return None;
    }
    sizes.sort_by(f64::total_cmp);
    Some(sizes[sizes.len() / 2])
}

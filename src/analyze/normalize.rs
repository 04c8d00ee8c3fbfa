//! Atom normalization and canonical section ingestion.
//!
//! Capture payloads arrive in several shapes (flat or nested under
//! `content`, boxes with or without geometry). Everything downstream works on
//! the canonical [`Section`] produced here.

use super::options::{ExtractorConfig, PipelineConfig};
use crate::model::{
    Atom, AtomKind, AtomRole, AtomStats, AtomStyles, BBox, ComputedStyles, LinkItem, MediaItem,
    PageCapture, RawAtom, Section, SectionBox, SectionContent, SectionPayload, StyleCount,
    StyleSummary,
};
use crate::text::{self, PRICE};
use crate::tokens::color::is_transparent;
use std::collections::BTreeMap;

/// Maximum characters kept for atom text and placeholders.
pub const MAX_ATOM_TEXT: usize = 160;

/// Entries kept per style summary list.
const SUMMARY_LIMIT: usize = 5;

/// Reduces raw leaf nodes to [`Atom`]s.
#[derive(Debug, Clone)]
pub struct AtomNormalizer {
    min_size: f64,
    max_atoms: usize,
}

impl AtomNormalizer {
    /// Create a normalizer from extraction thresholds.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            min_size: config.min_atom_size,
            max_atoms: config.max_atoms,
        }
    }

    /// Normalize one raw node; `None` for nodes without usable geometry.
    pub fn normalize(&self, raw: &RawAtom) -> Option<Atom> {
        let bbox = raw.bbox?;
        if bbox.width < self.min_size || bbox.height < self.min_size {
            return None;
        }

        let tag = raw.tag.trim().to_ascii_lowercase();
        let kind = raw
            .kind
            .as_deref()
            .and_then(AtomKind::parse)
            .unwrap_or_else(|| AtomKind::from_tag(&tag));

        let styles = clean_styles(&raw.styles);
        let role = atom_role(kind, &styles);

        Some(Atom {
            kind,
            tag,
            text: text::clean(&raw.text, MAX_ATOM_TEXT),
            placeholder: raw
                .placeholder
                .as_deref()
                .map(|p| text::clean(p, MAX_ATOM_TEXT))
                .filter(|p| !p.is_empty()),
            input_type: raw.input_type.clone(),
            href: raw.href.clone().filter(|h| !h.is_empty()),
            src: raw.src.clone().filter(|s| !s.is_empty()),
            bbox,
            styles,
            role,
            normalized_styles: BTreeMap::new(),
        })
    }

    /// Normalize nodes in order, keeping at most `max_atoms`.
    pub fn normalize_all(&self, raws: &[RawAtom]) -> Vec<Atom> {
        raws.iter()
            .filter_map(|raw| self.normalize(raw))
            .take(self.max_atoms)
            .collect()
    }

    /// Maximum atoms per section.
    pub fn max_atoms(&self) -> usize {
        self.max_atoms
    }
}

/// Blank out transparent colors so they never reach aggregation.
fn clean_styles(styles: &AtomStyles) -> AtomStyles {
    let mut cleaned = styles.clone();
    if cleaned.color.as_deref().is_some_and(is_transparent) {
        cleaned.color = None;
    }
    if cleaned.background_color.as_deref().is_some_and(is_transparent) {
        cleaned.background_color = None;
    }
    cleaned
}

/// Filled links and buttons are primary CTAs; the rest are secondary.
fn atom_role(kind: AtomKind, styles: &AtomStyles) -> Option<AtomRole> {
    if !kind.is_interactive() {
        return None;
    }
    if styles.background_color.is_some() {
        Some(AtomRole::CtaMain)
    } else {
        Some(AtomRole::CtaSecondary)
    }
}

/// Build the canonical sections of a capture.
///
/// Captures with element descriptors go through the section extractor;
/// pre-segmented captures zip `sections` with `sectionPayloads`.
pub fn ingest(capture: &PageCapture, config: &PipelineConfig) -> Vec<Section> {
    if !capture.elements.is_empty() {
        log::debug!(
            "Ingesting {} element candidates through the extractor",
            capture.elements.len()
        );
        return super::SectionExtractor::with_config(config.extractor.clone()).extract(capture);
    }

    let normalizer = AtomNormalizer::new(&config.extractor);
    let count = capture.section_count();
    log::debug!("Ingesting {} pre-segmented sections", count);

    (0..count)
        .map(|index| {
            section_from_payload(
                index,
                capture.sections.get(index),
                capture.section_payloads.get(index),
                &normalizer,
            )
        })
        .collect()
}

/// Build one canonical section from a box and its payload.
///
/// Missing geometry or payload degrades to defaults with a diagnostic note.
pub fn section_from_payload(
    index: usize,
    section_box: Option<&SectionBox>,
    payload: Option<&SectionPayload>,
    normalizer: &AtomNormalizer,
) -> Section {
    let resolved = payload.map(SectionPayload::resolved).unwrap_or_default();

    let geometry = section_box
        .and_then(SectionBox::geometry)
        .or_else(|| payload.and_then(|p| p.bbox));
    let mut section = Section::new(index, geometry.unwrap_or_default());
    if geometry.is_none() {
        log::warn!("Section {} has no bounding box, using defaults", index);
        section.note("malformed:missing_bbox");
    }
    if payload.is_none() {
        section.note("malformed:missing_payload");
    }

    section.atoms = normalizer.normalize_all(&resolved.atoms);
    section.stats = payload
        .and_then(|p| p.stats)
        .unwrap_or_else(|| AtomStats::from_atoms(&section.atoms));

    section.content = SectionContent {
        texts: clean_all(&resolved.texts),
        headings: clean_all(&resolved.headings),
        buttons: resolved.buttons.iter().cloned().map(LinkItem::from).collect(),
        links: resolved.links.iter().cloned().map(LinkItem::from).collect(),
        lists: resolved.lists.clone(),
        images: resolved.images.iter().cloned().map(MediaItem::from).collect(),
        videos: resolved.videos.iter().cloned().map(MediaItem::from).collect(),
        backgrounds: resolved.backgrounds.clone(),
        gradients: resolved.gradients.clone(),
        prices: resolved.prices.clone(),
    };
    if is_content_empty(&section.content) && !section.atoms.is_empty() {
        section.content = content_from_atoms(&section.atoms);
    }
    if section.content.prices.is_empty() {
        section.content.prices = extract_prices(&section.content_text());
    }

    section.computed_styles = resolved.computed_styles.unwrap_or_else(ComputedStyles::default);
    if section.computed_styles.summary.is_empty() && !section.atoms.is_empty() {
        section.computed_styles.summary = summarize_styles(&section.atoms);
    }

    if let Some(b) = section_box {
        section.tag = b.tag.as_ref().map(|t| t.to_ascii_lowercase());
        section.class_name = b.class_name.clone();
    }
    section.card_count = payload
        .and_then(|p| p.card_count)
        .or_else(|| section_box.and_then(|b| b.card_count))
        .unwrap_or(0);

    let title = resolved
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| section_box.and_then(|b| b.title.clone()))
        .map(|t| text::clean(&t, MAX_ATOM_TEXT))
        .unwrap_or_else(|| default_title(&section));
    let source = payload
        .and_then(|p| p.source.clone())
        .or_else(|| skeleton_tag(section.tag.as_deref()))
        .unwrap_or_else(|| title.clone());
    section.title = title;
    section.source = source;

    section
}

/// First heading, then first heading atom, then a positional name.
pub(crate) fn default_title(section: &Section) -> String {
    section
        .content
        .headings
        .first()
        .cloned()
        .or_else(|| {
            section
                .atoms_of(AtomKind::Heading)
                .map(|a| a.text.clone())
                .find(|t| !t.is_empty())
        })
        .unwrap_or_else(|| format!("Section {}", section.index + 1))
}

/// Container tags that name the section on their own.
pub(crate) fn skeleton_tag(tag: Option<&str>) -> Option<String> {
    match tag {
        Some(tag @ ("header" | "footer" | "nav")) => Some(tag.to_string()),
        _ => None,
    }
}

fn clean_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| text::clean(v, usize::MAX))
        .filter(|v| !v.is_empty())
        .collect()
}

fn is_content_empty(content: &SectionContent) -> bool {
    content.texts.is_empty()
        && content.headings.is_empty()
        && content.buttons.is_empty()
        && content.links.is_empty()
        && content.images.is_empty()
        && content.videos.is_empty()
}

/// Unique price strings in order of appearance.
pub fn extract_prices(text: &str) -> Vec<String> {
    let mut prices: Vec<String> = Vec::new();
    for found in PRICE.find_all(text) {
        let found = found.trim().to_string();
        if !prices.contains(&found) {
            prices.push(found);
        }
    }
    prices
}

/// Derive a text/media payload from atoms.
pub fn content_from_atoms(atoms: &[Atom]) -> SectionContent {
    let mut content = SectionContent::default();
    for atom in atoms {
        let label = atom.text.clone();
        match atom.kind {
            AtomKind::Heading if !label.is_empty() => content.headings.push(label),
            AtomKind::Text if !label.is_empty() => content.texts.push(label),
            AtomKind::Button => content.buttons.push(LinkItem {
                label,
                href: atom.href.clone(),
            }),
            AtomKind::Link => content.links.push(LinkItem {
                label,
                href: atom.href.clone(),
            }),
            AtomKind::Image => {
                if let Some(src) = &atom.src {
                    content.images.push(MediaItem {
                        src: src.clone(),
                        alt: (!label.is_empty()).then_some(label),
                    });
                }
            }
            AtomKind::Video => {
                if let Some(src) = &atom.src {
                    content.videos.push(MediaItem {
                        src: src.clone(),
                        alt: None,
                    });
                }
            }
            _ => {}
        }
    }
    content
}

/// Top style values across atoms, transparent values excluded.
pub fn summarize_styles(atoms: &[Atom]) -> StyleSummary {
    let mut fonts = BTreeMap::new();
    let mut text_colors = BTreeMap::new();
    let mut bg_colors = BTreeMap::new();
    let mut radius = BTreeMap::new();
    let mut padding = BTreeMap::new();
    let mut margin = BTreeMap::new();
    let mut font_sizes = BTreeMap::new();

    fn bump(map: &mut BTreeMap<String, u64>, value: &Option<String>) {
        if let Some(v) = value.as_deref().map(str::trim) {
            if !v.is_empty() && !is_transparent(v) {
                *map.entry(v.to_string()).or_insert(0) += 1;
            }
        }
    }

    for atom in atoms {
        let s = &atom.styles;
        bump(&mut fonts, &s.font_family);
        bump(&mut text_colors, &s.color);
        bump(&mut bg_colors, &s.background_color);
        bump(&mut radius, &s.border_radius);
        bump(&mut padding, &s.padding);
        bump(&mut margin, &s.margin);
        bump(&mut font_sizes, &s.font_size);
    }

    StyleSummary {
        fonts: top_counts(&fonts, SUMMARY_LIMIT),
        text_colors: top_counts(&text_colors, SUMMARY_LIMIT),
        bg_colors: top_counts(&bg_colors, SUMMARY_LIMIT),
        radius: top_counts(&radius, SUMMARY_LIMIT),
        padding: top_counts(&padding, SUMMARY_LIMIT),
        margin: top_counts(&margin, SUMMARY_LIMIT),
        font_sizes: top_counts(&font_sizes, SUMMARY_LIMIT),
    }
}

/// Most frequent entries; ties keep value order.
pub(crate) fn top_counts(map: &BTreeMap<String, u64>, limit: usize) -> Vec<StyleCount> {
    let mut entries: Vec<StyleCount> = map
        .iter()
        .map(|(value, count)| StyleCount {
            value: value.clone(),
            count: *count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

/// Fill the derived fields of an extracted section once its atoms are assigned.
pub(crate) fn finish_extracted(section: &mut Section, max_atoms: usize) {
    section.atoms.truncate(max_atoms);
    section.stats = AtomStats::from_atoms(&section.atoms);
    section.content = content_from_atoms(&section.atoms);
    section.content.prices = extract_prices(&section.content_text());
    section.computed_styles.summary = summarize_styles(&section.atoms);
    if section.title.is_empty() {
        section.title = default_title(section);
    }
    if section.source.is_empty() {
        section.source = skeleton_tag(section.tag.as_deref()).unwrap_or_else(|| section.title.clone());
    }
}

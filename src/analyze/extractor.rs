//! Section extraction from container candidates.
//!
//! Candidates are collected from a fixed selector priority list, filtered by
//! size, ordered top-to-bottom and de-duplicated with greedy IoU suppression.
//! Page-level atoms are then handed to exactly one accepted section each.

use super::normalize::{finish_extracted, AtomNormalizer};
use super::options::ExtractorConfig;
use crate::model::{Atom, BBox, ElementDescriptor, PageCapture, Section};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Container selectors, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorHint {
    /// `header`
    Header,
    /// `main > *`
    MainChild,
    /// `main section`
    MainSection,
    /// `footer`
    Footer,
    /// `[data-section]`
    DataSection,
    /// `[data-block]`
    DataBlock,
    /// `[class*="section"]`
    SectionClass,
    /// `[class*="block"]`
    BlockClass,
}

impl SelectorHint {
    /// All selectors in collection order.
    pub const PRIORITY: [SelectorHint; 8] = [
        SelectorHint::Header,
        SelectorHint::MainChild,
        SelectorHint::MainSection,
        SelectorHint::Footer,
        SelectorHint::DataSection,
        SelectorHint::DataBlock,
        SelectorHint::SectionClass,
        SelectorHint::BlockClass,
    ];

    /// Check whether an element matches this selector.
    pub fn matches(&self, element: &ElementDescriptor) -> bool {
        let tag = element.tag.to_ascii_lowercase();
        let class = element
            .class_name
            .as_deref()
            .unwrap_or("")
            .to_ascii_lowercase();
        match self {
            SelectorHint::Header => tag == "header",
            SelectorHint::MainChild => element
                .parent_tag
                .as_deref()
                .is_some_and(|p| p.eq_ignore_ascii_case("main")),
            SelectorHint::MainSection => {
                tag == "section"
                    && element
                        .ancestors
                        .iter()
                        .any(|a| a.eq_ignore_ascii_case("main"))
            }
            SelectorHint::Footer => tag == "footer",
            SelectorHint::DataSection => element.attributes.contains_key("data-section"),
            SelectorHint::DataBlock => element.attributes.contains_key("data-block"),
            SelectorHint::SectionClass => class.contains("section"),
            SelectorHint::BlockClass => class.contains("block"),
        }
    }
}

/// Extracts sections from element descriptors.
pub struct SectionExtractor {
    config: ExtractorConfig,
}

impl SectionExtractor {
    /// Create a new extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// Create a new extractor with custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract sections from a capture's elements and page-level atoms.
    pub fn extract(&self, capture: &PageCapture) -> Vec<Section> {
        let accepted = self.select(&capture.elements, capture.viewport.width);

        let mut sections: Vec<Section> = accepted
            .iter()
            .enumerate()
            .map(|(index, &element_index)| {
                let element = &capture.elements[element_index];
                let mut section = Section::new(index, element.bbox);
                section.tag = Some(element.tag.to_ascii_lowercase());
                section.class_name = element.class_name.clone();
                section.card_count = element.card_count;
                section
            })
            .collect();

        // Step 5: hand every atom to one owner
        let normalizer = AtomNormalizer::new(&self.config);
        let atoms: Vec<Atom> = capture
            .atoms
            .iter()
            .filter_map(|raw| normalizer.normalize(raw))
            .collect();
        let boxes: Vec<BBox> = sections.iter().map(|s| s.bbox).collect();
        let mut orphans = 0usize;
        for atom in atoms {
            match assign_owner(&boxes, &atom.bbox) {
                Some(owner) => sections[owner].atoms.push(atom),
                None => orphans += 1,
            }
        }
        if orphans > 0 {
            log::warn!("SectionExtractor: {} atoms without any section", orphans);
        }

        for section in &mut sections {
            finish_extracted(section, normalizer.max_atoms());
        }

        log::debug!("SectionExtractor: extracted {} sections", sections.len());
        sections
    }

    /// Select accepted element indices, in page order.
    ///
    /// Guarantees: result length ≤ candidate count, and no two accepted boxes
    /// overlap by more than the IoU threshold.
    pub fn select(&self, elements: &[ElementDescriptor], viewport_width: f64) -> Vec<usize> {
        // Step 1: collect candidates by selector priority
        let mut seen: HashSet<usize> = HashSet::new();
        let mut candidates: Vec<usize> = Vec::new();
        for hint in SelectorHint::PRIORITY {
            for (i, element) in elements.iter().enumerate() {
                if !seen.contains(&i) && hint.matches(element) {
                    seen.insert(i);
                    candidates.push(i);
                }
            }
        }
        log::debug!(
            "SectionExtractor: {} candidates from {} elements",
            candidates.len(),
            elements.len()
        );

        // Step 2: reject undersized containers
        let min_width = self.config.min_width_for(viewport_width);
        candidates.retain(|&i| {
            let bbox = &elements[i].bbox;
            bbox.height >= self.config.min_height && bbox.width >= min_width
        });

        // Step 3: top-to-bottom, taller first on ties
        candidates.sort_by(|&a, &b| compare_top_then_height(&elements[a].bbox, &elements[b].bbox));

        // Step 4: greedy IoU suppression, first seen wins
        let mut accepted: Vec<usize> = Vec::new();
        for i in candidates {
            let bbox = &elements[i].bbox;
            let duplicate = accepted
                .iter()
                .any(|&j| bbox.iou(&elements[j].bbox) > self.config.iou_threshold);
            if duplicate {
                log::debug!("SectionExtractor: suppressed <{}> at y={}", elements[i].tag, bbox.y);
            } else {
                accepted.push(i);
            }
        }
        accepted
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn compare_top_then_height(a: &BBox, b: &BBox) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| b.height.total_cmp(&a.height))
}

/// Smallest box containing the atom center, else the vertically nearest box.
fn assign_owner(boxes: &[BBox], atom: &BBox) -> Option<usize> {
    let (cx, cy) = (atom.center_x(), atom.center_y());

    let containing = boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.contains_point(cx, cy))
        .min_by(|(i, a), (j, b)| a.area().total_cmp(&b.area()).then(i.cmp(j)));
    if let Some((index, _)) = containing {
        return Some(index);
    }

    boxes
        .iter()
        .enumerate()
        .min_by(|(i, a), (j, b)| {
            (a.center_y() - cy)
                .abs()
                .total_cmp(&(b.center_y() - cy).abs())
                .then(i.cmp(j))
        })
        .map(|(index, _)| index)
}

//! Visual grouping of vertically adjacent sections.

use super::layout::infer_layout;
use crate::model::{GroupedSection, Hotspot, Section, SectionGroup};

/// Clusters sections separated by small vertical gaps.
pub struct SectionGrouper {
    gap: f64,
}

impl SectionGrouper {
    /// Create a grouper with the given gap threshold (px).
    pub fn new(gap: f64) -> Self {
        Self { gap }
    }

    /// Group sections in top-to-bottom order.
    ///
    /// A new group starts whenever the gap between a section's top and the
    /// lowest bottom seen so far exceeds the threshold.
    pub fn group(&self, sections: &[Section]) -> Vec<SectionGroup> {
        let mut order: Vec<&Section> = sections.iter().collect();
        order.sort_by(|a, b| a.bbox.y.total_cmp(&b.bbox.y));

        let mut groups: Vec<SectionGroup> = Vec::new();
        let mut current = SectionGroup::default();
        let mut last_bottom: Option<f64> = None;

        for section in order {
            if let Some(bottom) = last_bottom {
                if section.bbox.y - bottom > self.gap && !current.indices.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
            }
            current.indices.push(section.index);
            current.sections.push(GroupedSection {
                index: section.index,
                title: section.title.clone(),
                layout_type: infer_layout(&section.atoms),
                hotspots: hotspots(section),
            });
            let bottom = section.bbox.bottom();
            last_bottom = Some(last_bottom.map_or(bottom, |b| b.max(bottom)));
        }
        if !current.indices.is_empty() {
            groups.push(current);
        }

        log::debug!(
            "SectionGrouper: {} sections in {} groups",
            sections.len(),
            groups.len()
        );
        groups
    }
}

impl Default for SectionGrouper {
    fn default() -> Self {
        Self::new(140.0)
    }
}

/// Links and buttons of a section.
pub fn hotspots(section: &Section) -> Vec<Hotspot> {
    section
        .atoms
        .iter()
        .filter(|a| a.kind.is_interactive())
        .map(|a| Hotspot {
            kind: a.kind,
            tag: a.tag.clone(),
            text: a.text.clone(),
            href: a.href.clone(),
            bbox: a.bbox,
        })
        .collect()
}

//! Visual groups of vertically adjacent sections.

use super::{AtomKind, BBox, LayoutKind};
use serde::{Deserialize, Serialize};

/// A run of sections separated by small vertical gaps.
///
/// Derived view over sections; recomputed on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionGroup {
    /// Section indices in scan order
    pub indices: Vec<usize>,
    /// Per-section layout annotations
    pub sections: Vec<GroupedSection>,
}

impl SectionGroup {
    /// Find the annotation of a section.
    pub fn get(&self, index: usize) -> Option<&GroupedSection> {
        self.sections.iter().find(|s| s.index == index)
    }
}

/// Layout annotation of one section inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedSection {
    /// Section index
    pub index: usize,
    /// Section title
    pub title: String,
    /// Inferred layout
    pub layout_type: LayoutKind,
    /// Links and buttons
    pub hotspots: Vec<Hotspot>,
}

/// An interactive element of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Link or button
    pub kind: AtomKind,
    /// Tag name
    pub tag: String,
    /// Label
    pub text: String,
    /// Target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Geometry
    pub bbox: BBox,
}

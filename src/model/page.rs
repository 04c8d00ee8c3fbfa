//! Composed page output.

use super::{LayoutSchema, Section, SectionGroup};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final ordered, classified section list of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposedPage {
    /// Page URL
    pub url: String,

    /// Analysis time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzed_at: Option<DateTime<Utc>>,

    /// Classified sections in page order
    pub sections: Vec<Section>,

    /// Layout schema label per section
    pub layout_schema: Vec<LayoutSchema>,

    /// Short page summary
    pub summary: String,

    /// Copy-level signals and recommendations
    pub content_assets: ContentAssets,

    /// Visual section groups
    pub groups: Vec<SectionGroup>,
}

impl ComposedPage {
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Resolved block type ids in page order.
    pub fn block_ids(&self) -> Vec<&'static str> {
        self.sections
            .iter()
            .filter_map(|s| s.block_type.map(|b| b.id()))
            .collect()
    }
}

/// Page-level copy analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentAssets {
    /// Boolean content signals
    pub signals: ContentSignals,
    /// Element totals
    pub totals: ContentTotals,
    /// Industry tags
    pub industry_tags: Vec<String>,
    /// Most frequent content words
    pub top_terms: Vec<String>,
    /// Tone hints (trust, innovation, ...)
    pub tone_hints: Vec<String>,
    /// CTA labels seen on the page
    pub cta_samples: Vec<String>,
    /// Suggested templates
    pub template_hints: Vec<String>,
    /// Suggested improvements
    pub recommendations: Vec<String>,
}

/// Boolean content signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSignals {
    /// Pricing copy present
    pub pricing: bool,
    /// FAQ copy present
    pub faq: bool,
    /// Social proof copy present
    pub trust: bool,
    /// Conversion copy present
    pub conversion: bool,
}

/// Element totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentTotals {
    /// Headings
    pub headings: usize,
    /// Paragraphs
    pub paragraphs: usize,
    /// Sections
    pub sections: usize,
    /// Buttons
    pub buttons: usize,
    /// Links
    pub links: usize,
    /// Prices
    pub prices: usize,
    /// A strong CTA label exists
    pub cta_strong: bool,
    /// A weak CTA label exists
    pub cta_weak: bool,
}

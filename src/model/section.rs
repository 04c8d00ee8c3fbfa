//! Canonical sections and their classification state.

use super::{
    Atom, AtomKind, AtomStats, AtomStyles, BBox, BlockType, Family, LayoutKind, LayoutPattern,
    LayoutSchema, SemanticRole,
};
use serde::{Deserialize, Serialize};

/// A bounded content region of the page.
///
/// Created by ingestion, then annotated by the layout inferencer, the
/// classifier and the composer. Every stage only adds or overrides fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    /// Position in page order (0-indexed)
    pub index: usize,

    /// Human-readable title (first heading or hint)
    pub title: String,

    /// Source label used for keyword mapping (title, or the container tag)
    pub source: String,

    /// Container tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Container class attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Container geometry
    pub bbox: BBox,

    /// Leaf atoms owned by this section
    pub atoms: Vec<Atom>,

    /// Atom counts by kind
    pub stats: AtomStats,

    /// Text and media payload
    pub content: SectionContent,

    /// Computed style summary and style nodes
    pub computed_styles: ComputedStyles,

    /// Number of card-like children
    pub card_count: usize,

    /// Internal layout arrangement
    pub layout: LayoutKind,

    /// Semantic role from atoms or an external tagger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_role: Option<SemanticRole>,

    /// Text/media arrangement from atoms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_pattern: Option<LayoutPattern>,

    /// Ranked classification hypotheses (descending score)
    pub candidates: Vec<Candidate>,

    /// Family of the top candidate
    pub family: Family,

    /// Resolved archetype
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,

    /// Layout schema label of the resolved archetype
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_schema: Option<LayoutSchema>,

    /// Intent tags (pricing, faq, trust, ...)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intent_tags: Vec<String>,

    /// Industry tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub industry_tags: Vec<String>,

    /// Presentation variant of the resolved archetype
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Style hints for renderers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_hints: Option<StyleHints>,

    /// Anchor slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    /// Diagnostic and decision trail
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Section {
    /// Create an empty section at the given position.
    pub fn new(index: usize, bbox: BBox) -> Self {
        Self {
            index,
            bbox,
            ..Default::default()
        }
    }

    /// Set the title, also used as the source label.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self.source = self.title.clone();
        self
    }

    /// Set the atoms and recount stats.
    pub fn with_atoms(mut self, atoms: Vec<Atom>) -> Self {
        self.stats = AtomStats::from_atoms(&atoms);
        self.atoms = atoms;
        self
    }

    /// Add a diagnostic note.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Atoms of the given kind.
    pub fn atoms_of(&self, kind: AtomKind) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().filter(move |atom| atom.kind == kind)
    }

    /// Lowercased blob of atom texts, falling back to the payload text.
    pub fn text_blob(&self) -> String {
        let parts: Vec<&str> = self
            .atoms
            .iter()
            .map(|atom| atom.text.trim())
            .filter(|text| !text.is_empty())
            .collect();
        if parts.is_empty() {
            self.content_text().to_lowercase()
        } else {
            parts.join(" ").to_lowercase()
        }
    }

    /// Title, texts, list items, button and link labels joined with spaces.
    pub fn content_text(&self) -> String {
        let content = &self.content;
        let title = if self.title.is_empty() {
            content.headings.first().map(String::as_str).unwrap_or("")
        } else {
            self.title.as_str()
        };

        let mut parts: Vec<&str> = Vec::new();
        parts.push(title);
        parts.extend(content.texts.iter().map(String::as_str));
        for list in &content.lists {
            parts.extend(list.iter().map(String::as_str));
        }
        parts.extend(content.buttons.iter().map(|b| b.label.as_str()));
        parts.extend(content.links.iter().map(|l| l.label.as_str()));

        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check whether the container tag or class mentions the given word.
    pub fn has_container_hint(&self, word: &str) -> bool {
        let tag = self.tag.as_deref().unwrap_or("").to_ascii_lowercase();
        let class = self.class_name.as_deref().unwrap_or("").to_ascii_lowercase();
        tag == word || class.contains(word)
    }

    /// Highest-ranked candidate.
    pub fn top_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Score of a block type among the candidates (0 when absent).
    pub fn score_of(&self, block_type: BlockType) -> i32 {
        self.candidates
            .iter()
            .find(|c| c.block_type == block_type)
            .map(|c| c.score)
            .unwrap_or(0)
    }
}

/// A scored hypothesis for what a section is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Archetype
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Accumulated score
    pub score: i32,

    /// Ordered `"signal:delta"` audit trail
    pub reasons: Vec<String>,

    /// Family of the archetype
    pub family: Family,
}

impl Candidate {
    /// Create a candidate with no reasons.
    pub fn new(block_type: BlockType, score: i32) -> Self {
        Self {
            block_type,
            score,
            reasons: Vec::new(),
            family: block_type.family(),
        }
    }

    /// Add a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }
}

/// Text and media payload of a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionContent {
    /// Paragraph texts
    pub texts: Vec<String>,
    /// Headings
    pub headings: Vec<String>,
    /// Buttons
    pub buttons: Vec<LinkItem>,
    /// Links
    pub links: Vec<LinkItem>,
    /// List items grouped by list
    pub lists: Vec<Vec<String>>,
    /// Images
    pub images: Vec<MediaItem>,
    /// Videos
    pub videos: Vec<MediaItem>,
    /// Background image URLs
    pub backgrounds: Vec<String>,
    /// Background gradients
    pub gradients: Vec<String>,
    /// Price strings
    pub prices: Vec<String>,
}

impl SectionContent {
    /// Drop media payload, keeping text.
    pub fn strip_media(&mut self) {
        self.images.clear();
        self.videos.clear();
        self.backgrounds.clear();
    }

    /// Check whether the section carries any media.
    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty() || !self.backgrounds.is_empty()
    }
}

/// A labelled link or button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkItem {
    /// Visible label
    pub label: String,
    /// Target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// An image or video reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    /// Source URL
    pub src: String,
    /// Alternative text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A style value with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCount {
    /// Computed value
    pub value: String,
    /// Occurrences
    pub count: u64,
}

/// Most frequent computed style values of a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSummary {
    /// Font stacks
    pub fonts: Vec<StyleCount>,
    /// Text colors
    pub text_colors: Vec<StyleCount>,
    /// Background colors
    pub bg_colors: Vec<StyleCount>,
    /// Border radii
    pub radius: Vec<StyleCount>,
    /// Paddings
    pub padding: Vec<StyleCount>,
    /// Margins
    pub margin: Vec<StyleCount>,
    /// Font sizes
    pub font_sizes: Vec<StyleCount>,
}

impl StyleSummary {
    /// Check whether no value was recorded.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
            && self.text_colors.is_empty()
            && self.bg_colors.is_empty()
            && self.radius.is_empty()
            && self.padding.is_empty()
            && self.margin.is_empty()
            && self.font_sizes.is_empty()
    }
}

/// A styled node sampled from the section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleNode {
    /// Tag name
    pub tag: String,
    /// Text content
    pub text: String,
    /// Computed styles
    pub styles: AtomStyles,
}

/// Computed styles captured for a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyles {
    /// Aggregated value counts
    pub summary: StyleSummary,
    /// Sampled nodes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<StyleNode>,
}

/// Rendering hints derived from a section's styles and geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleHints {
    /// `center` or `left`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// `sm`, `md` or `lg`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_y: Option<String>,
    /// Most common heading font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    /// Most common body font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    /// `sm`, `md` or `lg`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_size: Option<String>,
    /// `sm`, `md` or `lg`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_size: Option<String>,
    /// Background gradient present
    pub has_gradient: bool,
}

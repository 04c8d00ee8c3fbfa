//! Capture documents handed over by the browser collaborator.
//!
//! These types mirror the wire format loosely: every field is optional, both
//! camelCase and snake_case spellings are accepted, and section content may
//! be flat or nested under a `content` key. Ingestion turns them into
//! canonical [`Section`](super::Section)s.

use super::{AtomStats, AtomStyles, BBox, ComputedStyles, LinkItem, MediaItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page worth of captured geometry, content and styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageCapture {
    /// Page URL
    pub url: String,

    /// Capture time
    #[serde(alias = "captured_at", skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,

    /// Viewport used for the capture
    pub viewport: Viewport,

    /// Full document height
    #[serde(alias = "page_height", skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f64>,

    /// Container candidates for section extraction
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementDescriptor>,

    /// Page-level leaf atoms, assigned to extracted sections
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub atoms: Vec<RawAtom>,

    /// Pre-segmented section boxes
    pub sections: Vec<SectionBox>,

    /// Per-section payloads, parallel to `sections`
    #[serde(alias = "section_payloads")]
    pub section_payloads: Vec<SectionPayload>,

    /// Aggregated style samples
    #[serde(alias = "style_samples")]
    pub style_samples: StyleSamples,

    /// External semantic overrides
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<SemanticOverride>,
}

impl PageCapture {
    /// Create an empty capture for a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Number of sections the capture describes.
    pub fn section_count(&self) -> usize {
        self.sections.len().max(self.section_payloads.len())
    }
}

/// Browser viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: f64,
    /// Height in CSS pixels
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// A DOM container considered for section extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Tag name
    pub tag: String,

    /// Id attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Class attribute
    #[serde(alias = "class", alias = "class_name", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Parent tag name
    #[serde(alias = "parent_tag", skip_serializing_if = "Option::is_none")]
    pub parent_tag: Option<String>,

    /// Ancestor tag names, nearest first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<String>,

    /// Other attributes (data-section, data-block, ...)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Geometry
    pub bbox: BBox,

    /// Number of card-like descendants
    #[serde(alias = "card_count")]
    pub card_count: usize,
}

impl ElementDescriptor {
    /// Create a descriptor.
    pub fn new(tag: impl Into<String>, bbox: BBox) -> Self {
        Self {
            tag: tag.into(),
            bbox,
            ..Default::default()
        }
    }

    /// Set the parent tag.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        let parent = parent.into();
        self.ancestors.insert(0, parent.clone());
        self.parent_tag = Some(parent);
        self
    }

    /// Set the class attribute.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// A raw leaf node before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAtom {
    /// Explicit kind label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Tag name
    pub tag: String,
    /// Text content
    pub text: String,
    /// Placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Input type
    #[serde(alias = "input_type", alias = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Link target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Media source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Geometry; missing geometry drops the atom
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    /// Computed styles
    pub styles: AtomStyles,
}

impl RawAtom {
    /// Create a raw atom from a tag, text and box.
    pub fn new(tag: impl Into<String>, text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            bbox: Some(bbox),
            ..Default::default()
        }
    }
}

/// A pre-segmented section box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionBox {
    /// Title hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Container tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Container class
    #[serde(alias = "class", alias = "class_name", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Geometry, nested form
    #[serde(alias = "box", skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    /// Geometry, flat form
    #[serde(alias = "left", skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Geometry, flat form
    #[serde(alias = "top", skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Geometry, flat form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Geometry, flat form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Number of card-like descendants
    #[serde(alias = "card_count", skip_serializing_if = "Option::is_none")]
    pub card_count: Option<usize>,
}

impl SectionBox {
    /// Create a box-only section entry.
    pub fn new(bbox: BBox) -> Self {
        Self {
            bbox: Some(bbox),
            ..Default::default()
        }
    }

    /// Resolve geometry from either form; `None` when neither is complete.
    pub fn geometry(&self) -> Option<BBox> {
        if let Some(bbox) = self.bbox {
            return Some(bbox);
        }
        match (self.x, self.y, self.width, self.height) {
            (Some(x), Some(y), Some(width), Some(height)) => Some(BBox::new(x, y, width, height)),
            _ => None,
        }
    }
}

/// Text, media and style payload of one section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PayloadContent {
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Paragraph texts
    pub texts: Vec<String>,
    /// Headings
    pub headings: Vec<String>,
    /// Buttons
    pub buttons: Vec<LinkRef>,
    /// Links
    pub links: Vec<LinkRef>,
    /// Lists
    pub lists: Vec<Vec<String>>,
    /// Images
    pub images: Vec<MediaRef>,
    /// Videos
    pub videos: Vec<MediaRef>,
    /// Background images
    #[serde(alias = "background_images")]
    pub backgrounds: Vec<String>,
    /// Background gradients
    #[serde(alias = "background_gradients")]
    pub gradients: Vec<String>,
    /// Prices
    pub prices: Vec<String>,
    /// Computed styles
    #[serde(alias = "computed_styles", skip_serializing_if = "Option::is_none")]
    pub computed_styles: Option<ComputedStyles>,
    /// Leaf atoms
    pub atoms: Vec<RawAtom>,
}

impl PayloadContent {
    /// Fill empty fields from a fallback payload.
    pub fn or(mut self, fallback: &PayloadContent) -> Self {
        fn fill<T: Clone>(target: &mut Vec<T>, source: &[T]) {
            if target.is_empty() {
                target.extend_from_slice(source);
            }
        }

        if self.title.as_deref().map_or(true, str::is_empty) {
            self.title = fallback.title.clone();
        }
        fill(&mut self.texts, &fallback.texts);
        fill(&mut self.headings, &fallback.headings);
        fill(&mut self.buttons, &fallback.buttons);
        fill(&mut self.links, &fallback.links);
        fill(&mut self.lists, &fallback.lists);
        fill(&mut self.images, &fallback.images);
        fill(&mut self.videos, &fallback.videos);
        fill(&mut self.backgrounds, &fallback.backgrounds);
        fill(&mut self.gradients, &fallback.gradients);
        fill(&mut self.prices, &fallback.prices);
        fill(&mut self.atoms, &fallback.atoms);
        if self.computed_styles.is_none() {
            self.computed_styles = fallback.computed_styles.clone();
        }
        self
    }
}

/// Captured payload of one section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionPayload {
    /// Source label (e.g. "footer")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Flat payload fields
    #[serde(flatten)]
    pub body: PayloadContent,

    /// Nested payload fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PayloadContent>,

    /// Geometry carried by the payload itself
    #[serde(alias = "box", alias = "layout", skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,

    /// Explicit atom counts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AtomStats>,

    /// Number of card-like children
    #[serde(alias = "card_count", skip_serializing_if = "Option::is_none")]
    pub card_count: Option<usize>,
}

impl SectionPayload {
    /// Single view over flat and nested payload fields; nested fields win.
    pub fn resolved(&self) -> PayloadContent {
        match &self.content {
            Some(nested) => nested.clone().or(&self.body),
            None => self.body.clone(),
        }
    }
}

/// A link given either as a bare label or as an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkRef {
    /// Label only
    Label(String),
    /// Label and target
    Item(LinkItem),
}

impl From<LinkRef> for LinkItem {
    fn from(value: LinkRef) -> Self {
        match value {
            LinkRef::Label(label) => LinkItem { label, href: None },
            LinkRef::Item(item) => item,
        }
    }
}

/// A media reference given either as a bare URL or as an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    /// URL only
    Url(String),
    /// URL and alt text
    Item(MediaItem),
}

impl From<MediaRef> for MediaItem {
    fn from(value: MediaRef) -> Self {
        match value {
            MediaRef::Url(src) => MediaItem { src, alt: None },
            MediaRef::Item(item) => item,
        }
    }
}

/// Page-wide computed style samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSamples {
    /// CSS custom properties on `:root`
    #[serde(alias = "root_vars")]
    pub root_vars: BTreeMap<String, String>,
    /// Detected CSS framework
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Body text color
    #[serde(alias = "body_color", skip_serializing_if = "Option::is_none")]
    pub body_color: Option<String>,
    /// Body background
    #[serde(alias = "body_bg", skip_serializing_if = "Option::is_none")]
    pub body_bg: Option<String>,
    /// Body font stack
    #[serde(alias = "body_font", skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
    /// Heading font stack
    #[serde(alias = "heading_font", skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    /// Link color
    #[serde(alias = "link_color", skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,
    /// Primary button text color
    #[serde(alias = "button_color", skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    /// Primary button background
    #[serde(alias = "button_bg", skip_serializing_if = "Option::is_none")]
    pub button_bg: Option<String>,
    /// Primary button radius
    #[serde(alias = "button_radius", skip_serializing_if = "Option::is_none")]
    pub button_radius: Option<String>,
    /// Border color
    #[serde(alias = "border_color", skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Card background
    #[serde(alias = "card_bg", skip_serializing_if = "Option::is_none")]
    pub card_bg: Option<String>,
    /// Font stack counts
    #[serde(alias = "computed_fonts")]
    pub fonts: BTreeMap<String, u64>,
    /// Text color counts
    #[serde(alias = "computed_text_colors")]
    pub text_colors: BTreeMap<String, u64>,
    /// Background color counts
    #[serde(alias = "computed_bg_colors")]
    pub bg_colors: BTreeMap<String, u64>,
    /// Radius counts
    #[serde(alias = "computed_radius")]
    pub radius: BTreeMap<String, u64>,
    /// Font size counts
    #[serde(alias = "computed_font_sizes")]
    pub font_sizes: BTreeMap<String, u64>,
    /// Padding counts
    #[serde(alias = "computed_padding")]
    pub padding: BTreeMap<String, u64>,
    /// Margin counts
    #[serde(alias = "computed_margin")]
    pub margin: BTreeMap<String, u64>,
}

impl StyleSamples {
    /// Check whether no aggregated counts were supplied.
    pub fn has_no_counts(&self) -> bool {
        self.fonts.is_empty()
            && self.text_colors.is_empty()
            && self.bg_colors.is_empty()
            && self.radius.is_empty()
            && self.font_sizes.is_empty()
            && self.padding.is_empty()
            && self.margin.is_empty()
    }
}

/// An externally supplied, authoritative classification for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SemanticOverride {
    /// Section index
    pub index: usize,
    /// Semantic role label (Hero, Pricing, CTA, ...)
    #[serde(alias = "semantic_role", skip_serializing_if = "Option::is_none")]
    pub semantic_role: Option<String>,
    /// Explicit block type id
    #[serde(alias = "block_type", alias = "type", skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    /// Layout pattern label
    #[serde(alias = "layout_pattern", skip_serializing_if = "Option::is_none")]
    pub layout_pattern: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_defaults() {
        let capture: PageCapture = serde_json::from_str("{}").unwrap();
        assert_eq!(capture.viewport.width, 1440.0);
        assert_eq!(capture.viewport.height, 900.0);
        assert_eq!(capture.section_count(), 0);
    }

    #[test]
    fn test_payload_nested_content_wins() {
        let payload: SectionPayload = serde_json::from_str(
            r#"{
                "texts": ["flat"],
                "headings": ["Flat heading"],
                "content": {"texts": ["nested"], "images": ["https://x/a.png"]}
            }"#,
        )
        .unwrap();
        let resolved = payload.resolved();
        assert_eq!(resolved.texts, vec!["nested".to_string()]);
        assert_eq!(resolved.headings, vec!["Flat heading".to_string()]);
        assert_eq!(resolved.images.len(), 1);
    }

    #[test]
    fn test_link_and_media_refs() {
        let payload: PayloadContent = serde_json::from_str(
            r#"{
                "buttons": ["Get started", {"label": "Docs", "href": "/docs"}],
                "images": [{"src": "a.png", "alt": "A"}]
            }"#,
        )
        .unwrap();
        let buttons: Vec<LinkItem> = payload.buttons.into_iter().map(Into::into).collect();
        assert_eq!(buttons[0].label, "Get started");
        assert_eq!(buttons[1].href.as_deref(), Some("/docs"));
        let image: MediaItem = payload.images[0].clone().into();
        assert_eq!(image.alt.as_deref(), Some("A"));
    }

    #[test]
    fn test_section_box_flat_geometry() {
        let section: SectionBox =
            serde_json::from_str(r#"{"top": 120, "left": 0, "width": 1440, "height": 600}"#)
                .unwrap();
        assert_eq!(
            section.geometry(),
            Some(BBox::new(0.0, 120.0, 1440.0, 600.0))
        );
        assert_eq!(SectionBox::default().geometry(), None);
    }

    #[test]
    fn test_style_samples_snake_case_aliases() {
        let samples: StyleSamples = serde_json::from_str(
            r##"{"root_vars": {"--primary": "#2563eb"}, "computed_text_colors": {"#111111": 4}}"##,
        )
        .unwrap();
        assert_eq!(samples.root_vars.len(), 1);
        assert_eq!(samples.text_colors.get("#111111"), Some(&4));
        assert!(!samples.has_no_counts());
    }
}

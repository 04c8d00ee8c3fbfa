//! Atoms: normalized leaf content elements.

use super::BBox;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of leaf element an atom was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomKind {
    /// h1-h6
    Heading,
    /// Any other text-bearing node
    Text,
    /// Anchor
    Link,
    /// Button element
    Button,
    /// Image
    Image,
    /// Video
    Video,
    /// Form control (input, textarea, select)
    Input,
}

impl AtomKind {
    /// Infer the kind from an HTML tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => AtomKind::Heading,
            "a" => AtomKind::Link,
            "button" => AtomKind::Button,
            "input" | "textarea" | "select" => AtomKind::Input,
            "img" | "picture" | "svg" => AtomKind::Image,
            "video" => AtomKind::Video,
            _ => AtomKind::Text,
        }
    }

    /// Parse an explicit kind label.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "heading" => Some(AtomKind::Heading),
            "text" => Some(AtomKind::Text),
            "link" => Some(AtomKind::Link),
            "button" => Some(AtomKind::Button),
            "image" => Some(AtomKind::Image),
            "video" => Some(AtomKind::Video),
            "input" => Some(AtomKind::Input),
            _ => None,
        }
    }

    /// Get the kind label.
    pub fn as_str(&self) -> &'static str {
        match self {
            AtomKind::Heading => "heading",
            AtomKind::Text => "text",
            AtomKind::Link => "link",
            AtomKind::Button => "button",
            AtomKind::Image => "image",
            AtomKind::Video => "video",
            AtomKind::Input => "input",
        }
    }

    /// Headings, body text and form controls.
    pub fn is_text_like(&self) -> bool {
        matches!(self, AtomKind::Heading | AtomKind::Text | AtomKind::Input)
    }

    /// Links and buttons.
    pub fn is_interactive(&self) -> bool {
        matches!(self, AtomKind::Link | AtomKind::Button)
    }
}

/// Call-to-action role of a link or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtomRole {
    /// Filled button style
    CtaMain,
    /// Text link or ghost button
    CtaSecondary,
}

/// Computed style snapshot of a leaf node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtomStyles {
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Background color
    #[serde(alias = "bg", alias = "background", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Font stack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Font size (e.g. "16px")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,

    /// Font weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    /// Line height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,

    /// Letter spacing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,

    /// Border radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,

    /// Padding shorthand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,

    /// Margin shorthand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,

    /// Text alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

/// A normalized leaf element with geometry, style and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    /// Leaf kind
    pub kind: AtomKind,

    /// Lowercase tag name
    pub tag: String,

    /// Visible text, whitespace-collapsed and truncated
    #[serde(default)]
    pub text: String,

    /// Placeholder of form controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Input type of form controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,

    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Media source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Geometry
    pub bbox: BBox,

    /// Computed style snapshot
    #[serde(default)]
    pub styles: AtomStyles,

    /// CTA role for links and buttons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AtomRole>,

    /// Style properties rewritten against the page's design tokens
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub normalized_styles: BTreeMap<String, String>,
}

impl Atom {
    /// Create an atom of the given kind with default tag and no text.
    pub fn new(kind: AtomKind, bbox: BBox) -> Self {
        let tag = match kind {
            AtomKind::Heading => "h2",
            AtomKind::Text => "p",
            AtomKind::Link => "a",
            AtomKind::Button => "button",
            AtomKind::Image => "img",
            AtomKind::Video => "video",
            AtomKind::Input => "input",
        };
        Self {
            kind,
            tag: tag.to_string(),
            text: String::new(),
            placeholder: None,
            input_type: None,
            href: None,
            src: None,
            bbox,
            styles: AtomStyles::default(),
            role: None,
            normalized_styles: BTreeMap::new(),
        }
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Check whether the atom has a positive extent.
    pub fn has_extent(&self) -> bool {
        !self.bbox.is_degenerate()
    }
}

/// Atom counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomStats {
    /// Heading atoms
    pub headings: usize,
    /// Text atoms
    pub text: usize,
    /// Link atoms
    pub links: usize,
    /// Button atoms
    pub buttons: usize,
    /// Image atoms
    pub images: usize,
    /// Video atoms
    pub videos: usize,
    /// Form control atoms
    pub inputs: usize,
}

impl AtomStats {
    /// Count atoms by kind.
    pub fn from_atoms(atoms: &[Atom]) -> Self {
        let mut stats = Self::default();
        for atom in atoms {
            match atom.kind {
                AtomKind::Heading => stats.headings += 1,
                AtomKind::Text => stats.text += 1,
                AtomKind::Link => stats.links += 1,
                AtomKind::Button => stats.buttons += 1,
                AtomKind::Image => stats.images += 1,
                AtomKind::Video => stats.videos += 1,
                AtomKind::Input => stats.inputs += 1,
            }
        }
        stats
    }

    /// Total atom count.
    pub fn total(&self) -> usize {
        self.headings + self.text + self.links + self.buttons + self.images + self.videos + self.inputs
    }

    /// Links plus buttons.
    pub fn interactive(&self) -> usize {
        self.links + self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(AtomKind::from_tag("H1"), AtomKind::Heading);
        assert_eq!(AtomKind::from_tag("a"), AtomKind::Link);
        assert_eq!(AtomKind::from_tag("textarea"), AtomKind::Input);
        assert_eq!(AtomKind::from_tag("img"), AtomKind::Image);
        assert_eq!(AtomKind::from_tag("span"), AtomKind::Text);
    }

    #[test]
    fn test_stats_from_atoms() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let atoms = vec![
            Atom::new(AtomKind::Heading, bbox),
            Atom::new(AtomKind::Image, bbox),
            Atom::new(AtomKind::Image, bbox),
            Atom::new(AtomKind::Link, bbox),
        ];
        let stats = AtomStats::from_atoms(&atoms);
        assert_eq!(stats.headings, 1);
        assert_eq!(stats.images, 2);
        assert_eq!(stats.interactive(), 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_atom_serializes_kind_lowercase() {
        let atom = Atom::new(AtomKind::Button, BBox::new(0.0, 0.0, 80.0, 32.0)).with_text("Go");
        let json = serde_json::to_string(&atom).unwrap();
        assert!(json.contains("\"kind\":\"button\""));
        assert!(!json.contains("normalizedStyles"));
    }
}

//! Page model types for reverse-engineered web pages.
//!
//! This module defines the canonical representation shared by every
//! analysis stage: the raw capture document handed over by a browser
//! collaborator, the normalized atoms and sections built from it, and the
//! classified page and design tokens produced at the end.

mod atom;
mod bbox;
mod block;
mod capture;
mod group;
mod page;
mod section;
mod tokens;

pub use atom::{Atom, AtomKind, AtomRole, AtomStats, AtomStyles};
pub use bbox::BBox;
pub use block::{BlockType, Family, LayoutKind, LayoutPattern, LayoutSchema, SemanticRole};
pub use capture::{
    ElementDescriptor, LinkRef, MediaRef, PageCapture, PayloadContent, RawAtom, SectionBox,
    SectionPayload, SemanticOverride, StyleSamples, Viewport,
};
pub use group::{GroupedSection, Hotspot, SectionGroup};
pub use page::{ComposedPage, ContentAssets, ContentSignals, ContentTotals};
pub use section::{
    Candidate, ComputedStyles, LinkItem, MediaItem, Section, SectionContent, StyleCount,
    StyleHints, StyleNode, StyleSummary,
};
pub use tokens::{
    BrandProfile, ColorMood, ColorTokens, ColorTone, Contrast, DesignTokens, Palette, Spacing,
    Typography, TypographyStyle,
};

//! Per-section classification context and phrase tables.

use crate::model::{AtomKind, LayoutKind, Section};
use crate::text::contains_any;

/// Call-to-action phrases.
pub const CTA_PHRASES: &[&str] = &[
    "get started",
    "book a demo",
    "request demo",
    "contact",
    "contact us",
    "buy now",
    "start free",
    "free trial",
    "立即",
    "咨询",
    "预约",
];

pub(crate) const FAQ_WORDS: &[&str] = &["faq", "常见问题", "question"];
pub(crate) const QUOTE_WORDS: &[&str] = &["\"", "“", "testimonial"];
pub(crate) const RATING_WORDS: &[&str] = &["★★★★★", "trustpilot", "reviews"];
pub(crate) const CASE_WORDS: &[&str] = &["case study", "案例"];
pub(crate) const INTEGRATION_WORDS: &[&str] = &["integration", "集成"];
pub(crate) const COMPARE_WORDS: &[&str] = &["comparison", "compare"];
pub(crate) const USE_CASE_WORDS: &[&str] = &["use case", "场景"];
pub(crate) const STEP_WORDS: &[&str] = &["step", "步骤", "流程"];
pub(crate) const SUPPORT_WORDS: &[&str] = &["docs", "documentation", "支持"];
pub(crate) const CONTACT_WORDS: &[&str] = &["contact", "联系我们"];
pub(crate) const FOOTER_WORDS: &[&str] = &["privacy", "terms", "©"];
pub(crate) const FORM_WORDS: &[&str] = &["form", "email", "phone"];
pub(crate) const POINT_WORDS: &[&str] = &["feature", "benefit"];
pub(crate) const TOGGLE_WORDS: &[&str] = &["monthly", "yearly"];

/// Page-level facts about a section, consumed by the scorers.
///
/// Built once per section; scorers only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifyContext {
    /// Position in page order
    pub index: usize,
    /// Number of sections on the page
    pub total: usize,
    /// Viewport height (px)
    pub viewport_height: f64,
    /// Lowercased source label, section text and container hints
    pub text: String,
    /// Character count of `text`
    pub text_len: usize,
    /// Section top (px)
    pub top: f64,
    /// Section height (px)
    pub height: f64,
    /// Link atoms per character of text
    pub link_density: f64,
    /// Atoms arranged as a grid
    pub grid_like: bool,
    /// Atoms arranged in two columns
    pub two_column_like: bool,
    /// More than four headings in the section
    pub repeat_items: bool,
    /// Images, videos or backgrounds present
    pub has_media: bool,
    /// Feature or benefit wording present
    pub has_points: bool,
    /// Image count
    pub image_count: usize,
    /// Card-like children
    pub card_count: usize,
    /// Directly below the hero
    pub near_hero: bool,
    /// Carries the page's main heading
    pub has_h1: bool,
    /// Container is a footer
    pub has_footer_tag: bool,
}

impl ClassifyContext {
    /// Build the context of one section.
    pub fn from_section(section: &Section, total: usize, viewport_height: f64) -> Self {
        let index = section.index;
        let blob = section.text_blob();

        let mut hints: Vec<&str> = Vec::new();
        if section.has_container_hint("footer") {
            hints.push("footer");
        }
        if section.has_container_hint("nav") {
            hints.push("nav");
        }
        if section.tag.as_deref() == Some("header") || section.has_container_hint("hero") {
            hints.push("hero");
        }
        if section.has_container_hint("contact") {
            hints.push("contact");
        }
        if section.has_container_hint("faq") {
            hints.push("faq");
        }

        let text = [section.source.to_lowercase(), blob, hints.join(" ")]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let text_len = text.chars().count();

        let link_count = if section.atoms.is_empty() {
            section.content.links.len()
        } else {
            section.stats.links
        };
        let link_density = link_count as f64 / text_len.max(1) as f64;

        let heading_count = section.stats.headings.max(section.content.headings.len());
        let has_h1 = section.atoms_of(AtomKind::Heading).any(|a| a.tag == "h1")
            || (index == 0 && heading_count > 0);

        Self {
            index,
            total,
            viewport_height,
            text_len,
            top: section.bbox.y,
            height: section.bbox.height,
            link_density,
            grid_like: section.layout == LayoutKind::Grid,
            two_column_like: section.layout == LayoutKind::Split,
            repeat_items: heading_count > 4,
            has_media: section.content.has_media() || section.stats.images > 0 || section.stats.videos > 0,
            has_points: contains_any(&text, POINT_WORDS),
            image_count: section.stats.images.max(section.content.images.len()),
            card_count: section.card_count,
            near_hero: index == 1,
            has_h1,
            has_footer_tag: section.has_container_hint("footer"),
            text,
        }
    }

    /// Check whether the text mentions any of the phrases.
    pub fn mentions(&self, phrases: &[&str]) -> bool {
        contains_any(&self.text, phrases)
    }

    /// Top edge within 90% of the first viewport.
    pub fn above_the_fold(&self) -> bool {
        self.top < self.viewport_height * 0.9
    }

    /// One of the last two sections.
    pub fn near_bottom(&self) -> bool {
        self.index + 2 >= self.total
    }

    /// First section of the page.
    pub fn near_top(&self) -> bool {
        self.index == 0
    }
}

//! Atom-level rule suggestions.
//!
//! Each rule looks at the atom set and counts of a section and may suggest an
//! archetype with a confidence in `[0, 1]`. The composer only acts on
//! suggestions above its confidence threshold.

use crate::analyze::infer_layout_pattern;
use crate::model::{AtomKind, BlockType, Candidate, Section, SemanticRole};
use crate::text::{contains_any, LazyRegex, PRICE, STATS};
use std::collections::BTreeMap;

static STEP_PREFIX: LazyRegex = LazyRegex::new(r"^\s*\d+[.)、]");

/// Image size bucket for repeated-card detection (px).
const CARD_SIZE_BUCKET: f64 = 20.0;

/// Candidates kept per section.
pub const MAX_CANDIDATES: usize = 5;

/// An archetype suggested by an atom rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Suggested archetype
    pub block_type: BlockType,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Name of the rule that fired
    pub rule: &'static str,
}

impl Suggestion {
    /// Confidence as a candidate score.
    pub fn score(&self) -> i32 {
        (self.confidence * 100.0).round() as i32
    }
}

/// A rule over a section's atoms.
pub trait AtomRule: Send + Sync {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Suggest an archetype and confidence, if the rule applies.
    fn suggest(&self, section: &Section, blob: &str) -> Option<(BlockType, f64)>;
}

/// Price copy with headings and an action.
pub struct PricingAtoms;

impl AtomRule for PricingAtoms {
    fn name(&self) -> &'static str {
        "pricing"
    }

    fn suggest(&self, section: &Section, blob: &str) -> Option<(BlockType, f64)> {
        if !(PRICE.is_match(blob) || contains_any(blob, &["价格", "定价"])) {
            return None;
        }
        let stats = &section.stats;
        let confidence = if stats.headings >= 1 && stats.interactive() >= 1 {
            0.85
        } else {
            0.65
        };
        Some((BlockType::PricingCards, confidence))
    }
}

/// FAQ wording or several questions.
pub struct FaqAtoms;

impl AtomRule for FaqAtoms {
    fn name(&self) -> &'static str {
        "faq"
    }

    fn suggest(&self, _section: &Section, blob: &str) -> Option<(BlockType, f64)> {
        if contains_any(blob, &["faq", "常见问题"]) {
            return Some((BlockType::FaqAccordion, 0.85));
        }
        let questions = blob.chars().filter(|c| matches!(c, '?' | '？')).count();
        (questions >= 2).then_some((BlockType::FaqAccordion, 0.7))
    }
}

/// Repeated figures.
pub struct StatsAtoms;

impl AtomRule for StatsAtoms {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn suggest(&self, _section: &Section, blob: &str) -> Option<(BlockType, f64)> {
        match STATS.count(blob) {
            0 | 1 => None,
            2 => Some((BlockType::StatsKpi, 0.6)),
            _ => Some((BlockType::StatsKpi, 0.8)),
        }
    }
}

/// Step wording, or at least three numbered atoms.
pub struct StepsAtoms;

impl AtomRule for StepsAtoms {
    fn name(&self) -> &'static str {
        "steps"
    }

    fn suggest(&self, section: &Section, blob: &str) -> Option<(BlockType, f64)> {
        let numbered = section
            .atoms
            .iter()
            .filter(|atom| STEP_PREFIX.is_match(&atom.text))
            .count();
        (numbered >= 3 || contains_any(blob, &["step", "步骤"]))
            .then_some((BlockType::StepsTimeline, 0.75))
    }
}

/// Many images, little else.
pub struct LogoAtoms;

impl AtomRule for LogoAtoms {
    fn name(&self) -> &'static str {
        "logo"
    }

    fn suggest(&self, section: &Section, _blob: &str) -> Option<(BlockType, f64)> {
        if is_logo_set(section) {
            return Some((BlockType::LogoCloud, 0.85));
        }
        let s = &section.stats;
        (s.images >= 5 && s.text <= 4 && s.headings <= 2 && s.links <= 4)
            .then_some((BlockType::LogoCloud, 0.65))
    }
}

/// Portraits with testimonial wording or quotes.
pub struct TestimonialAtoms;

impl AtomRule for TestimonialAtoms {
    fn name(&self) -> &'static str {
        "testimonials"
    }

    fn suggest(&self, section: &Section, blob: &str) -> Option<(BlockType, f64)> {
        if section.stats.images < 2 {
            return None;
        }
        if contains_any(blob, &["testimonial", "评价", "客户"]) {
            return Some((BlockType::TestimonialsGrid, 0.75));
        }
        let quotes = blob.chars().filter(|c| matches!(c, '"' | '“' | '”')).count();
        (quotes >= 2).then_some((BlockType::TestimonialsGrid, 0.65))
    }
}

/// Copy beside media.
pub struct SplitPatternAtoms;

impl AtomRule for SplitPatternAtoms {
    fn name(&self) -> &'static str {
        "split_pattern"
    }

    fn suggest(&self, section: &Section, _blob: &str) -> Option<(BlockType, f64)> {
        let pattern = section
            .layout_pattern
            .unwrap_or_else(|| infer_layout_pattern(&section.atoms));
        pattern
            .is_split()
            .then_some((BlockType::FeatureWithMedia, 0.85))
    }
}

/// Repeated image cards.
pub struct CardAtoms;

impl AtomRule for CardAtoms {
    fn name(&self) -> &'static str {
        "cards"
    }

    fn suggest(&self, section: &Section, _blob: &str) -> Option<(BlockType, f64)> {
        if is_logo_set(section) {
            return None;
        }
        let s = &section.stats;
        let labels = s.headings + s.text + s.interactive();
        if !((s.images >= 3 && labels >= 3) || (s.images >= 4 && s.headings >= 2)) {
            return None;
        }
        let confidence = if has_image_grid(section) { 0.9 } else { 0.6 };
        Some((BlockType::CardsGrid, confidence))
    }
}

/// At least three images share a width or a height bucket.
fn has_image_grid(section: &Section) -> bool {
    let mut widths: BTreeMap<i64, usize> = BTreeMap::new();
    let mut heights: BTreeMap<i64, usize> = BTreeMap::new();
    for image in section.atoms_of(AtomKind::Image) {
        if image.bbox.width > 0.0 {
            *widths.entry((image.bbox.width / CARD_SIZE_BUCKET).round() as i64).or_insert(0) += 1;
        }
        if image.bbox.height > 0.0 {
            *heights.entry((image.bbox.height / CARD_SIZE_BUCKET).round() as i64).or_insert(0) += 1;
        }
    }
    widths.values().chain(heights.values()).any(|&count| count >= 3)
}

/// Several headed text blocks.
pub struct FeatureAtoms;

impl AtomRule for FeatureAtoms {
    fn name(&self) -> &'static str {
        "feature"
    }

    fn suggest(&self, section: &Section, _blob: &str) -> Option<(BlockType, f64)> {
        let s = &section.stats;
        if s.headings >= 3 && s.text >= 3 && s.images >= 1 {
            return Some((BlockType::FeatureGrid, 0.6));
        }
        (s.headings >= 3 && s.text >= 4).then_some((BlockType::FeatureGrid, 0.55))
    }
}

/// Logo strips: many images, at most one heading, no buttons, few links.
fn is_logo_set(section: &Section) -> bool {
    let s = &section.stats;
    s.images >= 6 && s.headings <= 1 && s.buttons == 0 && s.links <= 3
}

/// Ordered atom rules; the first rule that fires wins.
pub struct AtomRuleEngine {
    rules: Vec<Box<dyn AtomRule>>,
}

impl AtomRuleEngine {
    /// Create the engine with the built-in rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(PricingAtoms),
                Box::new(FaqAtoms),
                Box::new(StatsAtoms),
                Box::new(StepsAtoms),
                Box::new(LogoAtoms),
                Box::new(TestimonialAtoms),
                Box::new(SplitPatternAtoms),
                Box::new(CardAtoms),
                Box::new(FeatureAtoms),
            ],
        }
    }

    /// Create the engine with custom rules.
    pub fn with_rules(rules: Vec<Box<dyn AtomRule>>) -> Self {
        Self { rules }
    }

    /// Suggestion of the first rule that fires, in rule order.
    pub fn suggest(&self, section: &Section) -> Option<Suggestion> {
        let blob = section.text_blob();
        let suggestion = self.rules.iter().find_map(|rule| {
            rule.suggest(section, &blob).map(|(block_type, confidence)| Suggestion {
                block_type,
                confidence,
                rule: rule.name(),
            })
        })?;
        log::debug!(
            "Section {}: atom rule {} suggests {} ({:.2})",
            section.index,
            suggestion.rule,
            suggestion.block_type,
            suggestion.confidence
        );
        Some(suggestion)
    }
}

impl Default for AtomRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Insert a suggestion into the ranked candidates.
pub fn merge_suggestion(candidates: &mut Vec<Candidate>, suggestion: &Suggestion) {
    let score = suggestion.score();
    candidates.retain(|c| c.block_type != suggestion.block_type);
    candidates.push(
        Candidate::new(suggestion.block_type, score).with_reason(format!("atoms_rule:{}", score)),
    );
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(MAX_CANDIDATES);
}

/// Coarse semantic role from the atom text and counts.
pub fn infer_semantic_role(section: &Section) -> SemanticRole {
    let blob = section.text_blob();
    let s = &section.stats;

    if contains_any(&blob, &["pricing", "price", "plan", "定价", "价格"]) {
        SemanticRole::Pricing
    } else if contains_any(&blob, &["faq", "question", "常见问题", "问题"]) {
        SemanticRole::Faq
    } else if contains_any(&blob, &["testimonial", "客户", "评价", "case study"]) {
        SemanticRole::Testimonials
    } else if s.inputs >= 1 && s.interactive() >= 1 {
        SemanticRole::Cta
    } else if contains_any(&blob, &["contact", "demo", "get started", "signup", "咨询"]) {
        SemanticRole::Cta
    } else if s.images >= 6 && s.headings <= 1 && s.buttons == 0 {
        SemanticRole::LogoCloud
    } else if s.headings >= 1 && s.interactive() >= 1 && s.images >= 1 {
        SemanticRole::Hero
    } else if s.headings >= 3 {
        SemanticRole::Feature
    } else {
        SemanticRole::Section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, AtomStats, BBox};

    fn atom(kind: AtomKind, x: f64, y: f64, text: &str) -> Atom {
        Atom::new(kind, BBox::new(x, y, 120.0, 60.0)).with_text(text)
    }

    fn logo_section() -> Section {
        let mut atoms = Vec::new();
        for i in 0..3 {
            atoms.push(atom(AtomKind::Heading, 0.0, i as f64 * 80.0, "Trusted"));
        }
        for i in 0..4 {
            atoms.push(atom(AtomKind::Text, 200.0, i as f64 * 80.0, "team"));
        }
        for i in 0..6 {
            atoms.push(atom(AtomKind::Image, i as f64 * 140.0, 400.0, ""));
        }
        let mut section = Section::new(1, BBox::new(0.0, 900.0, 1440.0, 300.0)).with_atoms(atoms);
        section.stats = AtomStats {
            headings: 1,
            text: 4,
            images: 6,
            ..Default::default()
        };
        section
    }

    #[test]
    fn test_logo_set_beats_equal_sized_cards() {
        let suggestion = AtomRuleEngine::new().suggest(&logo_section()).unwrap();
        assert_eq!(suggestion.block_type, BlockType::LogoCloud);
        assert!(suggestion.confidence >= 0.85);
        assert_eq!(suggestion.rule, "logo");
    }

    #[test]
    fn test_cards_from_equal_image_sizes() {
        let atoms: Vec<Atom> = (0..3)
            .flat_map(|i| {
                let x = i as f64 * 400.0;
                vec![
                    atom(AtomKind::Image, x, 0.0, ""),
                    atom(AtomKind::Heading, x, 80.0, "Product"),
                    atom(AtomKind::Button, x, 160.0, "Buy"),
                ]
            })
            .collect();
        let section = Section::new(2, BBox::default()).with_atoms(atoms);
        let suggestion = AtomRuleEngine::new().suggest(&section).unwrap();
        assert_eq!(suggestion.block_type, BlockType::CardsGrid);
        assert_eq!(suggestion.score(), 90);
    }

    #[test]
    fn test_pricing_confidence_needs_heading_and_action() {
        let with_action = Section::new(0, BBox::default()).with_atoms(vec![
            atom(AtomKind::Heading, 0.0, 0.0, "Pricing"),
            atom(AtomKind::Text, 0.0, 80.0, "$99/mo"),
            atom(AtomKind::Button, 0.0, 160.0, "Choose"),
        ]);
        let without = Section::new(0, BBox::default())
            .with_atoms(vec![atom(AtomKind::Text, 0.0, 80.0, "$99/mo")]);
        assert_eq!(PricingAtoms.suggest(&with_action, &with_action.text_blob()).unwrap().1, 0.85);
        assert_eq!(PricingAtoms.suggest(&without, &without.text_blob()).unwrap().1, 0.65);
    }

    #[test]
    fn test_faq_and_steps() {
        let faq = Section::new(0, BBox::default()).with_atoms(vec![
            atom(AtomKind::Text, 0.0, 0.0, "Can I cancel?"),
            atom(AtomKind::Text, 0.0, 80.0, "Is there a trial?"),
        ]);
        assert_eq!(FaqAtoms.suggest(&faq, &faq.text_blob()).unwrap().1, 0.7);

        let steps = Section::new(0, BBox::default()).with_atoms(vec![
            atom(AtomKind::Text, 0.0, 0.0, "1. Sign up"),
            atom(AtomKind::Text, 0.0, 80.0, "2) Connect"),
            atom(AtomKind::Text, 0.0, 160.0, "3、Ship"),
        ]);
        assert_eq!(
            StepsAtoms.suggest(&steps, &steps.text_blob()),
            Some((BlockType::StepsTimeline, 0.75))
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // pricing and faq both fire; pricing comes first
        let section = Section::new(0, BBox::default()).with_atoms(vec![
            atom(AtomKind::Heading, 0.0, 0.0, "Pricing FAQ"),
            atom(AtomKind::Text, 0.0, 80.0, "$10/mo"),
            atom(AtomKind::Link, 0.0, 160.0, "Plans"),
        ]);
        let suggestion = AtomRuleEngine::new().suggest(&section).unwrap();
        assert_eq!(suggestion.block_type, BlockType::PricingCards);
        assert_eq!(suggestion.rule, "pricing");
    }

    #[test]
    fn test_pricing_with_card_images_stays_pricing() {
        let mut atoms = vec![
            atom(AtomKind::Heading, 0.0, 0.0, "Pricing"),
            atom(AtomKind::Text, 0.0, 80.0, "Pro $99/mo"),
            atom(AtomKind::Button, 0.0, 160.0, "Buy"),
        ];
        for i in 0..3 {
            let bbox = BBox::new(i as f64 * 300.0, 240.0, 200.0, 120.0);
            atoms.push(Atom::new(AtomKind::Image, bbox));
        }
        let section = Section::new(3, BBox::default()).with_atoms(atoms);
        assert_eq!(
            CardAtoms.suggest(&section, &section.text_blob()),
            Some((BlockType::CardsGrid, 0.9))
        );

        let suggestion = AtomRuleEngine::new().suggest(&section).unwrap();
        assert_eq!(suggestion.block_type, BlockType::PricingCards);
        assert_eq!(suggestion.score(), 85);
        assert_eq!(suggestion.rule, "pricing");
    }

    #[test]
    fn test_steps_from_wording_alone() {
        let section = Section::new(2, BBox::default()).with_atoms(vec![
            atom(AtomKind::Heading, 0.0, 0.0, "How it works: 3 steps"),
            atom(AtomKind::Text, 0.0, 80.0, "Sign up"),
            atom(AtomKind::Text, 0.0, 160.0, "Connect your repo"),
        ]);
        let suggestion = AtomRuleEngine::new().suggest(&section).unwrap();
        assert_eq!(suggestion.block_type, BlockType::StepsTimeline);
        assert_eq!(suggestion.confidence, 0.75);
    }

    #[test]
    fn test_cards_need_base_signal() {
        let sizes = [
            (80.0, 40.0),
            (160.0, 90.0),
            (240.0, 150.0),
            (320.0, 210.0),
            (400.0, 270.0),
            (480.0, 330.0),
        ];
        let mut atoms: Vec<Atom> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| Atom::new(AtomKind::Image, BBox::new(i as f64 * 500.0, 0.0, w, h)))
            .collect();
        atoms.push(atom(AtomKind::Heading, 0.0, 400.0, "Gallery"));
        atoms.push(atom(AtomKind::Button, 0.0, 480.0, "More"));
        let sparse = Section::new(2, BBox::default()).with_atoms(atoms.clone());
        assert_eq!(CardAtoms.suggest(&sparse, &sparse.text_blob()), None);

        atoms.push(atom(AtomKind::Text, 0.0, 560.0, "Caption"));
        let captioned = Section::new(2, BBox::default()).with_atoms(atoms);
        assert_eq!(
            CardAtoms.suggest(&captioned, &captioned.text_blob()),
            Some((BlockType::CardsGrid, 0.6))
        );
    }

    #[test]
    fn test_merge_suggestion_replaces_and_resorts() {
        let mut candidates = vec![
            Candidate::new(BlockType::FeatureGrid, 55),
            Candidate::new(BlockType::LogoCloud, 45),
            Candidate::new(BlockType::CardsGrid, 40),
        ];
        let suggestion = Suggestion {
            block_type: BlockType::LogoCloud,
            confidence: 0.85,
            rule: "logo",
        };
        merge_suggestion(&mut candidates, &suggestion);
        assert_eq!(candidates[0].block_type, BlockType::LogoCloud);
        assert_eq!(candidates[0].score, 85);
        assert_eq!(candidates[0].reasons, vec!["atoms_rule:85"]);
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn test_semantic_role() {
        assert_eq!(infer_semantic_role(&logo_section()), SemanticRole::LogoCloud);

        let pricing = Section::new(0, BBox::default())
            .with_atoms(vec![atom(AtomKind::Heading, 0.0, 0.0, "Simple pricing")]);
        assert_eq!(infer_semantic_role(&pricing), SemanticRole::Pricing);

        let form = Section::new(0, BBox::default()).with_atoms(vec![
            atom(AtomKind::Input, 0.0, 0.0, ""),
            atom(AtomKind::Button, 0.0, 80.0, "Send"),
        ]);
        assert_eq!(infer_semantic_role(&form), SemanticRole::Cta);

        assert_eq!(
            infer_semantic_role(&Section::new(0, BBox::default())),
            SemanticRole::Section
        );
    }
}

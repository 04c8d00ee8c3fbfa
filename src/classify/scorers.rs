//! Archetype scorers.
//!
//! Each scorer adds fixed deltas for independent signals and records a
//! `"signal:delta"` reason for every delta it applies.

use super::signals::*;
use crate::model::{BlockType, Candidate, Section};
use crate::text::{PRICE, STATS};

/// Link density above which a section reads as a link list.
pub const HIGH_LINK_DENSITY: f64 = 0.08;

/// A scoring rule for one archetype.
pub trait Rule: Send + Sync {
    /// Archetype this rule scores.
    fn block_type(&self) -> BlockType;

    /// Score a section.
    fn score(&self, section: &Section, ctx: &ClassifyContext) -> Candidate;
}

/// Accumulates deltas and their reasons.
struct Tally {
    candidate: Candidate,
}

impl Tally {
    fn new(block_type: BlockType) -> Self {
        Self {
            candidate: Candidate::new(block_type, 0),
        }
    }

    fn add(mut self, signal: &str, delta: i32, when: bool) -> Self {
        if when {
            self.candidate.score += delta;
            self.candidate.reasons.push(format!("{}:{}", signal, delta));
        }
        self
    }

    fn done(self) -> Candidate {
        self.candidate
    }
}

/// `HeroCentered.v1`
pub struct HeroRule;

impl Rule for HeroRule {
    fn block_type(&self) -> BlockType {
        BlockType::HeroCentered
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("above_the_fold", 20, ctx.above_the_fold())
            .add("has_h1", 25, ctx.has_h1)
            .add("cta_phrase", 15, ctx.mentions(CTA_PHRASES))
            .add("high_link_density", -25, ctx.link_density > HIGH_LINK_DENSITY)
            .add("price_pattern", -15, PRICE.is_match(&ctx.text))
            .done()
    }
}

/// `LogoCloud.v1`
pub struct LogoCloudRule;

impl Rule for LogoCloudRule {
    fn block_type(&self) -> BlockType {
        BlockType::LogoCloud
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("img_count", 25, ctx.image_count >= 6)
            .add("low_text", 10, ctx.text_len < 200)
            .add("near_hero", 10, ctx.near_hero)
            .done()
    }
}

/// `TestimonialsGrid.v1`
pub struct TestimonialsRule;

impl Rule for TestimonialsRule {
    fn block_type(&self) -> BlockType {
        BlockType::TestimonialsGrid
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("quote_pattern", 20, ctx.mentions(QUOTE_WORDS))
            .add("grid_like", 15, ctx.grid_like)
            .add("card_like", 10, ctx.card_count >= 3 && ctx.image_count >= 3)
            .done()
    }
}

/// `RatingsSummary.v1`
pub struct RatingsRule;

impl Rule for RatingsRule {
    fn block_type(&self) -> BlockType {
        BlockType::RatingsSummary
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("rating_pattern", 30, ctx.mentions(RATING_WORDS))
            .done()
    }
}

/// `CaseStudies.v1`
pub struct CaseStudiesRule;

impl Rule for CaseStudiesRule {
    fn block_type(&self) -> BlockType {
        BlockType::CaseStudies
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("case_pattern", 20, ctx.mentions(CASE_WORDS))
            .add("grid_like", 10, ctx.grid_like)
            .add("card_like", 10, ctx.card_count >= 3 && ctx.image_count >= 2)
            .done()
    }
}

/// `FeatureGrid.v1`
pub struct FeatureGridRule;

impl Rule for FeatureGridRule {
    fn block_type(&self) -> BlockType {
        BlockType::FeatureGrid
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("grid_like", 25, ctx.grid_like)
            .add("repeat_items", 15, ctx.repeat_items)
            .add("card_count", 15, ctx.card_count >= 3)
            .done()
    }
}

/// `CardsGrid.v1`
pub struct CardsGridRule;

impl Rule for CardsGridRule {
    fn block_type(&self) -> BlockType {
        BlockType::CardsGrid
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("grid_like", 20, ctx.grid_like)
            .add("card_count", 25, ctx.card_count >= 3)
            .add("img_count", 10, ctx.image_count >= 2)
            .add("repeat_items", 10, ctx.repeat_items)
            .done()
    }
}

/// `FeatureWithMedia.v1`
pub struct FeatureWithMediaRule;

impl Rule for FeatureWithMediaRule {
    fn block_type(&self) -> BlockType {
        BlockType::FeatureWithMedia
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("media", 25, ctx.has_media)
            .add("points", 15, ctx.has_points)
            .add("two_column", 10, ctx.two_column_like)
            .done()
    }
}

/// `StepsTimeline.v1`
pub struct StepsRule;

impl Rule for StepsRule {
    fn block_type(&self) -> BlockType {
        BlockType::StepsTimeline
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("step_pattern", 20, ctx.mentions(STEP_WORDS))
            .add("repeat_items", 10, ctx.repeat_items)
            .done()
    }
}

/// `StatsKPI.v1`
pub struct StatsRule;

impl Rule for StatsRule {
    fn block_type(&self) -> BlockType {
        BlockType::StatsKpi
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("stats_pattern", 25, STATS.is_match(&ctx.text))
            .done()
    }
}

/// `IntegrationsGrid.v1`
pub struct IntegrationsRule;

impl Rule for IntegrationsRule {
    fn block_type(&self) -> BlockType {
        BlockType::IntegrationsGrid
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("integrations_pattern", 20, ctx.mentions(INTEGRATION_WORDS))
            .add("grid_like", 10, ctx.grid_like)
            .done()
    }
}

/// `ComparisonTable.v1`
pub struct ComparisonRule;

impl Rule for ComparisonRule {
    fn block_type(&self) -> BlockType {
        BlockType::ComparisonTable
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("table", 25, ctx.mentions(&["table"]))
            .add("compare_pattern", 10, ctx.mentions(COMPARE_WORDS))
            .done()
    }
}

/// `UseCases.v1`
pub struct UseCasesRule;

impl Rule for UseCasesRule {
    fn block_type(&self) -> BlockType {
        BlockType::UseCases
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("use_cases_pattern", 15, ctx.mentions(USE_CASE_WORDS))
            .done()
    }
}

/// `PricingCards.v1`
pub struct PricingRule;

impl Rule for PricingRule {
    fn block_type(&self) -> BlockType {
        BlockType::PricingCards
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("price_pattern", 30, PRICE.is_match(&ctx.text))
            .add("grid_like", 15, ctx.grid_like)
            .add("toggle", 15, TOGGLE_WORDS.iter().all(|w| ctx.text.contains(w)))
            .done()
    }
}

/// `PlanComparison.v1`
pub struct PlanComparisonRule;

impl Rule for PlanComparisonRule {
    fn block_type(&self) -> BlockType {
        BlockType::PlanComparison
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("table", 25, ctx.mentions(&["table"]))
            .add("compare_pattern", 15, ctx.mentions(COMPARE_WORDS))
            .done()
    }
}

/// `FAQAccordion.v1`
pub struct FaqRule;

impl Rule for FaqRule {
    fn block_type(&self) -> BlockType {
        BlockType::FaqAccordion
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("faq", 20, ctx.mentions(FAQ_WORDS))
            .add("accordion", 25, ctx.mentions(&["accordion"]))
            .done()
    }
}

/// `SupportLinks.v1`
pub struct SupportRule;

impl Rule for SupportRule {
    fn block_type(&self) -> BlockType {
        BlockType::SupportLinks
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("support", 20, ctx.mentions(SUPPORT_WORDS))
            .add("link_density", 10, ctx.link_density > 0.04)
            .done()
    }
}

/// `ContactSection.v1`
pub struct ContactRule;

impl Rule for ContactRule {
    fn block_type(&self) -> BlockType {
        BlockType::ContactSection
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("contact", 20, ctx.mentions(CONTACT_WORDS))
            .add("form", 25, ctx.mentions(FORM_WORDS))
            .done()
    }
}

/// `Footer.v1`
pub struct FooterRule;

impl Rule for FooterRule {
    fn block_type(&self) -> BlockType {
        BlockType::Footer
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("footer_tag", 60, ctx.has_footer_tag)
            .add("near_bottom", 25, ctx.near_bottom())
            .add("link_density", 25, ctx.link_density > HIGH_LINK_DENSITY)
            .add("footer_pattern", 15, ctx.mentions(FOOTER_WORDS))
            .done()
    }
}

/// `Navbar.v1`
pub struct NavbarRule;

impl Rule for NavbarRule {
    fn block_type(&self) -> BlockType {
        BlockType::Navbar
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("near_top", 20, ctx.near_top())
            .add("link_density", 15, ctx.link_density > 0.05)
            .add("short_height", 10, ctx.height < 160.0)
            .done()
    }
}

/// `AnnouncementBar.v1`
pub struct AnnouncementRule;

impl Rule for AnnouncementRule {
    fn block_type(&self) -> BlockType {
        BlockType::AnnouncementBar
    }

    fn score(&self, _section: &Section, ctx: &ClassifyContext) -> Candidate {
        Tally::new(self.block_type())
            .add("banner_height", 30, ctx.near_top() && ctx.height < 80.0)
            .add("short_text", 10, ctx.text_len < 120)
            .done()
    }
}

/// Every scorer, in evaluation order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(HeroRule),
        Box::new(LogoCloudRule),
        Box::new(TestimonialsRule),
        Box::new(RatingsRule),
        Box::new(CaseStudiesRule),
        Box::new(FeatureGridRule),
        Box::new(CardsGridRule),
        Box::new(FeatureWithMediaRule),
        Box::new(StepsRule),
        Box::new(StatsRule),
        Box::new(IntegrationsRule),
        Box::new(ComparisonRule),
        Box::new(UseCasesRule),
        Box::new(PricingRule),
        Box::new(PlanComparisonRule),
        Box::new(FaqRule),
        Box::new(SupportRule),
        Box::new(ContactRule),
        Box::new(FooterRule),
        Box::new(NavbarRule),
        Box::new(AnnouncementRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn ctx(text: &str) -> ClassifyContext {
        ClassifyContext {
            index: 2,
            total: 8,
            viewport_height: 900.0,
            text: text.to_string(),
            text_len: text.chars().count(),
            top: 2000.0,
            height: 500.0,
            ..Default::default()
        }
    }

    fn section() -> Section {
        Section::new(2, BBox::new(0.0, 2000.0, 1440.0, 500.0))
    }

    #[test]
    fn test_hero_penalties_subtract() {
        let mut c = ctx("get started at $49/mo");
        c.index = 0;
        c.top = 0.0;
        c.has_h1 = true;
        c.link_density = 0.2;
        let candidate = HeroRule.score(&section(), &c);
        assert_eq!(candidate.score, 20 + 25 + 15 - 25 - 15);
        assert_eq!(
            candidate.reasons,
            vec![
                "above_the_fold:20",
                "has_h1:25",
                "cta_phrase:15",
                "high_link_density:-25",
                "price_pattern:-15"
            ]
        );
    }

    #[test]
    fn test_pricing_toggle() {
        let candidate = PricingRule.score(&section(), &ctx("pricing $99/mo billed monthly or yearly"));
        assert_eq!(candidate.score, 45);
        assert_eq!(candidate.reasons, vec!["price_pattern:30", "toggle:15"]);
    }

    #[test]
    fn test_footer_signals() {
        let mut c = ctx("privacy terms © 2024");
        c.index = 7;
        c.has_footer_tag = true;
        let candidate = FooterRule.score(&section(), &c);
        assert_eq!(candidate.score, 60 + 25 + 15);
    }

    #[test]
    fn test_announcement_needs_thin_first_section() {
        let mut c = ctx("free shipping this week");
        c.index = 0;
        c.height = 48.0;
        assert_eq!(AnnouncementRule.score(&section(), &c).score, 40);
        c.height = 120.0;
        assert_eq!(AnnouncementRule.score(&section(), &c).score, 10);
    }

    #[test]
    fn test_unmatched_rules_score_zero() {
        let candidate = RatingsRule.score(&section(), &ctx("plain words"));
        assert_eq!(candidate.score, 0);
        assert!(candidate.reasons.is_empty());
    }

    #[test]
    fn test_rules_cover_distinct_types() {
        let rules = default_rules();
        assert_eq!(rules.len(), 21);
        let mut types: Vec<BlockType> = rules.iter().map(|r| r.block_type()).collect();
        types.sort();
        types.dedup();
        assert_eq!(types.len(), 21);
    }
}

//! Block archetype taxonomy and layout labels.
//!
//! Block type ids are a versioned wire contract: adding an archetype must not
//! change the family or layout schema of an existing one.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known page-building-block archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockType {
    /// Centered headline with CTA
    #[serde(rename = "HeroCentered.v1")]
    HeroCentered,
    /// Headline beside media
    #[serde(rename = "HeroSplit.v1")]
    HeroSplit,
    /// Row or grid of customer logos
    #[serde(rename = "LogoCloud.v1")]
    LogoCloud,
    /// Customer quotes
    #[serde(rename = "TestimonialsGrid.v1")]
    TestimonialsGrid,
    /// Star ratings and review counts
    #[serde(rename = "RatingsSummary.v1")]
    RatingsSummary,
    /// Case study cards
    #[serde(rename = "CaseStudies.v1")]
    CaseStudies,
    /// Feature tiles
    #[serde(rename = "FeatureGrid.v1")]
    FeatureGrid,
    /// Generic media cards
    #[serde(rename = "CardsGrid.v1")]
    CardsGrid,
    /// Feature copy beside an image or video
    #[serde(rename = "FeatureWithMedia.v1")]
    FeatureWithMedia,
    /// Numbered steps
    #[serde(rename = "StepsTimeline.v1")]
    StepsTimeline,
    /// Key figures
    #[serde(rename = "StatsKPI.v1")]
    StatsKpi,
    /// Integration logos and names
    #[serde(rename = "IntegrationsGrid.v1")]
    IntegrationsGrid,
    /// Feature comparison table
    #[serde(rename = "ComparisonTable.v1")]
    ComparisonTable,
    /// Use-case list
    #[serde(rename = "UseCases.v1")]
    UseCases,
    /// Pricing plan cards
    #[serde(rename = "PricingCards.v1")]
    PricingCards,
    /// Plan feature matrix
    #[serde(rename = "PlanComparison.v1")]
    PlanComparison,
    /// Question and answer list
    #[serde(rename = "FAQAccordion.v1")]
    FaqAccordion,
    /// Help center and docs links
    #[serde(rename = "SupportLinks.v1")]
    SupportLinks,
    /// Contact form or details
    #[serde(rename = "ContactSection.v1")]
    ContactSection,
    /// Lead capture banner
    #[serde(rename = "LeadCaptureCTA.v1")]
    LeadCaptureCta,
    /// Page footer
    #[serde(rename = "Footer.v1")]
    Footer,
    /// Top navigation
    #[serde(rename = "Navbar.v1")]
    Navbar,
    /// Thin banner above the navigation
    #[serde(rename = "AnnouncementBar.v1")]
    AnnouncementBar,
}

impl BlockType {
    /// Every archetype, in taxonomy order.
    pub const ALL: [BlockType; 23] = [
        BlockType::HeroCentered,
        BlockType::HeroSplit,
        BlockType::LogoCloud,
        BlockType::TestimonialsGrid,
        BlockType::RatingsSummary,
        BlockType::CaseStudies,
        BlockType::FeatureGrid,
        BlockType::CardsGrid,
        BlockType::FeatureWithMedia,
        BlockType::StepsTimeline,
        BlockType::StatsKpi,
        BlockType::IntegrationsGrid,
        BlockType::ComparisonTable,
        BlockType::UseCases,
        BlockType::PricingCards,
        BlockType::PlanComparison,
        BlockType::FaqAccordion,
        BlockType::SupportLinks,
        BlockType::ContactSection,
        BlockType::LeadCaptureCta,
        BlockType::Footer,
        BlockType::Navbar,
        BlockType::AnnouncementBar,
    ];

    /// Versioned id, e.g. `"HeroCentered.v1"`.
    pub fn id(&self) -> &'static str {
        match self {
            BlockType::HeroCentered => "HeroCentered.v1",
            BlockType::HeroSplit => "HeroSplit.v1",
            BlockType::LogoCloud => "LogoCloud.v1",
            BlockType::TestimonialsGrid => "TestimonialsGrid.v1",
            BlockType::RatingsSummary => "RatingsSummary.v1",
            BlockType::CaseStudies => "CaseStudies.v1",
            BlockType::FeatureGrid => "FeatureGrid.v1",
            BlockType::CardsGrid => "CardsGrid.v1",
            BlockType::FeatureWithMedia => "FeatureWithMedia.v1",
            BlockType::StepsTimeline => "StepsTimeline.v1",
            BlockType::StatsKpi => "StatsKPI.v1",
            BlockType::IntegrationsGrid => "IntegrationsGrid.v1",
            BlockType::ComparisonTable => "ComparisonTable.v1",
            BlockType::UseCases => "UseCases.v1",
            BlockType::PricingCards => "PricingCards.v1",
            BlockType::PlanComparison => "PlanComparison.v1",
            BlockType::FaqAccordion => "FAQAccordion.v1",
            BlockType::SupportLinks => "SupportLinks.v1",
            BlockType::ContactSection => "ContactSection.v1",
            BlockType::LeadCaptureCta => "LeadCaptureCTA.v1",
            BlockType::Footer => "Footer.v1",
            BlockType::Navbar => "Navbar.v1",
            BlockType::AnnouncementBar => "AnnouncementBar.v1",
        }
    }

    /// Id without the version suffix.
    pub fn name(&self) -> &'static str {
        let id = self.id();
        id.strip_suffix(".v1").unwrap_or(id)
    }

    /// Coarse family of the archetype.
    pub fn family(&self) -> Family {
        match self {
            BlockType::HeroCentered | BlockType::HeroSplit => Family::Hero,
            BlockType::LogoCloud
            | BlockType::TestimonialsGrid
            | BlockType::RatingsSummary
            | BlockType::CaseStudies => Family::Proof,
            BlockType::FeatureGrid
            | BlockType::CardsGrid
            | BlockType::FeatureWithMedia
            | BlockType::StepsTimeline
            | BlockType::StatsKpi
            | BlockType::IntegrationsGrid
            | BlockType::ComparisonTable
            | BlockType::UseCases => Family::Feature,
            BlockType::PricingCards | BlockType::PlanComparison => Family::Pricing,
            BlockType::FaqAccordion => Family::Faq,
            BlockType::SupportLinks => Family::Support,
            BlockType::ContactSection | BlockType::LeadCaptureCta => Family::Contact,
            BlockType::Footer | BlockType::Navbar | BlockType::AnnouncementBar => Family::Skeleton,
        }
    }

    /// Page skeleton types that classifier and atom-rule suggestions never replace.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            BlockType::Footer | BlockType::Navbar | BlockType::AnnouncementBar
        )
    }

    /// Layout schema label fixed by the archetype, if any.
    ///
    /// Archetypes without a fixed label fall back to intent tags.
    pub fn layout_schema(&self) -> Option<LayoutSchema> {
        match self {
            BlockType::HeroCentered | BlockType::HeroSplit => Some(LayoutSchema::Hero),
            BlockType::PricingCards => Some(LayoutSchema::Pricing),
            BlockType::FaqAccordion => Some(LayoutSchema::Faq),
            BlockType::Footer | BlockType::SupportLinks => Some(LayoutSchema::Footer),
            BlockType::LeadCaptureCta | BlockType::ContactSection => Some(LayoutSchema::Cta),
            BlockType::LogoCloud | BlockType::TestimonialsGrid | BlockType::CaseStudies => {
                Some(LayoutSchema::Proof)
            }
            BlockType::FeatureGrid
            | BlockType::UseCases
            | BlockType::IntegrationsGrid
            | BlockType::StatsKpi
            | BlockType::StepsTimeline
            | BlockType::ComparisonTable => Some(LayoutSchema::Features),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BlockType {
    type Err = Error;

    /// Accepts both `"PricingCards.v1"` and `"PricingCards"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BlockType::ALL
            .iter()
            .copied()
            .find(|block| block.id() == trimmed || block.name() == trimmed)
            .ok_or_else(|| Error::InvalidInput(format!("unknown block type: {}", s)))
    }
}

/// Coarse grouping of archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Family {
    /// Hero blocks
    Hero,
    /// Social proof
    Proof,
    /// Feature explanation
    Feature,
    /// Pricing
    Pricing,
    /// Questions and answers
    #[serde(rename = "FAQ")]
    Faq,
    /// Help and docs
    Support,
    /// Contact and lead capture
    Contact,
    /// Navigation, banners and footers
    #[default]
    Skeleton,
}

impl Family {
    /// Family label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Hero => "Hero",
            Family::Proof => "Proof",
            Family::Feature => "Feature",
            Family::Pricing => "Pricing",
            Family::Faq => "FAQ",
            Family::Support => "Support",
            Family::Contact => "Contact",
            Family::Skeleton => "Skeleton",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page-level layout schema label of a composed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutSchema {
    /// Hero
    Hero,
    /// Feature explanation
    Features,
    /// Social proof
    Proof,
    /// Pricing
    Pricing,
    /// Questions and answers
    #[serde(rename = "FAQ")]
    Faq,
    /// Call to action
    #[serde(rename = "CTA")]
    Cta,
    /// Footer
    Footer,
    /// Anything else
    #[default]
    Section,
}

impl LayoutSchema {
    /// Label string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutSchema::Hero => "Hero",
            LayoutSchema::Features => "Features",
            LayoutSchema::Proof => "Proof",
            LayoutSchema::Pricing => "Pricing",
            LayoutSchema::Faq => "FAQ",
            LayoutSchema::Cta => "CTA",
            LayoutSchema::Footer => "Footer",
            LayoutSchema::Section => "Section",
        }
    }
}

impl fmt::Display for LayoutSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal arrangement of a section's atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Single column
    #[default]
    Stack,
    /// Two halves side by side
    Split,
    /// Rows and columns
    Grid,
    /// Layered content
    Overlap,
}

impl LayoutKind {
    /// Label string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Stack => "stack",
            LayoutKind::Split => "split",
            LayoutKind::Grid => "grid",
            LayoutKind::Overlap => "overlap",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text/media arrangement derived from atom kinds and positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutPattern {
    /// Repeated image and text tiles
    Grid,
    /// Images left of the copy
    #[serde(rename = "Split_Left_Image")]
    SplitLeftImage,
    /// Images right of the copy
    #[serde(rename = "Split_Right_Image")]
    SplitRightImage,
    /// Text only
    Stack,
    /// No usable atoms
    Section,
}

impl LayoutPattern {
    /// Label string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPattern::Grid => "Grid",
            LayoutPattern::SplitLeftImage => "Split_Left_Image",
            LayoutPattern::SplitRightImage => "Split_Right_Image",
            LayoutPattern::Stack => "Stack",
            LayoutPattern::Section => "Section",
        }
    }

    /// Both split variants.
    pub fn is_split(&self) -> bool {
        matches!(
            self,
            LayoutPattern::SplitLeftImage | LayoutPattern::SplitRightImage
        )
    }
}

impl FromStr for LayoutPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "grid" => Ok(LayoutPattern::Grid),
            "split_left_image" => Ok(LayoutPattern::SplitLeftImage),
            "split_right_image" | "split" => Ok(LayoutPattern::SplitRightImage),
            "stack" => Ok(LayoutPattern::Stack),
            "section" => Ok(LayoutPattern::Section),
            _ => Err(Error::InvalidInput(format!("unknown layout pattern: {}", s))),
        }
    }
}

/// Coarse semantic role inferred from atoms, or supplied by an external tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticRole {
    /// Hero
    Hero,
    /// Feature explanation
    Feature,
    /// Pricing
    Pricing,
    /// Questions and answers
    #[serde(rename = "FAQ")]
    Faq,
    /// Customer quotes
    Testimonials,
    /// Logos
    LogoCloud,
    /// Call to action
    #[serde(rename = "CTA")]
    Cta,
    /// Case studies
    CaseStudies,
    /// Footer
    Footer,
    /// Unclassified
    Section,
}

impl SemanticRole {
    /// Label string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::Hero => "Hero",
            SemanticRole::Feature => "Feature",
            SemanticRole::Pricing => "Pricing",
            SemanticRole::Faq => "FAQ",
            SemanticRole::Testimonials => "Testimonials",
            SemanticRole::LogoCloud => "LogoCloud",
            SemanticRole::Cta => "CTA",
            SemanticRole::CaseStudies => "CaseStudies",
            SemanticRole::Footer => "Footer",
            SemanticRole::Section => "Section",
        }
    }

    /// Archetype an external semantic override maps to.
    pub fn block_type(&self) -> Option<BlockType> {
        match self {
            SemanticRole::Hero => Some(BlockType::HeroCentered),
            SemanticRole::Feature => Some(BlockType::FeatureGrid),
            SemanticRole::Pricing => Some(BlockType::PricingCards),
            SemanticRole::Faq => Some(BlockType::FaqAccordion),
            SemanticRole::Testimonials => Some(BlockType::TestimonialsGrid),
            SemanticRole::LogoCloud => Some(BlockType::LogoCloud),
            SemanticRole::Cta => Some(BlockType::LeadCaptureCta),
            SemanticRole::CaseStudies => Some(BlockType::CaseStudies),
            SemanticRole::Footer => Some(BlockType::Footer),
            SemanticRole::Section => None,
        }
    }
}

impl FromStr for SemanticRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" => Ok(SemanticRole::Hero),
            "feature" | "features" => Ok(SemanticRole::Feature),
            "pricing" => Ok(SemanticRole::Pricing),
            "faq" => Ok(SemanticRole::Faq),
            "testimonials" => Ok(SemanticRole::Testimonials),
            "logocloud" => Ok(SemanticRole::LogoCloud),
            "cta" => Ok(SemanticRole::Cta),
            "casestudies" => Ok(SemanticRole::CaseStudies),
            "footer" => Ok(SemanticRole::Footer),
            "section" => Ok(SemanticRole::Section),
            _ => Err(Error::InvalidInput(format!("unknown semantic role: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_ids_round_trip_through_serde() {
        for block in BlockType::ALL {
            let json = serde_json::to_string(&block).unwrap();
            assert_eq!(json, format!("\"{}\"", block.id()));
        }
    }

    #[test]
    fn test_block_type_from_str() {
        assert_eq!("StatsKPI.v1".parse::<BlockType>().unwrap(), BlockType::StatsKpi);
        assert_eq!("FAQAccordion".parse::<BlockType>().unwrap(), BlockType::FaqAccordion);
        assert!("Carousel.v1".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_protected_types() {
        let protected: Vec<_> = BlockType::ALL
            .iter()
            .filter(|b| b.is_protected())
            .collect();
        assert_eq!(
            protected,
            vec![&BlockType::Footer, &BlockType::Navbar, &BlockType::AnnouncementBar]
        );
    }

    #[test]
    fn test_layout_schema_labels() {
        assert_eq!(BlockType::HeroSplit.layout_schema(), Some(LayoutSchema::Hero));
        assert_eq!(BlockType::SupportLinks.layout_schema(), Some(LayoutSchema::Footer));
        assert_eq!(BlockType::StatsKpi.layout_schema(), Some(LayoutSchema::Features));
        assert_eq!(BlockType::CardsGrid.layout_schema(), None);
    }

    #[test]
    fn test_semantic_role_mapping() {
        assert_eq!(SemanticRole::Cta.block_type(), Some(BlockType::LeadCaptureCta));
        assert_eq!(SemanticRole::Section.block_type(), None);
        assert_eq!("FAQ".parse::<SemanticRole>().unwrap(), SemanticRole::Faq);
    }
}

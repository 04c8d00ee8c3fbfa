//! Keyword tables and text-driven labels.

use crate::model::{BlockType, LayoutKind, LayoutSchema, Section, SemanticRole};
use crate::text::contains_any;

/// Source keywords checked in order after the priority phrases.
pub const SECTION_KEYWORDS: &[(&str, BlockType)] = &[
    ("hero", BlockType::HeroCentered),
    ("feature", BlockType::FeatureGrid),
    ("benefit", BlockType::FeatureGrid),
    ("solution", BlockType::UseCases),
    ("use case", BlockType::UseCases),
    ("latest", BlockType::CardsGrid),
    ("news", BlockType::CardsGrid),
    ("press", BlockType::CardsGrid),
    ("military", BlockType::CardsGrid),
    ("maritime", BlockType::CardsGrid),
    ("land", BlockType::CardsGrid),
    ("pricing", BlockType::PricingCards),
    ("price", BlockType::PricingCards),
    ("faq", BlockType::FaqAccordion),
    ("question", BlockType::FaqAccordion),
    ("testimonial", BlockType::TestimonialsGrid),
    ("case", BlockType::CaseStudies),
    ("logo", BlockType::LogoCloud),
    ("customer", BlockType::LogoCloud),
    ("team", BlockType::CardsGrid),
    ("leadership", BlockType::CardsGrid),
    ("people", BlockType::CardsGrid),
    ("board", BlockType::CardsGrid),
    ("product", BlockType::CardsGrid),
    ("contact", BlockType::ContactSection),
    ("support", BlockType::SupportLinks),
    ("integration", BlockType::IntegrationsGrid),
    ("compare", BlockType::ComparisonTable),
    ("comparison", BlockType::ComparisonTable),
    ("stats", BlockType::StatsKpi),
    ("timeline", BlockType::StepsTimeline),
    ("process", BlockType::StepsTimeline),
];

const CARD_WORDS: &[&str] = &[
    "team",
    "leadership",
    "people",
    "board",
    "profile",
    "member",
    "speaker",
    "product",
    "portfolio",
    "collection",
    "case study",
    "news",
    "press",
    "article",
    "blog",
    "latest",
];

const CONVERSION_WORDS: &[&str] = &["contact", "demo", "get started", "signup", "sign up", "book"];

/// Industry tags and the words that imply them.
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("defense", &["defense", "military", "mission", "tactical", "secure"]),
    ("aerospace", &["satellite", "orbit", "space", "aerospace"]),
    ("telecom", &["telecom", "network", "connectivity", "wireless", "broadband"]),
    ("energy", &["energy", "power", "grid", "utility"]),
    ("manufacturing", &["manufacturing", "industrial", "factory", "production"]),
    ("healthcare", &["healthcare", "medical", "clinical", "patient"]),
    ("finance", &["finance", "bank", "fintech", "payment", "compliance"]),
    ("education", &["education", "learning", "school", "university"]),
    ("logistics", &["logistics", "supply chain", "shipping", "fleet"]),
    ("security", &["security", "surveillance", "risk", "threat"]),
    ("enterprise", &["enterprise", "platform", "operations", "workflow"]),
];

const INTENT_KEYWORDS: &[(&str, &[&str])] = &[
    ("pricing", &["pricing", "price", "plan"]),
    ("faq", &["faq", "question"]),
    (
        "trust",
        &["testimonial", "logo", "trusted", "case study", "customer"],
    ),
    (
        "conversion",
        &["contact", "demo", "cta", "get started", "book", "signup", "sign up", "trial"],
    ),
    (
        "feature_explain",
        &["feature", "benefit", "use case", "capability", "how it works"],
    ),
    ("product_story", &["hero", "story", "mission"]),
    ("support", &["support", "docs"]),
];

/// Map a source label to an archetype by keyword.
///
/// Priority phrases are checked first, then [`SECTION_KEYWORDS`] in order.
/// Table keywords only match whole words, optionally pluralized.
pub fn block_type_from_text(text: &str) -> Option<BlockType> {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return None;
    }
    if lower.contains("case study") {
        return Some(BlockType::CaseStudies);
    }
    if lower.contains("testimonial") {
        return Some(BlockType::TestimonialsGrid);
    }
    if contains_any(&lower, &["logo", "trusted"]) {
        return Some(BlockType::LogoCloud);
    }
    if contains_any(&lower, &["pricing", "price", "plan", "subscription"]) {
        return Some(BlockType::PricingCards);
    }
    if contains_any(&lower, &["faq", "question"]) {
        return Some(BlockType::FaqAccordion);
    }
    if contains_any(&lower, CARD_WORDS) {
        return Some(BlockType::CardsGrid);
    }
    if contains_any(&lower, CONVERSION_WORDS) {
        return Some(BlockType::ContactSection);
    }
    SECTION_KEYWORDS
        .iter()
        .find(|(key, _)| mentions_word(&lower, key))
        .map(|(_, block_type)| *block_type)
}

/// True when `key` occurs as a word of `text`, allowing an `s`/`es` plural.
fn mentions_word(text: &str, key: &str) -> bool {
    text.match_indices(key).any(|(start, _)| {
        let starts_word = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let rest = &text[start + key.len()..];
        let suffix_len = rest
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(rest.len());
        starts_word && matches!(&rest[..suffix_len], "" | "s" | "es")
    })
}

/// Baseline archetype of a section from its position and source label.
pub fn baseline_block_type(section: &Section) -> BlockType {
    let source = section.source.trim().to_lowercase();
    if source == "footer" {
        BlockType::Footer
    } else if source == "nav" {
        BlockType::Navbar
    } else if section.index == 0 {
        BlockType::HeroCentered
    } else {
        block_type_from_text(&source).unwrap_or(BlockType::FeatureGrid)
    }
}

/// Lowercased text used for tagging: section text, archetype id and hints.
fn tag_text(section: &Section, block_type: BlockType) -> String {
    let mut text = format!(
        "{} {} {}",
        section.source.to_lowercase(),
        section.text_blob(),
        block_type.id().to_lowercase()
    );
    if let Some(class) = &section.class_name {
        text.push(' ');
        text.push_str(&class.to_lowercase());
    }
    text
}

/// Intent tags of a resolved section; `general` when nothing matches.
pub fn intent_tags(section: &Section, block_type: BlockType) -> Vec<String> {
    let text = tag_text(section, block_type);
    let mut tags: Vec<String> = INTENT_KEYWORDS
        .iter()
        .filter(|(_, words)| contains_any(&text, words))
        .map(|(tag, _)| tag.to_string())
        .collect();

    let from_role = match section.semantic_role {
        Some(SemanticRole::Pricing) => Some("pricing"),
        Some(SemanticRole::Faq) => Some("faq"),
        Some(SemanticRole::Testimonials) => Some("trust"),
        Some(SemanticRole::Cta) => Some("conversion"),
        _ => None,
    };
    if let Some(tag) = from_role {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    if tags.is_empty() {
        tags.push("general".to_string());
    }
    tags
}

/// Industry tags mentioned by the text.
pub fn industry_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .filter(|(_, words)| contains_any(&lower, words))
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// Layout schema label: fixed by the archetype, else from intent tags.
pub fn layout_schema_label(block_type: BlockType, intent_tags: &[String]) -> LayoutSchema {
    if let Some(schema) = block_type.layout_schema() {
        return schema;
    }
    if intent_tags.iter().any(|t| t == "trust") {
        LayoutSchema::Proof
    } else if intent_tags.iter().any(|t| t == "conversion") {
        LayoutSchema::Cta
    } else {
        LayoutSchema::Section
    }
}

/// Presentation variant of a resolved archetype.
pub fn variant(section: &Section, block_type: BlockType, group_layout: Option<LayoutKind>) -> String {
    let has_media = section.content.has_media() || section.stats.images > 0 || section.stats.videos > 0;
    let variant = match block_type {
        BlockType::HeroSplit => "image",
        BlockType::HeroCentered if has_media => "withMedia",
        BlockType::HeroCentered => "textOnly",
        BlockType::LogoCloud => "grid",
        BlockType::TestimonialsGrid => "2col",
        BlockType::FeatureGrid => "3col",
        BlockType::PricingCards => "3up",
        BlockType::FaqAccordion => "singleOpen",
        BlockType::CaseStudies => "cards",
        BlockType::StatsKpi => "grid",
        BlockType::StepsTimeline => "vertical",
        BlockType::CardsGrid => {
            let latest = section.source.to_lowercase().contains("latest");
            if latest || (group_layout == Some(LayoutKind::Grid) && has_media) {
                "media"
            } else {
                "product"
            }
        }
        _ => "simple",
    };
    variant.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn titled(index: usize, title: &str) -> Section {
        Section::new(index, BBox::default()).with_title(title)
    }

    #[test]
    fn test_priority_phrases_before_table() {
        // "feature" is in the table, but "pricing" is a priority phrase
        assert_eq!(block_type_from_text("Feature pricing"), Some(BlockType::PricingCards));
        assert_eq!(block_type_from_text("Meet the team"), Some(BlockType::CardsGrid));
        assert_eq!(block_type_from_text("Book a call"), Some(BlockType::ContactSection));
        assert_eq!(block_type_from_text("Our process"), Some(BlockType::StepsTimeline));
        assert_eq!(block_type_from_text("Lorem"), None);
    }

    #[test]
    fn test_table_keywords_match_whole_words() {
        assert_eq!(block_type_from_text("Land systems"), Some(BlockType::CardsGrid));
        assert_eq!(block_type_from_text("Key features"), Some(BlockType::FeatureGrid));
        assert_eq!(block_type_from_text("Landing"), None);
        assert_eq!(block_type_from_text("Island tours"), None);
        assert_eq!(baseline_block_type(&titled(2, "Landing page")), BlockType::FeatureGrid);
    }

    #[test]
    fn test_baseline_positions() {
        assert_eq!(baseline_block_type(&titled(0, "Welcome")), BlockType::HeroCentered);
        assert_eq!(baseline_block_type(&titled(5, "footer")), BlockType::Footer);
        assert_eq!(baseline_block_type(&titled(3, "Something else")), BlockType::FeatureGrid);
        assert_eq!(baseline_block_type(&titled(3, "Integrations")), BlockType::IntegrationsGrid);
    }

    #[test]
    fn test_intent_tags() {
        let section = titled(2, "Trusted by 500 customers");
        assert_eq!(intent_tags(&section, BlockType::LogoCloud), vec!["trust"]);

        let mut plain = titled(2, "Lorem");
        assert_eq!(intent_tags(&plain, BlockType::CardsGrid), vec!["general"]);
        plain.semantic_role = Some(SemanticRole::Cta);
        assert_eq!(intent_tags(&plain, BlockType::CardsGrid), vec!["conversion"]);
    }

    #[test]
    fn test_schema_label_falls_back_to_intent() {
        let trust = vec!["trust".to_string()];
        assert_eq!(layout_schema_label(BlockType::CardsGrid, &trust), LayoutSchema::Proof);
        assert_eq!(layout_schema_label(BlockType::PricingCards, &trust), LayoutSchema::Pricing);
        assert_eq!(layout_schema_label(BlockType::Navbar, &[]), LayoutSchema::Section);
    }

    #[test]
    fn test_industry_tags() {
        assert_eq!(
            industry_tags("Secure satellite payment platform"),
            vec!["defense", "aerospace", "finance", "enterprise"]
        );
    }

    #[test]
    fn test_variants() {
        assert_eq!(variant(&titled(0, "Hi"), BlockType::HeroCentered, None), "textOnly");
        assert_eq!(variant(&titled(4, "Latest"), BlockType::CardsGrid, None), "media");
        assert_eq!(variant(&titled(4, "Shop"), BlockType::CardsGrid, None), "product");
        assert_eq!(variant(&titled(4, "Hi"), BlockType::Footer, None), "simple");
    }
}

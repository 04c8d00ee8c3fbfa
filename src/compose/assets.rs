//! Page summary and copy-level content assets.

use super::baseline::industry_tags;
use crate::model::{ContentAssets, ContentSignals, ContentTotals, LinkItem, Section};
use crate::text::LazyRegex;
use std::collections::BTreeMap;

static PRICING_SIGNAL: LazyRegex = LazyRegex::new(r"\bpricing|price|plan|/mo|/yr|\$\d");
static FAQ_SIGNAL: LazyRegex = LazyRegex::new(r"\bfaq|question|answers?\b");
static TRUST_SIGNAL: LazyRegex =
    LazyRegex::new(r"\b(testimonial|case study|logo cloud|trusted by|customers?)\b");
static CONVERSION_SIGNAL: LazyRegex =
    LazyRegex::new(r"\b(contact|demo|get started|signup|sign up|book|trial)\b");
static TERM: LazyRegex = LazyRegex::new(r"[a-z0-9]{3,}");

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "this", "that", "your", "you", "our", "are", "was",
    "were", "can", "will", "have", "has", "how", "why", "all", "more", "use", "about", "into",
    "over", "than", "new", "best", "get", "learn", "support",
];

const TONE_KEYWORDS: &[(&str, &[&str])] = &[
    ("trust", &["secure", "compliance", "reliable", "trusted", "risk"]),
    ("innovation", &["innovative", "cutting-edge", "next-gen", "ai", "automation"]),
    ("performance", &["fast", "performance", "scale", "uptime", "latency"]),
    ("simplicity", &["simple", "easy", "intuitive", "streamline"]),
    ("expertise", &["expert", "proven", "certified", "award"]),
];

const STRONG_CTA: &[&str] = &["get started", "request demo", "contact us", "buy now"];
const WEAK_CTA: &[&str] = &["learn more", "read more", "more", "details"];

/// Maximum number of top terms.
pub const TOP_TERMS: usize = 8;

/// Maximum number of CTA samples.
pub const CTA_SAMPLES: usize = 6;

/// Sentences joined into the page summary.
const SUMMARY_PARTS: usize = 3;

/// First three non-empty paragraphs, falling back to headings.
pub fn page_summary(sections: &[Section]) -> String {
    let texts: Vec<&str> = sections
        .iter()
        .flat_map(|s| s.content.texts.iter())
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(SUMMARY_PARTS)
        .collect();
    if !texts.is_empty() {
        return texts.join(" ");
    }
    sections
        .iter()
        .flat_map(|s| s.content.headings.iter())
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .take(SUMMARY_PARTS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Copy signals, totals and recommendations across the page.
pub fn content_assets(sections: &[Section]) -> ContentAssets {
    let headings: Vec<&str> = sections
        .iter()
        .flat_map(|s| s.content.headings.iter().map(String::as_str))
        .filter(|t| !t.trim().is_empty())
        .collect();
    let paragraphs: Vec<&str> = sections
        .iter()
        .flat_map(|s| s.content.texts.iter().map(String::as_str))
        .filter(|t| !t.trim().is_empty())
        .collect();
    let buttons: Vec<&LinkItem> = sections.iter().flat_map(|s| s.content.buttons.iter()).collect();
    let links: Vec<&LinkItem> = sections.iter().flat_map(|s| s.content.links.iter()).collect();
    let prices = sections.iter().map(|s| s.content.prices.len()).sum::<usize>();

    let blob = headings
        .iter()
        .chain(paragraphs.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let signals = ContentSignals {
        pricing: PRICING_SIGNAL.is_match(&blob),
        faq: FAQ_SIGNAL.is_match(&blob),
        trust: TRUST_SIGNAL.is_match(&blob),
        conversion: CONVERSION_SIGNAL.is_match(&blob),
    };

    let cta_labels: Vec<String> = buttons
        .iter()
        .chain(links.iter())
        .map(|item| item.label.trim().to_lowercase())
        .collect();
    let cta_strong = cta_labels.iter().any(|l| STRONG_CTA.contains(&l.as_str()));
    let cta_weak = cta_labels.iter().any(|l| WEAK_CTA.contains(&l.as_str()));

    let totals = ContentTotals {
        headings: headings.len(),
        paragraphs: paragraphs.len(),
        sections: sections.len(),
        buttons: buttons.len(),
        links: links.len(),
        prices,
        cta_strong,
        cta_weak,
    };

    let mut template_hints = Vec::new();
    if signals.pricing {
        template_hints.push("use_pricing_table".to_string());
    }
    if signals.faq {
        template_hints.push("use_faq_section".to_string());
    }
    if signals.conversion {
        template_hints.push("use_primary_cta".to_string());
    }
    if signals.trust {
        template_hints.push("use_proof_section".to_string());
    }

    let mut recommendations = Vec::new();
    if !cta_strong {
        recommendations.push("add_strong_cta".to_string());
    }
    if !signals.trust {
        recommendations.push("add_proof_section".to_string());
    }
    if signals.pricing && prices == 0 {
        recommendations.push("clarify_pricing_details".to_string());
    }
    if totals.paragraphs > 20 && totals.sections < 4 {
        recommendations.push("split_long_text_into_sections".to_string());
    }
    if headings.is_empty() {
        recommendations.push("add_hero_heading".to_string());
    }

    ContentAssets {
        signals,
        totals,
        industry_tags: industry_tags(&blob),
        top_terms: top_terms(&blob, TOP_TERMS),
        tone_hints: tone_hints(&blob),
        cta_samples: cta_labels
            .into_iter()
            .filter(|l| !l.is_empty())
            .take(CTA_SAMPLES)
            .collect(),
        template_hints,
        recommendations,
    }
}

/// Most frequent non-stopword terms; ties sorted alphabetically.
pub fn top_terms(blob: &str, limit: usize) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in TERM.find_all(blob) {
        if !STOPWORDS.contains(&word) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Tone hints mentioned by the text.
///
/// Two-letter keywords only match whole words.
pub fn tone_hints(blob: &str) -> Vec<String> {
    let words: Vec<&str> = blob
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();
    TONE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords.iter().any(|k| {
                if k.len() <= 2 {
                    words.contains(k)
                } else {
                    blob.contains(*k)
                }
            })
        })
        .map(|(tone, _)| tone.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn section(index: usize, heading: &str, texts: &[&str], buttons: &[&str]) -> Section {
        let mut section = Section::new(index, BBox::default()).with_title(heading);
        section.content.headings.push(heading.to_string());
        section.content.texts = texts.iter().map(|t| t.to_string()).collect();
        section.content.buttons = buttons
            .iter()
            .map(|b| LinkItem {
                label: b.to_string(),
                href: None,
            })
            .collect();
        section
    }

    #[test]
    fn test_summary_takes_three_texts() {
        let sections = vec![
            section(0, "Hero", &["One.", " ", "Two."], &[]),
            section(1, "More", &["Three.", "Four."], &[]),
        ];
        assert_eq!(page_summary(&sections), "One. Two. Three.");
        assert_eq!(page_summary(&[section(0, "Only heading", &[], &[])]), "Only heading");
    }

    #[test]
    fn test_content_assets() {
        let sections = vec![
            section(0, "Secure payments", &["Trusted by customers worldwide. Book a demo."], &["Get started"]),
            section(1, "Pricing", &["Plans from $29/mo."], &["Learn more"]),
        ];
        let mut sections = sections;
        sections[1].content.prices.push("$29".to_string());

        let assets = content_assets(&sections);
        assert!(assets.signals.pricing);
        assert!(assets.signals.trust);
        assert!(assets.signals.conversion);
        assert!(!assets.signals.faq);
        assert!(assets.totals.cta_strong);
        assert!(assets.totals.cta_weak);
        assert_eq!(assets.totals.buttons, 2);
        assert_eq!(assets.totals.prices, 1);
        assert_eq!(assets.cta_samples, vec!["get started", "learn more"]);
        assert_eq!(
            assets.template_hints,
            vec!["use_pricing_table", "use_primary_cta", "use_proof_section"]
        );
        assert!(assets.recommendations.is_empty());
        assert!(assets.tone_hints.contains(&"trust".to_string()));
        assert!(assets.industry_tags.contains(&"finance".to_string()));
    }

    #[test]
    fn test_recommendations_for_bare_page() {
        let assets = content_assets(&[section(0, "", &["Plain copy"], &[])]);
        assert_eq!(
            assets.recommendations,
            vec!["add_strong_cta", "add_proof_section", "add_hero_heading"]
        );
    }

    #[test]
    fn test_top_terms_rank_and_stopwords() {
        let terms = top_terms("the cloud cloud data data data for api", 8);
        assert_eq!(terms, vec!["data", "cloud", "api"]);
    }

    #[test]
    fn test_tone_short_keywords_match_words() {
        assert!(tone_hints("maintain your stack").is_empty());
        assert_eq!(tone_hints("ai for teams"), vec!["innovation"]);
    }
}

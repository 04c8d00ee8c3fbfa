//! Ordered archetype resolvers.
//!
//! Each resolver sees the section, the current assignment and the shared
//! decision inputs, and may return a replacement. The composer runs them in
//! priority order; later resolvers win unless their guard rejects the change.

use super::baseline::baseline_block_type;
use crate::analyze::ComposerThresholds;
use crate::classify::Suggestion;
use crate::model::{BlockType, Candidate, LayoutKind, Section, SemanticOverride, SemanticRole};

/// Decision inputs for one section.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput<'a> {
    /// Classifier top candidate, before atom suggestions are merged
    pub classifier_top: Option<&'a Candidate>,
    /// Best atom-rule suggestion
    pub suggestion: Option<&'a Suggestion>,
    /// Layout of the section inside its visual group
    pub group_layout: Option<LayoutKind>,
    /// External override for the section
    pub external: Option<&'a SemanticOverride>,
}

/// One step of the archetype cascade.
pub trait Resolver: Send + Sync {
    /// Name used in the decision notes.
    fn name(&self) -> &'static str;

    /// Return a replacement for `current`, if this resolver applies.
    fn resolve(
        &self,
        section: &Section,
        current: Option<BlockType>,
        input: &ResolveInput<'_>,
    ) -> Option<BlockType>;
}

fn is_protected(current: Option<BlockType>) -> bool {
    current.is_some_and(|b| b.is_protected())
}

/// Position and source keywords.
pub struct BaselineKeywords;

impl Resolver for BaselineKeywords {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn resolve(
        &self,
        section: &Section,
        _current: Option<BlockType>,
        _input: &ResolveInput<'_>,
    ) -> Option<BlockType> {
        Some(baseline_block_type(section))
    }
}

/// Group and atom layout refinement.
pub struct HighFidelityLayout;

impl Resolver for HighFidelityLayout {
    fn name(&self) -> &'static str {
        "high_fidelity"
    }

    fn resolve(
        &self,
        section: &Section,
        current: Option<BlockType>,
        input: &ResolveInput<'_>,
    ) -> Option<BlockType> {
        if is_protected(current) {
            return None;
        }
        let media_split = if section.index == 0 {
            BlockType::HeroSplit
        } else {
            BlockType::FeatureWithMedia
        };
        let refined = match input.group_layout {
            Some(LayoutKind::Split) => Some(media_split),
            Some(LayoutKind::Grid) if section.card_count >= 3 => Some(BlockType::CardsGrid),
            _ if section.layout_pattern.is_some_and(|p| p.is_split()) => Some(media_split),
            _ => None,
        };
        refined.filter(|b| Some(*b) != current)
    }
}

/// Classifier top candidate when it leads by enough points.
pub struct ClassifierOverride {
    /// Required lead over the current type
    pub score_delta: i32,
}

impl Resolver for ClassifierOverride {
    fn name(&self) -> &'static str {
        "classifier"
    }

    fn resolve(
        &self,
        section: &Section,
        current: Option<BlockType>,
        input: &ResolveInput<'_>,
    ) -> Option<BlockType> {
        if is_protected(current) {
            return None;
        }
        let top = input.classifier_top?;
        if Some(top.block_type) == current || top.score <= 0 {
            return None;
        }
        let current_score = current.map_or(0, |b| section.score_of(b));
        (top.score - current_score >= self.score_delta).then_some(top.block_type)
    }
}

/// Confident atom-rule suggestions.
pub struct AtomRuleOverride {
    /// Minimum suggestion confidence
    pub min_confidence: f64,
}

impl Resolver for AtomRuleOverride {
    fn name(&self) -> &'static str {
        "atoms_rule"
    }

    fn resolve(
        &self,
        section: &Section,
        current: Option<BlockType>,
        input: &ResolveInput<'_>,
    ) -> Option<BlockType> {
        if is_protected(current) || current == Some(BlockType::LeadCaptureCta) {
            return None;
        }
        if section.index == 0 && current == Some(BlockType::HeroCentered) {
            return None;
        }
        let suggestion = input.suggestion?;
        (suggestion.confidence >= self.min_confidence && Some(suggestion.block_type) != current)
            .then_some(suggestion.block_type)
    }
}

/// Authoritative external classification.
pub struct ExternalOverride;

impl Resolver for ExternalOverride {
    fn name(&self) -> &'static str {
        "external"
    }

    fn resolve(
        &self,
        _section: &Section,
        _current: Option<BlockType>,
        input: &ResolveInput<'_>,
    ) -> Option<BlockType> {
        let external = input.external?;
        if let Some(id) = external.block_type.as_deref() {
            match id.parse::<BlockType>() {
                Ok(block_type) => return Some(block_type),
                Err(e) => log::warn!("Ignoring external override for section {}: {}", external.index, e),
            }
        }
        external
            .semantic_role
            .as_deref()
            .and_then(|role| role.parse::<SemanticRole>().ok())
            .and_then(|role| role.block_type())
    }
}

/// The resolver cascade for a configuration, in priority order.
pub fn default_resolvers(high_fidelity: bool, thresholds: &ComposerThresholds) -> Vec<Box<dyn Resolver>> {
    let mut resolvers: Vec<Box<dyn Resolver>> = vec![Box::new(BaselineKeywords)];
    if high_fidelity {
        resolvers.push(Box::new(HighFidelityLayout));
    }
    resolvers.push(Box::new(ClassifierOverride {
        score_delta: thresholds.score_delta,
    }));
    resolvers.push(Box::new(AtomRuleOverride {
        min_confidence: thresholds.rule_confidence,
    }));
    resolvers.push(Box::new(ExternalOverride));
    resolvers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, LayoutPattern};

    fn section(index: usize) -> Section {
        Section::new(index, BBox::default()).with_title("Details")
    }

    #[test]
    fn test_classifier_needs_lead() {
        let mut s = section(2);
        s.candidates = vec![
            Candidate::new(BlockType::PricingCards, 45),
            Candidate::new(BlockType::FeatureGrid, 40),
        ];
        let resolver = ClassifierOverride { score_delta: 10 };
        let input = ResolveInput {
            classifier_top: s.candidates.first(),
            ..Default::default()
        };
        assert_eq!(resolver.resolve(&s, Some(BlockType::FeatureGrid), &input), None);
        assert_eq!(
            resolver.resolve(&s, Some(BlockType::CardsGrid), &input),
            Some(BlockType::PricingCards)
        );
    }

    #[test]
    fn test_protected_types_resist_classifier_and_atoms() {
        let s = section(7);
        let top = Candidate::new(BlockType::ContactSection, 90);
        let suggestion = Suggestion {
            block_type: BlockType::LogoCloud,
            confidence: 0.95,
            rule: "logo",
        };
        let input = ResolveInput {
            classifier_top: Some(&top),
            suggestion: Some(&suggestion),
            ..Default::default()
        };
        let footer = Some(BlockType::Footer);
        assert_eq!(ClassifierOverride { score_delta: 10 }.resolve(&s, footer, &input), None);
        assert_eq!(AtomRuleOverride { min_confidence: 0.8 }.resolve(&s, footer, &input), None);
        assert_eq!(HighFidelityLayout.resolve(&s, footer, &input), None);
    }

    #[test]
    fn test_atom_rule_threshold() {
        let s = section(3);
        let weak = Suggestion {
            block_type: BlockType::StatsKpi,
            confidence: 0.6,
            rule: "stats",
        };
        let input = ResolveInput {
            suggestion: Some(&weak),
            ..Default::default()
        };
        let resolver = AtomRuleOverride { min_confidence: 0.8 };
        assert_eq!(resolver.resolve(&s, Some(BlockType::FeatureGrid), &input), None);
    }

    #[test]
    fn test_external_override_is_unconditional() {
        let s = section(6);
        let external = SemanticOverride {
            index: 6,
            semantic_role: Some("CTA".to_string()),
            ..Default::default()
        };
        let input = ResolveInput {
            external: Some(&external),
            ..Default::default()
        };
        assert_eq!(
            ExternalOverride.resolve(&s, Some(BlockType::Footer), &input),
            Some(BlockType::LeadCaptureCta)
        );

        let explicit = SemanticOverride {
            index: 6,
            block_type: Some("PricingCards.v1".to_string()),
            semantic_role: Some("FAQ".to_string()),
            ..Default::default()
        };
        let input = ResolveInput {
            external: Some(&explicit),
            ..Default::default()
        };
        assert_eq!(
            ExternalOverride.resolve(&s, None, &input),
            Some(BlockType::PricingCards)
        );
    }

    #[test]
    fn test_high_fidelity_refinement() {
        let mut s = section(0);
        let split = ResolveInput {
            group_layout: Some(LayoutKind::Split),
            ..Default::default()
        };
        assert_eq!(
            HighFidelityLayout.resolve(&s, Some(BlockType::HeroCentered), &split),
            Some(BlockType::HeroSplit)
        );

        s.index = 3;
        s.card_count = 4;
        let grid = ResolveInput {
            group_layout: Some(LayoutKind::Grid),
            ..Default::default()
        };
        assert_eq!(
            HighFidelityLayout.resolve(&s, Some(BlockType::FeatureGrid), &grid),
            Some(BlockType::CardsGrid)
        );

        s.card_count = 0;
        s.layout_pattern = Some(LayoutPattern::SplitLeftImage);
        assert_eq!(
            HighFidelityLayout.resolve(&s, Some(BlockType::FeatureGrid), &grid),
            Some(BlockType::FeatureWithMedia)
        );
    }
}

//! Section composition.
//!
//! The [`Composer`] fuses the keyword baseline, layout refinement, classifier
//! candidates, atom-rule suggestions and external overrides into one archetype
//! per section, then fills in the per-section labels (layout schema, intent
//! and industry tags, variant, style hints, anchor) and the page-level summary
//! and content assets.
//!
//! # Priority
//!
//! Resolvers run in a fixed order. A later resolver replaces the current
//! assignment only when its guard allows it; protected skeleton types
//! (`Footer.v1`, `Navbar.v1`, `AnnouncementBar.v1`) are only ever replaced by
//! an external override.

mod assets;
mod baseline;
mod hints;
mod navbar;
mod resolvers;

pub use assets::{content_assets, page_summary, tone_hints, top_terms};
pub use baseline::{
    baseline_block_type, block_type_from_text, industry_tags, intent_tags, layout_schema_label,
    variant, INDUSTRY_KEYWORDS, SECTION_KEYWORDS,
};
pub use hints::style_hints;
pub use navbar::{has_nav_hint, navbar_section, INJECTED_NOTE};
pub use resolvers::{
    default_resolvers, AtomRuleOverride, BaselineKeywords, ClassifierOverride, ExternalOverride,
    HighFidelityLayout, ResolveInput, Resolver,
};

use crate::analyze::{PipelineConfig, SectionGrouper};
use crate::classify::{merge_suggestion, AtomRuleEngine};
use crate::model::{
    BlockType, Candidate, ComposedPage, DesignTokens, Family, LayoutKind, PageCapture, Section,
    SectionGroup, SemanticOverride,
};
use crate::text::slugify;
use crate::tokens::normalize_atom_styles;

/// Fuses every classification source into the final section list.
pub struct Composer {
    config: PipelineConfig,
    resolvers: Vec<Box<dyn Resolver>>,
    engine: AtomRuleEngine,
    overrides: Vec<SemanticOverride>,
}

impl Composer {
    /// Create a composer with the resolver cascade for the configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            config: config.clone(),
            resolvers: default_resolvers(config.high_fidelity, &config.thresholds),
            engine: AtomRuleEngine::new(),
            overrides: Vec::new(),
        }
    }

    /// Replace the resolver cascade.
    pub fn with_resolvers(mut self, resolvers: Vec<Box<dyn Resolver>>) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Add external overrides; they win over the capture's own overrides.
    pub fn with_overrides(mut self, overrides: Vec<SemanticOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Compose classified sections into a page.
    ///
    /// Sections are expected to be annotated by the classifier already.
    pub fn compose(
        &self,
        capture: &PageCapture,
        mut sections: Vec<Section>,
        tokens: &DesignTokens,
    ) -> ComposedPage {
        log::debug!("Composer: Step 1 - group {} sections", sections.len());
        let mut groups = SectionGrouper::new(self.config.group_gap).group(&sections);

        log::debug!("Composer: Step 2 - resolve archetypes");
        for section in sections.iter_mut() {
            let group_layout = group_layout(&groups, section.index);
            let external = self.external_for(capture, section.index);
            self.resolve_section(section, group_layout, external);
            self.finish_section(section, group_layout, tokens, capture.viewport.height);
        }

        if self.config.inject_navbar
            && !sections.iter().any(|s| s.block_type == Some(BlockType::Navbar))
            && has_nav_hint(&sections, &capture.elements, capture.viewport.height)
        {
            log::debug!("Composer: Step 3 - inject navbar");
            let nav = navbar_section(&sections, capture.viewport.width);
            sections.insert(0, nav);
            for (index, section) in sections.iter_mut().enumerate() {
                section.index = index;
            }
            for group in groups.iter_mut() {
                for index in group.indices.iter_mut() {
                    *index += 1;
                }
                for grouped in group.sections.iter_mut() {
                    grouped.index += 1;
                }
            }
        }

        log::debug!("Composer: Step 4 - page summary and content assets");
        let layout_schema = sections
            .iter()
            .map(|s| s.layout_schema.unwrap_or_default())
            .collect();

        ComposedPage {
            url: capture.url.clone(),
            analyzed_at: None,
            summary: page_summary(&sections),
            content_assets: content_assets(&sections),
            layout_schema,
            sections,
            groups,
        }
    }

    /// Last matching override; composer overrides take precedence over the capture's.
    fn external_for<'a>(&'a self, capture: &'a PageCapture, index: usize) -> Option<&'a SemanticOverride> {
        capture
            .overrides
            .iter()
            .chain(self.overrides.iter())
            .filter(|o| o.index == index)
            .last()
    }

    /// Run the resolver cascade over one section.
    fn resolve_section(
        &self,
        section: &mut Section,
        group_layout: Option<LayoutKind>,
        external: Option<&SemanticOverride>,
    ) {
        if let Some(external) = external {
            apply_annotations(section, external);
        }

        if section.source.trim().eq_ignore_ascii_case("footer") {
            section.candidates = vec![Candidate::new(BlockType::Footer, 100).with_reason("footer_tag:100")];
            section.family = Family::Skeleton;
        }

        let suggestion = self.engine.suggest(section);
        let classifier_candidates = section.candidates.clone();
        let input = ResolveInput {
            classifier_top: classifier_candidates.first(),
            suggestion: suggestion.as_ref(),
            group_layout,
            external,
        };

        let mut current: Option<BlockType> = None;
        for resolver in &self.resolvers {
            if let Some(block_type) = resolver.resolve(section, current, &input) {
                log::debug!(
                    "Section {}: {} -> {}",
                    section.index,
                    resolver.name(),
                    block_type
                );
                section.note(format!("{}:{}", resolver.name(), block_type));
                current = Some(block_type);
            }
        }

        if let Some(suggestion) = &suggestion {
            merge_suggestion(&mut section.candidates, suggestion);
        }

        section.block_type = Some(current.unwrap_or(BlockType::FeatureGrid));
    }

    /// Per-section labels and cleanup once the archetype is fixed.
    fn finish_section(
        &self,
        section: &mut Section,
        group_layout: Option<LayoutKind>,
        tokens: &DesignTokens,
        viewport_height: f64,
    ) {
        let block_type = section.block_type.unwrap_or(BlockType::FeatureGrid);

        let tags = intent_tags(section, block_type);
        section.layout_schema = Some(layout_schema_label(block_type, &tags));
        section.intent_tags = tags;
        section.industry_tags = industry_tags(&format!("{} {}", section.source, section.text_blob()));
        section.variant = Some(variant(section, block_type, group_layout));
        section.style_hints = Some(style_hints(section, viewport_height));

        let slug = slugify(&section.source);
        section.anchor = Some(if slug.is_empty() {
            format!("section-{}", section.index)
        } else {
            slug
        });

        normalize_atom_styles(&mut section.atoms, tokens);
        if !self.config.keep_media {
            section.content.strip_media();
        }
    }
}

/// Layout of a section inside its visual group.
fn group_layout(groups: &[SectionGroup], index: usize) -> Option<LayoutKind> {
    groups
        .iter()
        .find_map(|g| g.get(index))
        .map(|s| s.layout_type)
}

/// Copy an override's semantic role and layout pattern onto the section.
fn apply_annotations(section: &mut Section, external: &SemanticOverride) {
    if let Some(role) = external.semantic_role.as_deref() {
        match role.parse() {
            Ok(role) => section.semantic_role = Some(role),
            Err(e) => log::warn!("Section {}: {}", section.index, e),
        }
    }
    if let Some(pattern) = external.layout_pattern.as_deref() {
        match pattern.parse() {
            Ok(pattern) => section.layout_pattern = Some(pattern),
            Err(e) => log::warn!("Section {}: {}", section.index, e),
        }
    }
}

/// Compose a page with the default cascade.
pub fn compose_page(
    capture: &PageCapture,
    sections: Vec<Section>,
    tokens: &DesignTokens,
    config: &PipelineConfig,
) -> ComposedPage {
    Composer::new(config).compose(capture, sections, tokens)
}

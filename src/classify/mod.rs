//! Semantic classification of sections.
//!
//! The [`Classifier`] runs every scoring [`Rule`] over a section and keeps the
//! best five candidates. Scoring is a pure function of the section and its
//! [`ClassifyContext`]; identical input always yields identical candidates and
//! reason strings.

mod atom_rules;
mod scorers;
mod signals;

pub use atom_rules::{
    infer_semantic_role, merge_suggestion, AtomRule, AtomRuleEngine, Suggestion, MAX_CANDIDATES,
};
pub use scorers::{default_rules, Rule, HIGH_LINK_DENSITY};
pub use signals::{ClassifyContext, CTA_PHRASES};

pub(crate) use signals::{CONTACT_WORDS, FAQ_WORDS};

use crate::analyze::{infer_layout, infer_layout_pattern};
use crate::model::{Candidate, Family, Section};

/// Note added when no archetype scores above zero.
pub const AMBIGUOUS_NOTE: &str = "ambiguous:no_positive_candidate";

/// Scores sections against every archetype rule.
pub struct Classifier {
    rules: Vec<Box<dyn Rule>>,
}

impl Classifier {
    /// Create a classifier with the built-in scorers.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a classifier with custom scorers.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Score a section, best first, keeping the top five.
    ///
    /// Equal scores keep rule order.
    pub fn classify(&self, section: &Section, ctx: &ClassifyContext) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .rules
            .iter()
            .map(|rule| rule.score(section, ctx))
            .collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(MAX_CANDIDATES);
        candidates
    }

    /// Classify a section in place, setting candidates and family.
    pub fn classify_section(&self, section: &mut Section, total: usize, viewport_height: f64) {
        let ctx = ClassifyContext::from_section(section, total, viewport_height);
        section.candidates = self.classify(section, &ctx);

        match section.candidates.first() {
            Some(top) if top.score > 0 => {
                log::debug!(
                    "Section {}: top candidate {} ({})",
                    section.index,
                    top.block_type,
                    top.score
                );
                section.family = top.family;
            }
            _ => {
                log::debug!("Section {}: no positive candidate", section.index);
                section.family = Family::Skeleton;
                section.note(AMBIGUOUS_NOTE);
            }
        }
    }

    /// Annotate and classify every section of a page.
    ///
    /// Sets the layout, fills in the layout pattern and semantic role when no
    /// external tagger supplied them, then scores the section.
    pub fn annotate(&self, sections: &mut [Section], viewport_height: f64) {
        log::debug!("Classifier: Step 1 - annotate {} sections", sections.len());
        let total = sections.len();
        for section in sections.iter_mut() {
            section.layout = infer_layout(&section.atoms);
            if section.layout_pattern.is_none() {
                section.layout_pattern = Some(infer_layout_pattern(&section.atoms));
            }
            if section.semantic_role.is_none() {
                section.semantic_role = Some(infer_semantic_role(section));
            }
            self.classify_section(section, total, viewport_height);
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify every section of a page with the built-in scorers.
pub fn classify_sections(sections: &mut [Section], viewport_height: f64) {
    Classifier::new().annotate(sections, viewport_height);
}

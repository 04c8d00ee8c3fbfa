//! Capture ingestion and geometric analysis.
//!
//! This module turns a raw [`PageCapture`](crate::model::PageCapture) into
//! canonical sections: atom normalization, section extraction, layout
//! inference and visual grouping.

mod extractor;
mod grouper;
pub mod layout;
mod normalize;
mod options;

pub use extractor::{SectionExtractor, SelectorHint};
pub use grouper::{hotspots, SectionGrouper};
pub use layout::{infer_layout, infer_layout_pattern};
pub use normalize::{
    content_from_atoms, extract_prices, ingest, section_from_payload, summarize_styles,
    AtomNormalizer, MAX_ATOM_TEXT,
};
pub use options::{ComposerThresholds, ExtractorConfig, PipelineConfig};

pub(crate) use normalize::top_counts;

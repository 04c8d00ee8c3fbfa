//! Plain-text outline of a composed page.

use crate::model::{ComposedPage, DesignTokens};
use std::fmt::Write;

/// Render a human-readable outline: one line per section, then groups and tokens.
pub fn to_outline(page: &ComposedPage, tokens: Option<&DesignTokens>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", if page.url.is_empty() { "(no url)" } else { &page.url });
    if let Some(at) = page.analyzed_at {
        let _ = writeln!(out, "analyzed: {}", at.to_rfc3339());
    }
    let _ = writeln!(out, "sections: {}", page.sections.len());
    if !page.summary.is_empty() {
        let _ = writeln!(out, "summary: {}", page.summary);
    }
    out.push('\n');

    for section in &page.sections {
        let block = section.block_type.map_or("?", |b| b.id());
        let schema = section.layout_schema.unwrap_or_default();
        let _ = write!(
            out,
            "{:>3}. {:<24} {:<9} {:<8}",
            section.index,
            block,
            schema.as_str(),
            section.layout.as_str()
        );
        if let Some(top) = section.candidates.first() {
            let _ = write!(out, " top={}:{}", top.block_type.name(), top.score);
        }
        let title = section.title.trim();
        if !title.is_empty() {
            let _ = write!(out, "  \"{}\"", title);
        }
        out.push('\n');
    }

    if !page.groups.is_empty() {
        out.push('\n');
        for (i, group) in page.groups.iter().enumerate() {
            let indices: Vec<String> = group.indices.iter().map(|i| i.to_string()).collect();
            let _ = writeln!(out, "group {}: [{}]", i + 1, indices.join(", "));
        }
    }

    if let Some(tokens) = tokens {
        out.push('\n');
        let _ = writeln!(
            out,
            "tokens: primary={} background={} font={} radius={} spacing={}",
            tokens.colors.primary,
            tokens.colors.background,
            tokens.typography.body,
            tokens.radius,
            tokens.spacing.base
        );
    }
    out
}

//! Layout inference from atom geometry.
//!
//! A deterministic decision tree over atom centers; thresholds are part of
//! the contract and covered by boundary tests.

use crate::model::{Atom, AtomKind, LayoutKind, LayoutPattern};
use std::collections::BTreeSet;

/// Fewer valid atoms than this is always a stack.
pub const MIN_LAYOUT_ATOMS: usize = 3;

/// Split, grid and overlap need at least this many valid atoms.
pub const MIN_STRUCTURED_ATOMS: usize = 6;

/// Column/row bucket size for grid detection (px).
pub const GRID_BUCKET: f64 = 80.0;

/// Bin size for overlap detection (px).
pub const OVERLAP_BIN: f64 = 30.0;

/// Classify the arrangement of a section's atoms.
pub fn infer_layout(atoms: &[Atom]) -> LayoutKind {
    let valid: Vec<&Atom> = atoms.iter().filter(|a| a.has_extent()).collect();
    if valid.len() < MIN_LAYOUT_ATOMS {
        return LayoutKind::Stack;
    }

    let min_x = valid.iter().map(|a| a.bbox.center_x()).fold(f64::INFINITY, f64::min);
    let max_x = valid
        .iter()
        .map(|a| a.bbox.center_x())
        .fold(f64::NEG_INFINITY, f64::max);
    let span = max_x - min_x;
    if span <= 0.0 {
        return LayoutKind::Stack;
    }

    let count = valid.len();
    if count >= MIN_STRUCTURED_ATOMS && is_clean_split(&valid, min_x + span / 2.0) {
        return LayoutKind::Split;
    }

    if count >= MIN_STRUCTURED_ATOMS {
        let columns: BTreeSet<i64> = valid
            .iter()
            .map(|a| bucket(a.bbox.center_x(), GRID_BUCKET))
            .collect();
        let rows: BTreeSet<i64> = valid
            .iter()
            .map(|a| bucket(a.bbox.center_y(), GRID_BUCKET))
            .collect();
        if columns.len() >= 2 && rows.len() >= 2 {
            return LayoutKind::Grid;
        }

        let bins: BTreeSet<(i64, i64)> = valid
            .iter()
            .map(|a| {
                (
                    bucket(a.bbox.center_x(), OVERLAP_BIN),
                    bucket(a.bbox.center_y(), OVERLAP_BIN),
                )
            })
            .collect();
        if bins.len() * 2 < count {
            return LayoutKind::Overlap;
        }
    }

    LayoutKind::Stack
}

/// Both halves populated and no atom straddling the midpoint.
fn is_clean_split(atoms: &[&Atom], mid: f64) -> bool {
    let mut left = 0usize;
    let mut right = 0usize;
    for atom in atoms {
        if atom.bbox.x < mid && atom.bbox.right() > mid {
            return false;
        }
        if atom.bbox.center_x() < mid {
            left += 1;
        } else {
            right += 1;
        }
    }
    left > 0 && right > 0
}

fn bucket(value: f64, size: f64) -> i64 {
    (value / size).round() as i64
}

/// Classify the text/media arrangement of a section's atoms.
pub fn infer_layout_pattern(atoms: &[Atom]) -> LayoutPattern {
    let images: Vec<&Atom> = atoms.iter().filter(|a| a.kind == AtomKind::Image).collect();
    let texts: Vec<&Atom> = atoms.iter().filter(|a| a.kind.is_text_like()).collect();

    if images.len() >= 3 && texts.len() >= 3 {
        return LayoutPattern::Grid;
    }
    if !images.is_empty() && !texts.is_empty() {
        let mean_x = |items: &[&Atom]| {
            items.iter().map(|a| a.bbox.x).sum::<f64>() / items.len() as f64
        };
        return if mean_x(&images) > mean_x(&texts) {
            LayoutPattern::SplitRightImage
        } else {
            LayoutPattern::SplitLeftImage
        };
    }
    if !texts.is_empty() {
        return LayoutPattern::Stack;
    }
    LayoutPattern::Section
}

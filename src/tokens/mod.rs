//! Design token extraction.
//!
//! Aggregated computed-style samples are reduced to a canonical token set:
//! HSL colors, font stacks, radius, spacing scale and a brand profile.
//! Extraction never fails; every field has a fallback.

pub mod color;

use crate::model::{
    Atom, BrandProfile, ColorMood, ColorTokens, ColorTone, Contrast, DesignTokens, Palette,
    Section, Spacing, StyleCount, StyleSamples, Typography, TypographyStyle,
};
use crate::text::parse_px;
use color::{parse_color, Hsl};
use std::collections::BTreeMap;

/// Fallback background.
pub const DEFAULT_BACKGROUND: &str = "0 0% 100%";
/// Fallback foreground.
pub const DEFAULT_FOREGROUND: &str = "222 47% 11%";
/// Fallback primary.
pub const DEFAULT_PRIMARY: &str = "221 83% 53%";
/// Fallback text on primary.
pub const DEFAULT_PRIMARY_FOREGROUND: &str = "0 0% 100%";
/// Fallback secondary.
pub const DEFAULT_SECONDARY: &str = "199 89% 48%";
/// Fallback muted surface.
pub const DEFAULT_MUTED: &str = "210 40% 96%";
/// Fallback muted text.
pub const DEFAULT_MUTED_FOREGROUND: &str = "215 25% 27%";
/// Fallback border.
pub const DEFAULT_BORDER: &str = "214 32% 91%";
/// Fallback card surface.
pub const DEFAULT_CARD: &str = "0 0% 100%";
/// Fallback radius.
pub const DEFAULT_RADIUS: &str = "12px";
/// Fallback font stack.
pub const DEFAULT_FONT: &str = "Inter";
/// Fallback spacing unit (px).
pub const DEFAULT_SPACING: i64 = 8;

const PRIMARY_VARS: [&str; 3] = ["--primary", "--brand", "--color-primary"];
const PRIMARY_FOREGROUND_VARS: [&str; 2] = ["--primary-foreground", "--on-primary"];
const LINK_VARS: [&str; 3] = ["--link", "--color-link", "--accent"];
const CARD_VARS: [&str; 3] = ["--card", "--surface", "--panel"];
const BORDER_VARS: [&str; 3] = ["--border", "--line", "--stroke"];

/// Minimum saturation for a color to count as vivid.
const VIVID_SATURATION: u8 = 15;

const FONT_SCALE_LABELS: [&str; 8] = ["xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl"];
const RADIUS_SCALE_LABELS: [&str; 7] = ["sm", "md", "lg", "xl", "2xl", "3xl", "full"];

/// Extracts [`DesignTokens`] from style samples.
pub struct TokenExtractor {
    palette_size: usize,
}

impl TokenExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self { palette_size: 3 }
    }

    /// Set the number of palette entries kept per list.
    pub fn with_palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }

    /// Extract tokens from page samples, using section summaries when the
    /// page-level counts are missing.
    pub fn extract(&self, samples: &StyleSamples, sections: &[Section]) -> DesignTokens {
        let counts = if samples.has_no_counts() && !sections.is_empty() {
            log::debug!(
                "TokenExtractor: rebuilding counts from {} section summaries",
                sections.len()
            );
            Counts::from_sections(sections)
        } else {
            Counts::from_samples(samples)
        };

        // Step 1: colors
        let vars = &samples.root_vars;
        let background = first_color(&[samples.body_bg.as_deref(), top_value(&counts.bg_colors)])
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string());
        let body_color = first_color(&[samples.body_color.as_deref(), top_value(&counts.text_colors)]);
        let foreground = body_color
            .clone()
            .unwrap_or_else(|| DEFAULT_FOREGROUND.to_string());
        let primary = first_color(&[
            root_var(vars, &PRIMARY_VARS),
            samples.button_bg.as_deref(),
            vivid_color(&counts.text_colors),
        ])
        .unwrap_or_else(|| DEFAULT_PRIMARY.to_string());
        let primary_foreground = first_color(&[
            root_var(vars, &PRIMARY_FOREGROUND_VARS),
            samples.button_color.as_deref(),
        ])
        .unwrap_or_else(|| DEFAULT_PRIMARY_FOREGROUND.to_string());
        let secondary = first_color(&[root_var(vars, &LINK_VARS), samples.link_color.as_deref()])
            .unwrap_or_else(|| DEFAULT_SECONDARY.to_string());
        let card_source = first_color(&[root_var(vars, &CARD_VARS), samples.card_bg.as_deref()]);
        let border = first_color(&[root_var(vars, &BORDER_VARS), samples.border_color.as_deref()])
            .unwrap_or_else(|| DEFAULT_BORDER.to_string());

        let colors = ColorTokens {
            background,
            secondary_foreground: foreground.clone(),
            muted_foreground: body_color.unwrap_or_else(|| DEFAULT_MUTED_FOREGROUND.to_string()),
            foreground,
            primary,
            primary_foreground,
            secondary,
            muted: card_source
                .clone()
                .unwrap_or_else(|| DEFAULT_MUTED.to_string()),
            border,
            card: card_source.unwrap_or_else(|| DEFAULT_CARD.to_string()),
        };

        // Step 2: typography and shape
        let top_font = top_value(&counts.fonts);
        let body = non_empty(&[samples.body_font.as_deref(), top_font])
            .unwrap_or(DEFAULT_FONT)
            .to_string();
        let heading = non_empty(&[
            samples.heading_font.as_deref(),
            samples.body_font.as_deref(),
            top_font,
        ])
        .unwrap_or(DEFAULT_FONT)
        .to_string();
        let radius = non_empty(&[samples.button_radius.as_deref(), top_value(&counts.radius)])
            .unwrap_or(DEFAULT_RADIUS)
            .to_string();

        let palette = Palette {
            text: top_values(&counts.text_colors, self.palette_size),
            background: top_values(&counts.bg_colors, self.palette_size),
        };

        let typography = Typography { body, heading };
        let brand = brand_profile(&colors, &typography);

        let tokens = DesignTokens {
            spacing: spacing_scale(&counts.padding, &counts.margin),
            font_scale: font_size_scale(&counts.font_sizes),
            radius_scale: radius_scale(&counts.radius),
            framework: samples.framework.clone().filter(|f| !f.trim().is_empty()),
            colors,
            typography,
            radius,
            palette,
            brand,
        };
        log::debug!(
            "TokenExtractor: primary={} background={} foreground={}",
            tokens.colors.primary,
            tokens.colors.background,
            tokens.colors.foreground
        );
        tokens
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract tokens with default settings.
pub fn extract_tokens(samples: &StyleSamples, sections: &[Section]) -> DesignTokens {
    TokenExtractor::new().extract(samples, sections)
}

/// Value counts used for aggregation.
#[derive(Debug, Default)]
struct Counts {
    fonts: BTreeMap<String, u64>,
    text_colors: BTreeMap<String, u64>,
    bg_colors: BTreeMap<String, u64>,
    radius: BTreeMap<String, u64>,
    font_sizes: BTreeMap<String, u64>,
    padding: BTreeMap<String, u64>,
    margin: BTreeMap<String, u64>,
}

impl Counts {
    fn from_samples(samples: &StyleSamples) -> Self {
        let mut counts = Self {
            fonts: samples.fonts.clone(),
            text_colors: samples.text_colors.clone(),
            bg_colors: samples.bg_colors.clone(),
            radius: samples.radius.clone(),
            font_sizes: samples.font_sizes.clone(),
            padding: samples.padding.clone(),
            margin: samples.margin.clone(),
        };
        drop_transparent(&mut counts.text_colors);
        drop_transparent(&mut counts.bg_colors);
        counts
    }

    fn from_sections(sections: &[Section]) -> Self {
        let mut counts = Self::default();
        for section in sections {
            let summary = &section.computed_styles.summary;
            merge(&mut counts.fonts, &summary.fonts);
            merge(&mut counts.text_colors, &summary.text_colors);
            merge(&mut counts.bg_colors, &summary.bg_colors);
            merge(&mut counts.radius, &summary.radius);
            merge(&mut counts.font_sizes, &summary.font_sizes);
            merge(&mut counts.padding, &summary.padding);
            merge(&mut counts.margin, &summary.margin);
        }
        drop_transparent(&mut counts.text_colors);
        drop_transparent(&mut counts.bg_colors);
        counts
    }
}

fn merge(target: &mut BTreeMap<String, u64>, entries: &[StyleCount]) {
    for entry in entries {
        let value = entry.value.trim();
        if !value.is_empty() {
            *target.entry(value.to_string()).or_insert(0) += entry.count;
        }
    }
}

fn drop_transparent(map: &mut BTreeMap<String, u64>) {
    map.retain(|value, _| !color::is_transparent(value));
}

/// Entries by count descending, ties by value ascending.
fn ranked(map: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

fn top_value(map: &BTreeMap<String, u64>) -> Option<&str> {
    ranked(map).first().map(|(value, _)| *value)
}

fn top_values(map: &BTreeMap<String, u64>, n: usize) -> Vec<String> {
    ranked(map)
        .into_iter()
        .take(n)
        .map(|(value, _)| value.to_string())
        .collect()
}

fn root_var<'a>(vars: &'a BTreeMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| vars.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// First source that parses as a color, as an HSL string.
fn first_color(sources: &[Option<&str>]) -> Option<String> {
    sources.iter().flatten().find_map(|value| {
        let parsed = parse_color(value);
        if parsed.is_none() {
            log::warn!("TokenExtractor: unusable color {:?}", value);
        }
        parsed.map(|hsl| hsl.to_string())
    })
}

fn non_empty<'a>(sources: &[Option<&'a str>]) -> Option<&'a str> {
    sources
        .iter()
        .flatten()
        .copied()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// First color in frequency order with noticeable saturation.
fn vivid_color(counts: &BTreeMap<String, u64>) -> Option<&str> {
    ranked(counts)
        .into_iter()
        .map(|(value, _)| value)
        .find(|value| parse_color(value).is_some_and(|hsl| hsl.s >= VIVID_SATURATION))
}

/// Every positive `<n>px` token in the keys; sample counts are not used.
fn px_values(counts: &BTreeMap<String, u64>) -> Vec<i64> {
    counts
        .keys()
        .flat_map(|raw| {
            raw.replace(',', " ")
                .split_whitespace()
                .filter_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
                .map(|px| px as i64)
                .collect::<Vec<_>>()
        })
        .filter(|px| *px > 0)
        .collect()
}

/// Modal spacing unit clamped to 4..=12 px, with a `[1, 2, 3, 4, 6]` scale.
///
/// Each distinct sample contributes its px tokens once, however often it was seen.
pub fn spacing_scale(
    padding: &BTreeMap<String, u64>,
    margin: &BTreeMap<String, u64>,
) -> Spacing {
    let mut freq: BTreeMap<i64, u64> = BTreeMap::new();
    for px in px_values(padding).into_iter().chain(px_values(margin)) {
        *freq.entry(px).or_insert(0) += 1;
    }

    // max_by picks the last of equal maxima, so iterate descending to favor the smaller value
    let base = freq
        .iter()
        .rev()
        .max_by(|a, b| a.1.cmp(b.1))
        .map(|(px, _)| (*px).clamp(4, 12))
        .unwrap_or(DEFAULT_SPACING);

    Spacing {
        base: format!("{}px", base),
        scale: [1, 2, 3, 4, 6]
            .iter()
            .map(|factor| format!("{}px", base * factor))
            .collect(),
    }
}

fn distinct_px(counts: &BTreeMap<String, u64>) -> Vec<i64> {
    let mut sizes: Vec<i64> = counts
        .keys()
        .filter(|raw| raw.trim().ends_with("px"))
        .filter_map(|raw| parse_px(raw))
        .map(|px| px as i64)
        .collect();
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}

/// Distinct font sizes mapped onto `xs`..`4xl`.
pub fn font_size_scale(counts: &BTreeMap<String, u64>) -> BTreeMap<String, String> {
    distinct_px(counts)
        .into_iter()
        .filter(|px| *px > 0)
        .zip(FONT_SCALE_LABELS)
        .map(|(px, label)| (label.to_string(), format!("{}px", px)))
        .collect()
}

/// Distinct radii mapped onto `sm`..`full`; pill radii force `full` to 9999px.
pub fn radius_scale(counts: &BTreeMap<String, u64>) -> BTreeMap<String, String> {
    let sizes = distinct_px(counts);
    let mut scale: BTreeMap<String, String> = sizes
        .iter()
        .zip(RADIUS_SCALE_LABELS)
        .map(|(px, label)| (label.to_string(), format!("{}px", px)))
        .collect();
    if sizes.iter().any(|px| *px >= 999) {
        scale.insert("full".to_string(), "9999px".to_string());
    }
    scale
}

/// Mood and tone from the primary color, contrast from foreground vs background.
pub fn brand_profile(colors: &ColorTokens, typography: &Typography) -> BrandProfile {
    let primary = parse_color(&colors.primary).unwrap_or(Hsl::new(221, 83, 53));
    let foreground = parse_color(&colors.foreground).unwrap_or(Hsl::new(222, 47, 11));
    let background = parse_color(&colors.background).unwrap_or(Hsl::new(0, 0, 100));

    let body = typography.body.to_lowercase();
    BrandProfile {
        color_mood: if primary.s >= 60 {
            ColorMood::Vivid
        } else {
            ColorMood::Muted
        },
        color_tone: if primary.l >= 60 {
            ColorTone::Bright
        } else {
            ColorTone::Deep
        },
        contrast: if (foreground.l as i16 - background.l as i16).abs() >= 50 {
            Contrast::High
        } else {
            Contrast::Low
        },
        typography: if body.contains("serif") && !body.contains("sans") {
            TypographyStyle::Serif
        } else {
            TypographyStyle::Sans
        },
    }
}

/// Rewrite atom colors that match a token into `var(--token)` references.
pub fn normalize_atom_styles(atoms: &mut [Atom], tokens: &DesignTokens) {
    let refs = [
        (tokens.colors.primary.as_str(), "var(--primary)"),
        (tokens.colors.foreground.as_str(), "var(--foreground)"),
        (tokens.colors.background.as_str(), "var(--background)"),
    ];
    let lookup = |value: &Option<String>| -> Option<&'static str> {
        let hsl = parse_color(value.as_deref()?)?.to_string();
        refs.iter().find(|(token, _)| *token == hsl).map(|(_, var)| *var)
    };

    for atom in atoms {
        if let Some(var) = lookup(&atom.styles.color) {
            atom.normalized_styles.insert("color".to_string(), var.to_string());
        }
        if let Some(var) = lookup(&atom.styles.background_color) {
            atom.normalized_styles
                .insert("backgroundColor".to_string(), var.to_string());
        }
    }
}

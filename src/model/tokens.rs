//! Design token document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical visual system of a page.
///
/// Every field is always populated; missing samples fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    /// Colors as `"H S% L%"` strings
    pub colors: ColorTokens,
    /// Font stacks
    pub typography: Typography,
    /// Default corner radius
    pub radius: String,
    /// Spacing scale
    pub spacing: Spacing,
    /// Most frequent raw colors
    pub palette: Palette,
    /// Derived brand profile
    pub brand: BrandProfile,
    /// Font size scale (xs, sm, base, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub font_scale: BTreeMap<String, String>,
    /// Radius scale (sm, md, ..., full)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub radius_scale: BTreeMap<String, String>,
    /// Detected CSS framework
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

/// Color tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTokens {
    /// Page background
    pub background: String,
    /// Body text
    pub foreground: String,
    /// Brand color
    pub primary: String,
    /// Text on primary
    pub primary_foreground: String,
    /// Secondary accent (links)
    pub secondary: String,
    /// Text on secondary
    pub secondary_foreground: String,
    /// Muted surfaces
    pub muted: String,
    /// Text on muted surfaces
    pub muted_foreground: String,
    /// Borders
    pub border: String,
    /// Card surfaces
    pub card: String,
}

/// Font stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    /// Body font
    pub body: String,
    /// Heading font
    pub heading: String,
}

/// Spacing base unit and scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    /// Base unit, e.g. `"8px"`
    pub base: String,
    /// `[base, 2x, 3x, 4x, 6x]`
    pub scale: Vec<String>,
}

/// Most frequent raw text and background colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Text colors
    pub text: Vec<String>,
    /// Background colors
    pub background: Vec<String>,
}

/// Coarse brand characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    /// Saturation of the primary color
    pub color_mood: ColorMood,
    /// Lightness of the primary color
    pub color_tone: ColorTone,
    /// Text/background contrast
    pub contrast: Contrast,
    /// Serif or sans body text
    pub typography: TypographyStyle,
}

/// Saturation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMood {
    /// Saturation >= 60%
    Vivid,
    /// Otherwise
    Muted,
}

/// Lightness class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTone {
    /// Lightness >= 60%
    Bright,
    /// Otherwise
    Deep,
}

/// Contrast class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    /// Lightness difference >= 50
    High,
    /// Otherwise
    Low,
}

/// Typeface class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypographyStyle {
    /// Serif stack
    Serif,
    /// Anything else
    Sans,
}

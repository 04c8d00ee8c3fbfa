//! Theme stylesheet rendering.

use crate::model::DesignTokens;
use std::fmt::Write;

/// Render design tokens as CSS custom properties on `:root`.
///
/// Colors are emitted as bare `H S% L%` triples so they can be wrapped in
/// `hsl(var(--primary))` by the consumer.
pub fn to_theme_css(tokens: &DesignTokens) -> String {
    let colors = &tokens.colors;
    let mut vars: Vec<(String, &str)> = vec![
        ("background".to_string(), &colors.background),
        ("foreground".to_string(), &colors.foreground),
        ("primary".to_string(), &colors.primary),
        ("primary-foreground".to_string(), &colors.primary_foreground),
        ("secondary".to_string(), &colors.secondary),
        ("secondary-foreground".to_string(), &colors.secondary_foreground),
        ("muted".to_string(), &colors.muted),
        ("muted-foreground".to_string(), &colors.muted_foreground),
        ("border".to_string(), &colors.border),
        ("card".to_string(), &colors.card),
        ("radius".to_string(), &tokens.radius),
        ("font-body".to_string(), &tokens.typography.body),
        ("font-heading".to_string(), &tokens.typography.heading),
        ("space-base".to_string(), &tokens.spacing.base),
    ];
    for (i, step) in tokens.spacing.scale.iter().enumerate() {
        vars.push((format!("space-{}", i + 1), step));
    }
    for (label, size) in &tokens.font_scale {
        vars.push((format!("text-{}", label), size));
    }
    for (label, radius) in &tokens.radius_scale {
        vars.push((format!("radius-{}", label), radius));
    }
    for (i, color) in tokens.palette.text.iter().enumerate() {
        vars.push((format!("palette-text-{}", i + 1), color));
    }
    for (i, color) in tokens.palette.background.iter().enumerate() {
        vars.push((format!("palette-bg-{}", i + 1), color));
    }

    let mut css = String::from(":root {\n");
    for (name, value) in vars {
        let _ = writeln!(css, "  --{}: {};", name, value);
    }
    css.push_str("}\n");
    css
}

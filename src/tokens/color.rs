//! CSS color parsing and HSL conversion.
//!
//! Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`,
//! `hsl()`/`hsla()` and bare `H S% L%` triples. Fully transparent colors
//! (alpha ≤ 0.01) are treated as absent.

use std::fmt;
use std::str::FromStr;

/// Alpha at or below this is treated as transparent.
const ALPHA_EPSILON: f64 = 0.01;

/// An sRGB color with alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: f64,
}

impl Rgb {
    /// Create an opaque color.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Check whether the color is effectively invisible.
    pub fn is_transparent(&self) -> bool {
        self.a <= ALPHA_EPSILON
    }

    /// Convert to HSL with integer rounding.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        Hsl::new(
            (h * 360.0).round() as u16,
            (s * 100.0).round() as u8,
            (l * 100.0).round() as u8,
        )
    }
}

/// An HSL color with integer components, formatted as `"H S% L%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in degrees
    pub h: u16,
    /// Saturation in percent
    pub s: u8,
    /// Lightness in percent
    pub l: u8,
}

impl Hsl {
    /// Create a color, wrapping the hue and clamping percentages.
    pub fn new(h: u16, s: u8, l: u8) -> Self {
        Self {
            h: h % 360,
            s: s.min(100),
            l: l.min(100),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

impl FromStr for Hsl {
    type Err = ();

    /// Parse `hsl(...)`, `hsla(...)` or a bare `H S% L%` triple.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        let inner = function_args(&value, &["hsla", "hsl"]).unwrap_or(&value);
        let parts = split_args(inner);
        if parts.len() < 3 {
            return Err(());
        }
        if parts.len() > 3 && parse_alpha(parts[3]).ok_or(())? <= ALPHA_EPSILON {
            return Err(());
        }

        let h = parts[0].trim_end_matches("deg").parse::<f64>().map_err(|_| ())?;
        let s = parts[1].trim_end_matches('%').parse::<f64>().map_err(|_| ())?;
        let l = parts[2].trim_end_matches('%').parse::<f64>().map_err(|_| ())?;
        if !(h.is_finite() && s.is_finite() && l.is_finite()) {
            return Err(());
        }
        Ok(Hsl::new(
            h.rem_euclid(360.0).round() as u16,
            s.clamp(0.0, 100.0).round() as u8,
            l.clamp(0.0, 100.0).round() as u8,
        ))
    }
}

/// Parse any supported color into HSL; `None` for unparseable or transparent values.
pub fn parse_color(value: &str) -> Option<Hsl> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).filter(|c| !c.is_transparent()).map(|c| c.to_hsl());
    }
    if value.starts_with("rgb") {
        return parse_rgb(&value).filter(|c| !c.is_transparent()).map(|c| c.to_hsl());
    }
    match value.as_str() {
        "white" => return Some(Rgb::new(255, 255, 255).to_hsl()),
        "black" => return Some(Rgb::new(0, 0, 0).to_hsl()),
        _ => {}
    }
    value.parse::<Hsl>().ok()
}

/// Convert a color to its `"H S% L%"` string.
pub fn to_hsl_string(value: &str) -> Option<String> {
    parse_color(value).map(|hsl| hsl.to_string())
}

/// Canonical form of an HSL string.
pub fn normalize_hsl(value: &str) -> Option<String> {
    value.parse::<Hsl>().ok().map(|hsl| hsl.to_string())
}

/// Check whether a computed color value is empty or fully transparent.
pub fn is_transparent(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "" | "transparent" | "none" | "initial" | "inherit" => return true,
        _ => {}
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).is_some_and(|c| c.is_transparent());
    }
    if value.starts_with("rgb") {
        return parse_rgb(&value).is_some_and(|c| c.is_transparent());
    }
    if let Some(inner) = function_args(&value, &["hsla", "hsl"]) {
        let parts = split_args(inner);
        return parts.len() > 3 && parse_alpha(parts[3]).is_some_and(|a| a <= ALPHA_EPSILON);
    }
    false
}

/// Parse hex digits after `#`.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 | 4 => {
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            let a = if hex.len() == 4 { channel(3..4)? * 17 } else { 255 };
            Some(Rgb {
                r,
                g,
                b,
                a: a as f64 / 255.0,
            })
        }
        6 | 8 => {
            let r = channel(0..2)?;
            let g = channel(2..4)?;
            let b = channel(4..6)?;
            let a = if hex.len() == 8 { channel(6..8)? } else { 255 };
            Some(Rgb {
                r,
                g,
                b,
                a: a as f64 / 255.0,
            })
        }
        _ => None,
    }
}

/// Parse `rgb(r, g, b)` / `rgba(r, g, b, a)`, comma or space separated.
pub fn parse_rgb(value: &str) -> Option<Rgb> {
    let inner = function_args(value, &["rgba", "rgb"])?;
    let parts = split_args(inner);
    if parts.len() < 3 {
        return None;
    }
    let channel = |part: &str| -> Option<u8> {
        let v = if let Some(pct) = part.strip_suffix('%') {
            pct.parse::<f64>().ok()? * 2.55
        } else {
            part.parse::<f64>().ok()?
        };
        Some(v.clamp(0.0, 255.0).round() as u8)
    };
    let alpha = match parts.get(3) {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };
    Some(Rgb {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha,
    })
}

fn function_args<'a>(value: &'a str, names: &[&str]) -> Option<&'a str> {
    for name in names {
        if let Some(rest) = value.strip_prefix(name) {
            let rest = rest.trim_start();
            let rest = rest.strip_prefix('(')?;
            return Some(rest.strip_suffix(')').unwrap_or(rest));
        }
    }
    None
}

fn split_args(inner: &str) -> Vec<&str> {
    inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_alpha(part: &str) -> Option<f64> {
    match part.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok().map(|v| v / 100.0),
        None => part.parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_hsl() {
        assert_eq!(to_hsl_string("#ffffff").as_deref(), Some("0 0% 100%"));
        assert_eq!(to_hsl_string("#000").as_deref(), Some("0 0% 0%"));
        assert_eq!(to_hsl_string("#2563eb").as_deref(), Some("221 83% 53%"));
        assert_eq!(to_hsl_string("#0f172a").as_deref(), Some("222 47% 11%"));
    }

    #[test]
    fn test_rgb_to_hsl() {
        assert_eq!(to_hsl_string("rgb(37, 99, 235)").as_deref(), Some("221 83% 53%"));
        assert_eq!(to_hsl_string("rgba(255, 0, 0, 0.5)").as_deref(), Some("0 100% 50%"));
        assert_eq!(to_hsl_string("rgb(0 128 0)").as_deref(), Some("120 100% 25%"));
    }

    #[test]
    fn test_transparent_values_discarded() {
        assert_eq!(to_hsl_string("rgba(0, 0, 0, 0)"), None);
        assert_eq!(to_hsl_string("#00000000"), None);
        assert!(is_transparent("transparent"));
        assert!(is_transparent("rgba(0, 0, 0, 0)"));
        assert!(is_transparent("hsla(0, 0%, 0%, 0)"));
        assert!(!is_transparent("rgb(0, 0, 0)"));
        assert!(!is_transparent("#111"));
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(to_hsl_string("var(--brand)"), None);
        assert_eq!(to_hsl_string("#12345"), None);
        assert_eq!(to_hsl_string("#ééé"), None);
        assert_eq!(to_hsl_string("rgb(1, 2)"), None);
        assert_eq!(to_hsl_string(""), None);
    }

    #[test]
    fn test_hsl_forms() {
        assert_eq!(to_hsl_string("221 83% 53%").as_deref(), Some("221 83% 53%"));
        assert_eq!(to_hsl_string("hsl(221, 83%, 53%)").as_deref(), Some("221 83% 53%"));
        assert_eq!(to_hsl_string("hsl(221deg 83% 53% / 0.9)").as_deref(), Some("221 83% 53%"));
    }

    #[test]
    fn test_hsl_string_round_trip_is_idempotent() {
        for s in ["0 0% 100%", "221 83% 53%", "359 1% 0%", "221  83%   53%", "221.4 83.2% 52.6%"] {
            let normalized = normalize_hsl(s).unwrap();
            let parsed: Hsl = s.parse().unwrap();
            assert_eq!(parsed.to_string(), normalized);
            assert_eq!(normalize_hsl(&normalized).unwrap(), normalized);
        }
    }

    #[test]
    fn test_hsl_display() {
        assert_eq!(Hsl::new(210, 40, 96).to_string(), "210 40% 96%");
    }
}

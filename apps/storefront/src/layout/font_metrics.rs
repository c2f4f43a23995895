//! Static font-metric tables for the storefront's jumbo-text faces.
//!
//! Character widths are in em units (relative to font size), rounded to two
//! places from the layout engine's existing tables rather than read from the font
//! files. They approximate real glyph advances: good enough to drive the fitter in
//! headless hosts and job runs, not a substitute for a browser's text shaping.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Faces the theme offers for jumbo text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Body face: humanist sans-serif.
    #[default]
    Inter,
    /// Display face: condensed sans-serif, the usual jumbo-text choice.
    Oswald,
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFamily::Inter => f.write_str("inter"),
            FontFamily::Oswald => f.write_str("oswald"),
        }
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inter" => Ok(FontFamily::Inter),
            "oswald" => Ok(FontFamily::Oswald),
            other => Err(format!("unknown font family '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`. Control characters
    /// (tabs, newlines) have no advance.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else if c.is_control() {
                    0.0
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of the widest `\n`-separated line, in em. Jumbo text never wraps,
    /// so this is what the element's scroll width tracks.
    pub fn widest_line_em(&self, s: &str) -> f32 {
        s.split('\n')
            .map(|line| self.measure_str(line))
            .fold(0.0_f32, f32::max)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static INTER_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Inter,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
};

/// Roughly 68% of Inter.
static OSWALD_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Oswald,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.17, 0.20, 0.26, 0.38, 0.38, 0.61, 0.46, 0.15, 0.23, 0.23, 0.27, 0.40, 0.19, 0.23, 0.19, 0.21,
        // 0     1     2     3     4     5     6     7     8     9
        0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38, 0.38,
        // :     ;     <     =     >     ?     @
        0.19, 0.19, 0.40, 0.40, 0.40, 0.34, 0.69,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.46, 0.41, 0.41, 0.46, 0.38, 0.34, 0.46, 0.46, 0.17, 0.27, 0.41, 0.36, 0.53,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.46, 0.49, 0.38, 0.49, 0.41, 0.34, 0.38, 0.46, 0.46, 0.61, 0.41, 0.41, 0.38,
        // [     \     ]     ^     _     `
        0.19, 0.21, 0.19, 0.32, 0.38, 0.23,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.38, 0.38, 0.34, 0.38, 0.38, 0.21, 0.38, 0.38, 0.15, 0.15, 0.36, 0.15, 0.56,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.38, 0.38, 0.38, 0.38, 0.23, 0.30, 0.27, 0.38, 0.34, 0.49, 0.34, 0.34, 0.30,
        // {     |     }     ~
        0.23, 0.18, 0.23, 0.40,
    ],
    average_char_width: 0.35,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::Oswald => &OSWALD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Inter).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Van" = V(0.67) + a(0.56) + n(0.56) = 1.79
        let width = get_metrics(FontFamily::Inter).measure_str("Van");
        assert!((width - 1.79).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontFamily::Oswald);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_control_characters_have_no_advance() {
        let metrics = get_metrics(FontFamily::Inter);
        assert_eq!(metrics.measure_str("\t\r"), 0.0);
    }

    #[test]
    fn test_widest_line_picks_longest() {
        let metrics = get_metrics(FontFamily::Inter);
        let widest = metrics.widest_line_em("Go\nCampervans\nNow");
        assert!((widest - metrics.measure_str("Campervans")).abs() < 1e-5);
    }

    #[test]
    fn test_condensed_face_is_narrower() {
        let text = "Built for the road";
        assert!(
            get_metrics(FontFamily::Oswald).measure_str(text)
                < get_metrics(FontFamily::Inter).measure_str(text)
        );
    }

    #[test]
    fn test_font_family_parses_case_insensitively() {
        assert_eq!("Oswald".parse::<FontFamily>(), Ok(FontFamily::Oswald));
        assert_eq!(" inter ".parse::<FontFamily>(), Ok(FontFamily::Inter));
        assert!("comic".parse::<FontFamily>().is_err());
        assert_eq!(FontFamily::Oswald.to_string(), "oswald");
    }
}

//! Reading font bounds out of the element's computed CSS custom properties.

pub const DEFAULT_MIN_FONT_SIZE: f64 = 1.0;
pub const DEFAULT_MAX_FONT_SIZE: f64 = 500.0;

/// Raw `--min-font-size` / `--max-font-size` values as the theme wrote them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontSizeVars {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Leading-integer parse of a CSS value: `" 48px"` → 48, `"3.9rem"` → 3, `"px"` → None.
/// Digit runs of any length are kept; huge values lose precision instead of failing.
pub fn parse_css_int(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<f64>().ok().map(|v| v * sign)
}

impl FontSizeVars {
    /// `(min, max)` in px. Missing, unparseable, zero or negative values fall back to the
    /// provided defaults.
    pub fn resolve(&self, default_min: f64, default_max: f64) -> (f64, f64) {
        let read = |raw: &Option<String>, fallback: f64| {
            raw.as_deref()
                .and_then(parse_css_int)
                .filter(|v| *v > 0.0)
                .unwrap_or(fallback)
        };
        (read(&self.min, default_min), read(&self.max, default_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_int_reads_leading_digits() {
        assert_eq!(parse_css_int("48px"), Some(48.0));
        assert_eq!(parse_css_int("  120"), Some(120.0));
        assert_eq!(parse_css_int("3.9rem"), Some(3.0));
        assert_eq!(parse_css_int("-4px"), Some(-4.0));
    }

    #[test]
    fn test_parse_css_int_rejects_non_numeric() {
        assert_eq!(parse_css_int(""), None);
        assert_eq!(parse_css_int("px"), None);
        assert_eq!(parse_css_int("-"), None);
        assert_eq!(parse_css_int(".5"), None);
    }

    #[test]
    fn test_resolve_defaults_when_missing() {
        let vars = FontSizeVars::default();
        assert_eq!(
            vars.resolve(DEFAULT_MIN_FONT_SIZE, DEFAULT_MAX_FONT_SIZE),
            (1.0, 500.0)
        );
    }

    #[test]
    fn test_resolve_zero_and_negative_fall_back() {
        let vars = FontSizeVars {
            min: Some("0".into()),
            max: Some("-20px".into()),
        };
        assert_eq!(vars.resolve(1.0, 500.0), (1.0, 500.0));
    }

    #[test]
    fn test_oversized_values_are_kept() {
        assert_eq!(parse_css_int("99999999999999999999px"), Some(1e20));
        let vars = FontSizeVars {
            min: None,
            max: Some("99999999999999999999px".into()),
        };
        assert_eq!(vars.resolve(1.0, 500.0), (1.0, 1e20));
    }

    #[test]
    fn test_resolve_uses_theme_values() {
        let vars = FontSizeVars {
            min: Some("24px".into()),
            max: Some("180px".into()),
        };
        assert_eq!(vars.resolve(1.0, 500.0), (24.0, 180.0));
    }
}

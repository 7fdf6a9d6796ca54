//! CSS color helpers.

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }
}

/// Formats a hex color with an opacity percentage as `rgba(r,g,b,a)`.
///
/// Strings that are not hex colors are returned unchanged.
pub fn rgba_css(hex: &str, opacity_percent: f64) -> String {
    match Rgb::from_hex(hex) {
        Some(c) => format!(
            "rgba({},{},{},{})",
            c.r,
            c.g,
            c.b,
            crate::svg::num(opacity_percent / 100.0)
        ),
        None => hex.to_string(),
    }
}

/// A fully saturated, mid-lightness color of the given hue.
pub fn neon_hsl(hue_degrees: f64) -> String {
    format!("hsl({}, 100%, 50%)", crate::svg::num(hue_degrees))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#0F0"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::from_hex("ff8000"), None);
        assert_eq!(Rgb::from_hex("#ggg"), None);
        assert_eq!(Rgb::from_hex("#12345"), None);
    }

    #[test]
    fn test_rgba_css() {
        assert_eq!(rgba_css("#000000", 100.0), "rgba(0,0,0,1)");
        assert_eq!(rgba_css("#fff", 50.0), "rgba(255,255,255,0.5)");
        assert_eq!(rgba_css("red", 50.0), "red");
    }

    #[test]
    fn test_neon_hsl() {
        assert_eq!(neon_hsl(120.0), "hsl(120, 100%, 50%)");
    }
}

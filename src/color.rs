use serde::{Deserialize, Serialize};

/// An RGB color with 8 bits per component, serialized as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Parses a `#rrggbb` (or `rrggbb`) hexadecimal color, case-insensitively.
    /// Shorthand forms such as `#fff` are not accepted.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|character| character.is_ascii_hexdigit()) {
            return None;
        }

        let component = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Rgb([component(0..2)?, component(2..4)?, component(4..6)?]))
    }

    /// The color components scaled into the `0.0..=1.0` range expected by the PDF color operators.
    pub fn to_pdf_components(self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// Resolves the header color chosen in the wizard. An absent value silently yields `default`,
/// a malformed one yields `default` as well but is logged.
pub fn resolve_header_color(header_color: Option<&str>, default: Rgb) -> Rgb {
    match header_color.map(str::trim).filter(|value| !value.is_empty()) {
        None => default,
        Some(value) => Rgb::from_hex(value).unwrap_or_else(|| {
            log::warn!(
                "Unable to parse the header color {:?}, falling back to {:?}",
                value,
                default
            );
            default
        }),
    }
}

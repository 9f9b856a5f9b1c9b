use serde::{Deserialize, Serialize};

/// RGBA color of an overlay.
///
/// Serializes as a HEX8 string (`#RRGGBBAA`).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::try_from_hex(&value).unwrap_or(Color::BLACK)
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl From<Color> for galileo::Color {
    fn from(val: Color) -> Self {
        galileo::Color::rgba(val.r, val.g, val.b, val.a)
    }
}

impl Color {
    /// Blue color: `#0000FFFF`
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    /// Black color: `#000000FF`
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs color from a packed `0xAARRGGBB` value, the layout Android graphics APIs use.
    ///
    /// ```
    /// use mapscreen::Color;
    ///
    /// assert_eq!(Color::from_argb(0xFF0000FF), Color::BLUE);
    /// ```
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs the color into `0xAARRGGBB`.
    pub const fn to_argb(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || !hex_string.starts_with('#') {
            return None;
        }

        let r = u8::from_str_radix(hex_string.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex_string.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex_string.get(5..7)?, 16).ok()?;
        let a = match hex_string.get(7..9) {
            Some(alpha) => u8::from_str_radix(alpha, 16).ok()?,
            None => 255,
        };

        Some(Self { r, g, b, a })
    }

    /// Red component.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity component.
    pub fn a(&self) -> u8 {
        self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing() {
        let color = Color::from_argb(0x80102030);
        assert_eq!(color, Color::rgba(0x10, 0x20, 0x30, 0x80));
        assert_eq!(color.to_argb(), 0x80102030);
        assert_eq!(Color::from_argb(0xFF0000FF), Color::BLUE);
    }

    #[test]
    fn hex_parsing() {
        let color = Color::try_from_hex("#FF1000AA").unwrap();
        assert_eq!(color.to_hex(), "#FF1000AA");
        assert_eq!(Color::try_from_hex("#0000FF"), Some(Color::BLUE));
        assert_eq!(Color::try_from_hex("0000FF"), None);
        assert_eq!(Color::try_from_hex("#00ZZFF"), None);
        assert_eq!(Color::try_from_hex("#ÿÿÿ"), None);
    }

    #[test]
    fn serializes_as_hex() {
        let json = serde_json::to_string(&Color::BLUE).unwrap();
        assert_eq!(json, "\"#0000FFFF\"");

        let parsed: Color = serde_json::from_str("\"#FF0000\"").unwrap();
        assert_eq!(parsed, Color::rgba(255, 0, 0, 255));

        let fallback: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(fallback, Color::BLACK);
    }

    #[test]
    fn converts_to_engine_color() {
        let color: galileo::Color = Color::from_argb(0xFF0000FF).into();
        assert_eq!(color, galileo::Color::BLUE);
    }
}

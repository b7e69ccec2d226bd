use serde::{Deserialize, Serialize};

/// 8-bit RGBA colour parsed from config strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: 255,
            }),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    /// Normalized `[r, g, b, a]` in 0.0–1.0, as uploaded to shaders.
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_six_digits() {
        let c = Color::from_hex("#ff8800").unwrap();
        assert_eq!(c, Color::from_rgba(255, 136, 0, 255));
    }

    #[test]
    fn from_hex_eight_digits_without_hash() {
        let c = Color::from_hex("11223344").unwrap();
        assert_eq!(c, Color::from_rgba(0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Color::from_hex("#fff").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn to_f32_array_normalizes() {
        let [r, g, b, a] = Color::from_rgba(255, 0, 51, 255).to_f32_array();
        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!(g.abs() < f32::EPSILON);
        assert!((b - 0.2).abs() < 1e-6);
        assert!((a - 1.0).abs() < f32::EPSILON);
    }
}

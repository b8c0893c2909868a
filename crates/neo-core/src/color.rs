//! RGB color value.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Near-white green used for the leading glyph of a rain column.
    pub const LIGHT_GREEN: Rgb = Rgb::new(0xe3, 0xff, 0xe4);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure green of the given intensity.
    pub const fn green(intensity: u8) -> Self {
        Self::new(0, intensity, 0)
    }

    /// Scale every channel by `alpha / 255`.
    pub fn scale(self, alpha: u8) -> Self {
        let f = |c: u8| ((c as u16 * alpha as u16) / 255) as u8;
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Blend `over` on top of `self` with opacity `alpha`.
    pub fn mix(self, over: Rgb, alpha: u8) -> Self {
        let a = alpha as u16;
        let f = |under: u8, over: u8| ((under as u16 * (255 - a) + over as u16 * a) / 255) as u8;
        Self::new(f(self.r, over.r), f(self.g, over.g), f(self.b, over.b))
    }

    /// Integer mean of the three channels.
    pub fn mean(self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }

    /// True when no channel is zero.
    pub fn is_lit(self) -> bool {
        self.r != 0 && self.g != 0 && self.b != 0
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        assert_eq!(Rgb::new(200, 100, 0).scale(255), Rgb::new(200, 100, 0));
        assert_eq!(Rgb::new(200, 100, 0).scale(0), Rgb::BLACK);
        assert_eq!(Rgb::green(255).scale(51), Rgb::green(51));
    }

    #[test]
    fn test_mix() {
        let under = Rgb::green(200);
        assert_eq!(under.mix(Rgb::BLACK, 0), under);
        assert_eq!(under.mix(Rgb::BLACK, 255), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.mix(Rgb::green(255), 51), Rgb::green(51));
    }

    #[test]
    fn test_mean_and_lit() {
        assert_eq!(Rgb::new(10, 20, 30).mean(), 20);
        assert_eq!(Rgb::new(255, 255, 255).mean(), 255);
        assert!(Rgb::new(1, 1, 1).is_lit());
        assert!(!Rgb::new(0, 200, 200).is_lit());
    }
}

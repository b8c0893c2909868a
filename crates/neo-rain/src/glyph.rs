//! Pre-rendered glyphs.
//!
//! A glyph is a character drawn in one color at some opacity. Both
//! compositors only ever draw glyphs taken from a cache built once at
//! startup, so the per-frame loop never renders anything new.

use std::collections::HashMap;

use neo_core::Rgb;
use rand::{Rng, seq::SliceRandom};

use crate::chars::Alphabet;

/// Green shades used for trailing rain glyphs, picked once per character.
const GREEN_SHADES: std::ops::RangeInclusive<u8> = 160..=255;

/// A character rendered in a fixed color. `ch == None` is a blank glyph
/// that draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: Option<char>,
    pub color: Rgb,
    pub alpha: u8,
}

impl Glyph {
    /// Render `ch` in `color` at full opacity.
    pub fn render(ch: Option<char>, color: Rgb) -> Self {
        Self {
            ch,
            color,
            alpha: u8::MAX,
        }
    }

    /// The same glyph drawn at `alpha`.
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    pub fn is_blank(&self) -> bool {
        self.ch.is_none()
    }
}

/// Which pool a rain symbol picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Leading glyph of a column, light green.
    Head,
    /// Every other glyph, green.
    Trail,
}

/// Rain glyphs: one green and one light green rendering per alphabet entry.
#[derive(Debug, Clone)]
pub struct RainGlyphs {
    green: Vec<Glyph>,
    light_green: Vec<Glyph>,
}

impl RainGlyphs {
    pub fn new<R: Rng + ?Sized>(alphabet: &Alphabet, rng: &mut R) -> Self {
        let green = alphabet
            .entries()
            .iter()
            .map(|&ch| Glyph::render(ch, Rgb::green(rng.gen_range(GREEN_SHADES))))
            .collect();
        let light_green = alphabet
            .entries()
            .iter()
            .map(|&ch| Glyph::render(ch, Rgb::LIGHT_GREEN))
            .collect();
        Self { green, light_green }
    }

    pub fn pool(&self, role: Role) -> &[Glyph] {
        match role {
            Role::Head => &self.light_green,
            Role::Trail => &self.green,
        }
    }

    /// Uniform pick from the pool for `role`. `None` only for an empty alphabet.
    pub fn random<R: Rng + ?Sized>(&self, role: Role, rng: &mut R) -> Option<Glyph> {
        self.pool(role).choose(rng).copied()
    }
}

/// Vision glyphs: every non-blank character in every pure green intensity.
#[derive(Debug, Clone)]
pub struct VisionGlyphs {
    glyphs: HashMap<(char, Rgb), Glyph>,
}

impl VisionGlyphs {
    pub fn new(alphabet: &Alphabet) -> Self {
        let glyphs = alphabet
            .chars()
            .flat_map(|ch| {
                (0..=u8::MAX).map(move |g| ((ch, Rgb::green(g)), Glyph::render(Some(ch), Rgb::green(g))))
            })
            .collect();
        Self { glyphs }
    }

    /// Glyph for `ch` drawn in `(0, intensity, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if `ch` is not part of the alphabet the cache was built from.
    pub fn get(&self, ch: char, intensity: u8) -> Glyph {
        self.glyphs[&(ch, Rgb::green(intensity))]
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

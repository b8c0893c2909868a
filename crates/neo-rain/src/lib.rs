//! Digital rain rendering.
//!
//! Two compositors share one drawing surface: Rain mode drops columns of
//! katakana down the screen and fades them in, Vision mode lights a
//! scrolling glyph grid with the luminance of a camera frame. Glyphs are
//! rendered once into caches at startup; each frame only picks from them.

mod animations;
mod chars;
mod glyph;
mod state;
mod surface;

pub use animations::column::{COLUMN_HEIGHT, FALL_SPEED, SymbolColumn};
pub use animations::rain::{FADE_PERIOD, FADE_STEP, FadeIn, RainCompositor, RainContext};
pub use animations::symbol::Symbol;
pub use animations::vision::{
    VisionCell, VisionCompositor, VisionGrid, band_intensity, glyph_opacity,
};
pub use chars::{Alphabet, MATRIX_BASE, MATRIX_GLYPHS};
pub use glyph::{Glyph, RainGlyphs, Role, VisionGlyphs};
pub use state::EffectState;
pub use surface::{Cell, Surface};

//! Rain mode: falling glyph columns with a global fade-in.

use neo_core::{Geometry, MAX_FADE_OPACITY, Rgb};
use rand::Rng;

use crate::animations::column::SymbolColumn;
use crate::chars::Alphabet;
use crate::glyph::RainGlyphs;
use crate::surface::Surface;

/// Opacity gained per fade step.
pub const FADE_STEP: u8 = 3;

/// Ticks between fade steps.
pub const FADE_PERIOD: u64 = 20;

/// Per-frame inputs shared by every symbol.
#[derive(Debug, Clone, Copy)]
pub struct RainContext<'a> {
    pub glyphs: &'a RainGlyphs,
    pub tick: u64,
    /// Screen height in virtual pixels.
    pub height: i32,
    pub cell_size: i32,
}

impl<'a> RainContext<'a> {
    pub fn new(glyphs: &'a RainGlyphs, tick: u64, height: i32, cell_size: i32) -> Self {
        Self {
            glyphs,
            tick,
            height,
            cell_size,
        }
    }
}

/// Global opacity ramp: +3 every 20 ticks until 150.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeIn {
    opacity: u8,
}

impl FadeIn {
    pub fn new(initial: u8) -> Self {
        Self {
            opacity: initial.min(MAX_FADE_OPACITY),
        }
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn update(&mut self, tick: u64) {
        if tick % FADE_PERIOD == 0 && self.opacity < MAX_FADE_OPACITY {
            self.opacity = self.opacity.saturating_add(FADE_STEP).min(MAX_FADE_OPACITY);
        }
    }
}

/// Drives every rain column and the fade-in.
#[derive(Debug, Clone)]
pub struct RainCompositor {
    geometry: Geometry,
    glyphs: RainGlyphs,
    columns: Vec<SymbolColumn>,
    fade: FadeIn,
}

impl RainCompositor {
    /// Build one column per horizontal cell, each starting somewhere above
    /// the top edge.
    pub fn new<R: Rng + ?Sized>(
        geometry: Geometry,
        alphabet: &Alphabet,
        initial_opacity: u8,
        rng: &mut R,
    ) -> Self {
        let glyphs = RainGlyphs::new(alphabet, rng);
        let height = geometry.height() as i32;
        let cell_size = geometry.cell_size as i32;
        let ctx = RainContext::new(&glyphs, 0, height, cell_size);
        let columns = (0..geometry.cols as i32)
            .map(|col| SymbolColumn::new(col * cell_size, rng.gen_range(-height.max(1)..0), &ctx, rng))
            .collect();
        Self {
            geometry,
            glyphs,
            columns,
            fade: FadeIn::new(initial_opacity),
        }
    }

    pub fn columns(&self) -> &[SymbolColumn] {
        &self.columns
    }

    pub fn opacity(&self) -> u8 {
        self.fade.opacity()
    }

    /// Clear the layer, advance every column into it, then step the fade-in
    /// and apply it as the layer's global opacity.
    pub fn advance<R: Rng + ?Sized>(&mut self, tick: u64, rng: &mut R, layer: &mut Surface) {
        layer.fill(Rgb::BLACK);
        let ctx = RainContext::new(
            &self.glyphs,
            tick,
            self.geometry.height() as i32,
            self.geometry.cell_size as i32,
        );
        for column in &mut self.columns {
            column.advance(&ctx, rng, layer);
        }
        self.fade.update(tick);
        layer.set_opacity(self.fade.opacity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    #[test]
    fn test_fade_in_schedule() {
        let mut fade = FadeIn::new(0);
        let mut previous = fade.opacity();
        for tick in 0..2000u64 {
            fade.update(tick);
            let now = fade.opacity();
            assert!(now >= previous);
            assert!(now <= MAX_FADE_OPACITY);
            if tick % FADE_PERIOD == 0 && previous < MAX_FADE_OPACITY {
                assert_eq!(now, previous + FADE_STEP);
            } else {
                assert_eq!(now, previous);
            }
            previous = now;
        }
        assert_eq!(fade.opacity(), MAX_FADE_OPACITY);
    }

    #[rstest]
    #[case(0, 0, 3)]
    #[case(50, 19, 50)]
    #[case(147, 20, 150)]
    #[case(149, 40, 150)]
    #[case(150, 60, 150)]
    fn test_fade_in_step(#[case] initial: u8, #[case] tick: u64, #[case] expected: u8) {
        let mut fade = FadeIn::new(initial);
        fade.update(tick);
        assert_eq!(fade.opacity(), expected);
    }

    #[test]
    fn test_fade_reaches_cap_after_fifty_steps() {
        let mut fade = FadeIn::new(0);
        for tick in 0..(49 * FADE_PERIOD) {
            fade.update(tick);
        }
        assert_eq!(fade.opacity(), 147);
        fade.update(49 * FADE_PERIOD);
        assert_eq!(fade.opacity(), MAX_FADE_OPACITY);
    }

    #[test]
    fn test_compositor_builds_one_column_per_cell() {
        let mut rng = StdRng::seed_from_u64(21);
        let geometry = Geometry::new(12, 8, 23);
        let rain = RainCompositor::new(geometry, &Alphabet::matrix(10), 0, &mut rng);
        assert_eq!(rain.columns().len(), 12);
        for (i, column) in rain.columns().iter().enumerate() {
            assert_eq!(column.x(), i as i32 * 23);
            let lead = column.symbols()[0].y();
            assert!((-(geometry.height() as i32)..0).contains(&lead));
        }
    }

    #[test]
    fn test_compositor_advance_sets_layer_opacity() {
        let mut rng = StdRng::seed_from_u64(21);
        let geometry = Geometry::new(12, 8, 23);
        let mut rain = RainCompositor::new(geometry, &Alphabet::new(['A'], 0), 0, &mut rng);
        let mut layer = Surface::new(geometry, 2);

        for tick in 0..400u64 {
            rain.advance(tick, &mut rng, &mut layer);
            assert_eq!(layer.opacity(), rain.opacity());
        }
        // 20 fade steps happened.
        assert_eq!(rain.opacity(), 60);
        // Columns are taller than the screen, so something is on it by now.
        assert!(layer.lit_cells() > 0);
    }
}

//! Vertical stack of rain symbols.

use std::ops::Range;

use rand::Rng;

use crate::animations::rain::RainContext;
use crate::animations::symbol::Symbol;
use crate::glyph::Role;
use crate::surface::Surface;

/// Symbols per column.
pub const COLUMN_HEIGHT: Range<usize> = 14..24;

/// Pixels fallen per frame.
pub const FALL_SPEED: Range<i32> = 2..6;

/// Column of symbols sharing a horizontal position and fall speed.
#[derive(Debug, Clone)]
pub struct SymbolColumn {
    x: i32,
    speed: i32,
    /// Leading symbol first, the rest stacked upward one cell apart.
    symbols: Vec<Symbol>,
}

impl SymbolColumn {
    /// Build a column whose leading symbol starts at `start_y`.
    pub fn new<R: Rng + ?Sized>(x: i32, start_y: i32, ctx: &RainContext, rng: &mut R) -> Self {
        let height = rng.gen_range(COLUMN_HEIGHT);
        let speed = rng.gen_range(FALL_SPEED);
        let symbols = (0..height as i32)
            .map(|i| Symbol::new(x, start_y - i * ctx.cell_size, speed, ctx, rng))
            .collect();
        Self { x, speed, symbols }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Advance every symbol, the leading one as the bright head.
    pub fn advance<R: Rng + ?Sized>(&mut self, ctx: &RainContext, rng: &mut R, surface: &mut Surface) {
        for (i, symbol) in self.symbols.iter_mut().enumerate() {
            let role = if i == 0 { Role::Head } else { Role::Trail };
            symbol.advance(role, ctx, rng, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chars::Alphabet;
    use crate::glyph::RainGlyphs;
    use neo_core::{Geometry, Rgb};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_column_layout() {
        let mut rng = StdRng::seed_from_u64(11);
        let glyphs = RainGlyphs::new(&Alphabet::matrix(10), &mut rng);
        let ctx = RainContext::new(&glyphs, 0, 460, 23);
        for _ in 0..50 {
            let column = SymbolColumn::new(46, -100, &ctx, &mut rng);
            assert!(COLUMN_HEIGHT.contains(&column.symbols().len()));
            assert!(FALL_SPEED.contains(&column.speed()));
            for (i, symbol) in column.symbols().iter().enumerate() {
                assert_eq!(symbol.x(), 46);
                assert_eq!(symbol.y(), -100 - 23 * i as i32);
                assert_eq!(symbol.speed(), column.speed());
            }
        }
    }

    #[test]
    fn test_advance_moves_every_symbol() {
        let mut rng = StdRng::seed_from_u64(11);
        let glyphs = RainGlyphs::new(&Alphabet::new(['A'], 0), &mut rng);
        let ctx = RainContext::new(&glyphs, 1, 460, 23);
        let mut column = SymbolColumn::new(0, 200, &ctx, &mut rng);
        let before: Vec<i32> = column.symbols().iter().map(Symbol::y).collect();
        let mut surface = Surface::new(Geometry::new(1, 20, 23), 2);

        column.advance(&ctx, &mut rng, &mut surface);

        for (symbol, y) in column.symbols().iter().zip(before) {
            assert_eq!(symbol.y(), y + column.speed());
        }
        // Symbols still above the top edge are clipped.
        let visible = column
            .symbols()
            .iter()
            .filter(|s| s.y() >= 0 && s.y() < 460)
            .count();
        assert!(surface.lit_cells() <= visible);
        assert!(surface.lit_cells() > 0);
    }

    #[test]
    fn test_head_turns_light_green() {
        let mut rng = StdRng::seed_from_u64(11);
        let glyphs = RainGlyphs::new(&Alphabet::new(['A', 'B'], 0), &mut rng);
        let mut column = SymbolColumn::new(0, 100, &RainContext::new(&glyphs, 1, 460, 23), &mut rng);
        let mut surface = Surface::new(Geometry::new(1, 20, 23), 2);

        // Tick 0 is a swap tick for every interval.
        column.advance(&RainContext::new(&glyphs, 0, 460, 23), &mut rng, &mut surface);

        let head = &column.symbols()[0];
        assert_eq!(head.glyph().color, Rgb::LIGHT_GREEN);
        assert!(column.symbols()[1..].iter().all(|s| s.glyph().color != Rgb::LIGHT_GREEN));
    }
}

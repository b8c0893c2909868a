//! A single falling rain glyph.

use std::ops::Range;

use neo_core::Rgb;
use rand::Rng;

use crate::animations::rain::RainContext;
use crate::glyph::{Glyph, Role};
use crate::surface::Surface;

/// Ticks between glyph swaps, drawn once per symbol.
pub const CHANGE_INTERVAL: Range<u64> = 5..30;

/// State for one falling glyph.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Horizontal position in virtual pixels.
    x: i32,
    /// Vertical position in virtual pixels.
    y: i32,
    /// Pixels fallen per frame, shared with the column.
    speed: i32,
    /// Ticks between glyph swaps.
    interval: u64,
    /// Glyph currently shown.
    glyph: Glyph,
}

impl Symbol {
    /// Create a symbol with a random swap interval and starting glyph.
    pub fn new<R: Rng + ?Sized>(x: i32, y: i32, speed: i32, ctx: &RainContext, rng: &mut R) -> Self {
        let interval = rng.gen_range(CHANGE_INTERVAL);
        let glyph = ctx
            .glyphs
            .random(Role::Trail, rng)
            .unwrap_or(Glyph::render(None, Rgb::BLACK));
        Self::with_interval(x, y, speed, interval, glyph)
    }

    pub fn with_interval(x: i32, y: i32, speed: i32, interval: u64, glyph: Glyph) -> Self {
        Self {
            x,
            y,
            speed,
            interval: interval.max(1),
            glyph,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn glyph(&self) -> &Glyph {
        &self.glyph
    }

    /// Swap the glyph on schedule, then fall or wrap.
    ///
    /// A symbol that has reached the bottom edge moves to one cell above the
    /// top instead of falling further.
    pub fn update<R: Rng + ?Sized>(&mut self, role: Role, ctx: &RainContext, rng: &mut R) {
        if ctx.tick % self.interval == 0 {
            if let Some(glyph) = ctx.glyphs.random(role, rng) {
                self.glyph = glyph;
            }
        }
        self.y = if self.y < ctx.height {
            self.y + self.speed
        } else {
            -ctx.cell_size
        };
    }

    pub fn draw(&self, surface: &mut Surface) {
        surface.blit(&self.glyph, self.x, self.y);
    }

    /// Update and draw in one step.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        role: Role,
        ctx: &RainContext,
        rng: &mut R,
        surface: &mut Surface,
    ) {
        self.update(role, ctx, rng);
        self.draw(surface);
    }
}

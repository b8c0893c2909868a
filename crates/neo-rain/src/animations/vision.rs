//! Vision mode: a scrolling, mutating glyph grid lit by camera luminance.
//!
//! Every cell carries two fixed periods drawn at startup. A column rolls down
//! one row on ticks divisible by the scroll speed of any of its cells, and a
//! cell picks a fresh character on ticks divisible by its change interval.
//! There are no timers beyond the tick itself.

use std::ops::Range;

use neo_core::{Geometry, PixelGrid, Rgb};
use rand::Rng;

use crate::chars::Alphabet;
use crate::glyph::VisionGlyphs;
use crate::surface::Surface;

/// Ticks between character changes, drawn per cell.
pub const CHANGE_INTERVAL: Range<u64> = 25..50;

/// Ticks between column shifts, drawn per cell.
pub const SCROLL_SPEED: Range<u64> = 1..500;

/// Added to the displayed intensity to get the glyph opacity.
const OPACITY_BOOST: u8 = 60;

/// Flatten the 161..=219 band to a single bright plateau.
pub fn band_intensity(raw: u8) -> u8 {
    if 160 < raw && raw < 220 { 220 } else { raw }
}

/// Glyph opacity for a displayed intensity, clamped to 255.
pub fn glyph_opacity(intensity: u8) -> u8 {
    intensity.saturating_add(OPACITY_BOOST)
}

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisionCell {
    /// Character shown, `None` for a blank.
    pub ch: Option<char>,
    pub change_interval: u64,
    pub scroll_speed: u64,
}

/// Row-major grid of cells. Characters move when a column rolls; the
/// periods stay with their grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionGrid {
    rows: usize,
    cols: usize,
    cells: Vec<VisionCell>,
}

impl VisionGrid {
    pub fn new<R: Rng + ?Sized>(rows: usize, cols: usize, alphabet: &Alphabet, rng: &mut R) -> Self {
        let cells = (0..rows * cols)
            .map(|_| VisionCell {
                ch: alphabet.choose(rng),
                change_interval: rng.gen_range(CHANGE_INTERVAL),
                scroll_speed: rng.gen_range(SCROLL_SPEED),
            })
            .collect();
        Self { rows, cols, cells }
    }

    /// Grid from explicit cells in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != rows * cols` or a period is zero.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<VisionCell>) -> Self {
        assert_eq!(cells.len(), rows * cols, "cell count does not match grid shape");
        assert!(
            cells.iter().all(|c| c.change_interval > 0 && c.scroll_speed > 0),
            "cell periods must be positive"
        );
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &VisionCell {
        &self.cells[row * self.cols + col]
    }

    pub fn cells(&self) -> &[VisionCell] {
        &self.cells
    }

    /// Characters of one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Option<char>> {
        (0..self.rows).map(|row| self.cell(row, col).ch).collect()
    }

    /// Roll one column down by a row; the bottom character wraps to the top.
    pub fn roll_column(&mut self, col: usize) {
        let mut chars = self.column(col);
        chars.rotate_right(1);
        for (row, ch) in chars.into_iter().enumerate() {
            self.cells[row * self.cols + col].ch = ch;
        }
    }

    /// Roll every column that has a cell whose scroll speed divides `tick`.
    /// Returns the number of columns rolled.
    pub fn shift_columns(&mut self, tick: u64) -> usize {
        let due: Vec<usize> = (0..self.cols)
            .filter(|&col| (0..self.rows).any(|row| tick % self.cell(row, col).scroll_speed == 0))
            .collect();
        for &col in &due {
            self.roll_column(col);
        }
        due.len()
    }

    /// Give every cell whose change interval divides `tick` a fresh random
    /// character. Returns the number of cells changed.
    pub fn mutate<R: Rng + ?Sized>(&mut self, tick: u64, alphabet: &Alphabet, rng: &mut R) -> usize {
        let mut changed = 0;
        for cell in self.cells.iter_mut().filter(|c| tick % c.change_interval == 0) {
            cell.ch = alphabet.choose(rng);
            changed += 1;
        }
        changed
    }
}

/// Drives the vision grid and draws it against camera frames.
#[derive(Debug, Clone)]
pub struct VisionCompositor {
    geometry: Geometry,
    alphabet: Alphabet,
    glyphs: VisionGlyphs,
    grid: VisionGrid,
}

impl VisionCompositor {
    /// Build the grid and the full glyph cache for every green intensity.
    pub fn new<R: Rng + ?Sized>(geometry: Geometry, alphabet: &Alphabet, rng: &mut R) -> Self {
        let grid = VisionGrid::new(geometry.rows as usize, geometry.cols as usize, alphabet, rng);
        Self::with_grid(geometry, alphabet, grid)
    }

    pub fn with_grid(geometry: Geometry, alphabet: &Alphabet, grid: VisionGrid) -> Self {
        Self {
            geometry,
            alphabet: alphabet.clone(),
            glyphs: VisionGlyphs::new(alphabet),
            grid,
        }
    }

    pub fn grid(&self) -> &VisionGrid {
        &self.grid
    }

    /// Clear the layer, shift and mutate the grid, then draw it lit by `frame`.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        tick: u64,
        frame: &dyn PixelGrid,
        rng: &mut R,
        layer: &mut Surface,
    ) {
        layer.fill(Rgb::BLACK);
        self.grid.shift_columns(tick);
        self.grid.mutate(tick, &self.alphabet, rng);
        self.draw(frame, layer);
    }

    /// Draw every non-blank cell whose camera pixel has no zero channel.
    ///
    /// The pixel is sampled at the cell's top-left corner. Its mean,
    /// banded, picks the green shade; the shade plus 60 is the opacity.
    pub fn draw(&self, frame: &dyn PixelGrid, layer: &mut Surface) {
        let size = self.geometry.cell_size;
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let Some(ch) = self.grid.cell(row, col).ch else {
                    continue;
                };
                let (x, y) = (col as u32 * size, row as u32 * size);
                let pixel = frame.pixel(x, y);
                if !pixel.is_lit() {
                    continue;
                }
                let intensity = band_intensity(pixel.mean());
                let glyph = self
                    .glyphs
                    .get(ch, intensity)
                    .with_alpha(glyph_opacity(intensity));
                layer.blit(&glyph, x as i32, y as i32);
            }
        }
    }
}

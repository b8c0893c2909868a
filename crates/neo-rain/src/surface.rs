//! Drawing surfaces.
//!
//! A [`Surface`] is a grid of glyph cells on a black background. The
//! compositors draw each frame into an offscreen layer, which is then blended
//! onto the persistent screen surface at the layer's global opacity. The
//! screen is never cleared, so an opacity below 255 leaves fading trails.

use neo_core::{Geometry, Rgb};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::glyph::Glyph;

/// Channel level below which a cell counts as dark and is cleared.
const VISIBLE: u8 = 8;

/// One glyph-sized cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub ch: Option<char>,
    pub fg: Rgb,
}

impl Cell {
    fn brightness(&self, alpha: u8) -> u8 {
        if self.ch.is_none() {
            return 0;
        }
        let c = self.fg.scale(alpha);
        c.r.max(c.g).max(c.b)
    }
}

/// Glyph cell grid with a global opacity.
#[derive(Debug, Clone)]
pub struct Surface {
    geometry: Geometry,
    /// Terminal columns per glyph cell.
    cell_width: u16,
    cells: Vec<Cell>,
    opacity: u8,
}

impl Surface {
    pub fn new(geometry: Geometry, cell_width: u16) -> Self {
        Self {
            geometry,
            cell_width: cell_width.max(1),
            cells: vec![Cell::default(); geometry.rows as usize * geometry.cols as usize],
            opacity: u8::MAX,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Opacity used when this surface is composited onto another.
    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity;
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        if row >= self.geometry.rows || col >= self.geometry.cols {
            return None;
        }
        self.cells.get(self.index(row, col))
    }

    /// Clear every cell to a blank of the given color.
    pub fn fill(&mut self, color: Rgb) {
        self.cells.fill(Cell { ch: None, fg: color });
    }

    /// Draw `glyph` at virtual pixel `(x, y)`. Off-screen and blank glyphs
    /// draw nothing.
    pub fn blit(&mut self, glyph: &Glyph, x: i32, y: i32) {
        let Some(ch) = glyph.ch else {
            return;
        };
        if let Some((row, col)) = self.geometry.cell_at(x, y) {
            let index = self.index(row, col);
            self.cells[index] = Cell {
                ch: Some(ch),
                fg: glyph.color.scale(glyph.alpha),
            };
        }
    }

    /// Blend `layer` onto this surface at the layer's opacity.
    ///
    /// Each cell keeps whichever character contributes more light after the
    /// blend. Cells that end up too dark lose their character but keep their
    /// color, so a faint layer still builds up over several frames.
    pub fn composite(&mut self, layer: &Surface) {
        let alpha = layer.opacity;
        for (under, over) in self.cells.iter_mut().zip(&layer.cells) {
            let fg = under.fg.mix(over.fg, alpha);
            let ch = if over.brightness(alpha) >= under.brightness(u8::MAX - alpha) {
                over.ch.or(under.ch)
            } else {
                under.ch
            };
            let ch = if fg.r.max(fg.g).max(fg.b) < VISIBLE { None } else { ch };
            *under = Cell { ch, fg };
        }
    }

    /// Number of cells currently showing a character.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.ch.is_some()).count()
    }

    fn index(&self, row: u16, col: u16) -> usize {
        row as usize * self.geometry.cols as usize + col as usize
    }
}

impl Widget for &Surface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.geometry.rows {
            let y = area.y + row;
            if y >= area.bottom() {
                break;
            }
            for col in 0..self.geometry.cols {
                let x = area.x + col * self.cell_width;
                if x >= area.right() {
                    break;
                }
                for x in x..(x + self.cell_width).min(area.right()) {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.reset();
                        cell.set_bg(Color::Black);
                    }
                }
                let cell = &self.cells[self.index(row, col)];
                if let (Some(ch), Some(target)) = (cell.ch, buf.cell_mut((x, y))) {
                    target.set_char(ch).set_fg(cell.fg.into());
                }
            }
        }
    }
}

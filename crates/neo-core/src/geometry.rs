//! Screen geometry in glyph cells and virtual pixels.

/// Size of the drawing surface.
///
/// The screen is `cols` by `rows` glyph cells. Positions are expressed in
/// virtual pixels, `cell_size` per cell in both directions, so the virtual
/// resolution is `cols * cell_size` by `rows * cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cols: u16,
    pub rows: u16,
    pub cell_size: u32,
}

impl Geometry {
    pub fn new(cols: u16, rows: u16, cell_size: u32) -> Self {
        Self {
            cols,
            rows,
            cell_size,
        }
    }

    /// Geometry for a terminal of `width` x `height` columns/rows where each
    /// glyph takes `cell_width` columns. Returns `None` when not even one cell
    /// fits, or when the virtual resolution does not fit pixel coordinates.
    pub fn for_terminal(width: u16, height: u16, cell_width: u16, cell_size: u32) -> Option<Self> {
        let cols = width / cell_width.max(1);
        if cols == 0 || height == 0 || cell_size == 0 {
            return None;
        }
        let max = i32::MAX as u32;
        let pixels_wide = (cols as u32).checked_mul(cell_size)?;
        let pixels_high = (height as u32).checked_mul(cell_size)?;
        if pixels_wide > max || pixels_high > max {
            return None;
        }
        Some(Self::new(cols, height, cell_size))
    }

    /// Virtual pixel width.
    pub fn width(&self) -> u32 {
        self.cols as u32 * self.cell_size
    }

    /// Virtual pixel height.
    pub fn height(&self) -> u32 {
        self.rows as u32 * self.cell_size
    }

    /// Cell containing the virtual pixel `(x, y)`, if it is on screen.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let size = self.cell_size as i32;
        let col = x.div_euclid(size);
        let row = y.div_euclid(size);
        if (0..self.cols as i32).contains(&col) && (0..self.rows as i32).contains(&row) {
            Some((row as u16, col as u16))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_terminal() {
        let g = Geometry::for_terminal(81, 24, 2, 23).unwrap();
        assert_eq!((g.cols, g.rows), (40, 24));
        assert_eq!(g.width(), 40 * 23);
        assert_eq!(g.height(), 24 * 23);
        assert!(Geometry::for_terminal(1, 24, 2, 23).is_none());
        assert!(Geometry::for_terminal(80, 0, 2, 23).is_none());
    }

    #[test]
    fn test_for_terminal_rejects_huge_cells() {
        assert!(Geometry::for_terminal(200, 60, 2, 50_000_000).is_none());
        assert!(Geometry::for_terminal(200, 60, 2, u32::MAX).is_none());
        let g = Geometry::for_terminal(u16::MAX, u16::MAX, 1, 255).unwrap();
        assert_eq!(g.width(), u16::MAX as u32 * 255);
    }

    #[test]
    fn test_cell_at() {
        let g = Geometry::new(4, 3, 10);
        assert_eq!(g.cell_at(0, 0), Some((0, 0)));
        assert_eq!(g.cell_at(39, 29), Some((2, 3)));
        assert_eq!(g.cell_at(15, 25), Some((2, 1)));
        assert_eq!(g.cell_at(-1, 0), None);
        assert_eq!(g.cell_at(0, -10), None);
        assert_eq!(g.cell_at(40, 0), None);
        assert_eq!(g.cell_at(0, 30), None);
    }
}

//! Core types shared by the neo crates.
//!
//! Everything in here is plain data: colors, the screen geometry, the frame
//! clock and the display mode. Rendering lives in `neo-rain`, camera capture
//! in `neo-camera`.

mod clock;
mod color;
mod geometry;
mod mode;

pub use clock::{ClockSource, FrameClock};
pub use color::Rgb;
pub use geometry::Geometry;
pub use mode::Mode;

/// Highest global opacity the rain fade-in reaches.
pub const MAX_FADE_OPACITY: u8 = 150;

/// A pixel grid sampled in virtual screen coordinates.
///
/// Implemented by camera frames scaled to the screen resolution.
pub trait PixelGrid {
    /// Color of the pixel at `(x, y)`. Coordinates outside the grid are
    /// clamped to the nearest edge pixel.
    fn pixel(&self, x: u32, y: u32) -> Rgb;
}

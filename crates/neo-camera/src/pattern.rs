//! Synthetic camera.

use image::RgbImage;

use crate::Camera;

/// Width of one luminance band in pixels.
const BAND_WIDTH: u32 = 8;

/// Number of bands before the pattern repeats. Band 0 is pure black.
const BANDS: u32 = 6;

/// Animated test image: grey bands drifting sideways, with a bright disc
/// sweeping across. The black band exercises the zero-channel skip.
#[derive(Debug)]
pub struct TestPattern {
    image: RgbImage,
    phase: u32,
    running: bool,
}

impl TestPattern {
    pub fn new(width: u32, height: u32) -> Self {
        let mut pattern = Self {
            image: RgbImage::new(width.max(1), height.max(1)),
            phase: 0,
            running: false,
        };
        pattern.paint();
        pattern
    }

    fn paint(&mut self) {
        let (width, height) = self.image.dimensions();
        let radius = (height / 4).max(1) as i64;
        let cx = (self.phase.wrapping_mul(2) % width) as i64;
        let cy = (height / 2) as i64;
        let phase = self.phase;

        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            let band = (x + phase) / BAND_WIDTH % BANDS;
            let mut level = if band == 0 { 0 } else { 40 + band * 35 };
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            if dx * dx + dy * dy <= radius * radius {
                level = 250;
            }
            let level = level as u8;
            *pixel = image::Rgb([level, level, level]);
        }
    }
}

impl Camera for TestPattern {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn capture(&mut self) -> &RgbImage {
        if self.running {
            self.phase = self.phase.wrapping_add(1);
            self.paint();
        }
        &self.image
    }

    fn describe(&self) -> String {
        let (width, height) = self.image.dimensions();
        format!("test pattern {width}x{height}")
    }
}

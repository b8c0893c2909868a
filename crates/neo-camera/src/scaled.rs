//! Camera frames resampled to the screen's virtual resolution.

use image::RgbImage;
use neo_core::{Geometry, PixelGrid, Rgb};

/// A camera frame stretched to the screen's virtual resolution with
/// nearest-neighbour sampling.
#[derive(Debug, Clone, Copy)]
pub struct ScaledFrame<'a> {
    image: &'a RgbImage,
    width: u32,
    height: u32,
}

impl<'a> ScaledFrame<'a> {
    pub fn new(image: &'a RgbImage, geometry: Geometry) -> Self {
        Self {
            image,
            width: geometry.width().max(1),
            height: geometry.height().max(1),
        }
    }
}

impl PixelGrid for ScaledFrame<'_> {
    fn pixel(&self, x: u32, y: u32) -> Rgb {
        let (iw, ih) = self.image.dimensions();
        if iw == 0 || ih == 0 {
            return Rgb::BLACK;
        }
        let sx = (x as u64 * iw as u64 / self.width as u64).min(iw as u64 - 1) as u32;
        let sy = (y as u64 * ih as u64 / self.height as u64).min(ih as u64 - 1) as u32;
        let [r, g, b] = self.image.get_pixel(sx, sy).0;
        Rgb::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_to_screen() {
        // 2x2 image, one color per quadrant.
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, image::Rgb([1, 1, 1]));
        image.put_pixel(1, 0, image::Rgb([2, 2, 2]));
        image.put_pixel(0, 1, image::Rgb([3, 3, 3]));
        image.put_pixel(1, 1, image::Rgb([4, 4, 4]));

        // 100x60 virtual pixels.
        let frame = ScaledFrame::new(&image, Geometry::new(10, 6, 10));
        assert_eq!(frame.pixel(0, 0), Rgb::new(1, 1, 1));
        assert_eq!(frame.pixel(49, 29), Rgb::new(1, 1, 1));
        assert_eq!(frame.pixel(50, 0), Rgb::new(2, 2, 2));
        assert_eq!(frame.pixel(0, 30), Rgb::new(3, 3, 3));
        assert_eq!(frame.pixel(99, 59), Rgb::new(4, 4, 4));
    }

    #[test]
    fn test_clamps_out_of_range() {
        let image = RgbImage::from_pixel(3, 3, image::Rgb([7, 8, 9]));
        let frame = ScaledFrame::new(&image, Geometry::new(2, 2, 10));
        assert_eq!(frame.pixel(500, 500), Rgb::new(7, 8, 9));
    }

    #[test]
    fn test_empty_image_is_black() {
        let image = RgbImage::new(0, 0);
        let frame = ScaledFrame::new(&image, Geometry::new(2, 2, 10));
        assert_eq!(frame.pixel(0, 0), Rgb::BLACK);
    }
}

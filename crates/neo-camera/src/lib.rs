//! Camera sources for Vision mode.
//!
//! A camera hands out RGB frames at its own resolution. [`ScaledFrame`]
//! maps them onto the screen's virtual resolution for sampling.

use std::fmt;
use std::io;
use std::path::PathBuf;

use image::RgbImage;
use neo_config::CameraSource;
use neo_core::Geometry;

mod pattern;
mod scaled;
mod still;

pub use pattern::TestPattern;
pub use scaled::ScaledFrame;
pub use still::StillFrames;

/// Width of the synthetic camera image.
const PATTERN_WIDTH: u32 = 160;

/// Errors raised while opening a camera.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("no camera found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("no image frames in {}", .0.display())]
    NoFrames(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A source of camera frames.
pub trait Camera: fmt::Debug {
    fn start(&mut self);

    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Current frame. A running camera moves on to its next frame.
    fn capture(&mut self) -> &RgbImage;

    /// Human readable description for logs.
    fn describe(&self) -> String;
}

/// Open the configured camera. The synthetic pattern keeps the screen's
/// aspect ratio.
pub fn open(source: &CameraSource, geometry: Geometry) -> Result<Box<dyn Camera>, CameraError> {
    match source {
        CameraSource::Pattern => {
            let height = (PATTERN_WIDTH as u64 * geometry.height() as u64 / geometry.width().max(1) as u64)
                .max(1) as u32;
            Ok(Box::new(TestPattern::new(PATTERN_WIDTH, height)))
        }
        CameraSource::Path(path) => Ok(Box::new(StillFrames::open(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_pattern_keeps_aspect() {
        let mut camera = open(&CameraSource::Pattern, Geometry::new(40, 20, 23)).unwrap();
        assert!(!camera.is_running());
        assert_eq!(camera.capture().dimensions(), (160, 80));
    }

    #[test]
    fn test_open_missing_path() {
        let source = CameraSource::Path("/nonexistent/neo/camera".into());
        let err = open(&source, Geometry::new(40, 20, 23)).unwrap_err();
        assert!(matches!(err, CameraError::NotFound(_)));
        assert!(err.to_string().contains("/nonexistent/neo/camera"));
    }
}

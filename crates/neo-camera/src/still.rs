//! Camera backed by image files.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use crate::{Camera, CameraError};

/// Plays a fixed list of frames, one per capture while running.
#[derive(Debug)]
pub struct StillFrames {
    path: PathBuf,
    frames: Vec<RgbImage>,
    index: usize,
    running: bool,
}

impl StillFrames {
    /// Load a single image, or every image in a directory in name order.
    pub fn open(path: &Path) -> Result<Self, CameraError> {
        if !path.exists() {
            return Err(CameraError::NotFound(path.to_path_buf()));
        }

        let files = if path.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(path)
                .map_err(|source| CameraError::Io {
                    path: path.to_path_buf(),
                    source,
                })?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|p| {
                    p.is_file()
                        && ImageFormat::from_path(p).is_ok_and(|format| format.reading_enabled())
                })
                .collect();
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let frames = files
            .iter()
            .map(|file| {
                image::open(file)
                    .map(|img| img.to_rgb8())
                    .map_err(|source| CameraError::Decode {
                        path: file.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if frames.is_empty() {
            return Err(CameraError::NoFrames(path.to_path_buf()));
        }
        tracing::debug!(count = frames.len(), path = %path.display(), "loaded camera frames");

        Ok(Self {
            path: path.to_path_buf(),
            frames,
            index: 0,
            running: false,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Camera for StillFrames {
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
        let current = self.index;
        if self.running {
            self.index = (self.index + 1) % self.frames.len();
        }
        &self.frames[current]
    }

    fn describe(&self) -> String {
        format!("{} ({} frames)", self.path.display(), self.frames.len())
    }
}

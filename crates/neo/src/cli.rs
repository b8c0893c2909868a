//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use neo_config::{CameraSource, Config, ConfigError};
use neo_core::ClockSource;

/// Digital rain for your terminal. Press space to see yourself in it.
#[derive(Debug, Parser)]
#[command(name = "neo", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Camera for vision mode: "pattern", an image file or a directory of frames.
    #[arg(long)]
    pub camera: Option<String>,

    /// Seed for every random choice.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Opacity the rain fades in from (0-150).
    #[arg(long)]
    pub initial_opacity: Option<u8>,

    /// What a clock tick counts.
    #[arg(long, value_enum)]
    pub clock: Option<ClockArg>,

    /// Sound clip played once at startup.
    #[arg(long)]
    pub sound: Option<PathBuf>,

    /// Log file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockArg {
    Frames,
    Millis,
}

impl From<ClockArg> for ClockSource {
    fn from(arg: ClockArg) -> Self {
        match arg {
            ClockArg::Frames => ClockSource::Frames,
            ClockArg::Millis => ClockSource::Millis,
        }
    }
}

impl Cli {
    /// Load the config file and layer the flags on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(camera) = &self.camera {
            config.camera.source = CameraSource::from(camera.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(opacity) = self.initial_opacity {
            config.initial_opacity = opacity;
        }
        if let Some(clock) = self.clock {
            config.clock = clock.into();
        }
        if let Some(sound) = &self.sound {
            config.audio.clip = Some(sound.clone());
        }
        if let Some(log_file) = &self.log_file {
            config.log.file = Some(log_file.clone());
        }
    }
}

//! Startup sound.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use color_eyre::eyre::bail;
use neo_config::AudioConfig;

/// A clip played once through an external player.
#[derive(Debug, Clone)]
pub struct Soundtrack {
    clip: PathBuf,
    player: String,
}

impl Soundtrack {
    /// `None` when no clip is configured. A configured clip must exist.
    pub fn load(config: &AudioConfig) -> color_eyre::Result<Option<Self>> {
        let Some(clip) = &config.clip else {
            return Ok(None);
        };
        if !clip.is_file() {
            bail!("sound clip not found: {}", clip.display());
        }
        Ok(Some(Self {
            clip: clip.clone(),
            player: config.player.clone(),
        }))
    }

    /// Start the player and forget about it.
    pub fn play_once(&self) {
        let spawned = Command::new(&self.player)
            .arg(&self.clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => tracing::info!(pid = child.id(), clip = %self.clip.display(), "playing sound"),
            Err(err) => tracing::warn!(player = %self.player, %err, "failed to start audio player"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clip() {
        assert!(Soundtrack::load(&AudioConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_missing_clip() {
        let config = AudioConfig {
            clip: Some("/nonexistent/matrix.wav".into()),
            ..Default::default()
        };
        let err = Soundtrack::load(&config).unwrap_err();
        assert!(err.to_string().contains("sound clip not found"));
    }

    #[test]
    fn test_missing_player_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("clip.wav");
        std::fs::write(&clip, b"RIFF").unwrap();
        let config = AudioConfig {
            clip: Some(clip),
            player: "/nonexistent/player".to_string(),
        };
        let soundtrack = Soundtrack::load(&config).unwrap().unwrap();
        soundtrack.play_once();
    }
}

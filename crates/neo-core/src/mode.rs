/// Which compositor is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Falling glyph columns.
    #[default]
    Rain,
    /// Glyph grid modulated by the camera feed.
    Vision,
}

impl Mode {
    /// Switch to the other mode.
    pub fn toggle(&self) -> Self {
        match self {
            Mode::Rain => Mode::Vision,
            Mode::Vision => Mode::Rain,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Rain => "rain",
            Mode::Vision => "vision",
        }
    }
}

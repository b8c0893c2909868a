use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use neo_camera::{Camera, ScaledFrame};
use neo_config::Config;
use neo_core::{FrameClock, Geometry, Mode};
use neo_rain::{Alphabet, EffectState};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::DefaultTerminal;

mod audio;
mod cli;
mod logging;

use audio::Soundtrack;
use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.load_config().wrap_err("failed to load configuration")?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    logging::init(&config.log)?;

    let (width, height) = crossterm::terminal::size().wrap_err("no display detected")?;
    let geometry = Geometry::for_terminal(width, height, config.cell_width, config.cell_size)
        .ok_or_else(|| eyre!("no display detected: terminal is {width}x{height}"))?;
    let camera = neo_camera::open(&config.camera.source, geometry)
        .wrap_err("failed to open camera")?;
    let soundtrack = Soundtrack::load(&config.audio)?;

    let app = App::new(&config, geometry, camera);
    let terminal = ratatui::init();
    if let Some(soundtrack) = &soundtrack {
        soundtrack.play_once();
    }
    let result = app.run(terminal);
    ratatui::restore();
    tracing::info!("exiting");
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Active compositor.
    mode: Mode,
    clock: FrameClock,
    rng: StdRng,
    effect: EffectState,
    camera: Box<dyn Camera>,
    /// Time budget for one frame.
    frame_period: Duration,
    /// Pause after a mode switch.
    settle: Duration,
}

impl App {
    /// Construct a new instance of [`App`], rendering every glyph cache up front.
    pub fn new(config: &Config, geometry: Geometry, camera: Box<dyn Camera>) -> Self {
        let seed = config.seed.unwrap_or_else(time_seed);
        tracing::info!(
            cols = geometry.cols,
            rows = geometry.rows,
            cell_size = geometry.cell_size,
            seed,
            clock = ?config.clock,
            camera = %camera.describe(),
            "starting"
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let alphabet = Alphabet::matrix(config.blank_glyphs);
        let effect = EffectState::new(
            geometry,
            config.cell_width,
            &alphabet,
            config.initial_opacity,
            &mut rng,
        );

        Self {
            running: false,
            mode: Mode::Rain,
            clock: FrameClock::new(config.clock),
            rng,
            effect,
            camera,
            frame_period: Duration::from_secs(1) / config.fps.max(1),
            settle: Duration::from_millis(config.settle_ms),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let deadline = Instant::now() + self.frame_period;
            self.step();
            terminal.draw(|frame| self.effect.render(frame))?;
            self.handle_crossterm_events(deadline)?;
            self.clock.advance();
        }
        Ok(())
    }

    /// Advance the active compositor by one frame.
    fn step(&mut self) {
        let tick = self.clock.tick();
        match self.mode {
            Mode::Rain => self.effect.advance_rain(tick, &mut self.rng),
            Mode::Vision => {
                let geometry = self.effect.geometry();
                let frame = ScaledFrame::new(self.camera.capture(), geometry);
                self.effect.advance_vision(tick, &frame, &mut self.rng);
            }
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waiting for events until the deadline is what paces the frames.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => {
                    tracing::debug!(width, height, "terminal resized, keeping geometry");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_mode(),
            _ => {}
        }
    }

    /// Switch between rain and vision, starting or stopping the camera.
    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        match self.mode {
            Mode::Vision => self.camera.start(),
            Mode::Rain => self.camera.stop(),
        }
        tracing::info!(
            mode = self.mode.name(),
            frame = self.clock.frames(),
            camera_running = self.camera.is_running(),
            "mode switched"
        );
        if !self.settle.is_zero() {
            thread::sleep(self.settle);
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Seed from the wall clock for runs without a configured seed.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_camera::TestPattern;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        let config = Config {
            seed: Some(1),
            settle_ms: 0,
            initial_opacity: 150,
            ..Config::default()
        };
        let geometry = Geometry::new(20, 10, 23);
        App::new(&config, geometry, Box::new(TestPattern::new(40, 20)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_space_toggles_mode_and_camera() {
        let mut app = app();
        assert_eq!(app.mode, Mode::Rain);
        assert!(!app.camera.is_running());

        app.on_key_event(press(KeyCode::Char(' ')));
        assert_eq!(app.mode, Mode::Vision);
        assert!(app.camera.is_running());

        app.on_key_event(press(KeyCode::Char(' ')));
        assert_eq!(app.mode, Mode::Rain);
        assert!(!app.camera.is_running());
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.running = true;
            app.on_key_event(key);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut app = app();
        app.running = true;
        app.on_key_event(press(KeyCode::Char('c')));
        app.on_key_event(press(KeyCode::Enter));
        assert!(app.running);
        assert_eq!(app.mode, Mode::Rain);
    }

    #[test]
    fn test_frame_period() {
        assert_eq!(app().frame_period, Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_steps_render_both_modes() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        for _ in 0..1200 {
            app.step();
            app.clock.advance();
        }
        terminal.draw(|frame| app.effect.render(frame)).unwrap();
        let rain_glyphs = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|c| c.symbol() != " ")
            .count();
        assert!(rain_glyphs > 0);

        app.on_key_event(press(KeyCode::Char(' ')));
        for _ in 0..60 {
            app.step();
            app.clock.advance();
        }
        terminal.draw(|frame| app.effect.render(frame)).unwrap();
        assert!(app.effect.screen().lit_cells() > 0);
    }
}

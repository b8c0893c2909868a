//! Effect state shared by both modes.

use neo_core::{Geometry, PixelGrid};
use rand::Rng;
use ratatui::Frame;

use crate::animations::rain::RainCompositor;
use crate::animations::vision::VisionCompositor;
use crate::chars::Alphabet;
use crate::surface::Surface;

/// Both compositors plus the offscreen layer they draw into and the screen
/// the layer is blended onto.
#[derive(Debug)]
pub struct EffectState {
    rain: RainCompositor,
    vision: VisionCompositor,
    /// Redrawn from scratch every frame.
    layer: Surface,
    /// Persists across frames.
    screen: Surface,
}

impl EffectState {
    /// Build every column, the vision grid and both glyph caches.
    pub fn new<R: Rng + ?Sized>(
        geometry: Geometry,
        cell_width: u16,
        alphabet: &Alphabet,
        initial_opacity: u8,
        rng: &mut R,
    ) -> Self {
        let rain = RainCompositor::new(geometry, alphabet, initial_opacity, rng);
        let vision = VisionCompositor::new(geometry, alphabet, rng);
        let mut layer = Surface::new(geometry, cell_width);
        layer.set_opacity(rain.opacity());
        Self {
            rain,
            vision,
            layer,
            screen: Surface::new(geometry, cell_width),
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.screen.geometry()
    }

    pub fn rain(&self) -> &RainCompositor {
        &self.rain
    }

    pub fn vision(&self) -> &VisionCompositor {
        &self.vision
    }

    pub fn layer(&self) -> &Surface {
        &self.layer
    }

    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    /// Run one Rain frame and blend it onto the screen.
    pub fn advance_rain<R: Rng + ?Sized>(&mut self, tick: u64, rng: &mut R) {
        self.rain.advance(tick, rng, &mut self.layer);
        self.screen.composite(&self.layer);
    }

    /// Run one Vision frame against a camera frame and blend it onto the
    /// screen. The layer keeps the opacity the rain fade-in left it at.
    pub fn advance_vision<R: Rng + ?Sized>(&mut self, tick: u64, frame: &dyn PixelGrid, rng: &mut R) {
        self.vision.advance(tick, frame, rng, &mut self.layer);
        self.screen.composite(&self.layer);
    }

    /// Present the screen.
    pub fn render(&self, frame: &mut Frame) {
        frame.render_widget(&self.screen, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::Rgb;
    use rand::{SeedableRng, rngs::StdRng};

    /// Every pixel the same color.
    struct Flat(Rgb);

    impl PixelGrid for Flat {
        fn pixel(&self, _x: u32, _y: u32) -> Rgb {
            self.0
        }
    }

    const GREY: Flat = Flat(Rgb::new(120, 120, 120));

    fn state(initial_opacity: u8) -> (EffectState, StdRng) {
        let mut rng = StdRng::seed_from_u64(17);
        let geometry = Geometry::new(10, 6, 23);
        let state = EffectState::new(geometry, 2, &Alphabet::new(['A', 'B'], 0), initial_opacity, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_rain_fades_in_from_black() {
        let (mut state, mut rng) = state(0);
        // Opacity 3 on the first frame only lets a faint glow through.
        state.advance_rain(0, &mut rng);
        assert_eq!(state.layer().opacity(), 3);

        for tick in 1..600 {
            state.advance_rain(tick, &mut rng);
        }
        assert_eq!(state.rain().opacity(), 90);
        assert!(state.screen().lit_cells() > 0);
    }

    #[test]
    fn test_vision_keeps_fade_opacity() {
        let (mut state, mut rng) = state(120);
        state.advance_rain(0, &mut rng);
        assert_eq!(state.layer().opacity(), 123);
        for tick in 1..200 {
            state.advance_vision(tick, &GREY, &mut rng);
        }
        assert_eq!(state.layer().opacity(), 123);
        assert!(state.screen().lit_cells() > 0);
    }

    #[test]
    fn test_vision_lights_grid_cells() {
        let (mut state, mut rng) = state(150);
        for tick in 1..50 {
            state.advance_vision(tick, &GREY, &mut rng);
        }
        // No blanks in the alphabet and a lit camera: every cell shows a glyph.
        assert_eq!(state.layer().lit_cells(), 60);
        assert_eq!(state.screen().lit_cells(), 60);
    }

    #[test]
    fn test_vision_lights_up_right_after_start() {
        let (mut state, mut rng) = state(0);
        state.advance_rain(0, &mut rng);
        assert_eq!(state.layer().opacity(), 3);
        assert_eq!(state.vision().grid().cells().len(), 60);

        let bright = Flat(Rgb::new(250, 250, 250));
        for tick in 1..50 {
            state.advance_vision(tick, &bright, &mut rng);
        }
        assert_eq!(state.layer().opacity(), 3);
        assert_eq!(state.screen().lit_cells(), 60);
    }
}

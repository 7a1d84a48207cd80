use raylib::ease;
use crate::constants::*;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LayerState {
    Hidden,    // Out of the layout, nothing drawn
    Revealing, // In the layout, waiting a moment before fading in
    FadingIn,  // Opacity rising
    Shown,     // Fully opaque
    FadingOut, // Opacity falling, leaves the layout when done
}

/// Display-then-fade transitions for an overlay layer.
#[derive(Debug, Clone)]
pub struct LayerFade {
    pub state: LayerState,
    opacity: f32,
    from: f32,
    to: f32,
    timer: f32,
}

impl LayerFade {
    pub fn new(shown: bool) -> Self {
        let (state, opacity) = if shown { (LayerState::Shown, 1.0) } else { (LayerState::Hidden, 0.0) };
        Self { state, opacity, from: opacity, to: opacity, timer: 0.0 }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the layer currently takes part in layout and drawing.
    pub fn is_displayed(&self) -> bool {
        self.state != LayerState::Hidden
    }

    pub fn show(&mut self) {
        match self.state {
            LayerState::Hidden | LayerState::FadingOut => {
                self.state = LayerState::Revealing;
                self.timer = 0.0;
            }
            LayerState::Revealing | LayerState::FadingIn | LayerState::Shown => {}
        }
    }

    pub fn hide(&mut self) {
        match self.state {
            LayerState::Revealing | LayerState::FadingIn | LayerState::Shown => {
                self.start_fade(LayerState::FadingOut, 0.0);
            }
            LayerState::Hidden | LayerState::FadingOut => {}
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self.state {
            LayerState::Hidden | LayerState::Shown => {}
            LayerState::Revealing => {
                self.timer += dt;
                if self.timer >= REVEAL_DELAY {
                    self.start_fade(LayerState::FadingIn, 1.0);
                }
            }
            LayerState::FadingIn | LayerState::FadingOut => {
                self.timer += dt;
                let t = self.timer.min(FADE_DURATION);
                self.opacity = ease::linear_none(t, self.from, self.to - self.from, FADE_DURATION);

                if self.timer >= FADE_DURATION {
                    self.opacity = self.to;
                    self.state = if self.state == LayerState::FadingIn { LayerState::Shown } else { LayerState::Hidden };
                }
            }
        }
    }

    fn start_fade(&mut self, state: LayerState, to: f32) {
        self.state = state;
        self.from = self.opacity;
        self.to = to;
        self.timer = 0.0;
    }
}

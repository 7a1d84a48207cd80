use rand::Rng;
use raylib::prelude::*;

use crate::balloon::motion::Viewport;
use crate::constants::*;

/// Fires bursts at random intervals: once after the initial delay, then after
/// each random wait in `[BURST_MIN_DELAY, BURST_MAX_DELAY]`.
#[derive(Debug, Clone)]
pub struct BurstScheduler {
    remaining: f32,
}

impl BurstScheduler {
    pub fn new() -> Self {
        Self { remaining: BURST_INITIAL_DELAY }
    }

    #[cfg(test)]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advances by `dt` seconds. Returns true when a burst is due, re-arming
    /// with a fresh random delay.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining = rng.random_range(BURST_MIN_DELAY..=BURST_MAX_DELAY);
        true
    }
}

/// Random burst origin away from the viewport edges.
pub fn random_origin<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vector2 {
    let margin_x = viewport.width * BURST_MARGIN;
    let margin_y = viewport.height * BURST_MARGIN;
    Vector2::new(
        margin_x + rng.random::<f32>() * (viewport.width - 2.0 * margin_x),
        margin_y + rng.random::<f32>() * (viewport.height - 2.0 * margin_y),
    )
}

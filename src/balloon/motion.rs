use raylib::prelude::*;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest centered rectangle of the viewport's aspect ratio fitting the screen.
    pub fn letterbox(&self, screen_width: f32, screen_height: f32) -> Rectangle {
        let scale = (screen_width / self.width).min(screen_height / self.height).max(0.0);
        let width = self.width * scale;
        let height = self.height * scale;
        Rectangle::new((screen_width - width) / 2.0, (screen_height - height) / 2.0, width, height)
    }

    /// Maps a window position into viewport coordinates through the letterbox.
    pub fn screen_to_viewport(&self, point: Vector2, screen_width: f32, screen_height: f32) -> Vector2 {
        let dest = self.letterbox(screen_width, screen_height);
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return point;
        }
        Vector2::new(
            (point.x - dest.x) * self.width / dest.width,
            (point.y - dest.y) * self.height / dest.height,
        )
    }
}

/// Per-balloon physics state, advanced once per display frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRecord {
    /// Index of the balloon visual this record moves.
    pub visual: usize,
    pub position: Vector2,
    pub width: f32,
    pub height: f32,
    pub velocity: Vector2,
    pub drift: f32,
    pub phase: f32,
}

impl MotionRecord {
    /// One frame of motion. Speeds are expressed per frame, so the apparent
    /// speed follows the display refresh rate.
    pub fn step(&mut self, viewport: Viewport) {
        self.phase += self.drift * DRIFT_PHASE_STEP;
        self.position.x += self.velocity.x + self.phase.sin() * DRIFT_AMPLITUDE;
        self.position.y += self.velocity.y;

        bounce(&mut self.position.x, &mut self.velocity.x, viewport.width - self.width);
        bounce(&mut self.position.y, &mut self.velocity.y, viewport.height - self.height);
    }
}

// Reflects velocity and clamps into [0, limit] when the position left the band.
fn bounce(position: &mut f32, velocity: &mut f32, limit: f32) {
    if *position < 0.0 || *position > limit {
        *velocity = -*velocity;
        *position = position.min(limit).max(0.0);
    }
}

pub fn step_all(records: &mut [MotionRecord], viewport: Viewport) {
    for record in records.iter_mut() {
        record.step(viewport);
    }
}

use raylib::prelude::Color;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame when recording (seconds)

pub const BACKGROUND: Color = Color::new(173, 216, 230, 255);

// --- Balloon defaults ---
pub const BALLOON_COUNT: usize = 6;
pub const MIN_SIZE: f32 = 120.0;
pub const MAX_SIZE: f32 = 200.0;
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 1.5;
pub const MIN_DRIFT: f32 = 0.2;
pub const MAX_DRIFT: f32 = 0.8;
pub const HEIGHT_RATIO: f32 = 1.2;            // Balloon height = size * ratio

pub const DRIFT_PHASE_STEP: f32 = 0.01;       // Phase advance per frame per unit of drift
pub const DRIFT_AMPLITUDE: f32 = 0.5;         // Lateral sway in pixels per frame

// --- Balloon shape ---
pub const KNOT_INSET: f32 = 15.0;             // Ellipse is lifted this much to leave room for the knot
pub const KNOT_HALF_WIDTH: f32 = 16.0;
pub const KNOT_DEPTH: f32 = 20.0;

// --- Strings ---
pub const STRING_ANCHOR_INSET: f32 = 14.0;    // String starts this far above the container bottom
pub const STRING_MIN_LENGTH: f32 = 50.0;
pub const STRING_MAX_LENGTH: f32 = 100.0;
pub const STRING_SWAY: f32 = 20.0;
pub const STRING_SEGMENTS: usize = 16;

pub const STRING_COLORS: [Color; 6] = [
    Color::new(0xFF, 0x52, 0x52, 255), // Red
    Color::new(0x4C, 0xAF, 0x50, 255), // Green
    Color::new(0x21, 0x96, 0xF3, 255), // Blue
    Color::new(0xFF, 0xC1, 0x07, 255), // Amber
    Color::new(0x9C, 0x27, 0xB0, 255), // Purple
    Color::new(0xFF, 0x98, 0x00, 255), // Orange
];
pub const STRING_WIDTHS: [f32; 6] = [2.0, 3.0, 4.0, 2.0, 3.0, 2.0];

// --- Fireworks ---
pub const BURST_PARTICLES: usize = 50;
pub const BURST_MIN_DISTANCE: f32 = 40.0;
pub const BURST_MAX_DISTANCE: f32 = 140.0;
pub const PARTICLE_LIFETIME: f32 = 1.0;       // Seconds before a particle is removed
pub const PARTICLE_RADIUS: f32 = 3.0;
pub const BURST_INITIAL_DELAY: f32 = 2.0;
pub const BURST_MIN_DELAY: f32 = 0.5;
pub const BURST_MAX_DELAY: f32 = 2.4;
pub const BURST_MARGIN: f32 = 0.1;            // Fraction of the viewport kept free around scheduled bursts

// --- Panel toggle ---
pub const FADE_DURATION: f32 = 0.5;           // Opacity transition (seconds)
pub const REVEAL_DELAY: f32 = 0.01;           // Wait between entering the layout and fading in
pub const TOGGLE_SIZE: f32 = 64.0;
pub const TOGGLE_MARGIN: f32 = 32.0;
pub const PANEL_WIDTH: f32 = 520.0;
pub const PANEL_HEIGHT: f32 = 180.0;

// --- Placeholders for images that could not be loaded ---
pub const PLACEHOLDER_SIZE: i32 = 256;

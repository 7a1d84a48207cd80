use rand::Rng;
use raylib::prelude::*;
use crate::constants::*;

/// Decorative string hanging from the knot.
#[derive(Debug, Clone, Copy)]
pub struct BalloonString {
    pub length: f32,
    pub color: Color,
    pub width: f32,
}

impl BalloonString {
    /// Palette entries cycle by balloon index, length is random.
    pub fn new<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Self {
        Self {
            length: rng.random_range(STRING_MIN_LENGTH..=STRING_MAX_LENGTH),
            color: STRING_COLORS[index % STRING_COLORS.len()],
            width: STRING_WIDTHS[index % STRING_WIDTHS.len()],
        }
    }

    /// Cubic Bézier control points relative to the container's top-left corner,
    /// anchored at its bottom center.
    pub fn control_points(&self, width: f32, height: f32) -> [Vector2; 4] {
        let cx = width / 2.0;
        [
            Vector2::new(cx, height - STRING_ANCHOR_INSET),
            Vector2::new(cx, height + self.length / 3.0),
            Vector2::new(cx + STRING_SWAY, height + self.length / 2.0),
            Vector2::new(cx, height + self.length),
        ]
    }

    /// Polyline approximation of the curve, `STRING_SEGMENTS + 1` points.
    pub fn polyline(&self, width: f32, height: f32) -> Vec<Vector2> {
        let [p0, p1, p2, p3] = self.control_points(width, height);
        (0..=STRING_SEGMENTS)
            .map(|i| {
                let t = i as f32 / STRING_SEGMENTS as f32;
                let u = 1.0 - t;
                p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
            })
            .collect()
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, origin: Vector2, width: f32, height: f32) {
        let points = self.polyline(width, height);
        for pair in points.windows(2) {
            d.draw_line_ex(origin + pair[0], origin + pair[1], self.width, self.color);
        }
    }
}

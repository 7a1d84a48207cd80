use raylib::prelude::*;
use crate::constants::*;

/// Balloon outline: an ellipse body lifted to leave room for a downward
/// pointing knot whose top edge sits on the ellipse's lowest point.
#[derive(Debug, Clone, Copy)]
pub struct BalloonShape {
    pub center: Vector2,
    pub radii: Vector2,
    pub knot: [Vector2; 3],
}

impl BalloonShape {
    pub fn new(width: f32, height: f32) -> Self {
        let center = Vector2::new(width / 2.0, height / 2.0 - KNOT_INSET);
        let radii = Vector2::new(width / 2.0, height / 2.0 - KNOT_INSET);
        let bottom = center.y + radii.y;

        Self {
            center,
            radii,
            knot: [
                Vector2::new(width / 2.0 - KNOT_HALF_WIDTH, bottom),
                Vector2::new(width / 2.0, bottom + KNOT_DEPTH),
                Vector2::new(width / 2.0 + KNOT_HALF_WIDTH, bottom),
            ],
        }
    }

    #[cfg(test)]
    pub fn ellipse_bottom(&self) -> f32 {
        self.center.y + self.radii.y
    }

    pub fn contains(&self, p: Vector2) -> bool {
        self.in_ellipse(p) || self.in_knot(p)
    }

    fn in_ellipse(&self, p: Vector2) -> bool {
        if self.radii.x <= 0.0 || self.radii.y <= 0.0 {
            return false;
        }
        let dx = (p.x - self.center.x) / self.radii.x;
        let dy = (p.y - self.center.y) / self.radii.y;
        dx * dx + dy * dy <= 1.0
    }

    fn in_knot(&self, p: Vector2) -> bool {
        let [a, b, c] = self.knot;
        let edge = |from: Vector2, to: Vector2| (to.x - from.x) * (p.y - from.y) - (to.y - from.y) * (p.x - from.x);
        let (d1, d2, d3) = (edge(a, b), edge(b, c), edge(c, a));
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }

    /// White inside the outline, transparent outside. Sized to the container
    /// so it can be handed to `Image::alpha_mask`.
    pub fn bake_mask(&self, width: i32, height: i32) -> Image {
        let mut mask = Image::gen_image_color(width, height, Color::BLANK);
        for y in 0..height {
            for x in 0..width {
                // Sample pixel centers
                if self.contains(Vector2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    mask.draw_pixel(x, y, Color::WHITE);
                }
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_geometry_for_reference_container() {
        let shape = BalloonShape::new(160.0, 192.0);
        assert_eq!(shape.center, Vector2::new(80.0, 81.0));
        assert_eq!(shape.radii, Vector2::new(80.0, 81.0));
        assert_eq!(shape.ellipse_bottom(), 162.0);
    }

    #[test]
    fn knot_touches_ellipse_bottom() {
        let shape = BalloonShape::new(160.0, 192.0);
        let [left, tip, right] = shape.knot;
        assert_eq!(left.y, shape.ellipse_bottom());
        assert_eq!(right.y, shape.ellipse_bottom());
        assert_eq!(tip, Vector2::new(80.0, 182.0));
        assert_eq!(right.x - left.x, 32.0);
    }

    #[test]
    fn contains_body_and_knot_but_not_corners() {
        let shape = BalloonShape::new(160.0, 192.0);
        assert!(shape.contains(Vector2::new(80.0, 81.0)));
        assert!(shape.contains(Vector2::new(80.0, 170.0))); // inside the knot, below the ellipse
        assert!(!shape.contains(Vector2::new(2.0, 2.0)));
        assert!(!shape.contains(Vector2::new(158.0, 190.0)));
        assert!(!shape.contains(Vector2::new(80.0, 185.0))); // past the knot tip
    }

    #[test]
    fn no_gap_between_body_and_knot() {
        let shape = BalloonShape::new(160.0, 192.0);
        let bottom = shape.ellipse_bottom();
        for step in 0..=40 {
            let y = bottom - 2.0 + step as f32 * 0.1;
            assert!(shape.contains(Vector2::new(80.0, y)), "gap at y = {y}");
        }
    }
}

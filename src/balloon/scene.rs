use std::f32::consts::TAU;

use rand::Rng;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::balloon::fit::cover_fit;
use crate::balloon::motion::{MotionRecord, Viewport};
use crate::balloon::shape::BalloonShape;
use crate::balloon::string::BalloonString;
use crate::config::Config;
use crate::constants::*;
use crate::error::{BalloonError, BalloonResult};

/// Everything random about a balloon, decided before any texture exists.
#[derive(Debug, Clone)]
pub struct BalloonPlan {
    pub motion: MotionRecord,
    pub image_index: usize,
    pub string: BalloonString,
}

/// A baked balloon: the source photo already cover-fitted, cropped and masked.
pub struct Balloon {
    pub texture: Texture2D,
    pub string: BalloonString,
    pub width: f32,
    pub height: f32,
}

impl Balloon {
    pub fn draw(&self, d: &mut impl RaylibDraw, position: Vector2) {
        let tex_width = self.texture.width() as f32;
        let tex_height = self.texture.height() as f32;

        d.draw_texture_pro(
            &self.texture,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(position.x, position.y, self.width, self.height),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        self.string.draw(d, position, self.width, self.height);
    }
}

pub fn plan_balloons<R: Rng + ?Sized>(
    config: &Config,
    viewport: Viewport,
    image_count: usize,
    rng: &mut R,
) -> Vec<BalloonPlan> {
    let image_count = image_count.max(1);

    (0..config.balloon_count)
        .map(|i| {
            let width = config.size.sample(rng);
            let height = width * HEIGHT_RATIO;

            let position = Vector2::new(
                rng.random::<f32>() * (viewport.width - width).max(0.0),
                rng.random::<f32>() * (viewport.height - height).max(0.0),
            );

            let mut signed_speed = || {
                let speed = config.speed.sample(rng);
                if rng.random_bool(0.5) { speed } else { -speed }
            };
            let velocity = Vector2::new(signed_speed(), signed_speed());

            let motion = MotionRecord {
                visual: i,
                position,
                width,
                height,
                velocity,
                drift: config.drift.sample(rng),
                phase: rng.random_range(0.0..TAU),
            };

            BalloonPlan {
                motion,
                image_index: i % image_count,
                string: BalloonString::new(i, rng),
            }
        })
        .collect()
}

/// Cover-fits `source` into the planned container, crops the overflow and
/// applies the balloon outline as alpha mask. The result is exactly
/// container-sized.
pub fn masked_image(plan: &BalloonPlan, source: &Image) -> Image {
    let width = plan.motion.width.round().max(1.0) as i32;
    let height = plan.motion.height.round().max(1.0) as i32;

    let mut image = match cover_fit(width as f32, height as f32, source.width() as f32, source.height() as f32) {
        Some(fit) => {
            let scaled_width = (fit.scaled_width.ceil() as i32).max(width);
            let scaled_height = (fit.scaled_height.ceil() as i32).max(height);
            let crop_x = (-fit.offset_x).round().clamp(0.0, (scaled_width - width) as f32);
            let crop_y = (-fit.offset_y).round().clamp(0.0, (scaled_height - height) as f32);

            let mut image = source.clone();
            image.resize(scaled_width, scaled_height);
            image.crop(Rectangle::new(crop_x, crop_y, width as f32, height as f32));
            image
        }
        None => {
            warn!(index = plan.motion.visual, "image has no usable dimensions, using a flat fill");
            Image::gen_image_color(width, height, plan.string.color)
        }
    };

    let shape = BalloonShape::new(width as f32, height as f32);
    image.alpha_mask(&shape.bake_mask(width, height));
    image
}

/// Bakes the masked photo into a GPU texture.
pub fn bake_balloon(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    plan: &BalloonPlan,
    source: &Image,
) -> BalloonResult<Balloon> {
    let image = masked_image(plan, source);
    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| BalloonError::texture(format!("balloon {}: {}", plan.motion.visual, e)))?;

    debug!(
        index = plan.motion.visual,
        width = image.width(),
        height = image.height(),
        image = plan.image_index,
        "baked balloon"
    );

    Ok(Balloon {
        texture,
        string: plan.string,
        width: plan.motion.width,
        height: plan.motion.height,
    })
}

/// Solid images standing in when no photo could be loaded.
pub fn placeholder_images(count: usize) -> Vec<Image> {
    (0..count.max(1))
        .map(|i| Image::gen_image_color(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, STRING_COLORS[i % STRING_COLORS.len()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn plan(count: usize, images: usize, seed: u64) -> Vec<BalloonPlan> {
        let config = Config::default().with_balloon_count(count);
        let mut rng = StdRng::seed_from_u64(seed);
        plan_balloons(&config, Viewport::new(1920.0, 1080.0), images, &mut rng)
    }

    #[test]
    fn plans_one_record_per_balloon_with_distinct_phases() {
        let plans = plan(6, 6, 1);
        assert_eq!(plans.len(), 6);
        for (i, p) in plans.iter().enumerate() {
            assert_eq!(p.motion.visual, i);
            assert!(p.motion.phase >= 0.0 && p.motion.phase < TAU);
            for other in &plans[i + 1..] {
                assert_ne!(p.motion.phase, other.motion.phase);
            }
        }
    }

    #[test]
    fn sizes_positions_and_speeds_follow_config() {
        let config = Config::default();
        for p in plan(50, 3, 9) {
            let m = &p.motion;
            assert!(config.size.contains(m.width));
            assert!((m.height - m.width * HEIGHT_RATIO).abs() < 1e-4);
            assert!(m.position.x >= 0.0 && m.position.x <= 1920.0 - m.width);
            assert!(m.position.y >= 0.0 && m.position.y <= 1080.0 - m.height);
            assert!(config.speed.contains(m.velocity.x.abs()));
            assert!(config.speed.contains(m.velocity.y.abs()));
            assert!(config.drift.contains(m.drift));
        }
    }

    #[test]
    fn images_and_palette_cycle_when_count_exceeds_them() {
        let plans = plan(8, 3, 4);
        let indices: Vec<usize> = plans.iter().map(|p| p.image_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0, 1]);
        assert_eq!(plans[0].string.color, plans[6].string.color);
        assert_eq!(plans[1].string.width, plans[7].string.width);
    }

    #[test]
    fn both_velocity_signs_occur() {
        let plans = plan(64, 1, 21);
        assert!(plans.iter().any(|p| p.motion.velocity.x < 0.0));
        assert!(plans.iter().any(|p| p.motion.velocity.x > 0.0));
    }

    fn sized_plan(width: f32, height: f32) -> BalloonPlan {
        let mut plan = plan(1, 1, 5).remove(0);
        plan.motion.width = width;
        plan.motion.height = height;
        plan
    }

    fn is_red(c: Color) -> bool {
        c.r > 200 && c.b < 50
    }

    fn is_blue(c: Color) -> bool {
        c.b > 200 && c.r < 50
    }

    #[test]
    fn masked_image_is_container_sized_with_transparent_corners() {
        let plan = sized_plan(200.0, 240.0);
        let source = Image::gen_image_color(640, 480, Color::GREEN);
        let image = masked_image(&plan, &source);

        assert_eq!((image.width(), image.height()), (200, 240));
        assert_eq!(image.get_color(0, 0).a, 0);
        assert_eq!(image.get_color(199, 0).a, 0);
        assert_eq!(image.get_color(0, 239).a, 0);
        assert_eq!(image.get_color(100, 105).a, 255); // ellipse centre
        assert_eq!(image.get_color(100, 220).a, 255); // knot, below the ellipse
        assert_eq!(image.get_color(100, 235).a, 0); // past the knot tip
    }

    #[test]
    fn wide_source_is_cropped_symmetrically() {
        let plan = sized_plan(200.0, 240.0);
        // Left half red, right half blue: scaled to 480x240 and cropped at x = 140,
        // so the split lands on the container's vertical centre line.
        let mut source = Image::gen_image_color(400, 200, Color::RED);
        source.draw_rectangle(200, 0, 200, 200, Color::BLUE);
        let image = masked_image(&plan, &source);

        assert_eq!((image.width(), image.height()), (200, 240));
        assert!(is_red(image.get_color(50, 100)));
        assert!(is_red(image.get_color(90, 100)));
        assert!(is_blue(image.get_color(110, 100)));
        assert!(is_blue(image.get_color(150, 100)));
    }

    #[test]
    fn same_seed_same_scene() {
        let a = plan(6, 6, 77);
        let b = plan(6, 6, 77);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.motion, y.motion);
        }
    }
}

use std::f32::consts::TAU;

use rand::Rng;
use raylib::ease;
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::constants::*;

const PARTICLE_COLORS: [Color; 6] = [
    Color::new(255, 82, 82, 255),
    Color::new(255, 235, 59, 255),
    Color::new(105, 240, 174, 255),
    Color::new(64, 196, 255, 255),
    Color::new(224, 64, 251, 255),
    Color::new(255, 255, 255, 255),
];

/// Where a burst came from. Scheduled bursts live on the fireworks overlay
/// and follow its fade, toggle bursts are drawn at full strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Scheduled,
    Toggle,
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub kind: BurstKind,
    pub origin: Vector2,
    /// Displacement reached at the end of the transition.
    pub target: Vector2,
    pub age: f32,
    pub lifetime: f32,
    pub color: Color,
}

impl Particle {
    fn progress(&self) -> f32 {
        (self.age / self.lifetime).clamp(0.0, 1.0)
    }

    /// Eased position between the burst origin and origin + target.
    pub fn position(&self) -> Vector2 {
        let t = ease::cubic_out(self.progress(), 0.0, 1.0, 1.0);
        self.origin + self.target * t
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Final alpha given the overlay opacity.
    pub fn draw_alpha(&self, layer_opacity: f32) -> f32 {
        let layer = match self.kind {
            BurstKind::Scheduled => layer_opacity,
            BurstKind::Toggle => 1.0,
        };
        (self.opacity() * layer).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Overlay holding the live particles of every burst.
#[derive(Debug, Default)]
pub struct BurstLayer {
    particles: Vec<Particle>,
}

pub struct ParticleEmitter {
    layer: Option<BurstLayer>,
}

impl ParticleEmitter {
    pub fn new() -> Self {
        Self { layer: Some(BurstLayer::default()) }
    }

    /// Emitter without an overlay to draw into: every burst is a no-op.
    pub fn detached() -> Self {
        Self { layer: None }
    }

    pub fn is_attached(&self) -> bool {
        self.layer.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.layer {
            Some(layer) => &layer.particles,
            None => &[],
        }
    }

    /// Spawns one radial burst at `origin` and returns how many particles were created.
    pub fn emit<R: Rng + ?Sized>(&mut self, origin: Vector2, kind: BurstKind, rng: &mut R) -> usize {
        let Some(layer) = self.layer.as_mut() else {
            warn!("burst requested at ({:.0}, {:.0}) but no burst layer is attached", origin.x, origin.y);
            return 0;
        };

        layer.particles.extend((0..BURST_PARTICLES).map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let distance = rng.random_range(BURST_MIN_DISTANCE..=BURST_MAX_DISTANCE);
            Particle {
                kind,
                origin,
                target: Vector2::new(angle.cos() * distance, angle.sin() * distance),
                age: 0.0,
                lifetime: PARTICLE_LIFETIME,
                color: PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())],
            }
        }));

        debug!(?kind, x = origin.x, y = origin.y, live = layer.particles.len(), "burst");
        BURST_PARTICLES
    }

    /// Ages every particle and removes the ones past their lifetime.
    pub fn update(&mut self, dt: f32) {
        if let Some(layer) = self.layer.as_mut() {
            for particle in layer.particles.iter_mut() {
                particle.age += dt;
            }
            layer.particles.retain(|p| !p.is_expired());
        }
    }

    pub fn draw(&self, d: &mut impl RaylibDraw, layer_opacity: f32) {
        for particle in self.particles() {
            let alpha = particle.draw_alpha(layer_opacity);
            if alpha <= 0.0 {
                continue;
            }
            let color = Color::new(particle.color.r, particle.color.g, particle.color.b, (255.0 * alpha) as u8);
            d.draw_circle_v(particle.position(), PARTICLE_RADIUS, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn emit_creates_exactly_fifty_particles() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut emitter = ParticleEmitter::new();
        assert_eq!(emitter.emit(Vector2::new(100.0, 100.0), BurstKind::Scheduled, &mut rng), 50);
        assert_eq!(emitter.particles().len(), 50);
        emitter.emit(Vector2::new(400.0, 300.0), BurstKind::Toggle, &mut rng);
        assert_eq!(emitter.particles().len(), 100);
    }

    #[test]
    fn targets_are_radial_within_distance_range() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut emitter = ParticleEmitter::new();
        emitter.emit(Vector2::new(0.0, 0.0), BurstKind::Scheduled, &mut rng);
        for p in emitter.particles() {
            let distance = p.target.length();
            assert!(distance >= BURST_MIN_DISTANCE - 1e-3 && distance <= BURST_MAX_DISTANCE + 1e-3);
            assert_eq!(p.lifetime, 1.0);
        }
    }

    #[test]
    fn particles_are_removed_after_lifetime() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut emitter = ParticleEmitter::new();
        emitter.emit(Vector2::new(10.0, 10.0), BurstKind::Scheduled, &mut rng);

        for _ in 0..59 {
            emitter.update(1.0 / 60.0);
        }
        assert_eq!(emitter.particles().len(), 50);

        emitter.update(0.02);
        assert!(emitter.particles().is_empty());
    }

    #[test]
    fn interpolation_runs_from_origin_to_target() {
        let p = Particle {
            kind: BurstKind::Scheduled,
            origin: Vector2::new(10.0, 20.0),
            target: Vector2::new(100.0, -50.0),
            age: 0.0,
            lifetime: 1.0,
            color: Color::WHITE,
        };
        assert_eq!(p.position(), Vector2::new(10.0, 20.0));
        assert_eq!(p.opacity(), 1.0);

        let done = Particle { age: 1.0, ..p };
        let end = done.position();
        assert!((end.x - 110.0).abs() < 1e-3 && (end.y + 30.0).abs() < 1e-3);
        assert_eq!(done.opacity(), 0.0);

        let halfway = Particle { age: 0.5, ..p };
        assert!(halfway.position().x > 60.0, "ease-out moves past the midpoint early");
    }

    #[test]
    fn toggle_bursts_ignore_overlay_fade() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut emitter = ParticleEmitter::new();
        emitter.emit(Vector2::new(50.0, 50.0), BurstKind::Toggle, &mut rng);
        emitter.emit(Vector2::new(90.0, 90.0), BurstKind::Scheduled, &mut rng);

        // Overlay still fully transparent, as right after it starts revealing
        let (toggle, scheduled): (Vec<&Particle>, Vec<&Particle>) =
            emitter.particles().iter().partition(|p| p.kind == BurstKind::Toggle);
        assert_eq!(toggle.len(), 50);
        assert!(toggle.iter().all(|p| p.draw_alpha(0.0) == 1.0));
        assert!(scheduled.iter().all(|p| p.draw_alpha(0.0) == 0.0));
        assert!(scheduled.iter().all(|p| p.draw_alpha(0.5) == 0.5));
    }

    #[test]
    fn detached_emitter_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut emitter = ParticleEmitter::detached();
        assert_eq!(emitter.emit(Vector2::new(5.0, 5.0), BurstKind::Toggle, &mut rng), 0);
        emitter.update(0.5);
        assert!(emitter.particles().is_empty());
        assert!(!emitter.is_attached());
    }
}

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use raylib::prelude::*;
use tracing::{debug, info, warn};

use crate::balloon::motion::{MotionRecord, Viewport, step_all};
use crate::balloon::scene::{Balloon, BalloonPlan, bake_balloon, placeholder_images, plan_balloons};
use crate::config::Config;
use crate::constants::*;
use crate::engine::{Engine, StopHandle};
use crate::error::BalloonResult;
use crate::fireworks::particle::{BurstKind, ParticleEmitter};
use crate::fireworks::scheduler::{BurstScheduler, random_origin};
use crate::panel::PanelToggle;
use crate::texture_loader::load_images;

#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub fireworks: bool,
    pub panel: bool,
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { fireworks: true, panel: true, seed: None }
    }
}

/// The scene session: owns the balloons, their motion records, the burst
/// emitter and the panel toggle.
pub struct BalloonEngine {
    config: Config,
    viewport: Viewport,
    rng: StdRng,

    balloons: Vec<Balloon>,
    motions: Vec<MotionRecord>,

    emitter: ParticleEmitter,
    scheduler: BurstScheduler,
    panel: Option<PanelToggle>,

    stop: StopHandle,
}

impl BalloonEngine {
    pub fn new(config: Config, viewport: Viewport, options: EngineOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            viewport,
            rng,
            balloons: Vec::new(),
            motions: Vec::new(),
            emitter: if options.fireworks { ParticleEmitter::new() } else { ParticleEmitter::detached() },
            scheduler: BurstScheduler::new(),
            panel: options.panel.then(|| PanelToggle::new(viewport)),
            stop: StopHandle::default(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    #[cfg(test)]
    pub fn motions(&self) -> &[MotionRecord] {
        &self.motions
    }

    #[cfg(test)]
    pub fn emitter(&self) -> &ParticleEmitter {
        &self.emitter
    }

    pub fn plan(&mut self, image_count: usize) -> Vec<BalloonPlan> {
        plan_balloons(&self.config, self.viewport, image_count, &mut self.rng)
    }

    fn fireworks_displayed(&self) -> bool {
        self.panel.as_ref().is_none_or(|panel| panel.fireworks.is_displayed())
    }

    /// Opacity of the fireworks overlay, 0 while it is out of the layout.
    fn fireworks_opacity(&self) -> f32 {
        match &self.panel {
            Some(panel) if panel.fireworks.is_displayed() => panel.fireworks.opacity(),
            Some(_) => 0.0,
            None => 1.0,
        }
    }

    /// Toggle activation: collapsing the panel bursts at the button.
    /// A missing panel ignores the request.
    pub fn activate_toggle(&mut self) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        if let Some(origin) = panel.toggle() {
            self.emitter.emit(origin, BurstKind::Toggle, &mut self.rng);
        }
    }

    /// Everything that happens in one frame apart from input and drawing.
    pub fn advance(&mut self, dt: f32) {
        step_all(&mut self.motions, self.viewport);

        if self.scheduler.tick(dt, &mut self.rng) && self.fireworks_displayed() {
            let origin = random_origin(self.viewport, &mut self.rng);
            self.emitter.emit(origin, BurstKind::Scheduled, &mut self.rng);
        }
        self.emitter.update(dt);

        if let Some(panel) = self.panel.as_mut() {
            panel.update(dt);
        }
    }

    fn handle_input(&mut self, rl: &RaylibHandle) {
        let Some(panel) = self.panel.as_ref() else {
            return;
        };

        let mut activated = rl.is_key_pressed(KeyboardKey::KEY_SPACE);
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            // The framebuffer is letterboxed into the window
            let point = self.viewport.screen_to_viewport(
                rl.get_mouse_position(),
                rl.get_screen_width() as f32,
                rl.get_screen_height() as f32,
            );
            activated |= panel.hit(point);
        }

        if activated {
            self.activate_toggle();
        }
    }

    fn draw(&self, d: &mut impl RaylibDraw) {
        d.clear_background(BACKGROUND);

        for motion in &self.motions {
            if let Some(balloon) = self.balloons.get(motion.visual) {
                balloon.draw(d, motion.position);
            }
        }

        self.emitter.draw(d, self.fireworks_opacity());

        if let Some(panel) = &self.panel {
            panel.draw(d);
        }
    }
}

impl Engine for BalloonEngine {
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, paths: Vec<PathBuf>) -> BalloonResult<()> {
        let mut images = load_images(&paths);
        if images.is_empty() {
            warn!("no usable images among {} path(s), using placeholders", paths.len());
            images = placeholder_images(self.config.balloon_count);
        }

        let plans = self.plan(images.len());
        for plan in &plans {
            let balloon = bake_balloon(rl, thread, plan, &images[plan.image_index])?;
            self.balloons.push(balloon);
        }
        self.motions = plans.into_iter().map(|plan| plan.motion).collect();

        info!(
            balloons = self.motions.len(),
            images = images.len(),
            fireworks = self.emitter.is_attached(),
            panel = self.panel.is_some(),
            "scene ready"
        );
        Ok(())
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool {
        if self.stop.is_stopped() {
            debug!("engine stopped");
            return false;
        }

        self.handle_input(rl);
        self.advance(dt);

        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            self.draw(&mut d);
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(options: EngineOptions) -> BalloonEngine {
        let mut engine = BalloonEngine::new(Config::default(), Viewport::new(1280.0, 720.0), options);
        let plans = engine.plan(3);
        engine.motions = plans.into_iter().map(|p| p.motion).collect();
        engine
    }

    fn seeded() -> EngineOptions {
        EngineOptions { seed: Some(99), ..EngineOptions::default() }
    }

    #[test]
    fn advance_keeps_every_balloon_inside_the_viewport() {
        let mut engine = engine(seeded());
        assert_eq!(engine.motions().len(), 6);
        for _ in 0..3000 {
            engine.advance(1.0 / 60.0);
        }
        for m in engine.motions() {
            assert!(m.position.x >= 0.0 && m.position.x <= 1280.0 - m.width);
            assert!(m.position.y >= 0.0 && m.position.y <= 720.0 - m.height);
        }
    }

    #[test]
    fn scheduler_emits_after_initial_delay() {
        let mut engine = engine(seeded());
        for _ in 0..119 {
            engine.advance(1.0 / 60.0);
        }
        assert!(engine.emitter().particles().is_empty());
        engine.advance(0.02);
        assert_eq!(engine.emitter().particles().len(), BURST_PARTICLES);
    }

    #[test]
    fn collapsing_panel_bursts_once() {
        let mut engine = engine(seeded());
        engine.activate_toggle(); // expand
        assert!(engine.emitter().particles().is_empty());
        engine.activate_toggle(); // collapse
        assert_eq!(engine.emitter().particles().len(), BURST_PARTICLES);
    }

    #[test]
    fn collapse_burst_is_visible_while_overlay_reveals() {
        let mut engine = engine(seeded());
        engine.activate_toggle();
        for _ in 0..60 {
            engine.advance(1.0 / 60.0);
        }
        engine.activate_toggle();
        assert_eq!(engine.fireworks_opacity(), 0.0);

        engine.advance(1.0 / 60.0);
        let layer = engine.fireworks_opacity();
        assert!(layer < 0.1);
        for p in engine.emitter().particles() {
            assert!(p.draw_alpha(layer) > 0.9);
        }
    }

    #[test]
    fn expanded_panel_suppresses_scheduled_bursts() {
        let mut engine = engine(seeded());
        engine.activate_toggle();
        for _ in 0..600 {
            engine.advance(1.0 / 60.0);
        }
        assert!(engine.emitter().particles().is_empty());
    }

    #[test]
    fn missing_features_are_skipped() {
        let mut engine = engine(EngineOptions { fireworks: false, panel: false, seed: Some(1) });
        engine.activate_toggle();
        for _ in 0..300 {
            engine.advance(1.0 / 60.0);
        }
        assert!(engine.emitter().particles().is_empty());
    }

    #[test]
    fn stop_handle_is_shared_with_the_engine() {
        let engine = engine(seeded());
        engine.stop_handle().stop();
        assert!(engine.stop.is_stopped());
    }
}

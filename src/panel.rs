use raylib::prelude::*;
use tracing::debug;

use crate::balloon::motion::Viewport;
use crate::constants::*;
use crate::state::LayerFade;

const PANEL_LINES: [&str; 3] = [
    "Balloons drift around the screen.",
    "Click the button or press SPACE to toggle this panel.",
    "Collapsing it sets off a firework.",
];

/// Toggle button with a collapsible info panel. Expanding the panel fades the
/// fireworks overlay out, collapsing it fades the overlay back in and
/// celebrates with a burst at the button.
pub struct PanelToggle {
    pub button: Rectangle,
    pub expanded: bool,
    pub panel: LayerFade,
    pub fireworks: LayerFade,
}

impl PanelToggle {
    /// Button in the bottom-right corner, panel collapsed.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            button: Rectangle::new(
                viewport.width - TOGGLE_MARGIN - TOGGLE_SIZE,
                viewport.height - TOGGLE_MARGIN - TOGGLE_SIZE,
                TOGGLE_SIZE,
                TOGGLE_SIZE,
            ),
            expanded: false,
            panel: LayerFade::new(false),
            fireworks: LayerFade::new(true),
        }
    }

    pub fn button_center(&self) -> Vector2 {
        Vector2::new(self.button.x + self.button.width / 2.0, self.button.y + self.button.height / 2.0)
    }

    pub fn hit(&self, point: Vector2) -> bool {
        self.button.check_collision_point_rec(point)
    }

    /// Flips the panel. Returns the burst origin when the panel was collapsed.
    pub fn toggle(&mut self) -> Option<Vector2> {
        self.expanded = !self.expanded;
        debug!(expanded = self.expanded, "panel toggled");

        if self.expanded {
            self.panel.show();
            self.fireworks.hide();
            None
        } else {
            self.panel.hide();
            self.fireworks.show();
            Some(self.button_center())
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.panel.update(dt);
        self.fireworks.update(dt);
    }

    fn panel_rect(&self) -> Rectangle {
        Rectangle::new(
            self.button.x + self.button.width - PANEL_WIDTH,
            self.button.y - PANEL_HEIGHT - TOGGLE_MARGIN / 2.0,
            PANEL_WIDTH,
            PANEL_HEIGHT,
        )
    }

    pub fn draw(&self, d: &mut impl RaylibDraw) {
        d.draw_rectangle_rounded(self.button, 0.3, 8, with_alpha(Color::DARKBLUE, 0.85));
        let label = if self.expanded { "x" } else { "?" };
        let center = self.button_center();
        d.draw_text(label, center.x as i32 - 8, center.y as i32 - 16, 32, Color::WHITE);

        if self.panel.is_displayed() {
            let opacity = self.panel.opacity();
            let rect = self.panel_rect();
            d.draw_rectangle_rounded(rect, 0.1, 8, with_alpha(Color::BLACK, 0.7 * opacity));
            for (i, line) in PANEL_LINES.iter().enumerate() {
                d.draw_text(
                    line,
                    rect.x as i32 + 24,
                    rect.y as i32 + 28 + i as i32 * 44,
                    24,
                    with_alpha(Color::WHITE, opacity),
                );
            }
        }
    }
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::color::Srgba;
use bevy::prelude::*;
use rand::Rng;

use crate::bubbles::{Bubble, BubbleId};
use crate::particles::{ParticleSplat, animate_splat, render_splat, splat};
use crate::render::{OUTLINE_COLOR, OUTLINE_WIDTH, RenderSurface, SHINE_COLOR, UNPOPPED_COLOR};

/// Offset of the outer shine arc from the bubble centre
const SHINE_OFFSET: f32 = 3.0;
/// Shine arcs as a fraction of the bubble radius
const SHINE_SCALE: f32 = 0.8;

/// Draws one bubble per frame.
///
/// An unpopped bubble is painted once and then left alone, the surface is never cleared
/// between frames. Once the bubble pops, the renderer bursts it into a splat on the next
/// frame and animates that splat until it runs dry.
#[derive(Debug, Clone)]
pub struct BubbleRenderer {
    bubble: BubbleId,
    splat: Option<ParticleSplat>,
    drawn_unpopped_once: bool,
}

impl BubbleRenderer {
    pub const fn new(bubble: BubbleId) -> Self {
        Self {
            bubble,
            splat: None,
            drawn_unpopped_once: false,
        }
    }

    pub const fn bubble_id(&self) -> BubbleId {
        self.bubble
    }

    /// The splat of a popped bubble, `None` until the first popped frame was rendered
    pub const fn splat(&self) -> Option<&ParticleSplat> {
        self.splat.as_ref()
    }

    pub const fn has_drawn_unpopped(&self) -> bool {
        self.drawn_unpopped_once
    }

    /// Render one frame of `bubble`, `delta` being the milliseconds since the last frame.
    pub fn render(
        &mut self,
        bubble: &Bubble,
        surface: &mut impl RenderSurface,
        delta: f32,
        rng: &mut impl Rng,
    ) {
        let Some(popper) = bubble.was_popped_by() else {
            if !self.drawn_unpopped_once {
                draw_circle(surface, bubble.center(), bubble.radius(), UNPOPPED_COLOR);
                draw_shine(surface, bubble);
                self.drawn_unpopped_once = true;
            }
            return;
        };

        let splat = self.splat.get_or_insert_with(|| {
            debug!("Bubble {:?} popped by {}, bursting", self.bubble, popper);
            draw_circle(surface, bubble.center(), bubble.radius(), UNPOPPED_COLOR);
            splat(bubble.center(), rng)
        });

        let died = animate_splat(splat, delta, rng);
        if died > 0 && splat.is_empty() {
            debug!("Splat of bubble {:?} has faded", self.bubble);
        }
        render_splat(surface, splat, popper.color(), rng);
    }
}

/// Filled circle with the bubble outline
fn draw_circle(surface: &mut impl RenderSurface, center: Vec2, radius: f32, color: Srgba) {
    surface.begin_path();
    surface.arc(center.x, center.y, radius, 0.0, TAU, false);
    surface.set_fill_color(color);
    surface.fill();
    surface.set_stroke_style(OUTLINE_COLOR, OUTLINE_WIDTH);
    surface.stroke();
}

/// Crescent highlight in the upper left of an unpopped bubble
fn draw_shine(surface: &mut impl RenderSurface, bubble: &Bubble) {
    let center = bubble.center();
    let radius = bubble.radius() * SHINE_SCALE;

    surface.begin_path();
    surface.arc(
        center.x + SHINE_OFFSET,
        center.y + SHINE_OFFSET,
        radius,
        -FRAC_PI_2,
        PI,
        true,
    );
    surface.arc(center.x, center.y, radius, PI, -FRAC_PI_2, false);
    surface.set_fill_color(SHINE_COLOR);
    surface.fill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubbles::PlayerId;
    use crate::particles::SPLAT_PARTICLES;
    use crate::render::testing::{DrawCall, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (Bubble, BubbleRenderer, RecordingSurface, StdRng) {
        (
            Bubble::new(Vec2::new(25.0, 25.0), 25.0),
            BubbleRenderer::new(BubbleId(0)),
            RecordingSurface::default(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn unpopped_bubble_is_drawn_once() {
        let (bubble, mut renderer, mut surface, mut rng) = setup();

        renderer.render(&bubble, &mut surface, 16.0, &mut rng);
        let first_frame = surface.calls.len();
        assert!(first_frame > 0);
        // Body and shine
        assert_eq!(surface.fills(), 2);
        assert_eq!(surface.fill_colors(), vec![UNPOPPED_COLOR, SHINE_COLOR]);

        for _ in 0..10 {
            renderer.render(&bubble, &mut surface, 16.0, &mut rng);
        }
        assert_eq!(surface.calls.len(), first_frame);
        assert!(renderer.has_drawn_unpopped());
        assert!(renderer.splat().is_none());
    }

    #[test]
    fn shine_uses_two_scaled_arcs() {
        let (bubble, mut renderer, mut surface, mut rng) = setup();
        renderer.render(&bubble, &mut surface, 16.0, &mut rng);

        let arcs: Vec<_> = surface
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Arc { .. }))
            .cloned()
            .collect();
        assert_eq!(
            arcs,
            vec![
                DrawCall::Arc { x: 25.0, y: 25.0, radius: 25.0 },
                DrawCall::Arc { x: 28.0, y: 28.0, radius: 20.0 },
                DrawCall::Arc { x: 25.0, y: 25.0, radius: 20.0 },
            ]
        );
    }

    #[test]
    fn first_popped_frame_bursts_over_base_circle() {
        let (mut bubble, mut renderer, mut surface, mut rng) = setup();
        bubble.pop(PlayerId::Green);

        renderer.render(&bubble, &mut surface, 0.0, &mut rng);

        assert_eq!(renderer.splat().map(ParticleSplat::len), Some(SPLAT_PARTICLES));
        let colors = surface.fill_colors();
        assert_eq!(colors.first(), Some(&UNPOPPED_COLOR));
        assert_eq!(colors.last(), Some(&PlayerId::Green.color()));
    }

    #[test]
    fn splat_is_never_recreated() {
        let (mut bubble, mut renderer, mut surface, mut rng) = setup();
        bubble.pop(PlayerId::Red);

        for _ in 0..40 {
            renderer.render(&bubble, &mut surface, 16.0, &mut rng);
        }
        assert_eq!(renderer.splat().map(ParticleSplat::len), Some(0));

        surface.clear();
        renderer.render(&bubble, &mut surface, 16.0, &mut rng);
        assert_eq!(renderer.splat().map(ParticleSplat::len), Some(0));
        // Only the fill colour is set, nothing is drawn
        assert_eq!(surface.fills(), 0);
    }
}

use std::f32::consts::TAU;

use bevy::color::Srgba;
use rand::Rng;

use crate::particles::manager::ParticleSplat;
use crate::particles::types::FLICKER_CHANCE;
use crate::render::RenderSurface;

/// Draw the surviving particles of a splat as filled circles.
///
/// Each particle is independently left out of the frame with probability
/// [`FLICKER_CHANCE`], which makes the splat sparkle. Returns the number drawn.
pub fn render_splat(
    surface: &mut impl RenderSurface,
    splat: &ParticleSplat,
    color: Srgba,
    rng: &mut impl Rng,
) -> usize {
    surface.set_fill_color(color);

    let mut drawn = 0;
    for p in splat.particles() {
        if rng.gen_bool(FLICKER_CHANCE) {
            continue;
        }
        surface.begin_path();
        surface.arc(p.x, p.y, p.size, 0.0, TAU, false);
        surface.fill();
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::actions::splat;
    use crate::render::testing::RecordingSurface;
    use bevy::math::Vec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn flicker_skips_some_particles() {
        let mut rng = StdRng::seed_from_u64(99);
        let splat = splat(Vec2::new(5.0, 5.0), &mut rng);
        let mut surface = RecordingSurface::default();

        let mut total = 0;
        for _ in 0..20 {
            let drawn = render_splat(&mut surface, &splat, Srgba::RED, &mut rng);
            assert!(drawn <= splat.len());
            total += drawn;
        }

        assert_eq!(surface.fills(), total);
        // Roughly 90% of 1400 draws, far from both extremes
        assert!(total > 1100 && total < 1400);
        assert!(surface.fill_colors().iter().all(|c| *c == Srgba::RED));
    }

    #[test]
    fn flicker_is_reproducible_with_the_same_seed() {
        let origin = Vec2::new(1.0, 1.0);
        let counts = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let splat = splat(origin, &mut rng);
            let mut surface = RecordingSurface::default();
            (0..5)
                .map(|_| render_splat(&mut surface, &splat, Srgba::RED, &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(counts(5), counts(5));
    }
}

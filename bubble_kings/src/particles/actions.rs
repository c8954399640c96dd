#![allow(clippy::cast_precision_loss)]

use bevy::prelude::*;
use rand::Rng;

use crate::particles::manager::ParticleSplat;
use crate::particles::types::{
    PARTICLE_JITTER, PARTICLE_LIFE, PARTICLE_SIZE, PARTICLE_SPEED, Particle, SIZE_DECAY_MS,
    SPLAT_ANGLE_STEP, SPLAT_PARTICLES,
};

/// Burst a bubble centred on `origin` into a fresh splat.
///
/// Particles are created counting down from the last index, particle `i` travelling at
/// `i * SPLAT_ANGLE_STEP` radians. The angle is not reduced into one turn.
pub fn splat(origin: Vec2, rng: &mut impl Rng) -> ParticleSplat {
    let particles = (0..SPLAT_PARTICLES)
        .rev()
        .map(|i| {
            let size = rng.gen_range(PARTICLE_SIZE);
            let life = rng.gen_range(PARTICLE_LIFE);
            Particle::new(origin, i as f32 * SPLAT_ANGLE_STEP, size, life)
        })
        .collect();

    ParticleSplat::new(particles)
}

/// Advance every particle by one frame of `delta` milliseconds and drop the dead ones.
/// Returns how many particles died this frame.
pub fn animate_splat(splat: &mut ParticleSplat, delta: f32, rng: &mut impl Rng) -> usize {
    let particles = splat.particles_mut();
    let before = particles.len();

    // Walk backwards so removing a particle does not skip its neighbour
    for i in (0..particles.len()).rev() {
        let p = &mut particles[i];
        p.x += p.angle.cos() * PARTICLE_SPEED + jitter(rng);
        p.y += p.angle.sin() * PARTICLE_SPEED + jitter(rng);
        p.life -= delta;
        p.size -= delta / SIZE_DECAY_MS;

        if p.size <= 0.0 {
            p.life = 0.0;
        }

        if p.is_dead() {
            particles.remove(i);
        }
    }

    before - particles.len()
}

/// Symmetric random offset in (-PARTICLE_JITTER, PARTICLE_JITTER)
fn jitter(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..1.0) * PARTICLE_JITTER - rng.gen_range(0.0..1.0) * PARTICLE_JITTER
}

use std::ops::Range;

use bevy::prelude::*;

/// Number of particles a popped bubble bursts into
pub const SPLAT_PARTICLES: usize = 70;
/// Angle step between consecutive particles, in radians
pub const SPLAT_ANGLE_STEP: f32 = 5.0;
/// Distance a particle travels along its angle every frame
pub const PARTICLE_SPEED: f32 = 4.0;
/// Maximum random offset added (and subtracted) per axis per frame
pub const PARTICLE_JITTER: f32 = 2.0;
/// Initial particle radius range
pub const PARTICLE_SIZE: Range<f32> = 5.0..8.0;
/// Initial life budget range, in milliseconds
pub const PARTICLE_LIFE: Range<f32> = 50.0..125.0;
/// Milliseconds of frame time it takes a particle to shrink by one unit
pub const SIZE_DECAY_MS: f32 = 50.0;
/// Chance that a particle is skipped when drawing a frame
pub const FLICKER_CHANCE: f64 = 0.1;

/// A single particle of a splat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Direction of travel in radians
    pub angle: f32,
    pub size: f32,
    /// Remaining life in milliseconds
    pub life: f32,
}

impl Particle {
    pub const fn new(origin: Vec2, angle: f32, size: f32, life: f32) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            angle,
            size,
            life,
        }
    }

    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

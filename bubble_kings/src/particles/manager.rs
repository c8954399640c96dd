use crate::particles::types::Particle;

/// The particles a single popped bubble burst into.
///
/// Created once on the first popped frame and only ever shrinks afterwards. An empty splat
/// stays around and simply draws nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSplat {
    particles: Vec<Particle>,
}

impl ParticleSplat {
    pub const fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surviving particles in creation order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}

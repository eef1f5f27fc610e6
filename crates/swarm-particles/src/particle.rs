//! Particle types: CPU simulation state, the pool, and GPU instance data

use crate::rand::RandomSource;
use bytemuck::{Pod, Zeroable};
use swarm_core::{Result, SwarmError, Vec3};

/// Upper bound (exclusive) for per-particle phase seeds
pub const SEED_RANGE: f32 = 1000.0;

/// CPU-side particle state (not sent to GPU)
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Depth-oscillation phase offset, fixed at spawn
    seed: f32,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, seed: f32) -> Self {
        Self {
            position,
            velocity,
            seed,
        }
    }

    /// Draw a particle inside the cube `[-radius, radius]^3`, at rest.
    pub fn spawn(rng: &mut impl RandomSource, radius: f32) -> Self {
        let x = rng.range(-radius, radius);
        let y = rng.range(-radius, radius);
        let z = rng.range(-radius, radius);
        let seed = rng.range(0.0, SEED_RANGE);
        Self::new(Vec3::new(x, y, z), Vec3::ZERO, seed)
    }

    pub fn seed(&self) -> f32 {
        self.seed
    }
}

/// GPU instance data, laid out to match the WGSL `ParticleInstance` struct.
/// 16 bytes: xyz = position, w = uniform size.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos_size: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle, size: f32) -> Self {
        Self {
            pos_size: [p.position.x, p.position.y, p.position.z, size],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.pos_size[0], self.pos_size[1], self.pos_size[2])
    }

    pub fn size(&self) -> f32 {
        self.pos_size[3]
    }
}

/// Fixed-size particle population, replaced wholesale on reset.
#[derive(Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    generation: u64,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the population with `count` freshly spawned particles.
    ///
    /// The new sequence is built in separate storage first; if the allocation
    /// fails the current particles are left untouched.
    pub fn reset(
        &mut self,
        count: usize,
        spawn_radius: f32,
        rng: &mut impl RandomSource,
    ) -> Result<()> {
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(count)
            .map_err(|_| SwarmError::AllocationFailed { requested: count })?;
        fresh.extend((0..count).map(|_| Particle::spawn(&mut *rng, spawn_radius)));

        self.particles = fresh;
        self.generation += 1;
        tracing::debug!(
            count,
            spawn_radius,
            generation = self.generation,
            "particle pool rebuilt"
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of rebuilds so far; 0 means never populated
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

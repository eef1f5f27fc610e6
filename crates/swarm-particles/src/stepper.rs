//! Advances the particle pool once per frame and packs the transform buffer

use crate::map::quadratic_map;
use crate::params::{PoolKey, SimParams};
use crate::particle::{Particle, ParticleInstance, ParticlePool};
use crate::rand::RandomSource;
use swarm_core::{Result, Vec3};

/// Largest simulated delta consumed by one step
pub const MAX_STEP_DELTA: f32 = 0.033;

/// Per-step velocity decay. Applied once per step regardless of `dt`,
/// so the effective damping rate depends on frame rate.
pub const VELOCITY_DAMPING: f32 = 0.96;

const DEPTH_FREQUENCY: f32 = 0.5;
const DEPTH_AMPLITUDE: f32 = 0.3;

/// Clamp a host delta into `[0, MAX_STEP_DELTA]`; non-finite deltas become 0
pub fn clamp_delta(elapsed: f32) -> f32 {
    if elapsed.is_finite() {
        elapsed.clamp(0.0, MAX_STEP_DELTA)
    } else {
        0.0
    }
}

/// Apply one step of the map + attraction + damping rule to a single particle.
///
/// Pure in its inputs: the same particle, time, delta, and parameters always
/// produce the same bits.
pub fn update_particle(p: &mut Particle, t: f32, dt: f32, params: &SimParams) {
    let scale = params.scale;
    let (x, y) = quadratic_map(
        p.position.x / scale,
        p.position.y / scale,
        params.c_re,
        params.c_im,
    );
    p.position.x = x * scale;
    p.position.y = y * scale;
    // Depth is cosmetic: recomputed from time and seed, never integrated from the map
    p.position.z = (t * DEPTH_FREQUENCY + p.seed()).sin() * scale * DEPTH_AMPLITUDE;

    p.velocity += -p.position * params.attraction * dt;
    p.position += p.velocity * dt * params.speed;
    p.velocity *= VELOCITY_DAMPING;
}

/// Update every particle in the slice. Particles do not interact, so order is irrelevant.
pub fn step_particles(particles: &mut [Particle], t: f32, dt: f32, params: &SimParams) {
    for p in particles {
        update_particle(p, t, dt, params);
    }
}

/// Summary of the current population, for hosts and diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct PoolStats {
    pub count: usize,
    pub generation: u64,
    pub clock: f32,
    /// Axis-aligned bounds of all positions; None for an empty pool
    pub bounds: Option<(Vec3, Vec3)>,
    pub mean_speed: f32,
}

/// Owns the pool, the simulation clock, and the outgoing transform buffer.
#[derive(Default)]
pub struct Stepper {
    pool: ParticlePool,
    /// Accumulated simulated seconds; survives pool rebuilds
    clock: f32,
    /// Key the current pool was built from; None before the first build
    built: Option<PoolKey>,
    /// Pre-allocated instance buffer, one entry per particle in pool order
    instance_buffer: Vec<ParticleInstance>,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the pool if count, spawn radius, or reset token changed since
    /// the last build. Returns whether a rebuild happened.
    ///
    /// On failure the previous pool and key are kept, so the rebuild is
    /// attempted again on the next call.
    pub fn sync(&mut self, params: &SimParams, rng: &mut impl RandomSource) -> Result<bool> {
        let key = params.pool_key();
        if self.built == Some(key) {
            return Ok(false);
        }

        self.pool.reset(key.count, key.spawn_radius(), rng)?;
        self.built = Some(key);
        self.pack_instances(params);
        Ok(true)
    }

    /// Advance the simulation by one frame. A paused call changes nothing.
    /// Returns whether a step was taken.
    pub fn step(&mut self, elapsed: f32, params: &SimParams) -> bool {
        if params.paused {
            return false;
        }

        if !elapsed.is_finite() || elapsed < 0.0 {
            tracing::warn!(elapsed, "ignoring invalid frame delta");
        }
        let dt = clamp_delta(elapsed);
        self.clock += dt;

        step_particles(self.pool.particles_mut(), self.clock, dt, params);
        self.pack_instances(params);
        true
    }

    /// Overwrite the instance buffer from the current particle positions.
    pub fn pack_instances(&mut self, params: &SimParams) {
        self.instance_buffer.clear();
        self.instance_buffer.extend(
            self.pool
                .particles()
                .iter()
                .map(|p| ParticleInstance::from_particle(p, params.point_size)),
        );
    }

    /// Get the packed instance data
    pub fn instance_data(&self) -> &[ParticleInstance] {
        &self.instance_buffer
    }

    /// Instance data as raw bytes for buffer upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instance_buffer)
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn stats(&self) -> PoolStats {
        let particles = self.pool.particles();
        let bounds = particles.split_first().map(|(first, rest)| {
            rest.iter()
                .fold((first.position, first.position), |(lo, hi), p| {
                    (lo.min(&p.position), hi.max(&p.position))
                })
        });
        let mean_speed = if particles.is_empty() {
            0.0
        } else {
            particles.iter().map(|p| p.velocity.length()).sum::<f32>() / particles.len() as f32
        };

        PoolStats {
            count: particles.len(),
            generation: self.pool.generation(),
            clock: self.clock,
            bounds,
            mean_speed,
        }
    }
}

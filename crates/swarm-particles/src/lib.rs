//! Swarm Particles - Julia-map particle simulation
//!
//! Provides the particle engine driven once per frame:
//! - Fixed-size pool, rebuilt only when count, spawn radius, or reset token change
//! - Per-particle quadratic map + attraction + damping update
//! - Clamped simulation clock that freezes while paused
//! - GPU instance packing (position + uniform size) in pool order

pub mod map;
pub mod params;
pub mod particle;
pub mod rand;
pub mod stepper;

use swarm_core::Result;
use swarm_runtime::{FrameContext, RuntimeEvent, RuntimeSystem};

pub use map::{find_preset, quadratic_map, JuliaPreset, PRESETS};
pub use params::{parse_real, PoolKey, SimParams, MAX_PARTICLES};
pub use particle::{Particle, ParticleInstance, ParticlePool};
pub use rand::{ParticleRng, RandomSource};
pub use stepper::{PoolStats, Stepper, MAX_STEP_DELTA, VELOCITY_DAMPING};

/// The particle system, driven by the frame loop through `RuntimeSystem`.
pub struct ParticleSystem {
    pub stepper: Stepper,
    rng: ParticleRng,
    /// Parameter version last checked by `validate`
    validated_version: Option<u64>,
    /// Pause state seen on the previous frame
    was_paused: Option<bool>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_seed(0xDEAD_BEEF)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            stepper: Stepper::new(),
            rng: ParticleRng::new(seed),
            validated_version: None,
            was_paused: None,
        }
    }

    fn sync(&mut self, ctx: &mut FrameContext<'_, SimParams>) -> Result<()> {
        if self.validated_version != Some(ctx.params_version) {
            ctx.params.validate()?;
            self.validated_version = Some(ctx.params_version);
        }

        if self.stepper.sync(ctx.params, &mut self.rng)? {
            let pool = self.stepper.pool();
            ctx.events.push(RuntimeEvent::PoolRebuilt {
                count: pool.len(),
                generation: pool.generation(),
            });
        }

        let paused = ctx.params.paused;
        match self.was_paused {
            Some(false) if paused => ctx.events.push(RuntimeEvent::Paused),
            Some(true) if !paused => ctx.events.push(RuntimeEvent::Resumed),
            _ => {}
        }
        self.was_paused = Some(paused);
        Ok(())
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem<SimParams> for ParticleSystem {
    fn initialize(&mut self, ctx: &mut FrameContext<'_, SimParams>) -> Result<()> {
        self.sync(ctx)?;
        tracing::info!(
            particles = self.stepper.pool().len(),
            "particle pool ready"
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameContext<'_, SimParams>, dt: f64) -> Result<()> {
        self.sync(ctx)?;
        self.stepper.step(dt as f32, ctx.params);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

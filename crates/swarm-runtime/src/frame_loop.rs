//! Host-side frame driver
//!
//! Owns the parameter store, the wall clock, and the event bus, and ticks a
//! single system once per frame with the latest snapshot.

use crate::clock::FrameClock;
use crate::event::{EventBus, RuntimeEvent};
use crate::store::ParamStore;
use crate::system::{FrameContext, RuntimeSystem};
use swarm_core::{Result, SwarmError};

pub struct FrameLoop<P, S> {
    store: ParamStore<P>,
    clock: FrameClock,
    events: EventBus,
    system: S,
    seen_version: u64,
    initialized: bool,
}

impl<P, S: RuntimeSystem<P>> FrameLoop<P, S> {
    pub fn new(params: P, system: S) -> Self {
        Self {
            store: ParamStore::new(params),
            clock: FrameClock::new(),
            events: EventBus::new(),
            system,
            seen_version: 0,
            initialized: false,
        }
    }

    /// Publish a new parameter snapshot; seen by the next frame
    pub fn publish(&mut self, params: P) -> u64 {
        self.store.publish(params)
    }

    pub fn store_mut(&mut self) -> &mut ParamStore<P> {
        &mut self.store
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// Run the system's one-time setup. Called implicitly by the first frame.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        let params = self.store.snapshot();
        let mut ctx = FrameContext {
            params: &*params,
            params_version: self.store.version(),
            events: &mut self.events,
        };
        self.system.initialize(&mut ctx)?;
        self.seen_version = self.store.version();
        self.initialized = true;
        tracing::info!(system = self.system.name(), "system initialized");
        Ok(())
    }

    /// Advance one frame with an explicit elapsed time
    pub fn run_frame(&mut self, elapsed: f64) -> Result<f64> {
        self.initialize()?;
        let dt = self.clock.advance(elapsed);
        self.update_system(dt)?;
        Ok(dt)
    }

    /// Advance one frame using wall-clock time
    pub fn tick(&mut self) -> Result<f64> {
        self.initialize()?;
        let dt = self.clock.tick();
        self.update_system(dt)?;
        Ok(dt)
    }

    fn update_system(&mut self, dt: f64) -> Result<()> {
        let version = self.store.version();
        if self.store.changed_since(self.seen_version) {
            self.events.push(RuntimeEvent::ParamsChanged { version });
            self.seen_version = version;
        }

        let params = self.store.snapshot();
        let mut ctx = FrameContext {
            params: &*params,
            params_version: version,
            events: &mut self.events,
        };
        self.system.update(&mut ctx, dt).map_err(|e| {
            SwarmError::RuntimeError(format!("{} failed: {e}", self.system.name()))
        })
    }

    /// Drain events raised since the last call
    pub fn drain_events(&mut self) -> Vec<RuntimeEvent> {
        self.events.drain()
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.system.shutdown()
    }
}

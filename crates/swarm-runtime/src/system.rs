//! Runtime system trait

use crate::event::EventBus;
use swarm_core::Result;

/// Everything a system may read or raise during one frame
pub struct FrameContext<'a, P> {
    /// Parameter snapshot for this frame; read-only
    pub params: &'a P,
    /// Version of `params` in the owning store
    pub params_version: u64,
    pub events: &'a mut EventBus,
}

/// A system that can be ticked by the frame loop
///
/// `FrameLoop` drives exactly one system, calling `update` once per frame
/// with the host-side elapsed time.
pub trait RuntimeSystem<P> {
    /// Called once before the first frame
    fn initialize(&mut self, ctx: &mut FrameContext<'_, P>) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, ctx: &mut FrameContext<'_, P>, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}

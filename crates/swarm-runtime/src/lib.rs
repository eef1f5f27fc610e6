//! Swarm Runtime - Frame loop infrastructure
//!
//! Provides the host-side building blocks that drive a simulation:
//! - `FrameClock`: wall-clock frame timer
//! - `ParamStore`: versioned, immutable parameter snapshots
//! - `RuntimeEvent` / `EventBus`: event queue drained by the host
//! - `RuntimeSystem`: trait for systems ticked once per frame
//! - `FrameLoop`: ties the above together for one system

mod clock;
mod event;
mod frame_loop;
mod store;
mod system;

pub use clock::{FrameClock, MAX_HOST_DELTA};
pub use event::{EventBus, RuntimeEvent};
pub use frame_loop::FrameLoop;
pub use store::ParamStore;
pub use system::{FrameContext, RuntimeSystem};

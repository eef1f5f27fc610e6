//! Versioned parameter snapshots
//!
//! The UI side publishes whole parameter objects; frame code polls the latest
//! snapshot once per frame and never sees a half-written value.

use std::sync::Arc;

/// Holds the current parameter snapshot and a version that increases on every publish.
pub struct ParamStore<P> {
    current: Arc<P>,
    version: u64,
}

impl<P> ParamStore<P> {
    pub fn new(initial: P) -> Self {
        Self {
            current: Arc::new(initial),
            version: 0,
        }
    }

    /// Replace the snapshot. Returns the new version.
    pub fn publish(&mut self, params: P) -> u64 {
        self.current = Arc::new(params);
        self.version += 1;
        tracing::debug!(version = self.version, "parameters published");
        self.version
    }

    /// Cheap handle to the current snapshot
    pub fn snapshot(&self) -> Arc<P> {
        Arc::clone(&self.current)
    }

    pub fn get(&self) -> &P {
        &self.current
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True if something was published after `version` was observed
    pub fn changed_since(&self, version: u64) -> bool {
        self.version > version
    }
}

impl<P: Clone> ParamStore<P> {
    /// Publish a copy of the current snapshot with `edit` applied
    pub fn update(&mut self, edit: impl FnOnce(&mut P)) -> u64 {
        let mut next = (*self.current).clone();
        edit(&mut next);
        self.publish(next)
    }
}

impl<P: Default> Default for ParamStore<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

//! Events raised by the frame loop and its systems

/// Something a host may want to react to after a frame
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    /// A new parameter snapshot was published since the previous frame
    ParamsChanged { version: u64 },
    /// A particle population was replaced wholesale
    PoolRebuilt { count: usize, generation: u64 },
    /// Stepping stopped; the simulation clock is frozen
    Paused,
    /// Stepping resumed after a pause
    Resumed,
}

/// Per-frame queue of `RuntimeEvent`s, filled by the loop and its system and
/// emptied by the host between frames
#[derive(Debug, Default)]
pub struct EventBus {
    pending: Vec<RuntimeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: RuntimeEvent) {
        self.pending.push(event);
    }

    /// Take everything raised so far, oldest first
    pub fn drain(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_hands_back_events_in_raise_order_once() {
        let mut bus = EventBus::new();
        bus.push(RuntimeEvent::ParamsChanged { version: 3 });
        bus.push(RuntimeEvent::PoolRebuilt {
            count: 10,
            generation: 2,
        });
        bus.push(RuntimeEvent::Paused);

        assert_eq!(
            bus.drain(),
            vec![
                RuntimeEvent::ParamsChanged { version: 3 },
                RuntimeEvent::PoolRebuilt {
                    count: 10,
                    generation: 2
                },
                RuntimeEvent::Paused,
            ]
        );
        assert!(bus.drain().is_empty());
    }
}

//! Random sources for particle spawning
//!
//! Spawning draws through the `RandomSource` trait so tests can replay exact
//! sequences; `ParticleRng` is the lightweight xorshift32 used at runtime.

/// A source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for ParticleRng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly, so the result never rounds up to 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f32(&mut self) -> f32 {
        (**self).next_f32()
    }
}

/// Replays a fixed sequence of unit floats, cycling when exhausted.
#[cfg(test)]
pub(crate) struct ReplayRng {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ReplayRng {
    pub(crate) fn new(values: Vec<f32>) -> Self {
        assert!(!values.is_empty());
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ReplayRng {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

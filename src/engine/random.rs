//! Injectable random sources

use std::collections::VecDeque;

use rand::Rng;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, then a fallback value forever.
///
/// The default fallback (just below 1.0) selects no threshold, so once the
/// script runs out every roll lands on the common tier with no modifiers.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: VecDeque<f64>,
    fallback: f64,
}

impl SequenceSource {
    pub const DEFAULT_FALLBACK: f64 = 0.999_999;

    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: Self::DEFAULT_FALLBACK,
        }
    }

    /// Change the value returned after the script is exhausted
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

/// A draw that selects the tier of weight `weight` when the table has no
/// tier between `weight` and `weight + 1`.
#[cfg(test)]
pub(crate) fn draw_for_weight(weight: u64) -> f64 {
    1.0 / (weight as f64 + 0.5)
}

use rand::Rng;

/// Uniform integer source used by emitters and the attractor jitter.
///
/// Degenerate ranges return the lower bound instead of panicking, so a
/// zero-width jitter or lifetime window simply yields a constant.
pub trait Entropy {
    /// Uniform draw from `[0, max)`.
    fn random_below(&mut self, max: i32) -> i32;

    /// Uniform draw from `[min, max)`.
    fn random_range(&mut self, min: i32, max: i32) -> i32;
}

impl<R: Rng + ?Sized> Entropy for R {
    fn random_below(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.gen_range(0..max)
    }

    fn random_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..max)
    }
}

/// Replays queued draws in order; falls back to the lower bound once drained.
#[cfg(test)]
pub(crate) struct ScriptedEntropy {
    draws: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl ScriptedEntropy {
    pub(crate) fn new(draws: &[i32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

// Not a `rand::Rng`, so no overlap with the blanket impl.
#[cfg(test)]
impl Entropy for ScriptedEntropy {
    fn random_below(&mut self, max: i32) -> i32 {
        self.random_range(0, max)
    }

    fn random_range(&mut self, min: i32, max: i32) -> i32 {
        let draw = self.draws.pop_front().unwrap_or(min);
        assert!(
            min >= max || (min..max).contains(&draw),
            "scripted draw {draw} outside [{min}, {max})"
        );
        draw
    }
}

//! Rolling frame statistics for the preview graphs.

/// Fixed-size window over the most recent samples of one metric.
/// Once full, each push overwrites the oldest sample.
pub struct RingBuffer {
    samples: Vec<f32>,
    next: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            next: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        if self.samples.len() < self.capacity {
            self.samples.push(value);
        } else {
            self.samples[self.next] = value;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let (newer, older) = if self.samples.len() < self.capacity {
            (&self.samples[..], &[][..])
        } else {
            self.samples.split_at(self.next)
        };
        older.iter().chain(newer).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn last(&self) -> Option<f32> {
        self.iter().last()
    }

    pub fn max(&self) -> Option<f32> {
        self.samples.iter().copied().reduce(f32::max)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.next = 0;
    }
}

/// Live-particle count and frame energy, sampled every few ticks.
pub struct FrameStats {
    pub alive: RingBuffer,
    pub energy: RingBuffer,
    pub sample_interval: u32,
    pub tick_counter: u32,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            alive: RingBuffer::new(capacity),
            energy: RingBuffer::new(capacity),
            sample_interval: 2,
            tick_counter: 0,
        }
    }

    pub fn record(&mut self, alive: usize, energy: u64) {
        self.tick_counter += 1;
        if self.tick_counter % self.sample_interval.max(1) != 0 {
            return;
        }
        self.alive.push(alive as f32);
        self.energy.push(energy as f32);
    }

    /// Forget history, e.g. after switching effect.
    pub fn reset(&mut self) {
        self.alive.clear();
        self.energy.clear();
        self.tick_counter = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_iterates_in_insertion_order_after_wrap() {
        let mut buf = RingBuffer::new(3);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        buf.push(4.0);

        let values: Vec<f32> = buf.iter().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(buf.last(), Some(4.0));
        assert_eq!(buf.max(), Some(4.0));
    }

    #[test]
    fn cleared_buffer_is_empty() {
        let mut buf = RingBuffer::new(2);
        buf.push(5.0);
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.last(), None);
        assert_eq!(buf.max(), None);
    }

    #[test]
    fn stats_sample_every_interval() {
        let mut stats = FrameStats::new(8);
        stats.sample_interval = 3;

        stats.record(1, 10);
        stats.record(2, 20);
        assert_eq!(stats.alive.len(), 0);

        stats.record(3, 30);
        assert_eq!(stats.alive.iter().collect::<Vec<_>>(), vec![3.0]);
        assert_eq!(stats.energy.last(), Some(30.0));

        stats.reset();
        assert_eq!(stats.energy.len(), 0);
        assert_eq!(stats.tick_counter, 0);
    }
}

//! Fixed-capacity FIFO of recent samples.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> RollingWindow<T> {
    /// Capacity below 1 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append, evicting the oldest sample when full.
    pub fn push(&mut self, item: T) {
        while self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl RollingWindow<f64> {
    pub fn weighted_mean(&self) -> f64 {
        weighted_mean(self.items.iter().copied())
    }
}

/// Linearly recency-weighted mean: the i-th oldest sample (1-based) has weight i.
/// Empty input yields 0.0.
pub fn weighted_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (i, v) in values.into_iter().enumerate() {
        let w = (i + 1) as f64;
        weighted_sum += v * w;
        weight_total += w;
    }
    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    }
}

//! Fixed-capacity rolling window over prices.

use alphafx_core::Price;
use rust_decimal::Decimal;

/// Ring buffer of the most recent `capacity` prices.
///
/// Push is O(1): once full, the oldest element is overwritten in place.
/// The running sum is maintained incrementally so `mean()` is O(1) too;
/// `Decimal` arithmetic is exact, so the sum never drifts from the
/// window contents.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: Vec<Price>,
    capacity: usize,
    /// Index of the next write position.
    head: usize,
    len: usize,
    sum: Decimal,
}

impl RollingWindow {
    /// Create a window holding at most `capacity` values.
    ///
    /// Capacity must be non-zero; callers validate via `SignalConfig`.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "window capacity must be non-zero");
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            len: 0,
            sum: Decimal::ZERO,
        }
    }

    /// Append a price, evicting the oldest once at capacity.
    pub fn push(&mut self, price: Price) {
        if self.len < self.capacity {
            self.buf.push(price);
            self.len += 1;
        } else {
            let evicted = self.buf[self.head];
            self.sum -= evicted.inner();
            self.buf[self.head] = price;
        }
        self.sum += price.inner();
        self.head = (self.head + 1) % self.capacity;
    }

    /// Arithmetic mean of the currently held values.
    ///
    /// `None` only when the window is empty; a partially filled window
    /// averages over what it holds.
    pub fn mean(&self) -> Option<Decimal> {
        if self.len == 0 {
            return None;
        }
        Some(self.sum / Decimal::from(self.len as u64))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed value.
    pub fn last(&self) -> Option<Price> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head + self.capacity - 1) % self.capacity;
        Some(self.buf[idx])
    }

    /// Highest value currently held.
    pub fn high(&self) -> Option<Price> {
        self.buf[..self.len].iter().copied().max()
    }

    /// Lowest value currently held.
    pub fn low(&self) -> Option<Price> {
        self.buf[..self.len].iter().copied().min()
    }

    /// Held values in insertion order, oldest first.
    pub fn snapshot(&self) -> Vec<Price> {
        if self.len < self.capacity {
            return self.buf.clone();
        }
        let mut out = Vec::with_capacity(self.len);
        for i in 0..self.len {
            out.push(self.buf[(self.head + i) % self.capacity]);
        }
        out
    }
}

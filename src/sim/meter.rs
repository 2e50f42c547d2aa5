//! Bounded resource meter used for player health and ammo
//!
//! `0 <= current <= max` holds after every operation. Nothing here fails:
//! over- and under-flow clamp, and an unaffordable `consume` is a no-op.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    current: u32,
    max: u32,
}

impl Meter {
    /// A full meter
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// A meter starting at `current`, clamped to `max`
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Fill level in [0, 1] (a zero-capacity meter reads as empty)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Spend `amount` if available. Returns false (and changes nothing) otherwise.
    pub fn consume(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Refill by `amount`, capped at max
    pub fn regenerate(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Drain by `amount`, floored at zero
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

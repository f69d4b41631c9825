//! Match timer
//!
//! Counts the match down one second at a time. Elapsed time is accumulated
//! from the ticks fed to it, so every full second crossed produces exactly
//! one decrement no matter how the ticks are sized.

use smallvec::SmallVec;
use std::time::Duration;

use super::constants::{MATCH_DURATION_SECS, TIMER_STEP};

/// Result of feeding elapsed time to the timer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimerAdvance {
    /// Remaining seconds after each decrement, in order.
    pub published: SmallVec<[u32; 2]>,
    /// True only on the advance that brought the counter to zero.
    pub expired: bool,
}

#[derive(Debug, Clone)]
pub struct MatchTimer {
    remaining: u32,
    carry: Duration,
}

impl Default for MatchTimer {
    fn default() -> Self {
        Self::new(MATCH_DURATION_SECS)
    }
}

impl MatchTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            carry: Duration::ZERO,
        }
    }

    /// Whole seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Feed `elapsed` match time. Once at zero the timer stays put.
    pub fn advance(&mut self, elapsed: Duration) -> TimerAdvance {
        let mut result = TimerAdvance::default();
        if self.is_expired() {
            return result;
        }

        self.carry += elapsed;
        while self.carry >= TIMER_STEP && self.remaining > 0 {
            self.carry -= TIMER_STEP;
            self.remaining -= 1;
            result.published.push(self.remaining);
        }

        if self.is_expired() {
            self.carry = Duration::ZERO;
            result.expired = true;
        }
        result
    }
}

//! # Cycle clock
//!
//! Simulated time for one run. The clock only jumps forward to the cycle of
//! the next event; it never ticks on its own.

use exchange_core::Cycle;

use crate::error::InvariantViolation;

#[derive(Debug, Clone, Default)]
pub struct CycleClock {
    now: Cycle,
}

impl CycleClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> Cycle {
        self.now
    }

    /// Moves to `next`. Staying on the current cycle is allowed (zero
    /// duration launches complete without time passing); moving back is not.
    pub fn advance_to(&mut self, next: Cycle) -> Result<(), InvariantViolation> {
        if next < self.now {
            return Err(InvariantViolation::TimeReversal {
                from: self.now,
                to: next,
            });
        }
        self.now = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        assert_eq!(CycleClock::new().now(), 0);
    }

    #[test]
    fn clock_jumps_forward_and_may_stay() {
        let mut clock = CycleClock::new();
        clock.advance_to(1_000_000).unwrap();
        clock.advance_to(1_000_000).unwrap();
        assert_eq!(clock.now(), 1_000_000);
    }

    #[test]
    fn clock_refuses_to_go_back() {
        let mut clock = CycleClock::new();
        clock.advance_to(5).unwrap();
        assert_eq!(
            clock.advance_to(4).unwrap_err(),
            InvariantViolation::TimeReversal { from: 5, to: 4 }
        );
        assert_eq!(clock.now(), 5);
    }
}

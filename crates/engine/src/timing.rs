//! Gravity timing: how often the active piece falls, and when it last did.
//!
//! The update task runs far more often than gravity, so every update asks the
//! [`FallTimer`] whether a fall is due. Tick arithmetic wraps.

use crate::types::{Tick, FALL_PERIOD, MIN_FALL_PERIOD, SPEED_UP_PER_CLEAR_LINE};

/// Fall period as a function of total cleared lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyCurve {
    pub base_period: Tick,
    pub min_period: Tick,
    pub speed_up_per_line: Tick,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_period: FALL_PERIOD,
            min_period: MIN_FALL_PERIOD,
            speed_up_per_line: SPEED_UP_PER_CLEAR_LINE,
        }
    }
}

impl DifficultyCurve {
    /// `max(base - lines * speed_up, min)`, never underflowing.
    pub fn effective_period(&self, cleared_lines: u32) -> Tick {
        let speed_up = cleared_lines.saturating_mul(self.speed_up_per_line);
        self.base_period
            .saturating_sub(speed_up)
            .max(self.min_period)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallTimer {
    curve: DifficultyCurve,
    last_fall: Tick,
}

impl FallTimer {
    pub fn new(curve: DifficultyCurve) -> Self {
        Self {
            curve,
            last_fall: 0,
        }
    }

    pub fn last_fall(&self) -> Tick {
        self.last_fall
    }

    pub fn should_fall(&self, now: Tick, cleared_lines: u32) -> bool {
        now.wrapping_sub(self.last_fall) >= self.curve.effective_period(cleared_lines)
    }

    pub fn mark_fall(&mut self, now: Tick) {
        self.last_fall = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_curve() {
        let curve = DifficultyCurve::default();
        assert_eq!(curve.effective_period(0), 600);
        assert_eq!(curve.effective_period(10), 400);
        assert_eq!(curve.effective_period(22), 160);
        assert_eq!(curve.effective_period(23), 150);
        assert_eq!(curve.effective_period(1000), 150);
        assert_eq!(curve.effective_period(u32::MAX), 150);
    }

    #[test]
    fn test_fall_due_after_period() {
        let mut timer = FallTimer::new(DifficultyCurve::default());
        timer.mark_fall(1_000);
        assert!(!timer.should_fall(1_000, 0));
        assert!(!timer.should_fall(1_599, 0));
        assert!(timer.should_fall(1_600, 0));
        // Ten cleared lines shorten the period to 400.
        assert!(timer.should_fall(1_400, 10));
    }

    #[test]
    fn test_fall_across_tick_wrap() {
        let mut timer = FallTimer::new(DifficultyCurve::default());
        timer.mark_fall(u32::MAX - 100);
        assert!(!timer.should_fall(u32::MAX, 0));
        assert!(!timer.should_fall(498, 0));
        assert!(timer.should_fall(499, 0));
    }

    proptest! {
        #[test]
        fn prop_period_bounded(lines in any::<u32>()) {
            let curve = DifficultyCurve::default();
            let p = curve.effective_period(lines);
            prop_assert!(p >= MIN_FALL_PERIOD);
            prop_assert!(p <= FALL_PERIOD);
        }

        #[test]
        fn prop_period_monotone(a in 0u32..10_000, b in 0u32..10_000) {
            let curve = DifficultyCurve::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve.effective_period(hi) <= curve.effective_period(lo));
        }

        #[test]
        fn prop_wrapping_elapsed(start in any::<u32>(), elapsed in 0u32..10_000) {
            let mut timer = FallTimer::new(DifficultyCurve::default());
            timer.mark_fall(start);
            let now = start.wrapping_add(elapsed);
            prop_assert_eq!(timer.should_fall(now, 0), elapsed >= FALL_PERIOD);
        }
    }
}

//! Interval scheduler
//!
//! Two independent timers on a wrapping `u32` millisecond clock:
//!
//! - update: sensor read + display refresh, always armed
//! - fluctuation: simulated random-walk step, only checked in fake mode
//!
//! A timer that fires restarts from the current time, so each poll runs
//! at most one cycle of each kind no matter how late it is.

use crate::config::TimingConfig;

/// Periodic timer on a wrapping millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTimer {
    interval_ms: u32,
    last_ms: u32,
}

impl IntervalTimer {
    /// Create a timer whose period counts from time zero
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    /// Period in milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time of the last firing
    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }

    /// Fire if a full interval has elapsed since the last firing
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// What a poll asks the caller to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Run the sensor update and redraw the display
    pub update: bool,
    /// Advance the simulated series
    pub fluctuate: bool,
}

impl Tick {
    /// Nothing to do
    pub fn is_idle(&self) -> bool {
        !self.update && !self.fluctuate
    }
}

/// Update and fluctuation timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scheduler {
    update: IntervalTimer,
    fluctuation: IntervalTimer,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}

impl Scheduler {
    /// Create both timers from the timing configuration
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            update: IntervalTimer::new(timing.update_interval_ms),
            fluctuation: IntervalTimer::new(timing.fluctuation_interval_ms),
        }
    }

    /// Check both timers
    ///
    /// The update timer is checked first. The fluctuation timer is only
    /// looked at while `simulation_enabled` is set, so it does not
    /// advance in real-sensor mode.
    pub fn poll(&mut self, now_ms: u32, simulation_enabled: bool) -> Tick {
        let update = self.update.poll(now_ms);
        let fluctuate = simulation_enabled && self.fluctuation.poll(now_ms);
        Tick { update, fluctuate }
    }

    /// Fluctuation timer state
    pub fn fluctuation_timer(&self) -> &IntervalTimer {
        &self.fluctuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_exact_interval() {
        let mut timer = IntervalTimer::new(2000);
        assert!(!timer.poll(1999));
        assert!(timer.poll(2000));
        assert_eq!(timer.last_ms(), 2000);
        assert!(!timer.poll(3999));
        assert!(timer.poll(4000));
    }

    #[test]
    fn test_late_poll_fires_once() {
        let mut timer = IntervalTimer::new(2000);
        // Three intervals elapsed, still only one firing
        assert!(timer.poll(6500));
        assert!(!timer.poll(6501));
        // Next period counts from the late firing
        assert!(!timer.poll(8499));
        assert!(timer.poll(8500));
    }

    #[test]
    fn test_wraparound() {
        let mut timer = IntervalTimer::new(1000);
        assert!(timer.poll(u32::MAX - 499));
        assert!(!timer.poll(u32::MAX));
        assert!(!timer.poll(499));
        assert!(timer.poll(500));
    }

    #[test]
    fn test_one_update_per_boundary() {
        let mut scheduler = Scheduler::default();
        let mut updates = 0;
        // Poll every millisecond for ten seconds
        for now in 0..=10_000u32 {
            if scheduler.poll(now, false).update {
                updates += 1;
            }
        }
        assert_eq!(updates, 5);
    }

    #[test]
    fn test_fluctuation_only_in_simulation() {
        let mut scheduler = Scheduler::default();
        assert_eq!(scheduler.poll(1000, false), Tick::default());
        assert_eq!(scheduler.fluctuation_timer().last_ms(), 0);

        let tick = scheduler.poll(1000, true);
        assert!(tick.fluctuate);
        assert!(!tick.update);

        let tick = scheduler.poll(2000, true);
        assert_eq!(
            tick,
            Tick {
                update: true,
                fluctuate: true
            }
        );
        assert!(scheduler.poll(2500, true).is_idle());
    }

    #[test]
    fn test_independent_cadences() {
        let mut scheduler = Scheduler::default();
        let mut updates = 0;
        let mut steps = 0;
        for now in (0..=6000u32).step_by(10) {
            let tick = scheduler.poll(now, true);
            updates += tick.update as u32;
            steps += tick.fluctuate as u32;
        }
        assert_eq!(updates, 3);
        assert_eq!(steps, 6);
    }
}

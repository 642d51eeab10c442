//! Scheduler dispatch and shared tick types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::protocol::{Protocol, StimulationType};
use crate::standard::StandardScheduler;
use crate::theta::ThetaBurstScheduler;

/// Slack for time-accumulator comparisons. Keeps decimal tick sums (ten
/// 0.01 s ticks against a 0.1 s interval) from under-emitting by one pulse.
pub(crate) const TIMING_EPSILON: f64 = 1e-9;

/// Queryable inter-train-interval state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntervalState {
    /// Whether the session is currently paused between trains.
    pub in_inter_train_interval: bool,
    /// Fraction of the pause elapsed, in `[0, 1]`. Zero while active.
    pub progress: f64,
    /// Seconds of pause remaining. Zero while active.
    pub remaining_seconds: f64,
}

impl IntervalState {
    /// The state outside any pause.
    #[must_use]
    pub const fn active() -> Self {
        Self {
            in_inter_train_interval: false,
            progress: 0.0,
            remaining_seconds: 0.0,
        }
    }
}

/// A pulse scheduler for any protocol type.
///
/// Dispatches to the [`StandardScheduler`] or [`ThetaBurstScheduler`]
/// according to [`Protocol::stimulation_type`].
///
/// # Example
///
/// ```
/// use stim_pulse::{Protocol, PulseScheduler};
///
/// let mut scheduler = PulseScheduler::new(Protocol::intermittent_theta_burst(600).unwrap());
/// assert_eq!(scheduler.tick(0.05), 3);
/// scheduler.reset();
/// assert_eq!(scheduler.total_delivered(), 0);
/// ```
#[derive(Debug, Clone)]
pub enum PulseScheduler {
    /// Fixed-frequency trains.
    Standard(StandardScheduler),
    /// Theta-burst patterns (intermittent or continuous).
    ThetaBurst(ThetaBurstScheduler),
}

impl PulseScheduler {
    /// Create the scheduler matching the protocol's stimulation type.
    #[must_use]
    pub fn new(protocol: Protocol) -> Self {
        match protocol.stimulation_type() {
            StimulationType::Standard => Self::Standard(StandardScheduler::new(protocol)),
            StimulationType::IntermittentThetaBurst | StimulationType::ContinuousThetaBurst => {
                Self::ThetaBurst(ThetaBurstScheduler::new(protocol))
            }
        }
    }

    /// The protocol being run.
    #[must_use]
    pub const fn protocol(&self) -> &Protocol {
        match self {
            Self::Standard(s) => s.protocol(),
            Self::ThetaBurst(s) => s.protocol(),
        }
    }

    /// Advance by `dt` seconds; returns pulses emitted this tick.
    pub fn tick(&mut self, dt: f64) -> u32 {
        match self {
            Self::Standard(s) => s.tick(dt),
            Self::ThetaBurst(s) => s.tick(dt),
        }
    }

    /// The current inter-train-interval state.
    #[must_use]
    pub fn interval_state(&self) -> IntervalState {
        match self {
            Self::Standard(s) => s.interval_state(),
            Self::ThetaBurst(s) => s.interval_state(),
        }
    }

    /// Cumulative pulses delivered.
    #[must_use]
    pub const fn total_delivered(&self) -> u32 {
        match self {
            Self::Standard(s) => s.total_delivered(),
            Self::ThetaBurst(s) => s.total_delivered(),
        }
    }

    /// Whether the pulse budget is exhausted.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        match self {
            Self::Standard(s) => s.is_complete(),
            Self::ThetaBurst(s) => s.is_complete(),
        }
    }

    /// Return to zero state.
    pub fn reset(&mut self) {
        match self {
            Self::Standard(s) => s.reset(),
            Self::ThetaBurst(s) => s.reset(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_stimulation_type() {
        let standard = PulseScheduler::new(Protocol::standard(10.0, 40, 11.0, 100).unwrap());
        assert!(matches!(standard, PulseScheduler::Standard(_)));

        let itbs = PulseScheduler::new(Protocol::intermittent_theta_burst(600).unwrap());
        assert!(matches!(itbs, PulseScheduler::ThetaBurst(_)));

        let ctbs = PulseScheduler::new(Protocol::continuous_theta_burst(600).unwrap());
        assert!(matches!(ctbs, PulseScheduler::ThetaBurst(_)));
    }

    #[test]
    fn active_state_is_zeroed() {
        let state = IntervalState::active();
        assert!(!state.in_inter_train_interval);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.remaining_seconds, 0.0);
    }

    #[test]
    fn reset_through_dispatch() {
        let mut scheduler = PulseScheduler::new(Protocol::standard(10.0, 40, 11.0, 100).unwrap());
        scheduler.tick(2.0);
        assert!(scheduler.total_delivered() > 0);
        scheduler.reset();
        assert_eq!(scheduler.total_delivered(), 0);
    }
}

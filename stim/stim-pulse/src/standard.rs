//! Fixed-frequency train scheduler.

use tracing::debug;

use crate::protocol::Protocol;
use crate::scheduler::{IntervalState, TIMING_EPSILON};

/// Scheduler for standard fixed-frequency protocols.
///
/// Accumulates tick time against the pulse interval `1 / frequency`,
/// emitting a pulse per full interval. When a train completes and pulses
/// remain, the scheduler enters the inter-train interval and stops emitting
/// for that tick; with a zero ITI the next train continues within the same
/// tick.
///
/// # Example
///
/// ```
/// use stim_pulse::{Protocol, StandardScheduler};
///
/// let protocol = Protocol::standard(10.0, 40, 11.0, 3000).unwrap();
/// let mut scheduler = StandardScheduler::new(protocol);
///
/// // One full train accumulates over 4 s
/// let mut emitted = 0;
/// for _ in 0..400 {
///     emitted += scheduler.tick(0.01);
/// }
/// assert_eq!(emitted, 40);
/// assert!(scheduler.interval_state().in_inter_train_interval);
/// ```
#[derive(Debug, Clone)]
pub struct StandardScheduler {
    protocol: Protocol,
    pulse_interval: f64,
    pulse_accumulator: f64,
    train_pulses: u32,
    total_delivered: u32,
    iti_accumulator: f64,
    in_iti: bool,
}

impl StandardScheduler {
    /// Create a scheduler at zero state.
    #[must_use]
    pub fn new(protocol: Protocol) -> Self {
        Self {
            pulse_interval: 1.0 / protocol.frequency(),
            protocol,
            pulse_accumulator: 0.0,
            train_pulses: 0,
            total_delivered: 0,
            iti_accumulator: 0.0,
            in_iti: false,
        }
    }

    /// The protocol being run.
    #[must_use]
    pub const fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Cumulative pulses delivered.
    #[must_use]
    pub const fn total_delivered(&self) -> u32 {
        self.total_delivered
    }

    /// Whether the pulse budget is exhausted.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total_delivered >= self.protocol.total_pulses()
    }

    /// Return to zero state.
    pub fn reset(&mut self) {
        self.pulse_accumulator = 0.0;
        self.train_pulses = 0;
        self.total_delivered = 0;
        self.iti_accumulator = 0.0;
        self.in_iti = false;
    }

    /// The current inter-train-interval state.
    #[must_use]
    pub fn interval_state(&self) -> IntervalState {
        if self.in_iti {
            let iti = self.protocol.inter_train_interval();
            IntervalState {
                in_inter_train_interval: true,
                progress: (self.iti_accumulator / iti).clamp(0.0, 1.0),
                remaining_seconds: (iti - self.iti_accumulator).max(0.0),
            }
        } else {
            IntervalState::active()
        }
    }

    /// Advance by `dt` seconds; returns pulses emitted this tick.
    ///
    /// Tolerates deltas spanning many pulse intervals or a whole ITI; a
    /// non-finite or non-positive delta is a no-op.
    pub fn tick(&mut self, dt: f64) -> u32 {
        if !dt.is_finite() || dt <= 0.0 || self.is_complete() {
            return 0;
        }

        let mut remaining = dt;
        if self.in_iti {
            let needed = self.protocol.inter_train_interval() - self.iti_accumulator;
            if remaining + TIMING_EPSILON < needed {
                self.iti_accumulator += remaining;
                return 0;
            }
            // Interval complete: resume with the leftover time
            remaining -= needed;
            self.in_iti = false;
            self.iti_accumulator = 0.0;
            self.train_pulses = 0;
            debug!(
                delivered = self.total_delivered,
                "inter-train interval complete"
            );
            if remaining <= 0.0 {
                return 0;
            }
        }

        self.pulse_accumulator += remaining;

        let mut emitted = 0;
        // The epsilon keeps decimal tick sums (e.g. 10 x 0.01 against a
        // 0.1 s interval) from under-emitting by one pulse.
        while self.pulse_accumulator + TIMING_EPSILON >= self.pulse_interval && !self.is_complete()
        {
            self.pulse_accumulator -= self.pulse_interval;
            emitted += 1;
            self.total_delivered += 1;
            self.train_pulses += 1;

            if self.train_pulses == self.protocol.pulses_per_train() {
                if !self.is_complete() && self.protocol.inter_train_interval() > 0.0 {
                    // Enter the pause and stop emitting this tick; leftover
                    // accumulated time does not bleed into the interval
                    self.in_iti = true;
                    self.iti_accumulator = 0.0;
                    self.pulse_accumulator = 0.0;
                    debug!(delivered = self.total_delivered, "train complete, entering ITI");
                    break;
                }
                self.train_pulses = 0;
            }
        }

        emitted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reference_scheduler() -> StandardScheduler {
        StandardScheduler::new(Protocol::standard(10.0, 40, 11.0, 3000).unwrap())
    }

    #[test]
    fn emits_at_the_protocol_frequency() {
        let mut scheduler = reference_scheduler();
        // 1 s at 10 Hz
        let mut emitted = 0;
        for _ in 0..100 {
            emitted += scheduler.tick(0.01);
        }
        assert_eq!(emitted, 10);
    }

    #[test]
    fn multi_interval_delta_emits_in_one_tick() {
        let mut scheduler = reference_scheduler();
        assert_eq!(scheduler.tick(1.05), 10);
    }

    #[test]
    fn train_boundary_enters_iti_and_stops() {
        let mut scheduler = reference_scheduler();
        // A huge delta still stops at the train boundary
        assert_eq!(scheduler.tick(1000.0), 40);
        assert!(scheduler.interval_state().in_inter_train_interval);
        // Still paused partway through the interval
        assert_eq!(scheduler.tick(5.0), 0);
        let state = scheduler.interval_state();
        assert!(state.in_inter_train_interval);
        assert!((state.remaining_seconds - 6.0).abs() < 1e-9);
        assert!((state.progress - 5.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn iti_completion_resumes_within_the_same_tick() {
        let mut scheduler = reference_scheduler();
        scheduler.tick(1000.0); // train 1, into ITI
        // 11 s of ITI plus 0.35 s of the next train
        let emitted = scheduler.tick(11.35);
        assert_eq!(emitted, 3);
    }

    #[test]
    fn zero_iti_rolls_straight_into_the_next_train() {
        let protocol = Protocol::standard(10.0, 40, 0.0, 3000).unwrap();
        let mut scheduler = StandardScheduler::new(protocol);
        // 100 intervals span two-and-a-half trains with no pause
        assert_eq!(scheduler.tick(10.0), 100);
        assert!(!scheduler.interval_state().in_inter_train_interval);
    }

    #[test]
    fn never_exceeds_total_pulses() {
        let protocol = Protocol::standard(100.0, 10, 0.5, 55).unwrap();
        let mut scheduler = StandardScheduler::new(protocol);
        let mut total = 0;
        for _ in 0..10_000 {
            total += scheduler.tick(0.7);
        }
        assert_eq!(total, 55);
        assert!(scheduler.is_complete());
        assert_eq!(scheduler.tick(100.0), 0);
    }

    #[test]
    fn session_duration_matches_emission_span() {
        let mut scheduler = reference_scheduler();
        let dt = 0.005;
        let mut time = 0.0;
        let mut last_pulse_time = 0.0;
        while !scheduler.is_complete() {
            let emitted = scheduler.tick(dt);
            time += dt;
            if emitted > 0 {
                last_pulse_time = time;
            }
            assert!(time < 2000.0, "session failed to complete");
        }
        let expected = scheduler.protocol().session_duration();
        assert!(
            (last_pulse_time - expected).abs() <= dt + 1e-9,
            "span {last_pulse_time} vs expected {expected}"
        );
    }

    #[test]
    fn no_pulses_during_iti_windows() {
        let mut scheduler = reference_scheduler();
        let dt = 0.01;
        loop {
            let emitted = scheduler.tick(dt);
            if scheduler.interval_state().in_inter_train_interval {
                assert_eq!(scheduler.tick(dt), 0, "pulse emitted inside ITI");
                break;
            }
            if emitted > 0 && scheduler.total_delivered() > 40 {
                break;
            }
        }
    }

    #[test]
    fn reset_returns_to_zero_state() {
        let mut scheduler = reference_scheduler();
        scheduler.tick(1000.0);
        scheduler.reset();
        assert_eq!(scheduler.total_delivered(), 0);
        assert!(!scheduler.interval_state().in_inter_train_interval);
        assert_eq!(scheduler.tick(0.1), 1);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut scheduler = reference_scheduler();
        assert_eq!(scheduler.tick(f64::NAN), 0);
        assert_eq!(scheduler.tick(f64::INFINITY), 0);
        assert_eq!(scheduler.tick(-1.0), 0);
        assert_eq!(scheduler.total_delivered(), 0);
    }
}

//! Theta-burst scheduler.

use tracing::debug;

use crate::protocol::{Protocol, StimulationType};
use crate::scheduler::{IntervalState, TIMING_EPSILON};

/// Pulse rate inside a burst, Hz.
pub const THETA_INTRA_BURST_RATE: f64 = 50.0;

/// Pulses per burst.
pub const THETA_PULSES_PER_BURST: u32 = 3;

/// Burst repetition rate, Hz.
pub const THETA_BURST_RATE: f64 = 5.0;

/// Seconds between burst onsets (`1 / THETA_BURST_RATE`).
pub const THETA_BURST_PERIOD: f64 = 0.2;

/// Seconds between pulses inside a burst (`1 / THETA_INTRA_BURST_RATE`).
pub const THETA_INTRA_BURST_PERIOD: f64 = 0.02;

/// Active-train length for intermittent theta burst, seconds.
pub const ITBS_TRAIN_DURATION: f64 = 2.0;

/// Fixed pause between intermittent theta-burst trains, seconds.
pub const ITBS_INTER_TRAIN_INTERVAL: f64 = 8.0;

/// Bursts in one intermittent train (`2 s x 5 Hz`).
pub const ITBS_BURSTS_PER_TRAIN: u32 = 10;

/// Pulses in one intermittent train.
pub const ITBS_PULSES_PER_TRAIN: u32 = ITBS_BURSTS_PER_TRAIN * THETA_PULSES_PER_BURST;

/// Scheduler for the theta-burst patterns.
///
/// Runs the same tick contract as the standard scheduler at two nested
/// timescales: bursts repeat at 5 Hz and pulses within a burst at 50 Hz.
/// Intermittent (iTBS) alternates 2 s active trains with fixed 8 s pauses;
/// continuous (cTBS) bursts straight through to the pulse budget.
///
/// # Example
///
/// ```
/// use stim_pulse::{Protocol, ThetaBurstScheduler};
///
/// let protocol = Protocol::intermittent_theta_burst(600).unwrap();
/// let mut scheduler = ThetaBurstScheduler::new(protocol);
///
/// // The first burst fires its three pulses inside 50 ms
/// assert_eq!(scheduler.tick(0.05), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ThetaBurstScheduler {
    protocol: Protocol,
    intermittent: bool,
    /// Elapsed time within the current active train.
    train_time: f64,
    /// Bursts started in the current train (whole session for cTBS).
    burst_index: u32,
    /// Pulses emitted in the current burst.
    pulse_index: u32,
    total_delivered: u32,
    in_iti: bool,
    iti_accumulator: f64,
}

impl ThetaBurstScheduler {
    /// Create a scheduler at zero state.
    ///
    /// A protocol with `StimulationType::Standard` is driven as continuous
    /// theta burst; callers normally construct through
    /// [`crate::PulseScheduler::new`], which routes by type.
    #[must_use]
    pub fn new(protocol: Protocol) -> Self {
        Self {
            intermittent: protocol.stimulation_type() == StimulationType::IntermittentThetaBurst,
            protocol,
            train_time: 0.0,
            burst_index: 0,
            pulse_index: 0,
            total_delivered: 0,
            in_iti: false,
            iti_accumulator: 0.0,
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
        self.train_time = 0.0;
        self.burst_index = 0;
        self.pulse_index = 0;
        self.total_delivered = 0;
        self.in_iti = false;
        self.iti_accumulator = 0.0;
    }

    /// The current inter-train-interval state.
    #[must_use]
    pub fn interval_state(&self) -> IntervalState {
        if self.in_iti {
            IntervalState {
                in_inter_train_interval: true,
                progress: (self.iti_accumulator / ITBS_INTER_TRAIN_INTERVAL).clamp(0.0, 1.0),
                remaining_seconds: (ITBS_INTER_TRAIN_INTERVAL - self.iti_accumulator).max(0.0),
            }
        } else {
            IntervalState::active()
        }
    }

    /// Advance by `dt` seconds; returns pulses emitted this tick.
    ///
    /// Tolerates deltas spanning whole trains and pauses; a non-finite or
    /// non-positive delta is a no-op.
    pub fn tick(&mut self, dt: f64) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        let mut emitted = 0;
        let mut remaining = dt;

        while !self.is_complete() {
            if self.in_iti {
                let needed = ITBS_INTER_TRAIN_INTERVAL - self.iti_accumulator;
                if remaining + TIMING_EPSILON < needed {
                    self.iti_accumulator += remaining;
                    return emitted;
                }
                remaining -= needed;
                self.in_iti = false;
                self.iti_accumulator = 0.0;
                self.train_time = 0.0;
                self.burst_index = 0;
                self.pulse_index = 0;
                debug!(
                    delivered = self.total_delivered,
                    "theta-burst pause complete"
                );
                continue;
            }

            // Active window exhausted (intermittent only): run out the dead
            // time at the tail of the 2 s train, then pause.
            if self.intermittent && self.burst_index >= ITBS_BURSTS_PER_TRAIN {
                let to_train_end = ITBS_TRAIN_DURATION - self.train_time;
                if remaining + TIMING_EPSILON < to_train_end {
                    self.train_time += remaining;
                    return emitted;
                }
                remaining -= to_train_end.max(0.0);
                self.in_iti = true;
                self.iti_accumulator = 0.0;
                debug!(
                    delivered = self.total_delivered,
                    "theta-burst train complete, entering pause"
                );
                continue;
            }

            // Next pulse time within the train, from the two nested rates
            let next_pulse = f64::from(self.burst_index).mul_add(
                THETA_BURST_PERIOD,
                f64::from(self.pulse_index) * THETA_INTRA_BURST_PERIOD,
            );
            let wait = next_pulse - self.train_time;
            if remaining + TIMING_EPSILON < wait {
                self.train_time += remaining;
                return emitted;
            }

            remaining -= wait.max(0.0);
            self.train_time = next_pulse;
            emitted += 1;
            self.total_delivered += 1;
            self.pulse_index += 1;
            if self.pulse_index == THETA_PULSES_PER_BURST {
                self.pulse_index = 0;
                self.burst_index += 1;
            }
        }

        emitted
    }
}
